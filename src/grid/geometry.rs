use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::LvoxError;
use na::{Point3, Vector3};

/// The geometry of a regular voxel grid.
///
/// The voxel with integer coordinates `(x, y, z)` spans the box
/// `[origin + (x, y, z) ∘ cell_size, origin + (x + 1, y + 1, z + 1) ∘ cell_size]`
/// and is stored at the linear index `x + y * nx + z * nx * ny`.
///
/// A geometry always has at least one cell and a strictly positive cell size:
/// both are checked at construction.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use lvox3d::grid::GridGeometry;
/// use nalgebra::{Point3, Vector3};
///
/// let geometry = GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::new(10, 10, 10)).unwrap();
///
/// assert_eq!(geometry.num_cells(), 1000);
/// assert_eq!(geometry.linear_index(&Point3::new(1, 2, 3)), 321);
/// assert_eq!(geometry.voxel_at_point(&Point3::new(1.5, 2.5, 3.5)), Some(Point3::new(1, 2, 3)));
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridGeometry {
    origin: Point<Real>,
    cell_size: Vector<Real>,
    dims: Vector3<usize>,
}

impl GridGeometry {
    /// Creates a grid geometry.
    ///
    /// # Arguments
    ///
    /// * `origin` - The minimum corner of the grid.
    /// * `cell_size` - The size of a voxel along each axis.
    /// * `dims` - The number of voxels along each axis.
    ///
    /// Fails with [`LvoxError::InvalidGrid`] if a cell size is not strictly
    /// positive or if a dimension is zero.
    pub fn new(
        origin: Point<Real>,
        cell_size: Vector<Real>,
        dims: Vector3<usize>,
    ) -> Result<Self, LvoxError> {
        if cell_size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(LvoxError::InvalidGrid(
                "the cell size must be finite and strictly positive",
            ));
        }

        if dims.iter().any(|d| *d == 0) {
            return Err(LvoxError::InvalidGrid(
                "the grid must have at least one cell along each axis",
            ));
        }

        if dims
            .x
            .checked_mul(dims.y)
            .and_then(|n| n.checked_mul(dims.z))
            .is_none()
        {
            return Err(LvoxError::InvalidGrid("the number of cells overflows"));
        }

        Ok(Self {
            origin,
            cell_size,
            dims,
        })
    }

    /// Creates a grid geometry with cubic voxels of side `resolution`.
    pub fn with_resolution(
        origin: Point<Real>,
        resolution: Real,
        dims: Vector3<usize>,
    ) -> Result<Self, LvoxError> {
        Self::new(origin, Vector::repeat(resolution), dims)
    }

    /// Creates the smallest grid of cubic voxels of side `resolution` covering `aabb`.
    ///
    /// The grid origin is `aabb.mins`. Flat boxes still get one layer of voxels
    /// along their flat axes.
    pub fn from_aabb(aabb: &Aabb, resolution: Real) -> Result<Self, LvoxError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(LvoxError::InvalidGrid(
                "the resolution must be finite and strictly positive",
            ));
        }

        if !aabb.is_valid() {
            return Err(LvoxError::InvalidGrid("the bounding box is empty"));
        }

        let dims = aabb
            .extents()
            .map(|e| ((e / resolution).ceil() as usize).max(1));
        Self::with_resolution(aabb.mins, resolution, dims)
    }

    /// The minimum corner of the grid.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The size of a voxel along each axis.
    #[inline]
    pub fn cell_size(&self) -> Vector<Real> {
        self.cell_size
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn dims(&self) -> Vector3<usize> {
        self.dims
    }

    /// The total number of voxels.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.dims.x * self.dims.y * self.dims.z
    }

    /// The bounding box of the grid.
    pub fn aabb(&self) -> Aabb {
        let extents = self
            .cell_size
            .component_mul(&self.dims.map(|d| d as Real));
        Aabb::new(self.origin, self.origin + extents)
    }

    /// The linear index of the voxel with the given coordinates.
    ///
    /// The coordinates must lie inside of the grid.
    #[inline]
    pub fn linear_index(&self, coords: &Point3<usize>) -> usize {
        debug_assert!(self.contains_coords(&coords.map(|c| c as isize)));
        coords.x + coords.y * self.dims.x + coords.z * self.dims.x * self.dims.y
    }

    /// The coordinates of the voxel with the given linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> Point3<usize> {
        debug_assert!(index < self.num_cells());
        let slice = self.dims.x * self.dims.y;
        let z = index / slice;
        let rem = index % slice;
        Point3::new(rem % self.dims.x, rem / self.dims.x, z)
    }

    /// Are the given (possibly negative) coordinates inside of the grid?
    #[inline]
    pub fn contains_coords(&self, coords: &Point3<isize>) -> bool {
        (0..DIM).all(|i| coords[i] >= 0 && (coords[i] as usize) < self.dims[i])
    }

    /// The coordinates of the voxel containing `point`.
    ///
    /// Points lying on the maximum faces of the grid belong to the last voxel
    /// along that axis. Returns `None` for points outside of the grid.
    pub fn voxel_at_point(&self, point: &Point<Real>) -> Option<Point3<usize>> {
        let local = (point - self.origin).component_div(&self.cell_size);
        let mut coords = Point3::origin();

        for i in 0..DIM {
            let cell = local[i].floor();

            // Written so that `NaN` is rejected too.
            if !(cell >= 0.0) {
                return None;
            }

            let cell = cell as usize;

            coords[i] = if cell < self.dims[i] {
                cell
            } else if cell == self.dims[i] && local[i] == self.dims[i] as Real {
                cell - 1
            } else {
                return None;
            };
        }

        Some(coords)
    }

    /// The linear index of the voxel containing `point`, if any.
    #[inline]
    pub fn index_at_point(&self, point: &Point<Real>) -> Option<usize> {
        self.voxel_at_point(point)
            .map(|coords| self.linear_index(&coords))
    }

    /// The center of the voxel with the given coordinates.
    #[inline]
    pub fn voxel_center(&self, coords: &Point3<usize>) -> Point<Real> {
        let coords = coords.coords.map(|c| c as Real + 0.5);
        self.origin + coords.component_mul(&self.cell_size)
    }

    /// Do `self` and `other` describe the same voxels?
    #[inline]
    pub fn is_compatible(&self, other: &GridGeometry) -> bool {
        self == other
    }
}
