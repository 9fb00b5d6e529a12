use super::RayVisitor;
use crate::grid::GridGeometry;
use crate::math::{Real, Vector, DIM};
use crate::query::Ray;
use crate::LvoxError;
use na::Point3;

/// A voxel crossed by a ray.
///
/// `t_enter` and `t_exit` are the parameters at which the ray enters and
/// leaves the voxel. They are expressed along the normalized ray, so they are
/// distances from the ray origin in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelCrossing {
    /// The linear index of the voxel.
    pub index: usize,
    /// The integer coordinates of the voxel.
    pub coords: Point3<usize>,
    /// The distance from the ray origin to the point where the ray enters the voxel.
    pub t_enter: Real,
    /// The distance from the ray origin to the point where the ray leaves the voxel.
    pub t_exit: Real,
}

impl VoxelCrossing {
    /// The length of the part of the ray lying inside of the voxel.
    #[inline]
    pub fn length(&self) -> Real {
        self.t_exit - self.t_enter
    }
}

#[derive(Copy, Clone, Debug)]
struct WooState {
    coords: Point3<usize>,
    t: Real,
    t_max: Vector<Real>,
}

/// An iterator through the voxels crossed by a ray, in the order the ray
/// crosses them.
///
/// The ray is first clipped by the bounding box of the grid. If the ray
/// origin lies inside of the grid, the traversal starts at the voxel
/// containing it, as given by [`GridGeometry::voxel_at_point`]. An origin on
/// a voxel boundary the ray moves away from thus gives a first crossing of
/// length zero. Each voxel is yielded at most once and the traversal stops
/// as soon as the ray leaves the grid. When the ray crosses several voxel
/// boundaries at once, the traversal moves along x first, then y, then z.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use lvox3d::grid::GridGeometry;
/// use lvox3d::query::Ray;
/// use lvox3d::traversal::WooTraversal;
/// use nalgebra::{Point3, Vector3};
///
/// let geometry = GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::new(1, 1, 10)).unwrap();
/// let ray = Ray::new(Point3::new(0.5, 0.5, -1.0), Vector3::z());
/// let voxels: Vec<_> = WooTraversal::new(&geometry, &ray)
///     .unwrap()
///     .map(|crossing| crossing.coords.z)
///     .collect();
///
/// assert_eq!(voxels, (0..10).collect::<Vec<_>>());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WooTraversal {
    geometry: GridGeometry,
    step: [isize; DIM],
    t_delta: Vector<Real>,
    state: Option<WooState>,
}

impl WooTraversal {
    /// Initializes the traversal of `ray` through the voxels of `geometry`.
    ///
    /// Fails with [`LvoxError::InvalidRay`] if the ray direction is zero or
    /// not finite. A ray missing the grid yields no voxel.
    pub fn new(geometry: &GridGeometry, ray: &Ray) -> Result<Self, LvoxError> {
        let ray = ray.normalized().ok_or(LvoxError::InvalidRay)?;
        let cell_size = geometry.cell_size();
        let mut step = [0; DIM];
        let mut t_delta = Vector::repeat(Real::INFINITY);

        for i in 0..DIM {
            if ray.dir[i] > 0.0 {
                step[i] = 1;
                t_delta[i] = cell_size[i] / ray.dir[i];
            } else if ray.dir[i] < 0.0 {
                step[i] = -1;
                t_delta[i] = -cell_size[i] / ray.dir[i];
            }
        }

        let state = geometry
            .aabb()
            .clip_ray_parameters(&ray)
            .map(|(t_start, _)| Self::initial_state(geometry, &ray, &step, t_start));

        Ok(Self {
            geometry: *geometry,
            step,
            t_delta,
            state,
        })
    }

    fn initial_state(
        geometry: &GridGeometry,
        ray: &Ray,
        step: &[isize; DIM],
        t_start: Real,
    ) -> WooState {
        let origin = geometry.origin();
        let cell_size = geometry.cell_size();
        let dims = geometry.dims();
        let entry = ray.point_at(t_start);
        // An origin inside of the grid belongs to the voxel `voxel_at_point` assigns it.
        let own_voxel = if t_start == 0.0 {
            geometry.voxel_at_point(&ray.origin)
        } else {
            None
        };
        let mut coords = Point3::origin();
        let mut t_max = Vector::repeat(Real::INFINITY);

        for i in 0..DIM {
            let cell = match own_voxel {
                Some(own) => own[i],
                None => {
                    let local = (entry[i] - origin[i]) / cell_size[i];
                    let mut cell = local.floor();

                    // Entering on a voxel boundary, start in the voxel the ray is moving into.
                    if step[i] < 0 && cell == local {
                        cell -= 1.0;
                    }

                    // The clipped entry point may lie slightly outside of the grid.
                    (cell.max(0.0) as usize).min(dims[i] - 1)
                }
            };
            coords[i] = cell;

            if step[i] != 0 {
                let boundary = if step[i] > 0 { cell + 1 } else { cell };
                let boundary = origin[i] + boundary as Real * cell_size[i];
                t_max[i] = ((boundary - ray.origin[i]) / ray.dir[i]).max(t_start);
            }
        }

        WooState {
            coords,
            t: t_start,
            t_max,
        }
    }

    /// The geometry of the traversed grid.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }
}

impl Iterator for WooTraversal {
    type Item = VoxelCrossing;

    fn next(&mut self) -> Option<VoxelCrossing> {
        let state = self.state.as_mut()?;
        let mut axis = 0;

        for i in 1..DIM {
            if state.t_max[i] < state.t_max[axis] {
                axis = i;
            }
        }

        let crossing = VoxelCrossing {
            index: self.geometry.linear_index(&state.coords),
            coords: state.coords,
            t_enter: state.t,
            t_exit: state.t_max[axis],
        };

        let cell = state.coords[axis];
        let leaving = match self.step[axis] {
            1 => cell + 1 >= self.geometry.dims()[axis],
            -1 => cell == 0,
            // Only reachable if every t_max is infinite.
            _ => true,
        };

        if leaving {
            self.state = None;
        } else {
            state.coords[axis] = (cell as isize + self.step[axis]) as usize;
            state.t = state.t_max[axis];
            state.t_max[axis] += self.t_delta[axis];
        }

        Some(crossing)
    }
}

/// Traverses the voxels crossed by `ray` and calls each visitor on each of them.
///
/// For every voxel, the visitors are called in the order they appear in
/// `visitors`. The visitors are not reset by this function: stateful visitors
/// like [`SkipFirst`](super::SkipFirst) must be reset by the caller between
/// two rays.
///
/// Returns the number of visited voxels.
pub fn traverse(
    geometry: &GridGeometry,
    ray: &Ray,
    visitors: &mut [&mut dyn RayVisitor],
) -> Result<usize, LvoxError> {
    let mut num_visited = 0;

    for crossing in WooTraversal::new(geometry, ray)? {
        for visitor in visitors.iter_mut() {
            visitor.visit(&crossing);
        }

        num_visited += 1;
    }

    Ok(num_visited)
}
