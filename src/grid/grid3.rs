use super::{DensityCode, GridGeometry};
use crate::math::Real;
use crate::LvoxError;
use na::Point3;
use num::ops::saturating::SaturatingAdd;

/// A voxel grid storing per-voxel counters.
pub type CountGrid = Grid3<u32>;
/// A voxel grid storing per-voxel densities or [`DensityCode`] sentinels.
pub type DensityGrid = Grid3<Real>;

/// A dense 3D grid storing one value per voxel of a [`GridGeometry`].
///
/// Each grid also carries its "no data" value (`na`), used as the initial
/// value of every voxel by [`Grid3::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Grid3<T> {
    geometry: GridGeometry,
    values: Vec<T>,
    na: T,
}

impl<T: Copy> Grid3<T> {
    /// Creates a grid with every voxel set to the `na` value.
    pub fn new(geometry: GridGeometry, na: T) -> Self {
        Self::filled(geometry, na, na)
    }

    /// Creates a grid with every voxel set to `value`.
    pub fn filled(geometry: GridGeometry, value: T, na: T) -> Self {
        Self {
            geometry,
            values: vec![value; geometry.num_cells()],
            na,
        }
    }

    /// The geometry of this grid.
    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The "no data" value of this grid.
    #[inline]
    pub fn na(&self) -> T {
        self.na
    }

    /// The number of voxels of this grid.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.values.len()
    }

    /// The value of the voxel with linear index `index`.
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn value(&self, index: usize) -> T {
        self.values[index]
    }

    /// The value of the voxel with linear index `index`, if it exists.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// The value of the voxel with the given integer coordinates.
    #[inline]
    pub fn value_at(&self, coords: &Point3<usize>) -> T {
        self.values[self.geometry.linear_index(coords)]
    }

    /// Sets the value of the voxel with linear index `index`.
    #[inline]
    pub fn set_value(&mut self, index: usize, value: T) {
        self.values[index] = value;
    }

    /// A mutable reference to the value of the voxel with linear index `index`.
    #[inline]
    pub fn value_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }

    /// The values of all the voxels, ordered by linear index.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The values of all the voxels, ordered by linear index.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Sets every voxel to `value`.
    pub fn fill(&mut self, value: T) {
        self.values.fill(value);
    }

    /// Iterates through the `(linear index, value)` pairs of all the voxels.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// The number of voxels whose value satisfies `pred`.
    pub fn count_where(&self, mut pred: impl FnMut(T) -> bool) -> usize {
        self.values.iter().filter(|v| pred(**v)).count()
    }

    /// The linear indices of the voxels whose value satisfies `pred`.
    pub fn indices_where(&self, mut pred: impl FnMut(T) -> bool) -> Vec<usize> {
        self.iter()
            .filter_map(|(i, v)| pred(v).then_some(i))
            .collect()
    }

    /// Checks that `other` is defined on the same voxels as `self`.
    pub fn check_compatible<U>(&self, other: &Grid3<U>) -> Result<(), LvoxError> {
        if self.geometry.is_compatible(&other.geometry) {
            Ok(())
        } else {
            Err(LvoxError::IncompatibleGrids)
        }
    }
}

impl<T: Copy + SaturatingAdd> Grid3<T> {
    /// Adds the values of `other` to the values of `self`, voxel by voxel.
    ///
    /// Sums saturate, like [`CountGrid::increment`].
    ///
    /// Fails with [`LvoxError::IncompatibleGrids`] if the two grids do not share
    /// the same geometry.
    pub fn accumulate(&mut self, other: &Self) -> Result<(), LvoxError> {
        self.check_compatible(other)?;

        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a = a.saturating_add(b);
        }

        Ok(())
    }
}

impl Grid3<u32> {
    /// A counter grid with every counter set to zero.
    pub fn zeros(geometry: GridGeometry) -> Self {
        Self::new(geometry, 0)
    }

    /// Increments the counter of the voxel with linear index `index`.
    #[inline]
    pub fn increment(&mut self, index: usize) {
        self.values[index] = self.values[index].saturating_add(1);
    }

    /// The sum of all the counters.
    pub fn total(&self) -> u64 {
        self.values.iter().map(|v| *v as u64).sum()
    }
}

impl Grid3<Real> {
    /// A density grid with every voxel set to [`DensityCode::Untouched`].
    pub fn untouched(geometry: GridGeometry) -> Self {
        Self::new(geometry, DensityCode::Untouched.value())
    }

    /// The number of voxels holding the given sentinel.
    pub fn count_code(&self, code: DensityCode) -> usize {
        self.count_where(|v| code.matches(v))
    }
}
