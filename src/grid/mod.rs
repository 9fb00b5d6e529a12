//! Regular 3D voxel grids.
//!
//! A [`GridGeometry`] describes where the voxels are (origin, cell size and
//! number of cells along each axis) and maps integer voxel coordinates to
//! linear indices with `i = x + y * nx + z * nx * ny`. A [`Grid3`] stores one
//! value per voxel of a geometry.
//!
//! Density grids encode "no data" conditions with the negative sentinels of
//! [`DensityCode`].

pub use self::density_code::{is_valid_density, DensityCode};
pub use self::geometry::GridGeometry;
pub use self::grid3::{CountGrid, DensityGrid, Grid3};

mod density_code;
mod geometry;
mod grid3;
