//! The LVOX density pipeline.
//!
//! The pipeline is split into [`Worker`]s run in sequence by a
//! [`WorkersManager`]. Each worker fills one channel of the [`LvoxGrids`]:
//!
//! 1. [`ComputeTheoreticals`]: number of shots crossing each voxel,
//! 2. [`ComputeHits`]: number of returns inside each voxel,
//! 3. [`ComputeBefore`]: number of shots stopped before reaching each voxel,
//! 4. [`ComputeDensity`]: the density derived from the three counters,
//! 5. [`InterpolateDistance`] (optional): fills under-sampled voxels.
//!
//! [`compute_density`] runs the first four workers on a single scan and
//! [`merge_inputs`] combines several scans of the same scene.

pub use self::compute_before::ComputeBefore;
pub use self::compute_density::{voxel_density, ComputeDensity};
pub use self::compute_hits::ComputeHits;
pub use self::compute_theoreticals::ComputeTheoreticals;
pub use self::grids::{DensityConfig, DensityReport, IntensityFilter, LvoxGrids};
pub use self::interpolate_distance::InterpolateDistance;
pub use self::manager::{Worker, WorkersManager};
pub use self::pipeline::{compute_density, merge_inputs};

mod accumulate;
mod compute_before;
mod compute_density;
mod compute_hits;
mod compute_theoreticals;
mod grids;
mod interpolate_distance;
mod manager;
mod pipeline;
