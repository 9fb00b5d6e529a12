/// Errors raised by the density computation and propagation workers.
///
/// Per-ray and per-voxel conditions are not errors: degenerate rays are
/// skipped and counted, and under-sampled voxels are flagged with a
/// [`DensityCode`](crate::grid::DensityCode) sentinel. Only structural
/// misconfiguration is reported through this type.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum LvoxError {
    /// The direction of a ray has a zero (or non-finite) length.
    #[error("the ray direction must be a finite non-zero vector")]
    InvalidRay,
    /// The grid has no cell, or a non-positive resolution.
    #[error("invalid grid: {0}")]
    InvalidGrid(&'static str),
    /// The shooting pattern parameters are invalid.
    #[error("invalid shooting pattern: {0}")]
    InvalidPattern(&'static str),
    /// A numeric parameter of a worker is out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// Two grids that must share the same geometry do not.
    #[error("the grids do not share the same geometry")]
    IncompatibleGrids,
    /// A worker scheduled by a [`WorkersManager`](crate::worker::WorkersManager) failed.
    #[error("worker {id} ({name}) failed: {source}")]
    WorkerFailed {
        /// The identifier the worker was registered with.
        id: usize,
        /// The name of the worker.
        name: &'static str,
        /// The error reported by the worker.
        #[source]
        source: Box<LvoxError>,
    },
}
