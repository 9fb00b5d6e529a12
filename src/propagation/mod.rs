//! Propagation of values from under-sampled voxels to their neighborhood.
//!
//! The [`PropagationAlgorithm`] floods the voxels around a seed voxel, within
//! a radius, and reports each of them to a set of [`PropagationVisitor`]s.
//! [`propagate`] uses it to replace every
//! [`InsufficientSamples`](crate::grid::DensityCode::InsufficientSamples)
//! voxel of a density grid by the inverse-distance weighted average of the
//! valid densities around it.

pub use self::algorithm::{PropagationAlgorithm, PropagationContext, PropagationVisitor};
pub use self::distance_interpolation::{
    interpolate_distance, propagate, DistanceInterpolationVisitor, PropagationReport,
};

mod algorithm;
mod distance_interpolation;
