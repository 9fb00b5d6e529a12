use super::{LvoxGrids, Worker};
use crate::math::Real;
use crate::propagation::interpolate_distance;
use crate::LvoxError;

/// Replaces the `InsufficientSamples` voxels of the density grid by the
/// inverse-distance weighted average of the valid densities within a radius.
///
/// See [`propagate`](crate::propagation::propagate).
pub struct InterpolateDistance {
    radius: Real,
    power: i32,
}

impl InterpolateDistance {
    /// A worker interpolating from the voxels within `radius`, with weights
    /// `1 / distance^power`.
    pub fn new(radius: Real, power: i32) -> Self {
        Self { radius, power }
    }
}

impl Worker<LvoxGrids> for InterpolateDistance {
    fn name(&self) -> &'static str {
        "interpolate distance"
    }

    fn compute(&mut self, grids: &mut LvoxGrids) -> Result<(), LvoxError> {
        let (density, report) = interpolate_distance(&grids.density, self.radius, self.power)?;
        grids.density = density;
        grids.report.propagation = Some(report);
        Ok(())
    }
}
