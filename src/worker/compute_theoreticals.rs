use super::accumulate::{accumulate_rays, CountedRay};
use super::{LvoxGrids, Worker};
use crate::scanner::ShootingPattern;
use crate::LvoxError;

/// Counts, for each voxel, the number of shots of a pattern crossing it.
///
/// Fills the `theoretical` channel. Shots with a degenerate direction are
/// skipped and reported in [`DensityReport::skipped_shots`](super::DensityReport::skipped_shots).
pub struct ComputeTheoreticals<'a> {
    pattern: &'a dyn ShootingPattern,
}

impl<'a> ComputeTheoreticals<'a> {
    /// A worker tracing every shot of `pattern`.
    pub fn new(pattern: &'a dyn ShootingPattern) -> Self {
        Self { pattern }
    }
}

impl Worker<LvoxGrids> for ComputeTheoreticals<'_> {
    fn name(&self) -> &'static str {
        "compute theoreticals"
    }

    fn compute(&mut self, grids: &mut LvoxGrids) -> Result<(), LvoxError> {
        let geometry = *grids.geometry();
        let pattern = self.pattern;
        let result = accumulate_rays(&geometry, pattern.num_shots(), |i| {
            Some(CountedRay {
                ray: pattern.shot_at(i),
                skip_first: false,
            })
        });

        if result.skipped > 0 {
            log::warn!(
                "{} shots with a degenerate direction were skipped",
                result.skipped
            );
        }

        log::debug!(
            "theoreticals: {} shots traced through {} voxels",
            result.traversed,
            geometry.num_cells()
        );

        grids.theoretical = result.counts;
        grids.report.skipped_shots = result.skipped;
        Ok(())
    }
}
