use super::accumulate::{accumulate_rays, CountedRay};
use super::{IntensityFilter, LvoxGrids, Worker};
use crate::query::Ray;
use crate::scanner::{Echo, ShootingPattern};
use crate::LvoxError;

/// Counts, for each voxel, the number of shots stopped by an echo before
/// reaching it.
///
/// For each accepted echo, a ray starts at the echo and continues in the
/// direction of the shot that produced it (see
/// [`ShootingPattern::direction_to`]). Every voxel crossed by that ray is
/// occluded by the echo, except the voxel containing the echo itself which is
/// not counted. Fills the `before` channel.
pub struct ComputeBefore<'a> {
    pattern: &'a dyn ShootingPattern,
    echoes: &'a [Echo],
    filter: IntensityFilter,
}

impl<'a> ComputeBefore<'a> {
    /// A worker tracing the occluded part of the shots of `pattern` that
    /// produced the echoes accepted by `filter`.
    pub fn new(
        pattern: &'a dyn ShootingPattern,
        echoes: &'a [Echo],
        filter: IntensityFilter,
    ) -> Self {
        Self {
            pattern,
            echoes,
            filter,
        }
    }
}

impl Worker<LvoxGrids> for ComputeBefore<'_> {
    fn name(&self) -> &'static str {
        "compute before"
    }

    fn compute(&mut self, grids: &mut LvoxGrids) -> Result<(), LvoxError> {
        let geometry = *grids.geometry();
        let pattern = self.pattern;
        let echoes = self.echoes;
        let filter = self.filter;

        let result = accumulate_rays(&geometry, echoes.len(), |i| {
            let echo = &echoes[i];
            filter.accepts(echo.intensity).then(|| CountedRay {
                ray: Ray::new(echo.position, pattern.direction_to(&echo.position)),
                // An echo outside of the grid does not own the first crossed voxel.
                skip_first: geometry.voxel_at_point(&echo.position).is_some(),
            })
        });

        if result.skipped > 0 {
            log::warn!(
                "{} echoes with a degenerate shot direction were skipped",
                result.skipped
            );
        }

        log::debug!("before: {} occlusion rays traced", result.traversed);

        grids.before = result.counts;
        grids.report.skipped_echo_rays = result.skipped;
        Ok(())
    }
}
