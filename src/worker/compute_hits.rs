use super::{IntensityFilter, LvoxGrids, Worker};
use crate::grid::CountGrid;
use crate::scanner::Echo;
use crate::LvoxError;

/// Counts, for each voxel, the number of accepted echoes lying inside of it.
///
/// Fills the `hits` channel.
pub struct ComputeHits<'a> {
    echoes: &'a [Echo],
    filter: IntensityFilter,
}

impl<'a> ComputeHits<'a> {
    /// A worker counting the echoes accepted by `filter`.
    pub fn new(echoes: &'a [Echo], filter: IntensityFilter) -> Self {
        Self { echoes, filter }
    }
}

impl Worker<LvoxGrids> for ComputeHits<'_> {
    fn name(&self) -> &'static str {
        "compute hits"
    }

    fn compute(&mut self, grids: &mut LvoxGrids) -> Result<(), LvoxError> {
        let geometry = *grids.geometry();
        let mut hits = CountGrid::zeros(geometry);
        let mut filtered = 0;
        let mut outside = 0;

        for echo in self.echoes {
            if !self.filter.accepts(echo.intensity) {
                filtered += 1;
                continue;
            }

            match geometry.index_at_point(&echo.position) {
                Some(index) => hits.increment(index),
                None => outside += 1,
            }
        }

        log::debug!(
            "hits: {} echoes, {} filtered out, {} outside of the grid",
            self.echoes.len(),
            filtered,
            outside
        );

        grids.hits = hits;
        grids.report.filtered_echoes = filtered;
        grids.report.echoes_outside = outside;
        Ok(())
    }
}
