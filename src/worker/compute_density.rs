use super::{LvoxGrids, Worker};
use crate::grid::{DensityCode, DensityGrid};
use crate::math::Real;
use crate::LvoxError;

/// The density of a voxel given its counters.
///
/// - `Untouched` if no shot crossed the voxel and no echo lies inside of it,
/// - `InsufficientSamples` if the number of effective rays
///   (`theoretical - before`) is zero, negative, or below `effective_ray_threshold`,
/// - `hits / (theoretical - before)` otherwise, clamped to 1.
///
/// Sentinels are returned as their [`DensityCode::value`].
pub fn voxel_density(
    hits: u32,
    theoretical: u32,
    before: u32,
    effective_ray_threshold: Real,
) -> Real {
    if theoretical == 0 && hits == 0 {
        return DensityCode::Untouched.value();
    }

    let effective = theoretical as i64 - before as i64;

    if effective <= 0 || (effective as Real) < effective_ray_threshold {
        return DensityCode::InsufficientSamples.value();
    }

    (hits as Real / effective as Real).min(1.0)
}

/// Derives the density of each voxel from the `hits`, `theoretical` and
/// `before` channels.
///
/// See [`voxel_density`] for the rule applied to each voxel. Fills the
/// `density` channel and the voxel statistics of the report.
pub struct ComputeDensity {
    effective_ray_threshold: Real,
}

impl ComputeDensity {
    /// A worker flagging the voxels crossed by fewer than
    /// `effective_ray_threshold` effective rays.
    pub fn new(effective_ray_threshold: Real) -> Self {
        Self {
            effective_ray_threshold,
        }
    }
}

impl Worker<LvoxGrids> for ComputeDensity {
    fn name(&self) -> &'static str {
        "compute density"
    }

    fn compute(&mut self, grids: &mut LvoxGrids) -> Result<(), LvoxError> {
        if !self.effective_ray_threshold.is_finite() || self.effective_ray_threshold < 0.0 {
            return Err(LvoxError::InvalidParameter(
                "the effective ray threshold must be finite and positive",
            ));
        }

        grids.check_compatible()?;

        let mut density = DensityGrid::untouched(*grids.geometry());
        let mut clamped = 0;

        for (i, value) in density.values_mut().iter_mut().enumerate() {
            let hits = grids.hits.value(i);
            let theoretical = grids.theoretical.value(i);
            let before = grids.before.value(i);

            *value = voxel_density(hits, theoretical, before, self.effective_ray_threshold);

            if *value >= 0.0 && hits as i64 > theoretical as i64 - before as i64 {
                clamped += 1;
            }
        }

        let untouched = density.count_code(DensityCode::Untouched);
        let insufficient_samples = density.count_code(DensityCode::InsufficientSamples);

        if clamped > 0 {
            log::warn!(
                "{} voxels have more hits than effective rays, their density was clamped to 1",
                clamped
            );
        }

        log::debug!(
            "density: {} voxels, {} untouched, {} with insufficient samples",
            density.num_cells(),
            untouched,
            insufficient_samples
        );

        grids.density = density;
        grids.report.untouched = untouched;
        grids.report.insufficient_samples = insufficient_samples;
        grids.report.clamped = clamped;
        Ok(())
    }
}
