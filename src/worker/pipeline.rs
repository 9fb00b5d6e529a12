use super::{
    ComputeBefore, ComputeDensity, ComputeHits, ComputeTheoreticals, DensityConfig, LvoxGrids,
    Worker, WorkersManager,
};
use crate::grid::GridGeometry;
use crate::math::Real;
use crate::scanner::{Echo, ShootingPattern};
use crate::LvoxError;

/// Computes the density grid of a single scan.
///
/// Runs, in order, [`ComputeTheoreticals`], [`ComputeHits`], [`ComputeBefore`]
/// and [`ComputeDensity`] on grids with the given geometry. `echoes` are the
/// returns recorded by the scanner whose shots are described by `pattern`.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use lvox3d::grid::GridGeometry;
/// use lvox3d::scanner::{Echo, PointCloudShootingPattern};
/// use lvox3d::worker::{compute_density, DensityConfig};
/// use nalgebra::{Point3, Vector3};
///
/// let echoes = [Echo::new(Point3::new(0.5, 0.5, 2.5), 20.0)];
/// let pattern = PointCloudShootingPattern::from_echoes(Point3::new(0.5, 0.5, -1.0), &echoes);
/// let geometry = GridGeometry::with_resolution(Point3::origin(), 1.0, Vector3::new(1, 1, 4)).unwrap();
/// let config = DensityConfig {
///     effective_ray_threshold: 1.0,
///     ..DensityConfig::default()
/// };
///
/// let grids = compute_density(&pattern, &echoes, &geometry, &config).unwrap();
/// assert_eq!(grids.density.value(2), 1.0);
/// # }
/// ```
pub fn compute_density(
    pattern: &dyn ShootingPattern,
    echoes: &[Echo],
    geometry: &GridGeometry,
    config: &DensityConfig,
) -> Result<LvoxGrids, LvoxError> {
    config.validate()?;

    let filter = config.intensity_filter();
    let mut grids = LvoxGrids::new(*geometry);
    let mut manager: WorkersManager<LvoxGrids> = WorkersManager::new();
    manager.add_worker(0, Box::new(ComputeTheoreticals::new(pattern)));
    manager.add_worker(1, Box::new(ComputeHits::new(echoes, filter)));
    manager.add_worker(2, Box::new(ComputeBefore::new(pattern, echoes, filter)));
    manager.add_worker(
        3,
        Box::new(ComputeDensity::new(config.effective_ray_threshold)),
    );
    manager.compute(&mut grids)?;

    Ok(grids)
}

/// Merges the counters of several scans of the same scene and recomputes
/// the density.
///
/// The `hits`, `theoretical` and `before` channels are summed voxel by voxel,
/// then the density is derived from the sums by [`ComputeDensity`].
///
/// Fails with [`LvoxError::InvalidParameter`] if `inputs` is empty and with
/// [`LvoxError::IncompatibleGrids`] if the inputs do not share the same
/// geometry.
pub fn merge_inputs(
    inputs: &[LvoxGrids],
    effective_ray_threshold: Real,
) -> Result<LvoxGrids, LvoxError> {
    let first = inputs
        .first()
        .ok_or(LvoxError::InvalidParameter("there is no grid to merge"))?;
    let mut merged = LvoxGrids::new(*first.geometry());

    for input in inputs {
        input.check_compatible()?;
        merged.hits.accumulate(&input.hits)?;
        merged.theoretical.accumulate(&input.theoretical)?;
        merged.before.accumulate(&input.before)?;
    }

    log::debug!("merging {} scans", inputs.len());
    ComputeDensity::new(effective_ray_threshold).compute(&mut merged)?;
    Ok(merged)
}
