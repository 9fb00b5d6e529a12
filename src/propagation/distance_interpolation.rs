use super::{PropagationAlgorithm, PropagationContext, PropagationVisitor};
use crate::grid::{is_valid_density, DensityCode, DensityGrid};
use crate::math::Real;
use crate::LvoxError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A propagation visitor computing the inverse-distance weighted average of
/// the valid values reached by a propagation.
///
/// Each reached voxel with a valid density `v` (see
/// [`is_valid_density`]) at distance `d` from the seed contributes `v / d^power`
/// to the weighted sum and `1 / d^power` to the total weight. Sentinel values
/// are ignored.
pub struct DistanceInterpolationVisitor<'a> {
    source: &'a DensityGrid,
    power: i32,
    sum: Real,
    weights: Real,
    result: Option<Real>,
}

impl<'a> DistanceInterpolationVisitor<'a> {
    /// A visitor reading its values from `source`.
    pub fn new(source: &'a DensityGrid, power: i32) -> Self {
        Self {
            source,
            power,
            sum: 0.0,
            weights: 0.0,
            result: None,
        }
    }

    /// The interpolated value of the last finished propagation.
    ///
    /// This is `None` if no valid value was reached.
    pub fn result(&self) -> Option<Real> {
        self.result
    }
}

impl PropagationVisitor for DistanceInterpolationVisitor<'_> {
    fn start(&mut self, _: &PropagationContext) {
        self.sum = 0.0;
        self.weights = 0.0;
        self.result = None;
    }

    fn visit(&mut self, context: &PropagationContext) {
        let value = self.source.value(context.index);

        if is_valid_density(value) {
            let weight = 1.0 / context.distance.powi(self.power);
            self.sum += value * weight;
            self.weights += weight;
        }
    }

    fn finish(&mut self, _: &PropagationContext) {
        self.result = (self.weights > 0.0).then(|| self.sum / self.weights);
    }
}

/// Statistics of a call to [`propagate`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PropagationReport {
    /// The number of `InsufficientSamples` voxels of the source grid.
    pub seeds: usize,
    /// The number of seeds that received an interpolated value.
    pub interpolated: usize,
    /// The number of seeds without any valid value within the radius.
    pub unreachable: usize,
}

/// Fills the `InsufficientSamples` voxels of `source` by distance interpolation.
///
/// For every voxel of `source` equal to [`DensityCode::InsufficientSamples`],
/// the valid values of `source` within `radius` are averaged with
/// inverse-distance weights (see [`DistanceInterpolationVisitor`]) and the
/// result is written to the same voxel of `out`. Only `source` is ever read,
/// so the result does not depend on the order the seeds are processed in.
///
/// Seeds without any valid value in their neighborhood are set to
/// `InsufficientSamples` in `out` and counted as unreachable. Voxels that are
/// not seeds are left untouched in `out`.
///
/// Fails with [`LvoxError::IncompatibleGrids`] if `out` and `source` do not
/// share the same geometry, and with [`LvoxError::InvalidParameter`] if the
/// radius is negative or not finite.
pub fn propagate(
    source: &DensityGrid,
    out: &mut DensityGrid,
    radius: Real,
    power: i32,
) -> Result<PropagationReport, LvoxError> {
    source.check_compatible(out)?;
    let algorithm = PropagationAlgorithm::new(source.geometry(), radius)?;
    let seeds = source.indices_where(|v| DensityCode::InsufficientSamples.matches(v));

    let mut report = PropagationReport {
        seeds: seeds.len(),
        ..PropagationReport::default()
    };

    if seeds.is_empty() {
        log::debug!("distance interpolation: no seed to propagate from");
        return Ok(report);
    }

    let interpolate = |seed: &usize| -> Result<(usize, Option<Real>), LvoxError> {
        let mut visitor = DistanceInterpolationVisitor::new(source, power);
        let _ = algorithm.start_from_cell(*seed, &mut [&mut visitor])?;
        Ok((*seed, visitor.result()))
    };

    #[cfg(not(feature = "parallel"))]
    let values: Vec<_> = seeds
        .iter()
        .map(interpolate)
        .collect::<Result<_, LvoxError>>()?;
    #[cfg(feature = "parallel")]
    let values: Vec<_> = seeds
        .par_iter()
        .map(interpolate)
        .collect::<Result<_, LvoxError>>()?;

    for (seed, value) in values {
        match value {
            Some(value) => {
                out.set_value(seed, value);
                report.interpolated += 1;
            }
            None => {
                out.set_value(seed, DensityCode::InsufficientSamples.value());
                report.unreachable += 1;
            }
        }
    }

    if report.unreachable > 0 {
        log::warn!(
            "distance interpolation: {} of {} seeds have no valid neighbor within a radius of {}",
            report.unreachable,
            report.seeds,
            radius
        );
    }

    log::debug!(
        "distance interpolation: {} seeds, {} interpolated",
        report.seeds,
        report.interpolated
    );

    Ok(report)
}

/// Returns a copy of `source` whose `InsufficientSamples` voxels are filled
/// by distance interpolation.
///
/// See [`propagate`].
pub fn interpolate_distance(
    source: &DensityGrid,
    radius: Real,
    power: i32,
) -> Result<(DensityGrid, PropagationReport), LvoxError> {
    let mut out = source.clone();
    let report = propagate(source, &mut out, radius, power)?;
    Ok((out, report))
}
