use crate::bounding_volume::Aabb;
use crate::grid::{CountGrid, DensityGrid, GridGeometry};
use crate::math::Real;
use crate::propagation::PropagationReport;
use crate::LvoxError;

/// Selects the echoes taken into account, based on their intensity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct IntensityFilter {
    /// The intensity threshold.
    pub threshold: Real,
    /// If `true`, echoes with an intensity strictly greater than the threshold
    /// are accepted. Otherwise, echoes strictly smaller than the threshold are.
    pub greater_than: bool,
}

impl IntensityFilter {
    /// Is an echo with the given intensity accepted?
    #[inline]
    pub fn accepts(&self, intensity: Real) -> bool {
        if self.greater_than {
            intensity > self.threshold
        } else {
            intensity < self.threshold
        }
    }
}

/// The parameters of the density computation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DensityConfig {
    /// The side of the (cubic) voxels.
    pub resolution: Real,
    /// See [`IntensityFilter::threshold`].
    pub intensity_threshold: Real,
    /// See [`IntensityFilter::greater_than`].
    pub greater_than_threshold: bool,
    /// Voxels crossed by fewer effective rays (`theoretical - before`) are
    /// flagged as [`InsufficientSamples`](crate::grid::DensityCode::InsufficientSamples).
    pub effective_ray_threshold: Real,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            resolution: 0.5,
            intensity_threshold: 10.0,
            greater_than_threshold: true,
            effective_ray_threshold: 10.0,
        }
    }
}

impl DensityConfig {
    /// The intensity filter described by this configuration.
    pub fn intensity_filter(&self) -> IntensityFilter {
        IntensityFilter {
            threshold: self.intensity_threshold,
            greater_than: self.greater_than_threshold,
        }
    }

    /// The grid of voxels of side `self.resolution` covering `aabb`.
    pub fn grid_for(&self, aabb: &Aabb) -> Result<GridGeometry, LvoxError> {
        GridGeometry::from_aabb(aabb, self.resolution)
    }

    /// Checks the thresholds of this configuration.
    pub fn validate(&self) -> Result<(), LvoxError> {
        if self.intensity_threshold.is_nan() {
            return Err(LvoxError::InvalidParameter(
                "the intensity threshold must be a number",
            ));
        }

        if !self.effective_ray_threshold.is_finite() || self.effective_ray_threshold < 0.0 {
            return Err(LvoxError::InvalidParameter(
                "the effective ray threshold must be finite and positive",
            ));
        }

        Ok(())
    }
}

/// Statistics gathered by the density workers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DensityReport {
    /// Shots of the pattern skipped because of a degenerate direction.
    pub skipped_shots: usize,
    /// Echoes rejected by the intensity filter.
    pub filtered_echoes: usize,
    /// Accepted echoes lying outside of the grid.
    pub echoes_outside: usize,
    /// Accepted echoes whose `before` ray was skipped because of a degenerate direction.
    pub skipped_echo_rays: usize,
    /// Voxels set to [`Untouched`](crate::grid::DensityCode::Untouched).
    pub untouched: usize,
    /// Voxels set to [`InsufficientSamples`](crate::grid::DensityCode::InsufficientSamples).
    pub insufficient_samples: usize,
    /// Voxels with more hits than effective rays, whose density was clamped to 1.
    pub clamped: usize,
    /// The statistics of the distance interpolation, if it ran.
    pub propagation: Option<PropagationReport>,
}

/// The grids computed by the LVOX workers.
///
/// All the grids share the same geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LvoxGrids {
    /// Number of accepted echoes inside each voxel.
    pub hits: CountGrid,
    /// Number of shots crossing each voxel.
    pub theoretical: CountGrid,
    /// Number of shots stopped by an echo before reaching each voxel.
    pub before: CountGrid,
    /// The density of each voxel, or a [`DensityCode`](crate::grid::DensityCode).
    pub density: DensityGrid,
    /// Statistics of the workers.
    pub report: DensityReport,
}

impl LvoxGrids {
    /// Zero counters and an untouched density grid.
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            hits: CountGrid::zeros(geometry),
            theoretical: CountGrid::zeros(geometry),
            before: CountGrid::zeros(geometry),
            density: DensityGrid::untouched(geometry),
            report: DensityReport::default(),
        }
    }

    /// The geometry shared by all the grids.
    pub fn geometry(&self) -> &GridGeometry {
        self.density.geometry()
    }

    /// Checks that all the grids share the same geometry.
    pub fn check_compatible(&self) -> Result<(), LvoxError> {
        self.density.check_compatible(&self.hits)?;
        self.density.check_compatible(&self.theoretical)?;
        self.density.check_compatible(&self.before)
    }
}
