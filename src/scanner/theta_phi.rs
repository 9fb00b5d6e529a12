use super::ShootingPattern;
use crate::math::{Point, Real, Rotation, Vector};
use crate::query::Ray;
use crate::LvoxError;
use na::RealField;

/// The parameters of a terrestrial scanner.
///
/// Angles are in degrees. `theta` is the horizontal angle, measured from the
/// local x axis, and `phi` the vertical angle, measured from the zenith.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ScannerConfig {
    /// The position of the scanner.
    pub position: Point<Real>,
    /// The horizontal field of view.
    pub h_fov: Real,
    /// The vertical field of view.
    pub v_fov: Real,
    /// The horizontal angle between two consecutive shots.
    pub h_res: Real,
    /// The vertical angle between two consecutive shots.
    pub v_res: Real,
    /// The horizontal angle of the first shot.
    pub init_theta: Real,
    /// The vertical angle of the first shot.
    pub init_phi: Real,
    /// The vertical axis of the scanner.
    pub zenith: Vector<Real>,
    /// Does the scanner head rotate clockwise (decreasing `theta`)?
    pub clockwise: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            h_fov: 360.0,
            v_fov: 180.0,
            h_res: 0.5,
            v_res: 0.5,
            init_theta: 0.0,
            init_phi: 0.0,
            zenith: Vector::z(),
            clockwise: true,
        }
    }
}

/// The shooting pattern of a terrestrial scanner sweeping its field of view
/// column by column.
///
/// The pattern has `n_h = round(h_fov / h_res)` columns of
/// `n_v = round(v_fov / v_res)` shots. The shot `i` belongs to the column
/// `h = i / n_v` and the row `v = i % n_v`; its direction, in the scanner
/// frame, is `(sin φ cos θ, sin φ sin θ, cos φ)` with `θ = θ0 ± h · h_res` and
/// `φ = φ0 + v · v_res`. The scanner frame is then rotated so that its z axis
/// matches the zenith vector.
#[derive(Copy, Clone, Debug)]
pub struct ThetaPhiShootingPattern {
    config: ScannerConfig,
    n_h: usize,
    n_v: usize,
    rotation: Rotation<Real>,
}

impl ThetaPhiShootingPattern {
    /// Creates the shooting pattern of the scanner described by `config`.
    ///
    /// Fails with [`LvoxError::InvalidPattern`] if a field of view or a
    /// resolution is not strictly positive (or gives no shot), or if the
    /// zenith vector is zero.
    pub fn new(config: &ScannerConfig) -> Result<Self, LvoxError> {
        let n_h = Self::num_steps(config.h_fov, config.h_res)?;
        let n_v = Self::num_steps(config.v_fov, config.v_res)?;
        let zenith_norm = config.zenith.norm();

        if !zenith_norm.is_finite() || zenith_norm == 0.0 {
            return Err(LvoxError::InvalidPattern("the zenith vector must not be zero"));
        }

        let rotation = Rotation::rotation_between(&Vector::z(), &config.zenith).unwrap_or_else(
            // The zenith points downward.
            || Rotation::from_axis_angle(&Vector::x_axis(), Real::pi()),
        );

        Ok(Self {
            config: *config,
            n_h,
            n_v,
            rotation,
        })
    }

    fn num_steps(fov: Real, res: Real) -> Result<usize, LvoxError> {
        if !(fov > 0.0 && res > 0.0 && fov.is_finite() && res.is_finite()) {
            return Err(LvoxError::InvalidPattern(
                "the field of view and the angular resolution must be strictly positive",
            ));
        }

        let n = (fov / res).round();

        if n < 1.0 {
            return Err(LvoxError::InvalidPattern(
                "the angular resolution is larger than the field of view",
            ));
        }

        Ok(n as usize)
    }

    /// The parameters of the scanner.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// The number of horizontal steps (columns).
    pub fn n_h(&self) -> usize {
        self.n_h
    }

    /// The number of vertical steps (rows).
    pub fn n_v(&self) -> usize {
        self.n_v
    }
}

impl ShootingPattern for ThetaPhiShootingPattern {
    fn num_shots(&self) -> usize {
        self.n_h * self.n_v
    }

    fn shot_at(&self, index: usize) -> Ray {
        let h = (index / self.n_v) as Real;
        let v = (index % self.n_v) as Real;
        let sign = if self.config.clockwise { -1.0 } else { 1.0 };
        let theta = (self.config.init_theta + sign * h * self.config.h_res).to_radians();
        let phi = (self.config.init_phi + v * self.config.v_res).to_radians();
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let dir = Vector::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi);

        Ray::new(self.config.position, self.rotation * dir)
    }

    fn center(&self) -> Point<Real> {
        self.config.position
    }
}
