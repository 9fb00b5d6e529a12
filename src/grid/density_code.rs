use crate::math::Real;

/// Reserved values of a density grid that do not represent a density.
///
/// Valid densities lie in `[0, 1]`, so every code is negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum DensityCode {
    /// No ray (and no return) ever reached the voxel.
    Untouched = -1,
    /// The number of effective rays (`theoretical - before`) reaching the
    /// voxel is below the configured threshold.
    ///
    /// These voxels are the seeds of the distance interpolation.
    InsufficientSamples = -2,
}

impl DensityCode {
    /// All the density codes.
    pub const ALL: [DensityCode; 2] = [DensityCode::Untouched, DensityCode::InsufficientSamples];

    /// The integer code.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The value stored in a density grid for this code.
    #[inline]
    pub fn value(self) -> Real {
        self.code() as Real
    }

    /// Is `value` the grid value of this code?
    #[inline]
    pub fn matches(self, value: Real) -> bool {
        value == self.value()
    }

    /// The code stored as `value`, if any.
    pub fn from_value(value: Real) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.matches(value))
    }
}

/// Is `value` a density (and not a sentinel or `NaN`)?
#[inline]
pub fn is_valid_density(value: Real) -> bool {
    value >= 0.0
}
