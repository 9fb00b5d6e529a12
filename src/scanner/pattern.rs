use crate::math::{Point, Real, Vector};
use crate::query::Ray;

/// A return recorded by a scanner.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Echo {
    /// The position of the return.
    pub position: Point<Real>,
    /// The intensity of the return.
    pub intensity: Real,
}

impl Echo {
    /// Creates a new echo.
    pub fn new(position: Point<Real>, intensity: Real) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// The sequence of rays emitted by a scanner.
///
/// Shots are indexed from `0` to `num_shots() - 1` and the same index always
/// gives the same ray, so a pattern can be replayed (and split between
/// threads) freely.
pub trait ShootingPattern: Send + Sync {
    /// The number of shots of this pattern.
    fn num_shots(&self) -> usize;

    /// The shot with the given index.
    ///
    /// `index` must be smaller than `self.num_shots()`.
    fn shot_at(&self, index: usize) -> Ray;

    /// The position of the scanner.
    fn center(&self) -> Point<Real>;

    /// The direction of the shot that reached `target`.
    ///
    /// Defaults to the direction from the scanner center to the target.
    fn direction_to(&self, target: &Point<Real>) -> Vector<Real> {
        target - self.center()
    }
}
