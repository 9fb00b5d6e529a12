use super::{Echo, ShootingPattern};
use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::Ray;
use crate::LvoxError;

/// Rays shot from a single position toward each point of a point cloud.
///
/// This is the pattern to use when the scanner position is known but its
/// angular sampling is not: each recorded point gives one shot.
#[derive(Clone, Debug)]
pub struct PointCloudShootingPattern {
    center: Point<Real>,
    points: Vec<Point<Real>>,
}

impl PointCloudShootingPattern {
    /// One shot from `center` toward each point of `points`.
    pub fn new(center: Point<Real>, points: Vec<Point<Real>>) -> Self {
        Self { center, points }
    }

    /// One shot from `center` toward each echo.
    pub fn from_echoes(center: Point<Real>, echoes: &[Echo]) -> Self {
        Self::new(center, echoes.iter().map(|e| e.position).collect())
    }

    /// The targeted points.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }
}

impl ShootingPattern for PointCloudShootingPattern {
    fn num_shots(&self) -> usize {
        self.points.len()
    }

    fn shot_at(&self, index: usize) -> Ray {
        Ray::new(self.center, self.points[index] - self.center)
    }

    fn center(&self) -> Point<Real> {
        self.center
    }
}

/// Parallel rays, one toward each point of a point cloud.
///
/// All the shots share the same direction and start on the plane passing
/// through `origin` and orthogonal to that direction, like the rays of an
/// airborne scanner flying far away.
#[derive(Clone, Debug)]
pub struct ParallelShootingPattern {
    origin: Point<Real>,
    direction: UnitVector<Real>,
    points: Vec<Point<Real>>,
}

impl ParallelShootingPattern {
    /// Parallel shots along `direction` toward each point of `points`.
    ///
    /// Fails with [`LvoxError::InvalidPattern`] if `direction` is zero.
    pub fn new(
        origin: Point<Real>,
        direction: Vector<Real>,
        points: Vec<Point<Real>>,
    ) -> Result<Self, LvoxError> {
        let direction = UnitVector::try_new(direction, Real::EPSILON)
            .ok_or(LvoxError::InvalidPattern("the shooting direction must not be zero"))?;

        Ok(Self {
            origin,
            direction,
            points,
        })
    }

    /// Parallel shots along `direction` toward each echo.
    pub fn from_echoes(
        origin: Point<Real>,
        direction: Vector<Real>,
        echoes: &[Echo],
    ) -> Result<Self, LvoxError> {
        Self::new(
            origin,
            direction,
            echoes.iter().map(|e| e.position).collect(),
        )
    }

    /// The direction shared by all the shots.
    pub fn direction(&self) -> UnitVector<Real> {
        self.direction
    }
}

impl ShootingPattern for ParallelShootingPattern {
    fn num_shots(&self) -> usize {
        self.points.len()
    }

    fn shot_at(&self, index: usize) -> Ray {
        let target = self.points[index];
        let depth = self.direction.dot(&(target - self.origin));
        Ray::new(target - *self.direction * depth, *self.direction)
    }

    fn center(&self) -> Point<Real> {
        self.origin
    }

    fn direction_to(&self, _: &Point<Real>) -> Vector<Real> {
        *self.direction
    }
}
