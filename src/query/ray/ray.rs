//! The ray (a.k.a. shot) type.

use crate::math::{Point, Real, Vector};

/// A ray, or shot, emitted by a laser scanner.
///
/// A ray is a half-infinite line starting at an origin point and extending
/// infinitely in a direction.
///
/// # Structure
///
/// - **origin**: The starting point of the ray
/// - **dir**: The direction vector (does NOT need to be normalized)
///
/// The voxel traversal normalizes the direction, so the parametric distances it
/// reports are always expressed in world units. A zero direction is rejected by
/// the traversal with [`LvoxError::InvalidRay`](crate::LvoxError::InvalidRay).
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use lvox3d::query::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(2.0, 0.0, 0.0));
///
/// assert_eq!(ray.point_at(1.5), Point3::new(3.0, 5.0, 0.0));
/// assert_eq!(ray.normalized().unwrap().dir, Vector3::x());
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction vector of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray from an origin point and direction vector.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Translates this ray by the given vector.
    ///
    /// Only the origin is moved; the direction remains unchanged.
    #[inline]
    pub fn translate_by(&self, v: Vector<Real>) -> Self {
        Self::new(self.origin + v, self.dir)
    }

    /// Computes a point along the ray at parameter `t`.
    ///
    /// Returns `origin + dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }

    /// Is the direction of this ray a finite vector with a non-zero length?
    #[inline]
    pub fn has_valid_direction(&self) -> bool {
        let norm = self.dir.norm();
        norm.is_finite() && norm > 0.0
    }

    /// A copy of this ray with a unit direction.
    ///
    /// Returns `None` if the direction is zero or non-finite.
    #[inline]
    pub fn normalized(&self) -> Option<Self> {
        if !self.has_valid_direction() {
            return None;
        }

        Some(Self::new(self.origin, self.dir.normalize()))
    }
}
