use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use num::Zero;

/// Computes the parameters of the segment given by the intersection of a line and an AABB.
///
/// The line is `origin + dir * t` for every real `t`. Returns `(tmin, tmax)`, the
/// parameters of the entry and exit points, or `None` if the line misses the AABB.
/// Lines touching the AABB on a single point or grazing one of its faces are
/// considered intersecting.
pub fn clip_aabb_line(
    aabb: &Aabb,
    origin: &Point<Real>,
    dir: &Vector<Real>,
) -> Option<(Real, Real)> {
    let mut tmax: Real = Real::MAX;
    let mut tmin: Real = -tmax;

    for i in 0usize..DIM {
        if dir[i].is_zero() {
            if origin[i] < aabb.mins[i] || origin[i] > aabb.maxs[i] {
                return None;
            }
        } else {
            let denom = 1.0 / dir[i];
            let mut inter_with_near_halfspace = (aabb.mins[i] - origin[i]) * denom;
            let mut inter_with_far_halfspace = (aabb.maxs[i] - origin[i]) * denom;

            if inter_with_near_halfspace > inter_with_far_halfspace {
                std::mem::swap(
                    &mut inter_with_near_halfspace,
                    &mut inter_with_far_halfspace,
                )
            }

            tmin = tmin.max(inter_with_near_halfspace);
            tmax = tmax.min(inter_with_far_halfspace);

            if tmin > tmax {
                return None;
            }
        }
    }

    Some((tmin, tmax))
}
