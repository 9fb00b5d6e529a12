use crate::grid::{CountGrid, GridGeometry};
use crate::query::Ray;
use crate::traversal::{traverse, CountVisitor, SkipFirst};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A ray to accumulate into a counter grid.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CountedRay {
    pub ray: Ray,
    /// Do not count the first voxel crossed by the ray.
    pub skip_first: bool,
}

/// Counter grid filled by a set of rays.
pub(crate) struct RayAccumulation {
    pub counts: CountGrid,
    pub traversed: usize,
    pub skipped: usize,
}

impl RayAccumulation {
    fn new(geometry: &GridGeometry) -> Self {
        Self {
            counts: CountGrid::zeros(*geometry),
            traversed: 0,
            skipped: 0,
        }
    }

    fn add_ray(&mut self, geometry: &GridGeometry, counted: &CountedRay) {
        let mut counter = CountVisitor::new(&mut self.counts);
        let result = if counted.skip_first {
            let mut visitor = SkipFirst::new(counter);
            traverse(geometry, &counted.ray, &mut [&mut visitor])
        } else {
            traverse(geometry, &counted.ray, &mut [&mut counter])
        };

        match result {
            Ok(_) => self.traversed += 1,
            Err(_) => self.skipped += 1,
        }
    }

    #[cfg(feature = "parallel")]
    fn merge(mut self, other: Self) -> Self {
        // Partial grids all share the geometry of the traversal.
        let merged = self.counts.accumulate(&other.counts);
        debug_assert!(merged.is_ok());

        self.traversed += other.traversed;
        self.skipped += other.skipped;
        self
    }
}

/// Traverses the rays `ray_at(0)` to `ray_at(num_rays - 1)` and counts, for
/// each voxel, the number of rays crossing it.
///
/// Indices for which `ray_at` returns `None` are ignored. Rays with a
/// degenerate direction are counted as skipped.
#[cfg(not(feature = "parallel"))]
pub(crate) fn accumulate_rays<F>(
    geometry: &GridGeometry,
    num_rays: usize,
    ray_at: F,
) -> RayAccumulation
where
    F: Fn(usize) -> Option<CountedRay> + Sync + Send,
{
    let mut result = RayAccumulation::new(geometry);

    for counted in (0..num_rays).filter_map(ray_at) {
        result.add_ray(geometry, &counted);
    }

    result
}

/// Traverses the rays `ray_at(0)` to `ray_at(num_rays - 1)` and counts, for
/// each voxel, the number of rays crossing it.
///
/// Indices for which `ray_at` returns `None` are ignored. Rays with a
/// degenerate direction are counted as skipped.
///
/// The rays are split between threads, each one filling its own counter grid,
/// and the partial grids are summed at the end.
#[cfg(feature = "parallel")]
pub(crate) fn accumulate_rays<F>(
    geometry: &GridGeometry,
    num_rays: usize,
    ray_at: F,
) -> RayAccumulation
where
    F: Fn(usize) -> Option<CountedRay> + Sync + Send,
{
    (0..num_rays)
        .into_par_iter()
        .filter_map(ray_at)
        .fold(
            || RayAccumulation::new(geometry),
            |mut partial, counted| {
                partial.add_ray(geometry, &counted);
                partial
            },
        )
        .reduce(|| RayAccumulation::new(geometry), RayAccumulation::merge)
}
