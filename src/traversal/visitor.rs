use super::VoxelCrossing;
use crate::grid::CountGrid;

/// Trait implemented by visitors called for each voxel crossed by a ray.
///
/// Visitors only observe the traversal: they cannot stop it, filter it nor
/// reorder it.
pub trait RayVisitor {
    /// Execute an operation on a voxel crossed by the ray.
    fn visit(&mut self, crossing: &VoxelCrossing);

    /// Prepares this visitor for the next ray.
    ///
    /// Stateless visitors do not need to override this.
    fn reset(&mut self) {}
}

impl<F> RayVisitor for F
where
    F: FnMut(&VoxelCrossing),
{
    fn visit(&mut self, crossing: &VoxelCrossing) {
        (self)(crossing)
    }
}

/// A visitor incrementing the counter of every voxel it visits.
///
/// This is the accumulator behind the `hits`, `theoretical` and `before`
/// channels: the caller decides which grid is incremented.
pub struct CountVisitor<'a> {
    grid: &'a mut CountGrid,
}

impl<'a> CountVisitor<'a> {
    /// A visitor incrementing the counters of `grid`.
    pub fn new(grid: &'a mut CountGrid) -> Self {
        Self { grid }
    }
}

impl RayVisitor for CountVisitor<'_> {
    #[inline]
    fn visit(&mut self, crossing: &VoxelCrossing) {
        self.grid.increment(crossing.index);
    }
}

/// A visitor decorator ignoring the first voxel of each ray.
///
/// The first call to `visit` after construction (or after [`RayVisitor::reset`])
/// is swallowed; the following ones are forwarded to the inner visitor.
/// Because of this state, the visitor must be reset between two rays.
pub struct SkipFirst<V> {
    inner: V,
    first: bool,
}

impl<V> SkipFirst<V> {
    /// Wraps `inner` so that it never sees the first voxel of a ray.
    pub fn new(inner: V) -> Self {
        Self { inner, first: true }
    }

    /// The wrapped visitor.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Unwraps the inner visitor.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: RayVisitor> RayVisitor for SkipFirst<V> {
    fn visit(&mut self, crossing: &VoxelCrossing) {
        if self.first {
            self.first = false;
        } else {
            self.inner.visit(crossing);
        }
    }

    fn reset(&mut self) {
        self.first = true;
        self.inner.reset();
    }
}
