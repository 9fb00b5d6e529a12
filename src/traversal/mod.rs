//! Fast voxel traversal of rays through a [`GridGeometry`](crate::grid::GridGeometry).
//!
//! [`WooTraversal`] enumerates, in order, every voxel crossed by a ray (the
//! algorithm of Amanatides & Woo). [`traverse`] feeds those voxels to a set of
//! [`RayVisitor`]s.

pub use self::visitor::{CountVisitor, RayVisitor, SkipFirst};
pub use self::woo::{traverse, VoxelCrossing, WooTraversal};

mod visitor;
mod woo;
