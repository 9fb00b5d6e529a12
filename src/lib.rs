/*!
lvox
====

**lvox** computes voxel grids of foliage/obstacle density (LiDAR VOXel) from
terrestrial or airborne laser scans.

The crate is organized around three algorithms:

- a fast voxel traversal (Amanatides & Woo) enumerating, in order, the voxels
  crossed by a ray ([`traversal`]),
- a density pipeline accumulating, per voxel, the number of recorded returns
  (`hits`), of rays that would have crossed it (`theoretical`) and of rays
  intercepted before reaching it (`before`), then deriving a density
  ([`worker`]),
- an inverse-distance propagation filling under-sampled voxels from their
  valid neighbors ([`propagation`]).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![doc(html_root_url = "http://docs.rs/lvox3d/0.1.0")]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod grid;
pub mod propagation;
pub mod query;
pub mod scanner;
pub mod traversal;
pub mod worker;

mod error;

pub use error::LvoxError;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point3, Rotation3, UnitQuaternion, UnitVector3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The rotation type.
    pub type Rotation<N> = UnitQuaternion<N>;
}
