//! Ray definition and ray/box clipping.

pub use self::clip::clip_aabb_line;
pub use self::ray::Ray;

pub mod clip;
pub mod ray;
