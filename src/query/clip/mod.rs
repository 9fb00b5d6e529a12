//! Clipping of lines and rays against axis-aligned boxes.

pub use self::clip_aabb_line::clip_aabb_line;

mod clip_aabb_line;
