//! Shooting patterns: the rays emitted by a laser scanner.
//!
//! A [`ShootingPattern`] is an indexed, replayable sequence of rays. The
//! density workers only depend on this trait; the patterns of this module
//! cover terrestrial scanners ([`ThetaPhiShootingPattern`]), rays shot from a
//! known position toward recorded points ([`PointCloudShootingPattern`]) and
//! airborne-like parallel rays ([`ParallelShootingPattern`]).

pub use self::pattern::{Echo, ShootingPattern};
pub use self::point_cloud::{ParallelShootingPattern, PointCloudShootingPattern};
pub use self::theta_phi::{ScannerConfig, ThetaPhiShootingPattern};

mod pattern;
mod point_cloud;
mod theta_phi;
