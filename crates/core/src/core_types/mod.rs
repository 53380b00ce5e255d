//! Core types and utilities

pub mod color;
pub mod spatial;
pub mod units;
pub mod vec3;

pub use color::Rgb;
pub use spatial::SpatialIndex;
pub use units::*;
pub use vec3::{Vec2, Vec3};
