//! Vector type aliases for particle positions, velocities and transforms.

use nalgebra::{Vector2, Vector3};

/// 3D vector type for positions, velocities, and Euler rotations.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the simulation for particle state and group transforms.
pub type Vec3 = Vector3<f32>;

/// 2D vector type for pointer coordinates (normalized or world-plane).
pub type Vec2 = Vector2<f32>;
