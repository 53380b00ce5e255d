//! Floating wireframe shape in the hero background.
//!
//! Rotation and bob are pure functions of elapsed time, so the shape needs no
//! state between frames.

use serde::{Deserialize, Serialize};

use crate::core_types::{Seconds, Vec3};
use crate::parallax::GroupTransform;

/// Time constants of the shape's slow tumble and bob
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingShape {
    /// Period divisor of the X/Y tumble
    pub tumble_period: f32,
    /// Period divisor of the Z roll and vertical bob
    pub bob_period: f32,
    /// Peak tumble angle in radians
    pub tumble_amplitude: f32,
    /// Peak vertical bob distance
    pub bob_amplitude: f32,
}

impl Default for FloatingShape {
    fn default() -> Self {
        Self {
            tumble_period: 4.0,
            bob_period: 1.5,
            tumble_amplitude: 0.5,
            bob_amplitude: 0.1,
        }
    }
}

impl FloatingShape {
    pub fn transform_at(&self, elapsed: Seconds) -> GroupTransform {
        let t = *elapsed;
        let slow = t / self.tumble_period;
        let fast = t / self.bob_period;

        GroupTransform {
            position: Vec3::new(0.0, fast.sin() * self.bob_amplitude, 0.0),
            rotation: Vec3::new(
                slow.cos() * self.tumble_amplitude,
                slow.sin() * self.tumble_amplitude,
                fast.sin() * self.tumble_amplitude,
            ),
        }
    }
}
