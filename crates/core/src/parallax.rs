//! Scroll and pointer parallax
//!
//! Maps the page scroll offset and the normalized pointer to a transform for
//! the decorative background group, plus a clamped `progress` value that
//! drives color blending in dependent renderers.
//!
//! The driver holds no per-frame state: identical inputs always produce
//! identical outputs.

use serde::{Deserialize, Serialize};

use crate::core_types::{Pixels, Progress, Rgb, Vec2, Vec3};
use crate::error::ConfigError;

/// Parallax coefficients and background color endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Group Y translation per scrolled pixel
    pub scroll_lift: f32,
    /// Group Z translation (away from camera) per scrolled pixel
    pub scroll_recede: f32,
    /// Group Z rotation (radians) per scrolled pixel
    pub scroll_roll: f32,
    /// Group Y rotation (radians) per scrolled pixel
    pub scroll_yaw: f32,
    /// Group X/Y rotation (radians) per unit of normalized pointer
    pub pointer_tilt: f32,
    /// Background color at the top of the page
    pub background_start: Rgb,
    /// Background color once one viewport height has been scrolled
    pub background_end: Rgb,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            scroll_lift: 0.005,
            scroll_recede: 0.002,
            scroll_roll: 0.0002,
            scroll_yaw: 0.0001,
            pointer_tilt: 0.05,
            background_start: Rgb::from_hex(0x050505),
            background_end: Rgb::WHITE,
        }
    }
}

impl ParallaxConfig {
    /// Check that all coefficients are finite
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonFinite` naming the first bad coefficient.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_finite("scroll_lift", self.scroll_lift)?;
        ConfigError::require_finite("scroll_recede", self.scroll_recede)?;
        ConfigError::require_finite("scroll_roll", self.scroll_roll)?;
        ConfigError::require_finite("scroll_yaw", self.scroll_yaw)?;
        ConfigError::require_finite("pointer_tilt", self.pointer_tilt)?;
        Ok(())
    }
}

/// Translation and Euler rotation (radians, XYZ) of the background group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTransform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl GroupTransform {
    pub const IDENTITY: GroupTransform = GroupTransform {
        position: Vec3::new(0.0, 0.0, 0.0),
        rotation: Vec3::new(0.0, 0.0, 0.0),
    };
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Everything the parallax pass produces for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxState {
    pub group: GroupTransform,
    pub progress: Progress,
    pub background_color: Rgb,
}

/// Fraction of one viewport height scrolled, clamped to [0, 1].
///
/// Returns zero when `window_height` is zero, negative or not finite.
#[inline]
pub fn scroll_progress(scroll_y: Pixels, window_height: Pixels) -> Progress {
    if !window_height.is_positive_finite() {
        return Progress::ZERO;
    }
    Progress::from_ratio(*scroll_y, *window_height)
}

/// Stateless scroll/pointer parallax driver
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParallaxDriver {
    config: ParallaxConfig,
}

impl ParallaxDriver {
    /// Create a driver after validating its coefficients
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any coefficient is not finite.
    pub fn new(config: ParallaxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    /// Group transform for a scroll offset and normalized pointer in [-1, 1]²
    pub fn group_transform(&self, scroll_y: Pixels, pointer: Vec2) -> GroupTransform {
        let c = &self.config;
        let s = *scroll_y;

        GroupTransform {
            position: Vec3::new(0.0, s * c.scroll_lift, -s * c.scroll_recede),
            rotation: Vec3::new(
                pointer.y * c.pointer_tilt,
                pointer.x * c.pointer_tilt + s * c.scroll_yaw,
                s * c.scroll_roll,
            ),
        }
    }

    /// Background color for a given progress
    pub fn background_color(&self, progress: Progress) -> Rgb {
        self.config
            .background_start
            .lerp(self.config.background_end, progress)
    }

    /// Full parallax pass for one frame
    pub fn compute(&self, scroll_y: Pixels, window_height: Pixels, pointer: Vec2) -> ParallaxState {
        let progress = scroll_progress(scroll_y, window_height);

        ParallaxState {
            group: self.group_transform(scroll_y, pointer),
            progress,
            background_color: self.background_color(progress),
        }
    }
}
