//! Spring-smoothed custom cursor
//!
//! The custom cursor is an 8 px dot that trails the real pointer through a
//! damped spring and changes size or hides depending on what it hovers.

use serde::{Deserialize, Serialize};

use crate::core_types::{Pixels, Seconds, Vec2};
use crate::error::ConfigError;

/// Largest integration step; longer frames are split so the stiff spring
/// stays stable under semi-implicit Euler.
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Longest frame simulated in one update, e.g. after a hidden tab resumes
const MAX_FRAME: f32 = 0.25;

/// Cursor appearance, chosen from what the pointer hovers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorVariant {
    #[default]
    Default,
    /// Over text: the dot hides so the native caret is visible
    Text,
    /// Over a link or button: the dot grows
    Button,
}

impl CursorVariant {
    pub fn target_opacity(self) -> f32 {
        match self {
            CursorVariant::Default | CursorVariant::Button => 1.0,
            CursorVariant::Text => 0.0,
        }
    }

    pub fn target_scale(self) -> f32 {
        match self {
            CursorVariant::Default => 1.0,
            CursorVariant::Text => 0.0,
            CursorVariant::Button => 1.5,
        }
    }
}

/// Spring constants shared by all cursor channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 500.0,
            damping: 28.0,
            mass: 0.5,
        }
    }
}

impl SpringParams {
    /// # Errors
    ///
    /// Returns `ConfigError` if stiffness or mass is not strictly positive, or
    /// damping is negative or non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("cursor.stiffness", self.stiffness)?;
        ConfigError::require_range("cursor.damping", self.damping, 0.0, f32::MAX)?;
        ConfigError::require_positive("cursor.mass", self.mass)?;
        Ok(())
    }
}

/// One damped spring channel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spring {
    value: f32,
    velocity: f32,
}

impl Spring {
    fn at(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    #[inline]
    fn step(&mut self, target: f32, dt: f32, params: &SpringParams) {
        let force = -params.stiffness * (self.value - target) - params.damping * self.velocity;
        self.velocity += force / params.mass * dt;
        self.value += self.velocity * dt;
    }
}

/// Rendered cursor state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    /// Top-left corner of the dot in window pixels
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
    pub variant: CursorVariant,
}

/// Spring follower for the custom cursor
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFollower {
    params: SpringParams,
    /// Half the dot size, subtracted so the dot centers on the pointer
    offset: f32,
    variant: CursorVariant,
    pointer: Vec2,
    x: Spring,
    y: Spring,
    opacity: Spring,
    scale: Spring,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::with_valid_params(SpringParams::default())
    }
}

impl CursorFollower {
    /// Dot diameter in pixels
    pub const DOT_SIZE: f32 = 8.0;

    /// # Errors
    ///
    /// Returns `ConfigError` if the spring constants are degenerate.
    pub fn new(params: SpringParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::with_valid_params(params))
    }

    fn with_valid_params(params: SpringParams) -> Self {
        let offset = Self::DOT_SIZE / 2.0;
        let variant = CursorVariant::Default;
        Self {
            params,
            offset,
            variant,
            pointer: Vec2::zeros(),
            x: Spring::at(-offset),
            y: Spring::at(-offset),
            opacity: Spring::at(variant.target_opacity()),
            scale: Spring::at(variant.target_scale()),
        }
    }

    /// Record the latest pointer position in window pixels
    pub fn set_pointer(&mut self, x: Pixels, y: Pixels) {
        self.pointer = Vec2::new(*x, *y);
    }

    pub fn set_variant(&mut self, variant: CursorVariant) {
        self.variant = variant;
    }

    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    /// Where the springs are heading
    pub fn target(&self) -> Vec2 {
        self.pointer - Vec2::new(self.offset, self.offset)
    }

    /// Advance all springs by `dt`, at most a quarter second per call.
    /// Non-positive or non-finite `dt` is a no-op.
    pub fn update(&mut self, dt: Seconds) -> CursorState {
        let dt = *dt;
        if dt.is_finite() && dt > 0.0 {
            let dt = dt.min(MAX_FRAME);
            let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
            let h = dt / substeps as f32;
            let target = self.target();
            let opacity = self.variant.target_opacity();
            let scale = self.variant.target_scale();

            for _ in 0..substeps {
                self.x.step(target.x, h, &self.params);
                self.y.step(target.y, h, &self.params);
                self.opacity.step(opacity, h, &self.params);
                self.scale.step(scale, h, &self.params);
            }
        }
        self.state()
    }

    pub fn state(&self) -> CursorState {
        CursorState {
            position: Vec2::new(self.x.value, self.y.value),
            opacity: self.opacity.value.clamp(0.0, 1.0),
            scale: self.scale.value.max(0.0),
            variant: self.variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settle(cursor: &mut CursorFollower, seconds: f32) -> CursorState {
        let frames = (seconds * 60.0) as usize;
        let mut state = cursor.state();
        for _ in 0..frames {
            state = cursor.update(Seconds::new(1.0 / 60.0));
        }
        state
    }

    #[test]
    fn test_variant_targets() {
        assert_eq!(CursorVariant::Default.target_opacity(), 1.0);
        assert_eq!(CursorVariant::Default.target_scale(), 1.0);
        assert_eq!(CursorVariant::Text.target_opacity(), 0.0);
        assert_eq!(CursorVariant::Text.target_scale(), 0.0);
        assert_eq!(CursorVariant::Button.target_opacity(), 1.0);
        assert_eq!(CursorVariant::Button.target_scale(), 1.5);
    }

    #[test]
    fn test_converges_to_offset_pointer() {
        let mut cursor = CursorFollower::default();
        cursor.set_pointer(Pixels::new(300.0), Pixels::new(200.0));
        let state = settle(&mut cursor, 2.0);
        assert_relative_eq!(state.position.x, 296.0, epsilon = 1e-2);
        assert_relative_eq!(state.position.y, 196.0, epsilon = 1e-2);
    }

    #[test]
    fn test_button_grows() {
        let mut cursor = CursorFollower::default();
        cursor.set_variant(CursorVariant::Button);
        let state = settle(&mut cursor, 2.0);
        assert_relative_eq!(state.scale, 1.5, epsilon = 1e-3);
        assert_relative_eq!(state.opacity, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_text_hides() {
        let mut cursor = CursorFollower::default();
        cursor.set_variant(CursorVariant::Text);
        let state = settle(&mut cursor, 2.0);
        assert!(state.opacity < 1e-3);
        assert!(state.scale < 1e-3);
    }

    #[test]
    fn test_long_frame_stays_stable() {
        let mut cursor = CursorFollower::default();
        cursor.set_pointer(Pixels::new(1000.0), Pixels::new(1000.0));
        let state = cursor.update(Seconds::new(0.5));
        assert!(state.position.x.is_finite());
        assert!(state.position.x < 1100.0);
    }

    #[test]
    fn test_resume_after_pause_is_bounded() {
        let mut paused = CursorFollower::default();
        let mut quarter = CursorFollower::default();
        for cursor in [&mut paused, &mut quarter] {
            cursor.set_pointer(Pixels::new(400.0), Pixels::new(300.0));
        }

        // An hour-long frame integrates no further than a quarter second
        let after_pause = paused.update(Seconds::new(3600.0));
        let after_quarter = quarter.update(Seconds::new(MAX_FRAME));
        assert_eq!(after_pause, after_quarter);
        assert!(after_pause.position.x.is_finite());
    }

    #[test]
    fn test_degenerate_springs_rejected() {
        let massless = SpringParams {
            mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            CursorFollower::new(massless),
            Err(ConfigError::NonPositive {
                name: "cursor.mass",
                ..
            })
        ));

        let slack = SpringParams {
            stiffness: -1.0,
            ..Default::default()
        };
        assert!(CursorFollower::new(slack).is_err());

        let runaway = SpringParams {
            damping: f32::NAN,
            ..Default::default()
        };
        assert!(CursorFollower::new(runaway).is_err());

        assert!(CursorFollower::new(SpringParams::default()).is_ok());
    }

    #[test]
    fn test_bad_dt_is_noop() {
        let mut cursor = CursorFollower::default();
        cursor.set_pointer(Pixels::new(50.0), Pixels::new(50.0));
        let before = cursor.state();
        assert_eq!(cursor.update(Seconds::ZERO), before);
        assert_eq!(cursor.update(Seconds::new(f32::NAN)), before);
        assert_eq!(cursor.update(Seconds::new(-0.1)), before);
    }
}
