//! Background visibility tied to the project section
//!
//! The animated background fades out while the project section is on screen.
//! Visibility is re-evaluated
//! whenever the section's visible ratio crosses the threshold or the section
//! enters or leaves the viewport entirely. On each such crossing the
//! background hides if any part of the section is visible. In practice it
//! hides once the threshold is reached and returns only after the section has
//! fully left the screen.
//!
//! Opacity changes follow a fixed-length eased transition that starts from
//! the current opacity, so reversing mid-fade never jumps.

use serde::{Deserialize, Serialize};

use crate::core_types::{Progress, Seconds};
use crate::error::ConfigError;
use crate::ui::easing::CubicBezier;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Visible fraction of the section that triggers re-evaluation
    pub threshold: f32,
    pub transition: Seconds,
    pub easing: CubicBezier,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            transition: Seconds::new(0.5),
            easing: CubicBezier::EASE_IN_OUT,
        }
    }
}

impl FadeConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` for a threshold outside (0, 1], a non-positive
    /// transition, or an invalid easing curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("fade.threshold", self.threshold)?;
        ConfigError::require_range("fade.threshold", self.threshold, 0.0, 1.0)?;
        ConfigError::require_positive("fade.transition", *self.transition)?;
        self.easing.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossing {
    intersecting: bool,
    past_threshold: bool,
}

/// Opacity state of the page background
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundFade {
    config: FadeConfig,
    last: Option<Crossing>,
    from: f32,
    target: f32,
    elapsed: f32,
}

impl Default for BackgroundFade {
    fn default() -> Self {
        Self::with_valid_config(FadeConfig::default())
    }
}

impl BackgroundFade {
    /// # Errors
    ///
    /// Returns `ConfigError` if [`FadeConfig::validate`] rejects `config`.
    pub fn new(config: FadeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: FadeConfig) -> Self {
        Self {
            config,
            last: None,
            from: 1.0,
            target: 1.0,
            elapsed: 0.0,
        }
    }

    /// Feed the section's visible ratio (visible area over section area).
    /// Values are clamped to [0, 1]; NaN counts as not visible.
    pub fn observe(&mut self, visible_ratio: f32) {
        let ratio = *Progress::clamped(visible_ratio);
        let crossing = Crossing {
            intersecting: ratio > 0.0,
            past_threshold: ratio >= self.config.threshold,
        };
        if self.last == Some(crossing) {
            return;
        }
        self.last = Some(crossing);
        self.fade_to(if crossing.intersecting { 0.0 } else { 1.0 });
    }

    fn fade_to(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.from = self.opacity();
        self.target = target;
        self.elapsed = 0.0;
    }

    /// Advance the transition clock. Non-positive or non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: Seconds) {
        let dt = *dt;
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(*self.config.transition);
        }
    }

    pub fn opacity(&self) -> f32 {
        let t = *Progress::from_ratio(self.elapsed, *self.config.transition);
        self.from + (self.target - self.from) * self.config.easing.apply(t)
    }

    /// Whether the background is hidden or heading there
    pub fn is_hidden(&self) -> bool {
        self.target == 0.0
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= *self.config.transition || self.from == self.target
    }
}
