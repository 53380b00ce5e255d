//! One-shot scroll reveal for page sections
//!
//! A section starts hidden (transparent, pushed down, slightly shrunk). The
//! first time it overlaps the viewport, inset by a margin at the top and
//! bottom, it plays a single eased reveal and then stays revealed.

use serde::{Deserialize, Serialize};

use crate::core_types::{Pixels, Progress, Seconds};
use crate::error::ConfigError;
use crate::ui::easing::CubicBezier;

/// Reveal timing and start pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub duration: Seconds,
    /// Wait between entering the viewport and starting to move
    pub delay: Seconds,
    /// Viewport inset at top and bottom, as a fraction of its height
    pub margin: f32,
    /// Initial downward offset in pixels
    pub offset_y: f32,
    /// Initial scale
    pub initial_scale: f32,
    pub easing: CubicBezier,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration: Seconds::new(0.8),
            delay: Seconds::ZERO,
            margin: 0.1,
            offset_y: 75.0,
            initial_scale: 0.95,
            easing: CubicBezier::SOFT_OUT,
        }
    }
}

impl RevealConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` for a non-positive duration, negative delay,
    /// margin outside [0, 0.5), or an invalid easing curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("reveal.duration", *self.duration)?;
        ConfigError::require_range("reveal.delay", *self.delay, 0.0, f32::MAX)?;
        ConfigError::require_range("reveal.margin", self.margin, 0.0, 0.499)?;
        ConfigError::require_finite("reveal.offset_y", self.offset_y)?;
        ConfigError::require_finite("reveal.initial_scale", self.initial_scale)?;
        self.easing.validate()
    }
}

/// Style applied to the section for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealStyle {
    pub opacity: f32,
    /// Downward offset in pixels
    pub translate_y: f32,
    pub scale: f32,
}

/// Reveal state of a single section
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollReveal {
    config: RevealConfig,
    triggered: bool,
    elapsed: f32,
}

impl Default for ScrollReveal {
    fn default() -> Self {
        Self {
            config: RevealConfig::default(),
            triggered: false,
            elapsed: 0.0,
        }
    }
}

impl ScrollReveal {
    /// # Errors
    ///
    /// Returns `ConfigError` if [`RevealConfig::validate`] rejects `config`.
    pub fn new(config: RevealConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Check the section's viewport-relative bounds and latch the trigger.
    ///
    /// `top` is the section's top edge relative to the viewport top. Returns
    /// whether the reveal has been triggered, now or earlier.
    pub fn observe(&mut self, top: Pixels, height: Pixels, viewport_height: Pixels) -> bool {
        if self.triggered {
            return true;
        }
        if !viewport_height.is_positive_finite() || !top.is_finite() || !height.is_finite() {
            return false;
        }

        let inset = *viewport_height * self.config.margin;
        let band_top = inset;
        let band_bottom = *viewport_height - inset;
        let bottom = *top + (*height).max(0.0);

        self.triggered = *top < band_bottom && bottom > band_top;
        self.triggered
    }

    /// Advance the reveal clock. Ignored until triggered; non-positive or
    /// non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: Seconds) {
        let dt = *dt;
        if self.triggered && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn is_finished(&self) -> bool {
        self.triggered && self.progress() >= Progress::ONE
    }

    /// Linear progress through the animation, after the delay
    pub fn progress(&self) -> Progress {
        Progress::from_ratio(self.elapsed - *self.config.delay, *self.config.duration)
    }

    pub fn style(&self) -> RevealStyle {
        let e = self.config.easing.apply(*self.progress());
        RevealStyle {
            opacity: e,
            translate_y: self.config.offset_y * (1.0 - e),
            scale: self.config.initial_scale + (1.0 - self.config.initial_scale) * e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const VH: Pixels = Pixels::new(1000.0);

    #[test]
    fn test_hidden_pose() {
        let reveal = ScrollReveal::default();
        let style = reveal.style();
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.translate_y, 75.0);
        assert_relative_eq!(style.scale, 0.95);
    }

    #[test]
    fn test_margin_band() {
        // Section entirely inside the bottom 10% does not trigger
        let mut reveal = ScrollReveal::default();
        assert!(!reveal.observe(Pixels::new(920.0), Pixels::new(400.0), VH));
        // Crossing into the band does
        assert!(reveal.observe(Pixels::new(880.0), Pixels::new(400.0), VH));

        // Section that has scrolled into the top 10% only does not trigger
        let mut above = ScrollReveal::default();
        assert!(!above.observe(Pixels::new(-500.0), Pixels::new(590.0), VH));
        assert!(above.observe(Pixels::new(-500.0), Pixels::new(610.0), VH));
    }

    #[test]
    fn test_trigger_is_latched() {
        let mut reveal = ScrollReveal::default();
        assert!(reveal.observe(Pixels::new(300.0), Pixels::new(200.0), VH));
        assert!(reveal.observe(Pixels::new(5000.0), Pixels::new(200.0), VH));
        assert!(reveal.is_triggered());
    }

    #[test]
    fn test_clock_waits_for_trigger() {
        let mut reveal = ScrollReveal::default();
        reveal.advance(Seconds::new(2.0));
        assert_eq!(reveal.progress(), Progress::ZERO);
        assert!(!reveal.is_finished());
    }

    #[test]
    fn test_full_reveal_after_duration() {
        let mut reveal = ScrollReveal::default();
        reveal.observe(Pixels::new(300.0), Pixels::new(200.0), VH);

        let mut last = reveal.style();
        for _ in 0..48 {
            reveal.advance(Seconds::new(1.0 / 60.0));
            let style = reveal.style();
            assert!(style.opacity >= last.opacity);
            assert!(style.translate_y <= last.translate_y);
            last = style;
        }
        reveal.advance(Seconds::new(0.01));

        assert!(reveal.is_finished());
        let style = reveal.style();
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.translate_y, 0.0);
        assert_relative_eq!(style.scale, 1.0);
    }

    #[test]
    fn test_delay_holds_pose() {
        let config = RevealConfig {
            delay: Seconds::new(0.2),
            ..Default::default()
        };
        let mut reveal = ScrollReveal::new(config).unwrap();
        reveal.observe(Pixels::new(100.0), Pixels::new(100.0), VH);
        reveal.advance(Seconds::new(0.19));
        assert_eq!(reveal.style().opacity, 0.0);
        reveal.advance(Seconds::new(0.4));
        let mid = reveal.style().opacity;
        assert!(mid > 0.5 && mid < 1.0);
    }

    #[test]
    fn test_config_validation() {
        let bad = RevealConfig {
            duration: Seconds::ZERO,
            ..Default::default()
        };
        assert!(ScrollReveal::new(bad).is_err());
        let bad = RevealConfig {
            margin: 0.5,
            ..Default::default()
        };
        assert!(ScrollReveal::new(bad).is_err());
    }
}
