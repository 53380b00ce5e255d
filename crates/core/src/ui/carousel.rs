//! Auto-advancing image carousel for project panels
//!
//! Slides wrap in both directions. Any slide change restarts the auto-advance
//! timer, so a manual click gives the new slide its full display time. A
//! carousel with a single slide never advances on its own.

use crate::core_types::{Progress, Seconds};
use crate::error::ConfigError;

/// Default display time of one slide
pub const DEFAULT_SLIDE_DURATION_SECS: f32 = 5.0;

/// Slide index and auto-advance timer
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    len: usize,
    index: usize,
    slide_duration: Seconds,
    elapsed: f32,
}

impl Carousel {
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyCarousel` when `len` is zero.
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyCarousel);
        }
        Ok(Self {
            len,
            index: 0,
            slide_duration: Seconds::new(DEFAULT_SLIDE_DURATION_SECS),
            elapsed: 0.0,
        })
    }

    /// # Errors
    ///
    /// Returns `ConfigError::NonPositive` unless `duration` is finite and positive.
    pub fn with_slide_duration(mut self, duration: Seconds) -> Result<Self, ConfigError> {
        ConfigError::require_positive("carousel.slide_duration", *duration)?;
        self.slide_duration = duration;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; construction rejects empty carousels
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the carousel cycles on its own and shows a progress bar
    pub fn is_auto(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        self.show((self.index + 1) % self.len);
    }

    pub fn prev(&mut self) {
        self.show((self.index + self.len - 1) % self.len);
    }

    fn show(&mut self, index: usize) {
        if index != self.index {
            self.elapsed = 0.0;
        }
        self.index = index;
    }

    /// Advance the auto-advance timer. Returns `true` if the slide changed.
    ///
    /// Non-positive or non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: Seconds) -> bool {
        let dt = *dt;
        if !self.is_auto() || !dt.is_finite() || dt <= 0.0 {
            return false;
        }

        let duration = *self.slide_duration;
        self.elapsed += dt;
        let mut changed = false;
        while self.elapsed >= duration {
            self.elapsed -= duration;
            self.index = (self.index + 1) % self.len;
            changed = true;
        }
        changed
    }

    /// Fill of the slide progress bar
    pub fn progress(&self) -> Progress {
        if !self.is_auto() {
            return Progress::ZERO;
        }
        Progress::from_ratio(self.elapsed, *self.slide_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Carousel::new(0), Err(ConfigError::EmptyCarousel));
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut carousel = Carousel::new(3).unwrap();
        carousel.prev();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_auto_advance_every_five_seconds() {
        let mut carousel = Carousel::new(3).unwrap();
        let frame = Seconds::new(0.1);
        let mut changes = Vec::new();
        for i in 0..160 {
            if carousel.advance(frame) {
                changes.push(i);
            }
        }
        assert_eq!(changes.len(), 3);
        assert_eq!(carousel.index(), 0);
        // Changes land on roughly every 50th frame
        for pair in changes.windows(2) {
            assert!((49..=51).contains(&(pair[1] - pair[0])));
        }
    }

    #[test]
    fn test_manual_change_restarts_timer() {
        let mut carousel = Carousel::new(2).unwrap();
        assert!(!carousel.advance(Seconds::new(4.0)));
        assert_relative_eq!(*carousel.progress(), 0.8);

        carousel.next();
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.progress(), Progress::ZERO);
        assert!(!carousel.advance(Seconds::new(4.0)));
        assert!(carousel.advance(Seconds::new(1.5)));
        assert_eq!(carousel.index(), 0);
        assert_relative_eq!(*carousel.progress(), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_single_slide_stays_put() {
        let mut carousel = Carousel::new(1).unwrap();
        assert!(!carousel.is_auto());
        assert!(!carousel.advance(Seconds::new(60.0)));
        carousel.next();
        carousel.prev();
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.progress(), Progress::ZERO);
    }

    #[test]
    fn test_custom_duration() {
        let mut carousel = Carousel::new(4)
            .unwrap()
            .with_slide_duration(Seconds::new(2.0))
            .unwrap();
        assert!(carousel.advance(Seconds::new(2.0)));
        assert_eq!(carousel.index(), 1);
        assert!(Carousel::new(4)
            .unwrap()
            .with_slide_duration(Seconds::new(-1.0))
            .is_err());
    }
}
