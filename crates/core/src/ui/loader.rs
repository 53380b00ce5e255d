//! Loading screen progress smoothing
//!
//! The loading screen shows a percentage that chases the reported asset load
//! progress. Every tick (50 ms by default) the shown value moves a fifth of
//! the remaining gap, and always at least one percent, so the counter keeps
//! creeping toward 100 even when loading stalls. Once it hits 100 the loader
//! waits `finish_delay` before reporting itself dismissed.

use serde::{Deserialize, Serialize};

use crate::core_types::{Percent, Seconds};

/// Lifecycle of the loading screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoaderPhase {
    /// Counter still below 100%
    Loading,
    /// Counter at 100%, holding before dismissal
    Complete,
    /// Hold elapsed; the host should reveal the page
    Dismissed,
}

/// Loader timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Time between counter updates
    pub tick_interval: Seconds,
    /// Hold at 100% before dismissal
    pub finish_delay: Seconds,
    /// Fraction of the remaining gap covered per tick
    pub catch_up: f32,
    /// Minimum counter increase per tick, in percent
    pub min_step: f32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tick_interval: Seconds::from_millis(50.0),
            finish_delay: Seconds::from_millis(500.0),
            catch_up: 0.2,
            min_step: 1.0,
        }
    }
}

/// Smoothed loading percentage
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProgress {
    config: LoaderConfig,
    shown: Percent,
    target: Percent,
    tick_accumulator: f32,
    held: f32,
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl LoadProgress {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            shown: Percent::ZERO,
            target: Percent::ZERO,
            tick_accumulator: 0.0,
            held: 0.0,
        }
    }

    /// Record the latest reported load progress (clamped to [0, 100])
    pub fn report(&mut self, loaded: f32) {
        self.target = Percent::clamped(loaded);
    }

    /// Percentage currently displayed
    pub fn shown(&self) -> Percent {
        self.shown
    }

    /// Latest reported percentage
    pub fn target(&self) -> Percent {
        self.target
    }

    pub fn phase(&self) -> LoaderPhase {
        if self.shown < Percent::FULL {
            LoaderPhase::Loading
        } else if self.held < *self.config.finish_delay {
            LoaderPhase::Complete
        } else {
            LoaderPhase::Dismissed
        }
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= Percent::FULL
    }

    pub fn is_dismissed(&self) -> bool {
        self.phase() == LoaderPhase::Dismissed
    }

    /// Apply one counter update
    pub fn tick(&mut self) {
        if self.is_complete() {
            return;
        }
        let diff = *self.target - *self.shown;
        let step = (diff * self.config.catch_up).max(self.config.min_step);
        self.shown = Percent::clamped(*self.shown + step);
    }

    /// Advance by `dt`, running as many ticks as fit and the dismissal hold.
    ///
    /// Non-positive or non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: Seconds) {
        let dt = *dt;
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        if self.is_complete() {
            self.held += dt;
            return;
        }

        let interval = *self.config.tick_interval;
        if interval <= 0.0 {
            self.tick();
            return;
        }

        self.tick_accumulator += dt;
        while self.tick_accumulator >= interval && !self.is_complete() {
            self.tick_accumulator -= interval;
            self.tick();
        }

        if self.is_complete() {
            // Time left over after the final tick counts toward the hold
            self.held += self.tick_accumulator;
            self.tick_accumulator = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_catches_up_by_a_fifth() {
        let mut loader = LoadProgress::default();
        loader.report(50.0);
        loader.tick();
        assert_relative_eq!(*loader.shown(), 10.0, epsilon = 1e-5);
        loader.tick();
        assert_relative_eq!(*loader.shown(), 18.0, epsilon = 1e-5);
    }

    #[test]
    fn test_minimum_step_when_stalled() {
        let mut loader = LoadProgress::default();
        loader.report(0.0);
        loader.tick();
        loader.tick();
        assert_relative_eq!(*loader.shown(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_never_exceeds_hundred() {
        let mut loader = LoadProgress::default();
        loader.report(100.0);
        for _ in 0..500 {
            loader.tick();
        }
        assert_eq!(loader.shown(), Percent::FULL);
        assert_eq!(loader.phase(), LoaderPhase::Complete);
    }

    #[test]
    fn test_report_is_clamped() {
        let mut loader = LoadProgress::default();
        loader.report(250.0);
        assert_eq!(loader.target(), Percent::FULL);
        loader.report(-3.0);
        assert_eq!(loader.target(), Percent::ZERO);
    }

    #[test]
    fn test_dismissed_after_hold() {
        let mut loader = LoadProgress::default();
        loader.report(100.0);

        let frame = Seconds::new(1.0 / 60.0);
        let mut frames = 0;
        while !loader.is_complete() {
            loader.advance(frame);
            frames += 1;
            assert!(frames < 10_000);
        }
        assert!(!loader.is_dismissed());

        for _ in 0..31 {
            loader.advance(frame);
        }
        assert!(loader.is_dismissed());
    }

    #[test]
    fn test_advance_ignores_bad_dt() {
        let mut loader = LoadProgress::default();
        loader.report(100.0);
        loader.advance(Seconds::new(-1.0));
        loader.advance(Seconds::new(f32::NAN));
        assert_eq!(loader.shown(), Percent::ZERO);
    }
}
