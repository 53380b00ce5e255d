//! Hover text scramble effect
//!
//! On hover the label is replaced by random glyphs that resolve left to right,
//! one character every three ticks (50 ms per tick by default). Spaces are
//! never scrambled. The effect ignores new triggers while it is running.

use rand::Rng;

use crate::core_types::Seconds;
use crate::error::ConfigError;

/// Glyphs drawn for unresolved characters
pub const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890!@#$%^&*()_+";

/// Ticks needed to reveal one character
const TICKS_PER_CHAR: usize = 3;

/// Time between ticks when driven by [`TextScramble::advance`]
pub const DEFAULT_TICK_INTERVAL_MS: f32 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TextScramble {
    text: Vec<char>,
    charset: Vec<char>,
    ticks: usize,
    running: bool,
    display: String,
    tick_interval: Seconds,
    tick_accumulator: f32,
}

impl TextScramble {
    pub fn new(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        Self {
            display: text.iter().collect(),
            text,
            charset: DEFAULT_CHARSET.chars().collect(),
            ticks: 0,
            running: false,
            tick_interval: Seconds::from_millis(DEFAULT_TICK_INTERVAL_MS),
            tick_accumulator: 0.0,
        }
    }

    /// Replace the tick interval used by [`TextScramble::advance`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositive` unless `interval` is finite and positive.
    pub fn with_tick_interval(mut self, interval: Seconds) -> Result<Self, ConfigError> {
        ConfigError::require_positive("scramble.tick_interval", *interval)?;
        self.tick_interval = interval;
        Ok(self)
    }

    pub fn tick_interval(&self) -> Seconds {
        self.tick_interval
    }

    /// # Errors
    ///
    /// Returns `ConfigError::EmptyCharset` when `charset` has no characters.
    pub fn with_charset(text: &str, charset: &str) -> Result<Self, ConfigError> {
        if charset.is_empty() {
            return Err(ConfigError::EmptyCharset);
        }
        let mut scramble = Self::new(text);
        scramble.charset = charset.chars().collect();
        Ok(scramble)
    }

    /// Begin scrambling. Returns `false` if an animation is already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.ticks = 0;
        self.tick_accumulator = 0.0;
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of characters already resolved
    pub fn revealed(&self) -> usize {
        self.ticks.div_ceil(TICKS_PER_CHAR).min(self.text.len())
    }

    /// Label as currently displayed
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Advance one tick and return the new display string.
    ///
    /// Characters before the reveal cursor show their final glyph; the rest
    /// draw a random glyph from the charset.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> &str {
        if !self.running {
            return &self.display;
        }

        let revealed = self.revealed();
        self.display.clear();
        for (index, &c) in self.text.iter().enumerate() {
            let glyph = if c == ' ' || index < revealed {
                c
            } else {
                self.charset[rng.random_range(0..self.charset.len())]
            };
            self.display.push(glyph);
        }

        // Hold the resolved label for the remaining ticks of the last character
        if self.ticks >= TICKS_PER_CHAR * self.text.len() {
            self.running = false;
        }
        self.ticks += 1;

        &self.display
    }

    /// Advance by `dt`, running every tick that falls due.
    ///
    /// Non-positive or non-finite `dt` is ignored.
    pub fn advance<R: Rng>(&mut self, dt: Seconds, rng: &mut R) -> &str {
        let dt = *dt;
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return &self.display;
        }

        let interval = *self.tick_interval;
        self.tick_accumulator += dt;
        while self.tick_accumulator >= interval && self.running {
            self.tick_accumulator -= interval;
            self.tick(rng);
        }
        if !self.running {
            self.tick_accumulator = 0.0;
        }

        &self.display
    }
}
