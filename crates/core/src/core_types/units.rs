//! Semantic unit types for frame inputs and interpolation state
//!
//! Newtype wrappers keep screen-space quantities (pixels), time (seconds) and
//! normalized interpolation values (progress, percent) from being mixed up at
//! the host boundary.
//!
//! # Design Philosophy
//! - All types use f32, matching the render pipeline's precision
//! - Implements common traits (Add, Sub, Ord, Display, etc.) where meaningful
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Serde support for serialization
//! - Private inner fields with explicit constructors
//!
//! # Usage
//! ```
//! use plexus_core::core_types::units::{Pixels, Progress};
//!
//! let scroll = Pixels::new(450.0);
//! let viewport = Pixels::new(900.0);
//! let progress = Progress::from_ratio(*scroll, *viewport);
//! assert!((*progress - 0.5).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Sub};

/// Compare f32 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f32_total_cmp(a: f32, b: f32) -> Ordering {
    a.total_cmp(&b)
}

macro_rules! impl_total_order {
    ($ty:ident) => {
        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                f32_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $ty {
            type Target = f32;
            #[inline]
            fn deref(&self) -> &f32 {
                &self.0
            }
        }

        impl From<$ty> for f32 {
            fn from(v: $ty) -> f32 {
                v.0
            }
        }
    };
}

// ============================================================================
// SCREEN SPACE
// ============================================================================

/// Screen-space length in CSS pixels (scroll offsets, viewport sizes)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Pixels(f32);

impl_total_order!(Pixels);

impl Pixels {
    /// Zero pixels
    pub const ZERO: Pixels = Pixels(0.0);

    /// Create a new pixel length.
    ///
    /// Negative values are allowed: elastic overscroll on touch devices reports
    /// negative scroll offsets for a few frames.
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Pixels(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether this length can be used as a divisor (finite and strictly positive)
    #[inline]
    #[must_use]
    pub fn is_positive_finite(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl From<f32> for Pixels {
    fn from(v: f32) -> Self {
        Pixels(v)
    }
}

impl Add for Pixels {
    type Output = Pixels;
    fn add(self, rhs: Pixels) -> Pixels {
        Pixels(self.0 + rhs.0)
    }
}

impl Sub for Pixels {
    type Output = Pixels;
    fn sub(self, rhs: Pixels) -> Pixels {
        Pixels(self.0 - rhs.0)
    }
}

impl AddAssign for Pixels {
    fn add_assign(&mut self, rhs: Pixels) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}px", self.0)
    }
}

// ============================================================================
// TIME
// ============================================================================

/// Time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f32);

impl_total_order!(Seconds);

impl Seconds {
    /// Zero seconds
    pub const ZERO: Seconds = Seconds(0.0);

    /// Create a new duration or timestamp in seconds
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Seconds(value)
    }

    /// Create from milliseconds
    #[inline]
    #[must_use]
    pub fn from_millis(ms: f32) -> Self {
        Seconds(ms / 1000.0)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Seconds {
    fn from(v: f32) -> Self {
        Seconds(v)
    }
}

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Seconds) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ============================================================================
// INTERPOLATION
// ============================================================================

/// Interpolation progress, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Progress(f32);

impl_total_order!(Progress);

impl Progress {
    /// Start of the interpolation
    pub const ZERO: Progress = Progress(0.0);

    /// End of the interpolation
    pub const ONE: Progress = Progress(1.0);

    /// Create a progress value, clamping into [0, 1].
    ///
    /// NaN maps to zero.
    #[inline]
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            return Progress::ZERO;
        }
        Progress(value.clamp(0.0, 1.0))
    }

    /// `numerator / denominator` clamped into [0, 1].
    ///
    /// A zero, negative or non-finite denominator yields zero instead of an
    /// infinite or undefined ratio.
    #[inline]
    #[must_use]
    pub fn from_ratio(numerator: f32, denominator: f32) -> Self {
        if !denominator.is_finite() || denominator <= 0.0 {
            return Progress::ZERO;
        }
        Progress::clamped(numerator / denominator)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert to percentage (0-100)
    #[inline]
    #[must_use]
    pub fn to_percent(self) -> Percent {
        Percent(self.0 * 100.0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Percentage within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f32);

impl_total_order!(Percent);

impl Percent {
    /// 0%
    pub const ZERO: Percent = Percent(0.0);

    /// 100%
    pub const FULL: Percent = Percent(100.0);

    /// Create a percentage, clamping into [0, 100]. NaN maps to zero.
    #[inline]
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            return Percent::ZERO;
        }
        Percent(value.clamp(0.0, 100.0))
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert to a [0, 1] progress value
    #[inline]
    #[must_use]
    pub fn to_progress(self) -> Progress {
        Progress::clamped(self.0 / 100.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps() {
        assert_eq!(Progress::clamped(-0.5), Progress::ZERO);
        assert_eq!(Progress::clamped(1.5), Progress::ONE);
        assert_eq!(Progress::clamped(f32::NAN), Progress::ZERO);
        assert_eq!(*Progress::clamped(0.25), 0.25);
    }

    #[test]
    fn test_progress_ratio_guards_denominator() {
        assert_eq!(Progress::from_ratio(100.0, 0.0), Progress::ZERO);
        assert_eq!(Progress::from_ratio(100.0, -10.0), Progress::ZERO);
        assert_eq!(Progress::from_ratio(100.0, f32::INFINITY), Progress::ZERO);
        assert_eq!(Progress::from_ratio(300.0, 100.0), Progress::ONE);
    }

    #[test]
    fn test_percent_round_trip() {
        let p = Percent::clamped(42.0);
        assert!((*p.to_progress() - 0.42).abs() < 1e-6);
        assert_eq!(Percent::clamped(250.0), Percent::FULL);
    }

    #[test]
    fn test_ordering() {
        assert!(Pixels::new(10.0) < Pixels::new(20.0));
        assert!(Seconds::new(1.0) > Seconds::ZERO);
        assert_eq!(Pixels::new(10.0) + Pixels::new(5.0), Pixels::new(15.0));
    }
}
