//! CSS-style cubic-bezier timing curves

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Newton iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 24;
const SOLVE_EPSILON: f32 = 1e-6;

/// Timing curve through (0, 0), (x1, y1), (x2, y2), (1, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// CSS `ease-in-out`
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

    /// Soft deceleration used by the section reveal
    pub const SOFT_OUT: CubicBezier = CubicBezier::new(0.25, 0.46, 0.45, 0.94);

    pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if an x control coordinate leaves
    /// [0, 1] (the curve would not be a function of time), or
    /// `ConfigError::NonFinite` for a non-finite y coordinate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_range("easing.x1", self.x1, 0.0, 1.0)?;
        ConfigError::require_range("easing.x2", self.x2, 0.0, 1.0)?;
        ConfigError::require_finite("easing.y1", self.y1)?;
        ConfigError::require_finite("easing.y2", self.y2)?;
        Ok(())
    }

    /// Eased value for normalized time `t`, clamped to [0, 1].
    /// Both endpoints are exact.
    pub fn apply(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(t);
        Self::sample(self.y1, self.y2, s)
    }

    /// Bezier component with endpoints 0 and 1, in Horner form
    #[inline]
    fn sample(p1: f32, p2: f32, s: f32) -> f32 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        ((a * s + b) * s + c) * s
    }

    #[inline]
    fn slope(p1: f32, p2: f32, s: f32) -> f32 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (3.0 * a * s + 2.0 * b) * s + c
    }

    /// Curve parameter whose x coordinate is `x`
    fn solve_x(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let d = Self::slope(self.x1, self.x2, s);
            if d.abs() < SOLVE_EPSILON {
                break;
            }
            s -= err / d;
        }

        // x(s) is monotonic on [0, 1] for valid control points
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::EASE_IN_OUT
    }
}
