//! Linear RGB colors and interpolation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::units::Progress;

/// Linear RGB color with channels in [0, 1]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Rgb { r, g, b }
    }

    /// Pack into `0xRRGGBB`, rounding each channel to the nearest byte.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// Per-channel linear interpolation toward `other`.
    ///
    /// `t = 0` returns `self` exactly and `t = 1` returns `other` exactly.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Rgb, t: Progress) -> Rgb {
        let t = *t;
        Rgb {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }
}

// `a + (b - a) * t` is not exact at t = 1 in floating point; the two-product
// form hits both endpoints.
#[inline(always)]
fn lerp_channel(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Rgb::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), 0xff8000);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Rgb::from_hex(0x050505);
        let b = Rgb::new(0.3, 0.7, 0.9);
        assert_eq!(a.lerp(b, Progress::ZERO), a);
        assert_eq!(a.lerp(b, Progress::ONE), b);
    }

    #[test]
    fn test_lerp_midpoint_is_mean() {
        let mid = Rgb::WHITE.lerp(Rgb::BLACK, Progress::clamped(0.5));
        assert_eq!(mid, Rgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }
}
