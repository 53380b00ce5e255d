//! Normalized pointer to world-plane projection
//!
//! The plexus reacts to the pointer in world units on the plane at the
//! camera's focal distance. For a perspective camera with vertical field of
//! view `fov` at distance `d`, that plane spans `±tan(fov/2)·d` vertically and
//! `aspect` times that horizontally.

use serde::{Deserialize, Serialize};

use crate::core_types::{Pixels, Vec2};
use crate::error::ConfigError;

/// Perspective camera parameters used to project the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerProjection {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Distance from the camera to the particle plane
    pub distance: f32,
}

impl Default for PointerProjection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            distance: 20.0,
        }
    }
}

impl PointerProjection {
    /// # Errors
    ///
    /// Returns `ConfigError` unless the field of view is within (0, 180)
    /// degrees and the distance is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("distance", self.distance)?;
        ConfigError::require_positive("fov_y_degrees", self.fov_y_degrees)?;
        ConfigError::require_range("fov_y_degrees", self.fov_y_degrees, 0.0, 179.0)?;
        Ok(())
    }

    /// Half the visible plane height at the focal distance
    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.fov_y_degrees.to_radians() * 0.5).tan() * self.distance
    }

    /// Map a pointer in [-1, 1]² (y up) to the focal plane.
    ///
    /// A non-positive or non-finite viewport height falls back to a square
    /// aspect instead of dividing by zero.
    pub fn project(&self, pointer_ndc: Vec2, viewport_width: Pixels, viewport_height: Pixels) -> Vec2 {
        let aspect = if viewport_height.is_positive_finite() && viewport_width.is_positive_finite() {
            *viewport_width / *viewport_height
        } else {
            1.0
        };
        let half_h = self.half_height();

        Vec2::new(pointer_ndc.x * half_h * aspect, pointer_ndc.y * half_h)
    }
}

/// Convert a pointer in window pixels (y down) to normalized device coordinates
/// in [-1, 1]² (y up).
///
/// Returns the origin when the viewport is degenerate.
pub fn normalize_pointer(x: Pixels, y: Pixels, viewport_width: Pixels, viewport_height: Pixels) -> Vec2 {
    if !viewport_width.is_positive_finite() || !viewport_height.is_positive_finite() {
        return Vec2::zeros();
    }
    Vec2::new(
        (*x / *viewport_width) * 2.0 - 1.0,
        -((*y / *viewport_height) * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_projects_to_origin() {
        let p = PointerProjection::default().project(Vec2::zeros(), Pixels::new(1920.0), Pixels::new(1080.0));
        assert_eq!(p, Vec2::zeros());
    }

    #[test]
    fn test_corner_projection() {
        let proj = PointerProjection {
            fov_y_degrees: 90.0,
            distance: 10.0,
        };
        // tan(45°) = 1, so the plane spans ±10 vertically, ±20 at 2:1
        let p = proj.project(Vec2::new(1.0, -1.0), Pixels::new(200.0), Pixels::new(100.0));
        assert_relative_eq!(p.x, 20.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_viewport_uses_square_aspect() {
        let proj = PointerProjection::default();
        let p = proj.project(Vec2::new(1.0, 1.0), Pixels::new(800.0), Pixels::ZERO);
        assert_relative_eq!(p.x, p.y, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_pointer() {
        let w = Pixels::new(800.0);
        let h = Pixels::new(600.0);
        assert_eq!(normalize_pointer(Pixels::new(400.0), Pixels::new(300.0), w, h), Vec2::zeros());
        assert_eq!(normalize_pointer(Pixels::ZERO, Pixels::ZERO, w, h), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(w, h, w, h), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(w, h, w, Pixels::ZERO), Vec2::zeros());
    }

    #[test]
    fn test_validate() {
        assert!(PointerProjection::default().validate().is_ok());
        let flat = PointerProjection {
            fov_y_degrees: 0.0,
            ..Default::default()
        };
        assert!(flat.validate().is_err());
    }
}
