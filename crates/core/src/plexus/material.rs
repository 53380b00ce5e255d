//! Point and line material state driven by scroll progress.

use serde::{Deserialize, Serialize};

use crate::core_types::{Progress, Rgb};

use super::config::PlexusConfig;

/// Colors and opacity the point and line renderers should use this frame
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlexusMaterials {
    pub point_color: Rgb,
    pub line_color: Rgb,
    pub line_opacity: f32,
}

impl PlexusMaterials {
    /// Interpolate both materials at `progress`
    pub fn at(config: &PlexusConfig, progress: Progress) -> Self {
        let color = config.color_start.lerp(config.color_end, progress);
        let t = *progress;

        Self {
            point_color: color,
            line_color: color,
            line_opacity: config.line_opacity_start * (1.0 - t) + config.line_opacity_end * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_material_endpoints() {
        let config = PlexusConfig::default();

        let top = PlexusMaterials::at(&config, Progress::ZERO);
        assert_eq!(top.point_color, Rgb::WHITE);
        assert_eq!(top.line_color, Rgb::WHITE);
        assert_eq!(top.line_opacity, 0.15);

        let bottom = PlexusMaterials::at(&config, Progress::ONE);
        assert_eq!(bottom.point_color, Rgb::BLACK);
        assert_eq!(bottom.line_opacity, 0.3);
    }

    #[test]
    fn test_material_midpoint() {
        let mid = PlexusMaterials::at(&PlexusConfig::default(), Progress::clamped(0.5));
        assert_eq!(mid.point_color, Rgb::new(0.5, 0.5, 0.5));
        assert_relative_eq!(mid.line_opacity, 0.225, epsilon = 1e-6);
    }
}
