//! Per-frame background scene
//!
//! `BackgroundScene` is the single entry point a host render loop calls once
//! per animation frame. The host samples pointer and scroll state, packs them
//! into an immutable `FrameInput`, and receives a `FrameOutput` borrowing the
//! scene's buffers until the next call.
//!
//! Frame order:
//! 1. Parallax: group transform, `progress`, background color
//! 2. Pointer projection onto the particle plane
//! 3. Plexus step: repulsion, integration, bounce, edge rebuild, materials
//! 4. Floating shape animation from elapsed time

pub mod shape;

pub use shape::FloatingShape;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::core_types::{Pixels, Progress, Rgb, Seconds, Vec2};
use crate::error::ConfigError;
use crate::parallax::{GroupTransform, ParallaxConfig, ParallaxDriver};
use crate::plexus::{PlexusConfig, PlexusFrame, PlexusSimulator, PlexusStats};
use crate::projection::PointerProjection;

/// Complete initialization-time configuration of a scene
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub parallax: ParallaxConfig,
    pub plexus: PlexusConfig,
    pub projection: PointerProjection,
    pub shape: FloatingShape,
    /// Seed for the initial particle cloud; `None` uses the thread RNG
    pub seed: Option<u64>,
}

impl SceneConfig {
    /// # Errors
    ///
    /// Returns the first `ConfigError` found in any section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parallax.validate()?;
        self.plexus.validate()?;
        self.projection.validate()?;
        ConfigError::require_positive("tumble_period", self.shape.tumble_period)?;
        ConfigError::require_positive("bob_period", self.shape.bob_period)?;
        Ok(())
    }
}

/// Host state sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Monotonic time since the scene started
    pub elapsed: Seconds,
    /// Pointer in normalized device coordinates, [-1, 1]², y up
    pub pointer_ndc: Vec2,
    /// Vertical scroll offset of the page
    pub scroll_y: Pixels,
    pub viewport_width: Pixels,
    pub viewport_height: Pixels,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            elapsed: Seconds::ZERO,
            pointer_ndc: Vec2::zeros(),
            scroll_y: Pixels::ZERO,
            viewport_width: Pixels::ZERO,
            viewport_height: Pixels::ZERO,
        }
    }
}

impl FrameInput {
    pub fn new(
        elapsed: f32,
        pointer_ndc: (f32, f32),
        scroll_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        Self {
            elapsed: Seconds::new(elapsed),
            pointer_ndc: Vec2::new(pointer_ndc.0, pointer_ndc.1),
            scroll_y: Pixels::new(scroll_y),
            viewport_width: Pixels::new(viewport_width),
            viewport_height: Pixels::new(viewport_height),
        }
    }
}

/// Everything the host renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput<'a> {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Transform of the decorative group
    pub group: GroupTransform,
    pub background_color: Rgb,
    pub progress: Progress,
    /// Pointer on the particle plane, as used for repulsion
    pub pointer_world: Vec2,
    /// Particle positions, segments and materials
    pub plexus: PlexusFrame<'a>,
    /// Transform of the floating hero shape
    pub shape: GroupTransform,
}

impl FrameOutput<'_> {
    pub fn group_transform(&self) -> GroupTransform {
        self.group
    }

    pub fn shape_transform(&self) -> GroupTransform {
        self.shape
    }

    pub fn particle_positions(&self) -> &[crate::core_types::Vec3] {
        self.plexus.positions
    }

    pub fn line_segments(&self) -> &[[crate::core_types::Vec3; 2]] {
        self.plexus.segments
    }

    pub fn point_color(&self) -> Rgb {
        self.plexus.materials.point_color
    }

    pub fn line_color(&self) -> Rgb {
        self.plexus.materials.line_color
    }

    pub fn line_opacity(&self) -> f32 {
        self.plexus.materials.line_opacity
    }
}

/// Parallax driver, plexus simulator and shape animator behind one frame call
pub struct BackgroundScene {
    parallax: ParallaxDriver,
    plexus: PlexusSimulator,
    projection: PointerProjection,
    shape: FloatingShape,
    frame: u64,
}

impl BackgroundScene {
    /// Build a scene, validating every section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any parameter is degenerate.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let parallax = ParallaxDriver::new(config.parallax)?;
        let plexus = match config.seed {
            Some(seed) => PlexusSimulator::with_seed(config.plexus, seed)?,
            None => PlexusSimulator::new(config.plexus)?,
        };

        info!(
            "Background scene ready: {} particles, fov={:.0}°, focal distance={:.1}, seed={:?}",
            plexus.particle_count(),
            config.projection.fov_y_degrees,
            config.projection.distance,
            config.seed
        );

        Ok(Self::from_parts(
            parallax,
            plexus,
            config.projection,
            config.shape,
        ))
    }

    /// Assemble a scene from already-built components
    pub fn from_parts(
        parallax: ParallaxDriver,
        plexus: PlexusSimulator,
        projection: PointerProjection,
        shape: FloatingShape,
    ) -> Self {
        Self {
            parallax,
            plexus,
            projection,
            shape,
            frame: 0,
        }
    }

    /// Run one frame
    pub fn advance(&mut self, input: &FrameInput) -> FrameOutput<'_> {
        self.frame += 1;

        let parallax = self
            .parallax
            .compute(input.scroll_y, input.viewport_height, input.pointer_ndc);

        let pointer_world = self.projection.project(
            input.pointer_ndc,
            input.viewport_width,
            input.viewport_height,
        );

        let shape = self.shape.transform_at(input.elapsed);

        trace!(
            "Scene frame {}: t={}, scroll={}, progress={}",
            self.frame,
            input.elapsed,
            input.scroll_y,
            parallax.progress
        );

        let plexus = self.plexus.step(pointer_world, parallax.progress);

        FrameOutput {
            frame: self.frame,
            group: parallax.group,
            background_color: parallax.background_color,
            progress: parallax.progress,
            pointer_world,
            plexus,
            shape,
        }
    }

    /// Number of frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn parallax(&self) -> &ParallaxDriver {
        &self.parallax
    }

    pub fn plexus(&self) -> &PlexusSimulator {
        &self.plexus
    }

    pub fn projection(&self) -> &PointerProjection {
        &self.projection
    }

    pub fn stats(&self) -> PlexusStats {
        self.plexus.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> BackgroundScene {
        BackgroundScene::new(SceneConfig {
            seed: Some(11),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_advance_counts_frames() {
        let mut scene = seeded();
        let input = FrameInput::new(0.016, (0.0, 0.0), 0.0, 1280.0, 720.0);
        assert_eq!(scene.advance(&input).frame, 1);
        assert_eq!(scene.advance(&input).frame, 2);
        assert_eq!(scene.frame(), 2);
        assert_eq!(scene.plexus().frame(), 2);
    }

    #[test]
    fn test_outputs_follow_scroll() {
        let mut scene = seeded();
        let out = scene.advance(&FrameInput::new(1.0, (0.0, 0.0), 720.0, 1280.0, 720.0));

        assert_eq!(out.progress, Progress::ONE);
        assert_eq!(out.background_color, Rgb::WHITE);
        assert_eq!(out.point_color(), Rgb::BLACK);
        assert_eq!(out.line_opacity(), 0.3);
        assert_eq!(out.particle_positions().len(), 250);
        assert!(out.line_segments().len() <= 2500);
    }

    #[test]
    fn test_zero_height_viewport_is_safe() {
        let mut scene = seeded();
        let out = scene.advance(&FrameInput::new(0.0, (1.0, 1.0), 300.0, 0.0, 0.0));
        assert_eq!(out.progress, Progress::ZERO);
        assert!(out.pointer_world.x.is_finite());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SceneConfig {
            plexus: PlexusConfig {
                particle_count: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            BackgroundScene::new(config).err(),
            Some(ConfigError::EmptyParticleSet)
        );
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = seeded();
        let mut b = seeded();
        for i in 0..30 {
            let input = FrameInput::new(i as f32 / 60.0, (0.3, -0.2), i as f32 * 10.0, 1280.0, 720.0);
            let pa = a.advance(&input).plexus.pairs.to_vec();
            let pb = b.advance(&input).plexus.pairs.to_vec();
            assert_eq!(pa, pb);
        }
        assert_eq!(a.plexus().positions(), b.plexus().positions());
    }
}
