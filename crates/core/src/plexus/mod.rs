//! Plexus particle simulator
//!
//! A fixed set of particles drifts inside a cube centered on the origin.
//! Every frame each particle is pushed away from the pointer (XY plane only),
//! integrated with a unit timestep, and bounced off the cube walls by flipping
//! the offending velocity component. The edge list connecting nearby
//! particles is then rebuilt from scratch.
//!
//! Bouncing flips velocity but never clamps position, so a particle can sit
//! up to one frame of motion outside the cube. Repulsion accumulates into
//! velocity with no friction unless `damping` is set.

pub mod config;
pub mod edges;
pub mod material;

pub use config::{EdgeStrategy, ParticleDensity, PlexusConfig};
pub use edges::{create_edge_builder, BruteForceEdges, EdgeBuffer, EdgeBuilder, GridEdges};
pub use material::PlexusMaterials;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::core_types::{Progress, Vec2, Vec3};
use crate::error::ConfigError;

// Scales the normalized push into a per-frame velocity change
const REPULSION_SCALE: f32 = 0.1;

/// Per-particle constants of the integration step
#[derive(Debug, Clone, Copy)]
struct StepParams {
    half_extent: f32,
    repulsion_radius: f32,
    repulsion_radius_sq: f32,
    repulsion_gain: f32,
    retain: f32,
}

impl StepParams {
    fn from_config(config: &PlexusConfig) -> Self {
        Self {
            half_extent: config.half_extent(),
            repulsion_radius: config.repulsion_radius,
            repulsion_radius_sq: config.repulsion_radius * config.repulsion_radius,
            repulsion_gain: config.repulsion_strength * REPULSION_SCALE,
            retain: 1.0 - config.damping,
        }
    }
}

/// Velocity change from the pointer, XY only.
///
/// Zero outside the radius and exactly at the pointer, where the push
/// direction is undefined.
#[inline]
fn repulsion(position: &Vec3, pointer: Vec2, params: &StepParams) -> Vec2 {
    let dx = position.x - pointer.x;
    let dy = position.y - pointer.y;
    let dist_sq = dx * dx + dy * dy;

    if dist_sq >= params.repulsion_radius_sq {
        return Vec2::zeros();
    }
    let dist = dist_sq.sqrt();
    if dist <= 0.0 {
        return Vec2::zeros();
    }

    let force = (params.repulsion_radius - dist) / params.repulsion_radius;
    Vec2::new(
        (dx / dist) * force * params.repulsion_gain,
        (dy / dist) * force * params.repulsion_gain,
    )
}

/// Advance one particle by one frame
#[inline]
fn integrate_particle(position: &mut Vec3, velocity: &mut Vec3, pointer: Vec2, params: &StepParams) {
    let push = repulsion(position, pointer, params);
    velocity.x += push.x;
    velocity.y += push.y;

    if params.retain != 1.0 {
        *velocity *= params.retain;
    }

    *position += *velocity;

    for axis in 0..3 {
        if position[axis].abs() > params.half_extent {
            velocity[axis] = -velocity[axis];
        }
    }
}

/// Borrowed view of the simulator outputs after a step
#[derive(Debug, Clone, Copy)]
pub struct PlexusFrame<'a> {
    /// One position per particle, in index order
    pub positions: &'a [Vec3],
    /// Active line segments (`len <= capacity`)
    pub segments: &'a [[Vec3; 2]],
    /// Particle index pairs aligned with `segments`
    pub pairs: &'a [(u32, u32)],
    /// Qualifying pairs that did not fit in the segment buffer
    pub dropped_edges: usize,
    pub materials: PlexusMaterials,
}

/// Summary statistics for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlexusStats {
    pub frame: u64,
    pub particle_count: usize,
    pub edge_count: usize,
    pub edge_capacity: usize,
    pub dropped_edges: usize,
    pub max_speed: f32,
    pub mean_speed: f32,
}

/// Particle cloud with pointer repulsion and proximity edges
pub struct PlexusSimulator {
    config: PlexusConfig,
    params: StepParams,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    edges: EdgeBuffer,
    builder: Box<dyn EdgeBuilder>,
    materials: PlexusMaterials,
    frame: u64,
    truncation_reported: bool,
}

impl PlexusSimulator {
    /// Create a simulator with particles seeded from the thread RNG
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is degenerate.
    pub fn new(config: PlexusConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::rng())
    }

    /// Create a simulator whose initial particles are reproducible from `seed`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is degenerate.
    pub fn with_seed(config: PlexusConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Create a simulator drawing initial particles from `rng`.
    ///
    /// Positions are uniform in the cube, velocity components uniform in
    /// `[-initial_speed, initial_speed]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is degenerate.
    pub fn with_rng<R: Rng>(config: PlexusConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let n = config.particle_count;
        let side = config.area_size;
        let speed = config.initial_speed;

        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        for _ in 0..n {
            positions.push(Vec3::new(
                (rng.random::<f32>() - 0.5) * side,
                (rng.random::<f32>() - 0.5) * side,
                (rng.random::<f32>() - 0.5) * side,
            ));
            velocities.push(Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0 * speed,
                (rng.random::<f32>() - 0.5) * 2.0 * speed,
                (rng.random::<f32>() - 0.5) * 2.0 * speed,
            ));
        }

        Self::from_particles(config, positions, velocities)
    }

    /// Create a simulator from explicit particle state
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParticleCountMismatch` if either array length
    /// differs from `config.particle_count`, or any other validation error.
    pub fn from_particles(
        config: PlexusConfig,
        positions: Vec<Vec3>,
        velocities: Vec<Vec3>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if positions.len() != config.particle_count || velocities.len() != config.particle_count {
            return Err(ConfigError::ParticleCountMismatch {
                expected: config.particle_count,
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }

        let edges = EdgeBuffer::with_capacity(config.edge_capacity());
        let builder = create_edge_builder(config.edge_strategy, config.connection_distance);

        info!(
            "Plexus simulator initialized: {} particles, area={:.1}, link<{:.2}, strategy={}, edge capacity={}",
            config.particle_count,
            config.area_size,
            config.connection_distance,
            config.edge_strategy,
            edges.capacity()
        );

        Ok(Self {
            params: StepParams::from_config(&config),
            materials: PlexusMaterials::at(&config, Progress::ZERO),
            config,
            positions,
            velocities,
            edges,
            builder,
            frame: 0,
            truncation_reported: false,
        })
    }

    /// Advance one frame.
    ///
    /// `pointer` is the pointer position projected onto the particle plane
    /// (world units); `progress` drives the material colors.
    pub fn step(&mut self, pointer: Vec2, progress: Progress) -> PlexusFrame<'_> {
        self.frame += 1;
        self.materials = PlexusMaterials::at(&self.config, progress);

        let params = self.params;
        for (position, velocity) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            integrate_particle(position, velocity, pointer, &params);
        }

        self.builder
            .rebuild(&self.positions, self.config.connection_distance, &mut self.edges);

        if self.edges.is_truncated() && !self.truncation_reported {
            warn!(
                "Plexus edge buffer full at frame {}: dropped {} pairs beyond capacity {}",
                self.frame,
                self.edges.dropped(),
                self.edges.capacity()
            );
            self.truncation_reported = true;
        }

        debug!(
            "Plexus frame {}: {} edges ({} dropped), pointer=({:.2}, {:.2}), progress={}",
            self.frame,
            self.edges.len(),
            self.edges.dropped(),
            pointer.x,
            pointer.y,
            progress
        );

        self.frame_view()
    }

    /// Outputs of the most recent step
    pub fn frame_view(&self) -> PlexusFrame<'_> {
        PlexusFrame {
            positions: &self.positions,
            segments: self.edges.segments(),
            pairs: self.edges.pairs(),
            dropped_edges: self.edges.dropped(),
            materials: self.materials,
        }
    }

    pub fn config(&self) -> &PlexusConfig {
        &self.config
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn edges(&self) -> &EdgeBuffer {
        &self.edges
    }

    pub fn materials(&self) -> PlexusMaterials {
        self.materials
    }

    /// Number of completed steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn edge_strategy(&self) -> EdgeStrategy {
        self.builder.strategy()
    }

    pub fn stats(&self) -> PlexusStats {
        let (max_speed, total_speed) = self
            .velocities
            .iter()
            .map(|v| v.norm())
            .fold((0.0_f32, 0.0_f32), |(max, sum), s| (max.max(s), sum + s));

        PlexusStats {
            frame: self.frame,
            particle_count: self.positions.len(),
            edge_count: self.edges.len(),
            edge_capacity: self.edges.capacity(),
            dropped_edges: self.edges.dropped(),
            max_speed,
            mean_speed: total_speed / self.velocities.len() as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> StepParams {
        StepParams::from_config(&PlexusConfig::default())
    }

    #[test]
    fn test_repulsion_outside_radius_is_zero() {
        let push = repulsion(&Vec3::new(10.0, 0.0, 0.0), Vec2::zeros(), &params());
        assert_eq!(push, Vec2::zeros());
    }

    #[test]
    fn test_repulsion_at_pointer_is_zero() {
        let push = repulsion(&Vec3::new(1.0, 2.0, 7.0), Vec2::new(1.0, 2.0), &params());
        assert_eq!(push, Vec2::zeros());
        assert!(push.x.is_finite() && push.y.is_finite());
    }

    #[test]
    fn test_repulsion_magnitude() {
        // dist = 2, radius = 4: force = 0.5, gain = 0.5 * 0.1
        let push = repulsion(&Vec3::new(2.0, 0.0, 0.0), Vec2::zeros(), &params());
        assert_relative_eq!(push.x, 0.025, epsilon = 1e-7);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn test_repulsion_ignores_depth() {
        let near = repulsion(&Vec3::new(0.0, 1.0, 0.0), Vec2::zeros(), &params());
        let deep = repulsion(&Vec3::new(0.0, 1.0, -50.0), Vec2::zeros(), &params());
        assert_eq!(near, deep);
    }

    #[test]
    fn test_bounce_flips_without_clamping() {
        let mut p = Vec3::new(14.995, 0.0, 0.0);
        let mut v = Vec3::new(0.01, 0.0, 0.0);
        integrate_particle(&mut p, &mut v, Vec2::new(100.0, 100.0), &params());
        assert!(p.x > 15.0);
        assert_eq!(v.x, -0.01);
    }

    #[test]
    fn test_damping_scales_velocity() {
        let config = PlexusConfig {
            damping: 0.5,
            ..Default::default()
        };
        let params = StepParams::from_config(&config);
        let mut p = Vec3::zeros();
        let mut v = Vec3::new(0.02, -0.02, 0.0);
        integrate_particle(&mut p, &mut v, Vec2::new(100.0, 100.0), &params);
        assert_eq!(v, Vec3::new(0.01, -0.01, 0.0));
        assert_eq!(p, Vec3::new(0.01, -0.01, 0.0));
    }

    #[test]
    fn test_seeded_construction_is_reproducible() {
        let a = PlexusSimulator::with_seed(PlexusConfig::default(), 7).unwrap();
        let b = PlexusSimulator::with_seed(PlexusConfig::default(), 7).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.velocities(), b.velocities());
    }

    #[test]
    fn test_initial_state_within_bounds() {
        let sim = PlexusSimulator::with_seed(PlexusConfig::default(), 3).unwrap();
        assert_eq!(sim.particle_count(), 250);
        for p in sim.positions() {
            assert!(p.iter().all(|c| c.abs() <= 15.0));
        }
        for v in sim.velocities() {
            assert!(v.iter().all(|c| c.abs() <= 0.01));
        }
        assert_eq!(sim.edges().capacity(), 2500);
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let config = PlexusConfig {
            particle_count: 2,
            ..Default::default()
        };
        let err = PlexusSimulator::from_particles(config, vec![Vec3::zeros(); 2], vec![Vec3::zeros(); 1]);
        assert!(matches!(
            err,
            Err(ConfigError::ParticleCountMismatch {
                expected: 2,
                positions: 2,
                velocities: 1
            })
        ));
    }

    #[test]
    fn test_stats_track_frames() {
        let mut sim = PlexusSimulator::with_seed(PlexusConfig::default(), 1).unwrap();
        sim.step(Vec2::new(100.0, 100.0), Progress::ZERO);
        sim.step(Vec2::new(100.0, 100.0), Progress::ZERO);
        let stats = sim.stats();
        assert_eq!(stats.frame, 2);
        assert_eq!(stats.particle_count, 250);
        assert_eq!(stats.edge_count, sim.edges().len());
        assert!(stats.max_speed >= stats.mean_speed);
    }
}
