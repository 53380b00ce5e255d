//! Plexus simulator configuration
//!
//! All values are initialization-time parameters; a running simulator never
//! changes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core_types::Rgb;
use crate::error::ConfigError;

/// Particle count preset
///
/// Edge rebuild cost grows with the square of the particle count under the
/// brute-force strategy, so denser presets pair well with `EdgeStrategy::Grid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticleDensity {
    /// 120 particles, for low-power devices
    Low,
    /// 250 particles, the standard background
    Medium,
    /// 500 particles
    High,
}

impl ParticleDensity {
    #[must_use]
    pub const fn particle_count(&self) -> usize {
        match self {
            Self::Low => 120,
            Self::Medium => 250,
            Self::High => 500,
        }
    }

    /// Strategy that keeps the per-frame edge rebuild cheap for this density
    #[must_use]
    pub const fn recommended_strategy(&self) -> EdgeStrategy {
        match self {
            Self::Low | Self::Medium => EdgeStrategy::BruteForce,
            Self::High => EdgeStrategy::Grid,
        }
    }
}

/// Algorithm used to find particle pairs within the connection distance
///
/// Both strategies emit exactly the same edges in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeStrategy {
    /// Test every pair, O(N²)
    #[default]
    BruteForce,
    /// Uniform spatial hash with cell size equal to the connection distance
    Grid,
}

impl fmt::Display for EdgeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeStrategy::BruteForce => write!(f, "brute-force"),
            EdgeStrategy::Grid => write!(f, "grid"),
        }
    }
}

impl FromStr for EdgeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brute-force" | "bruteforce" | "brute" => Ok(EdgeStrategy::BruteForce),
            "grid" | "spatial-grid" => Ok(EdgeStrategy::Grid),
            other => Err(format!(
                "unknown edge strategy '{other}' (expected 'brute-force' or 'grid')"
            )),
        }
    }
}

/// Parameters of the particle cloud, pointer interaction and materials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexusConfig {
    /// Number of particles, fixed for the simulator's lifetime
    pub particle_count: usize,
    /// Side of the cube (centered on the origin) particles bounce inside
    pub area_size: f32,
    /// Particles closer than this are connected by a line
    pub connection_distance: f32,
    /// Pointer influence radius in the XY plane
    pub repulsion_radius: f32,
    /// Pointer push strength
    pub repulsion_strength: f32,
    /// Fraction of velocity removed per frame, 0 keeps velocities undamped
    pub damping: f32,
    /// Line segment capacity per particle; total capacity is `particle_count * this`
    pub max_edges_per_particle: usize,
    /// Initial velocity components are drawn from `[-initial_speed, initial_speed]`
    pub initial_speed: f32,
    /// Pair search algorithm
    pub edge_strategy: EdgeStrategy,
    /// Point/line color at progress 0
    pub color_start: Rgb,
    /// Point/line color at progress 1
    pub color_end: Rgb,
    /// Line opacity at progress 0
    pub line_opacity_start: f32,
    /// Line opacity at progress 1
    pub line_opacity_end: f32,
}

impl Default for PlexusConfig {
    fn default() -> Self {
        Self {
            particle_count: ParticleDensity::Medium.particle_count(),
            area_size: 30.0,
            connection_distance: 3.5,
            repulsion_radius: 4.0,
            repulsion_strength: 0.5,
            damping: 0.0,
            max_edges_per_particle: 10,
            initial_speed: 0.01,
            edge_strategy: EdgeStrategy::BruteForce,
            color_start: Rgb::WHITE,
            color_end: Rgb::BLACK,
            line_opacity_start: 0.15,
            line_opacity_end: 0.3,
        }
    }
}

impl PlexusConfig {
    /// Default configuration sized for a density preset
    pub fn with_density(density: ParticleDensity) -> Self {
        Self {
            particle_count: density.particle_count(),
            edge_strategy: density.recommended_strategy(),
            ..Self::default()
        }
    }

    /// Half the cube side: the per-axis bounce threshold
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.area_size * 0.5
    }

    /// Total number of line segments the edge buffer can hold
    #[inline]
    pub fn edge_capacity(&self) -> usize {
        self.particle_count
            .saturating_mul(self.max_edges_per_particle)
    }

    /// Fail fast on degenerate parameters
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyParticleSet);
        }
        if self.max_edges_per_particle == 0 {
            return Err(ConfigError::ZeroEdgeCapacity);
        }
        ConfigError::require_positive("area_size", self.area_size)?;
        ConfigError::require_positive("connection_distance", self.connection_distance)?;
        ConfigError::require_positive("repulsion_radius", self.repulsion_radius)?;
        ConfigError::require_finite("repulsion_strength", self.repulsion_strength)?;
        ConfigError::require_range("damping", self.damping, 0.0, 1.0)?;
        ConfigError::require_range("initial_speed", self.initial_speed, 0.0, f32::MAX)?;
        ConfigError::require_range("line_opacity_start", self.line_opacity_start, 0.0, 1.0)?;
        ConfigError::require_range("line_opacity_end", self.line_opacity_end, 0.0, 1.0)?;
        Ok(())
    }
}
