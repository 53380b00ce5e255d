//! Configuration errors
//!
//! Every runtime operation in this crate is infallible; only constructing a
//! simulator or scene from bad parameters can fail.

/// Errors raised when validating initialization-time configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Particle count must be at least one
    EmptyParticleSet,
    /// A length or radius parameter must be finite and strictly positive
    NonPositive {
        /// Parameter name as it appears in the config
        name: &'static str,
        /// Rejected value
        value: f32,
    },
    /// A scalar parameter must be finite
    NonFinite {
        /// Parameter name as it appears in the config
        name: &'static str,
        /// Rejected value
        value: f32,
    },
    /// A parameter is outside its allowed range
    OutOfRange {
        /// Parameter name as it appears in the config
        name: &'static str,
        /// Rejected value
        value: f32,
        /// Inclusive lower bound
        min: f32,
        /// Inclusive upper bound
        max: f32,
    },
    /// Explicit particle arrays disagree with the configured count
    ParticleCountMismatch {
        /// Configured particle count
        expected: usize,
        /// Length of the positions array
        positions: usize,
        /// Length of the velocities array
        velocities: usize,
    },
    /// Edge capacity per particle must be at least one
    ZeroEdgeCapacity,
    /// Text scramble needs at least one glyph to draw from
    EmptyCharset,
    /// Carousel needs at least one slide
    EmptyCarousel,
}

impl ConfigError {
    /// Reject non-finite or non-positive values
    pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { name, value })
        }
    }

    /// Reject NaN and infinities
    pub(crate) fn require_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NonFinite { name, value })
        }
    }

    /// Reject values outside `[min, max]` (NaN included)
    pub(crate) fn require_range(
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    ) -> Result<(), ConfigError> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name,
                value,
                min,
                max,
            })
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyParticleSet => write!(f, "particle_count must be at least 1"),
            ConfigError::NonPositive { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            ConfigError::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            ConfigError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} must be within [{min}, {max}], got {value}"),
            ConfigError::ParticleCountMismatch {
                expected,
                positions,
                velocities,
            } => write!(
                f,
                "expected {expected} particles, got {positions} positions and {velocities} velocities"
            ),
            ConfigError::ZeroEdgeCapacity => {
                write!(f, "max_edges_per_particle must be at least 1")
            }
            ConfigError::EmptyCharset => write!(f, "scramble charset must not be empty"),
            ConfigError::EmptyCarousel => write!(f, "carousel needs at least one slide"),
        }
    }
}

impl std::error::Error for ConfigError {}
