//! Pointer feed for the liquid flow-map hover
//!
//! The flow map itself is a GPU ping-pong texture owned by the renderer. This
//! module keeps the CPU side: pointer position in container UV space and a
//! smoothed pointer velocity, both handed to the flow map once per frame.
//!
//! Pointer events and frames arrive independently. A frame with no pointer
//! event since the previous frame parks the pointer at `(-1, -1)` (off the
//! map) and lets the smoothed velocity decay toward zero.

use serde::{Deserialize, Serialize};

use crate::core_types::{Pixels, Seconds, Vec2};
use crate::error::ConfigError;

/// Pointer position that places the splat outside the map
pub const PARKED: f32 = -1.0;

/// Flow-map parameters and pointer smoothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowMapConfig {
    /// Splat radius in UV units
    pub falloff: f32,
    /// Per-frame retention of the flow texture
    pub dissipation: f32,
    /// Splat strength
    pub alpha: f32,
    /// Shortest time between pointer events used for velocity
    pub min_event_interval: Seconds,
    /// Velocity blend factor while the pointer is moving
    pub moving_blend: f32,
    /// Velocity blend factor while the pointer rests
    pub idle_blend: f32,
}

impl Default for FlowMapConfig {
    fn default() -> Self {
        Self {
            falloff: 0.3,
            dissipation: 0.92,
            alpha: 0.5,
            min_event_interval: Seconds::from_millis(10.4),
            moving_blend: 0.15,
            idle_blend: 0.1,
        }
    }
}

impl FlowMapConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` for a non-positive falloff or event interval, or
    /// a factor outside [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("flow.falloff", self.falloff)?;
        ConfigError::require_range("flow.dissipation", self.dissipation, 0.0, 1.0)?;
        ConfigError::require_range("flow.alpha", self.alpha, 0.0, 1.0)?;
        ConfigError::require_positive("flow.min_event_interval", *self.min_event_interval)?;
        ConfigError::require_range("flow.moving_blend", self.moving_blend, 0.0, 1.0)?;
        ConfigError::require_range("flow.idle_blend", self.idle_blend, 0.0, 1.0)?;
        Ok(())
    }
}

/// Flow-map inputs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowSample {
    /// Pointer in container UV (origin bottom-left), or `(-1, -1)` when parked
    pub mouse: Vec2,
    /// Smoothed pointer velocity in pixels per millisecond, y down
    pub velocity: Vec2,
    /// Container width over height
    pub aspect: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastEvent {
    position: Vec2,
    time: f32,
}

/// Pointer tracker feeding the flow map
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPointer {
    config: FlowMapConfig,
    mouse: Vec2,
    event_velocity: Vec2,
    velocity: Vec2,
    last_event: Option<LastEvent>,
    moved: bool,
    aspect: f32,
}

impl Default for FlowPointer {
    fn default() -> Self {
        Self::with_valid_config(FlowMapConfig::default())
    }
}

impl FlowPointer {
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is rejected by
    /// [`FlowMapConfig::validate`].
    pub fn new(config: FlowMapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: FlowMapConfig) -> Self {
        Self {
            config,
            mouse: Vec2::new(PARKED, PARKED),
            event_velocity: Vec2::zeros(),
            velocity: Vec2::zeros(),
            last_event: None,
            moved: false,
            aspect: 1.0,
        }
    }

    pub fn config(&self) -> &FlowMapConfig {
        &self.config
    }

    /// Record the container size. A degenerate size leaves the aspect at its
    /// previous value.
    pub fn resize(&mut self, width: Pixels, height: Pixels) {
        if width.is_positive_finite() && height.is_positive_finite() {
            self.aspect = *width / *height;
        }
    }

    /// Record a pointer or touch event.
    ///
    /// `x` and `y` are relative to the container's top-left corner, `now` is
    /// the event timestamp. Events on a degenerate container are ignored.
    pub fn pointer_moved(
        &mut self,
        x: Pixels,
        y: Pixels,
        width: Pixels,
        height: Pixels,
        now: Seconds,
    ) {
        if !width.is_positive_finite() || !height.is_positive_finite() {
            return;
        }

        let position = Vec2::new(*x, *y);
        self.mouse = Vec2::new(*x / *width, 1.0 - *y / *height);

        let last = *self.last_event.get_or_insert(LastEvent {
            position,
            time: *now,
        });
        let delta = position - last.position;
        let elapsed_ms = ((*now - last.time) * 1000.0).max(*self.config.min_event_interval * 1000.0);

        self.event_velocity = delta / elapsed_ms;
        self.last_event = Some(LastEvent {
            position,
            time: *now,
        });
        self.moved = true;
    }

    /// Produce this frame's flow-map inputs
    pub fn update(&mut self) -> FlowSample {
        if !self.moved {
            self.mouse = Vec2::new(PARKED, PARKED);
            self.event_velocity = Vec2::zeros();
        }
        self.moved = false;

        let blend = if self.event_velocity.norm() > 0.0 {
            self.config.moving_blend
        } else {
            self.config.idle_blend
        };
        self.velocity += (self.event_velocity - self.velocity) * blend;

        self.sample()
    }

    /// Latest inputs without advancing
    pub fn sample(&self) -> FlowSample {
        FlowSample {
            mouse: self.mouse,
            velocity: self.velocity,
            aspect: self.aspect,
        }
    }
}
