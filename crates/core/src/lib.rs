//! Plexus Background Core Library
//!
//! Per-frame state for a scroll and pointer reactive 3D page background.
//! The host render loop samples scroll offset, pointer and viewport, calls
//! [`BackgroundScene::advance`] once per frame, and draws what comes back:
//! a group transform, a blended background color and a plexus of drifting
//! particles joined by short line segments.
//!
//! ## Modules
//!
//! - `parallax`: scroll/pointer driven group transform and scroll progress
//! - `plexus`: particle drift, pointer repulsion, wall bounce, edge rebuild
//! - `projection`: pointer to focal-plane mapping
//! - `scene`: one-call frame orchestration and the floating hero shape
//! - `ui`: loading counter, cursor spring, text scramble, flow-map pointer,
//!   section reveal, carousel and background fade

// Core types and utilities
pub mod core_types;
pub mod error;

// Frame pipeline
pub mod parallax;
pub mod plexus;
pub mod projection;
pub mod scene;

// Page chrome
pub mod ui;

// Re-export core types
pub use core_types::{Percent, Pixels, Progress, Rgb, Seconds, SpatialIndex, Vec2, Vec3};
pub use error::ConfigError;

// Re-export pipeline types
pub use parallax::{scroll_progress, GroupTransform, ParallaxConfig, ParallaxDriver, ParallaxState};
pub use plexus::{
    create_edge_builder, EdgeBuilder, EdgeStrategy, ParticleDensity, PlexusConfig, PlexusFrame,
    PlexusMaterials, PlexusSimulator, PlexusStats,
};
pub use projection::{normalize_pointer, PointerProjection};
pub use scene::{BackgroundScene, FloatingShape, FrameInput, FrameOutput, SceneConfig};

// Re-export page chrome
pub use ui::{
    BackgroundFade, Carousel, CursorFollower, CursorVariant, FlowPointer, LoadProgress,
    ScrollReveal, TextScramble,
};
