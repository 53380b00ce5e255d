//! Page chrome animations
//!
//! Small state machines driven by the host's timers and observers: the
//! loading counter, the spring-following cursor, the hover text scramble, the
//! flow-map pointer feed, section reveals, the project carousel and the
//! background fade.

pub mod background_fade;
pub mod carousel;
pub mod cursor;
pub mod easing;
pub mod flow_pointer;
pub mod loader;
pub mod reveal;
pub mod text_scramble;

pub use background_fade::{BackgroundFade, FadeConfig};
pub use carousel::{Carousel, DEFAULT_SLIDE_DURATION_SECS};
pub use cursor::{CursorFollower, CursorState, CursorVariant, SpringParams};
pub use easing::CubicBezier;
pub use flow_pointer::{FlowMapConfig, FlowPointer, FlowSample};
pub use loader::{LoadProgress, LoaderConfig, LoaderPhase};
pub use reveal::{RevealConfig, RevealStyle, ScrollReveal};
pub use text_scramble::{TextScramble, DEFAULT_CHARSET, DEFAULT_TICK_INTERVAL_MS};
