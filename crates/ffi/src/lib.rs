//! C ABI for the plexus background scene
//!
//! Native hosts create a scene with `plexus_scene_new`, call
//! `plexus_scene_advance` once per frame, then copy particle positions and
//! line segments into their own vertex buffers. All functions return a
//! `PlexusErrorCode`; details of the last failure on the calling thread are
//! available from `plexus_get_last_error`.

mod error;
mod helpers;
mod instance;
mod scene;

pub use error::{plexus_get_last_error, plexus_get_last_error_code, PlexusErrorCode};
pub use instance::{
    plexus_scene_config_default, plexus_scene_destroy, plexus_scene_new, PlexusColor,
    PlexusSceneConfig, PlexusSceneInstance,
};
pub use scene::{
    plexus_scene_advance, plexus_scene_copy_positions, plexus_scene_copy_segments,
    PlexusFrameInput, PlexusFrameState, PlexusTransform,
};
