use plexus_core::{
    BackgroundScene, EdgeStrategy, ParallaxConfig, PlexusConfig, PointerProjection, Rgb,
    SceneConfig,
};
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultPlexusError, PlexusErrorCode};
use crate::helpers::{track_error, track_result};

/// Linear RGB color with channels in [0, 1]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlexusColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl From<Rgb> for PlexusColor {
    fn from(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

impl From<PlexusColor> for Rgb {
    fn from(c: PlexusColor) -> Self {
        Rgb::new(c.r, c.g, c.b)
    }
}

/// Initialization-time scene parameters.
///
/// Start from `plexus_scene_config_default()` and override fields as needed.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlexusSceneConfig {
    /// Number of particles (>= 1).
    pub particle_count: u32,
    /// Side of the bounding cube.
    pub area_size: f32,
    /// Particles closer than this are joined by a line.
    pub connection_distance: f32,
    /// Pointer influence radius in the XY plane.
    pub repulsion_radius: f32,
    /// Pointer push strength.
    pub repulsion_strength: f32,
    /// Fraction of velocity removed per frame (0 = undamped).
    pub damping: f32,
    /// Line capacity per particle (>= 1).
    pub max_edges_per_particle: u32,
    /// Initial velocity component bound.
    pub initial_speed: f32,
    /// Pair search: 0 = brute force, 1 = spatial grid.
    pub edge_strategy: u8,
    /// Camera vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Camera distance to the particle plane.
    pub camera_distance: f32,
    /// Page background at the top of the page.
    pub background_start: PlexusColor,
    /// Page background after one viewport of scroll.
    pub background_end: PlexusColor,
    /// Point/line color at the top of the page.
    pub particle_color_start: PlexusColor,
    /// Point/line color after one viewport of scroll.
    pub particle_color_end: PlexusColor,
}

impl Default for PlexusSceneConfig {
    fn default() -> Self {
        let plexus = PlexusConfig::default();
        let parallax = ParallaxConfig::default();
        let projection = PointerProjection::default();

        Self {
            particle_count: plexus.particle_count as u32,
            area_size: plexus.area_size,
            connection_distance: plexus.connection_distance,
            repulsion_radius: plexus.repulsion_radius,
            repulsion_strength: plexus.repulsion_strength,
            damping: plexus.damping,
            max_edges_per_particle: plexus.max_edges_per_particle as u32,
            initial_speed: plexus.initial_speed,
            edge_strategy: strategy_code(plexus.edge_strategy),
            fov_y_degrees: projection.fov_y_degrees,
            camera_distance: projection.distance,
            background_start: parallax.background_start.into(),
            background_end: parallax.background_end.into(),
            particle_color_start: plexus.color_start.into(),
            particle_color_end: plexus.color_end.into(),
        }
    }
}

fn strategy_code(strategy: EdgeStrategy) -> u8 {
    match strategy {
        EdgeStrategy::BruteForce => 0,
        EdgeStrategy::Grid => 1,
    }
}

/// Convert the C configuration into the core's `SceneConfig`.
///
/// Only the strategy code is checked here; numeric ranges are validated by
/// the core when the scene is built.
pub(crate) fn scene_config_from(c: &PlexusSceneConfig) -> Result<SceneConfig, DefaultPlexusError> {
    let edge_strategy = match c.edge_strategy {
        0 => EdgeStrategy::BruteForce,
        1 => EdgeStrategy::Grid,
        other => {
            return Err(DefaultPlexusError::invalid_parameter(format!(
                "edge_strategy must be 0 (brute force) or 1 (grid), got {other}"
            )))
        }
    };

    Ok(SceneConfig {
        parallax: ParallaxConfig {
            background_start: c.background_start.into(),
            background_end: c.background_end.into(),
            ..ParallaxConfig::default()
        },
        plexus: PlexusConfig {
            particle_count: c.particle_count as usize,
            area_size: c.area_size,
            connection_distance: c.connection_distance,
            repulsion_radius: c.repulsion_radius,
            repulsion_strength: c.repulsion_strength,
            damping: c.damping,
            max_edges_per_particle: c.max_edges_per_particle as usize,
            initial_speed: c.initial_speed,
            edge_strategy,
            color_start: c.particle_color_start.into(),
            color_end: c.particle_color_end.into(),
            ..PlexusConfig::default()
        },
        projection: PointerProjection {
            fov_y_degrees: c.fov_y_degrees,
            distance: c.camera_distance,
        },
        ..SceneConfig::default()
    })
}

/// A background scene owned by a native host.
///
/// The scene is protected by an `RwLock`: `plexus_scene_advance` takes the
/// write lock once per frame, buffer copies take the read lock and may run on
/// other threads.
pub struct PlexusSceneInstance {
    pub(crate) scene: RwLock<BackgroundScene>,
}

impl PlexusSceneInstance {
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unknown edge strategy and
    /// `InvalidConfig` for any parameter the core rejects.
    pub(crate) fn new(
        config: &PlexusSceneConfig,
        seed: Option<u64>,
    ) -> Result<Box<Self>, DefaultPlexusError> {
        let mut scene_config = scene_config_from(config)?;
        scene_config.seed = seed;
        let scene = BackgroundScene::new(scene_config)?;

        Ok(Box::new(Self {
            scene: RwLock::new(scene),
        }))
    }
}

/// Default scene configuration.
#[no_mangle]
pub extern "C" fn plexus_scene_config_default() -> PlexusSceneConfig {
    PlexusSceneConfig::default()
}

/// Create a new scene and return it via out-parameter.
///
/// Parameters
/// - `config`: Scene parameters, read and copied.
/// - `seed`: Optional pointer to a seed for the initial particle cloud; null
///   draws from system entropy.
/// - `out_instance`: Receives the created instance. Must be non-null.
///   Set to null on failure.
///
/// Returns
/// - `PlexusErrorCode::Ok` (0) on success
/// - `PlexusErrorCode::NullPointer` if `config` or `out_instance` is null
/// - `PlexusErrorCode::InvalidParameter` for an unknown `edge_strategy`
/// - `PlexusErrorCode::InvalidConfig` for degenerate parameters
///
/// Call `plexus_get_last_error()` for a human-readable description.
///
/// # Safety
///
/// - `config` must be null or point to a valid `PlexusSceneConfig`.
/// - `seed` must be null or point to a valid `u64`.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the instance and MUST call
///   `plexus_scene_destroy` exactly once.
///
/// Example (C++)
/// ```cpp
/// PlexusSceneConfig config = plexus_scene_config_default();
/// config.edge_strategy = 1;
/// uint64_t seed = 42;
/// PlexusSceneInstance* scene = nullptr;
/// if (plexus_scene_new(&config, &seed, &scene) != PlexusErrorCode::Ok) {
///     fprintf(stderr, "%s\n", plexus_get_last_error());
///     return;
/// }
/// // ... per frame: plexus_scene_advance(scene, &input, &state) ...
/// plexus_scene_destroy(scene);
/// ```
#[no_mangle]
pub unsafe extern "C" fn plexus_scene_new(
    config: *const PlexusSceneConfig,
    seed: *const u64,
    out_instance: *mut *mut PlexusSceneInstance,
) -> PlexusErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultPlexusError::null_pointer("out_instance"));
    }

    let Some(config) = (unsafe { config.as_ref() }) else {
        unsafe {
            *out_instance = ptr::null_mut();
        }
        return track_error(&DefaultPlexusError::null_pointer("config"));
    };
    let seed = unsafe { seed.as_ref() }.copied();

    match track_result(PlexusSceneInstance::new(config, seed)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            PlexusErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy a scene previously created by `plexus_scene_new`.
///
/// If `ptr` is null this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `plexus_scene_new` and not freed already.
/// - After this call the pointer must not be used again.
#[no_mangle]
pub unsafe extern "C" fn plexus_scene_destroy(ptr: *mut PlexusSceneInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: `ptr` came from `Box::into_raw` in `plexus_scene_new`.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlexusError;

    #[test]
    fn test_default_config_round_trips_core_defaults() {
        let config = scene_config_from(&PlexusSceneConfig::default()).unwrap();
        let defaults = SceneConfig::default();

        assert_eq!(config.plexus, defaults.plexus);
        assert_eq!(config.projection, defaults.projection);
        assert_eq!(config.parallax.background_start, defaults.parallax.background_start);
        assert_eq!(config.parallax.background_end, defaults.parallax.background_end);
    }

    #[test]
    fn test_strategy_codes() {
        let grid = PlexusSceneConfig {
            edge_strategy: 1,
            ..Default::default()
        };
        assert_eq!(
            scene_config_from(&grid).unwrap().plexus.edge_strategy,
            EdgeStrategy::Grid
        );

        let bad = PlexusSceneConfig {
            edge_strategy: 2,
            ..Default::default()
        };
        let err = scene_config_from(&bad).unwrap_err();
        assert_eq!(err.code(), PlexusErrorCode::InvalidParameter);
        assert!(err.msg().contains("got 2"));
    }

    #[test]
    fn test_instance_builds_with_seed() {
        let instance = PlexusSceneInstance::new(&PlexusSceneConfig::default(), Some(5)).unwrap();
        let scene = instance.scene.read().unwrap();
        assert_eq!(
            scene.plexus().positions().len(),
            PlexusConfig::default().particle_count
        );
    }
}
