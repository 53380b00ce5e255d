use plexus_core::{FrameInput, FrameOutput, GroupTransform};
use std::slice;

use crate::error::{DefaultPlexusError, PlexusErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_scene, with_scene_mut};
use crate::instance::{PlexusColor, PlexusSceneInstance};

/// Host state sampled once per frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlexusFrameInput {
    /// Seconds since the scene started.
    pub elapsed: f32,
    /// Pointer in normalized device coordinates, [-1, 1], y up.
    pub pointer_x: f32,
    pub pointer_y: f32,
    /// Vertical page scroll in CSS pixels.
    pub scroll_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl From<&PlexusFrameInput> for FrameInput {
    fn from(i: &PlexusFrameInput) -> Self {
        FrameInput::new(
            i.elapsed,
            (i.pointer_x, i.pointer_y),
            i.scroll_y,
            i.viewport_width,
            i.viewport_height,
        )
    }
}

/// Translation and XYZ Euler rotation (radians).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlexusTransform {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl From<GroupTransform> for PlexusTransform {
    fn from(t: GroupTransform) -> Self {
        Self {
            position: [t.position.x, t.position.y, t.position.z],
            rotation: [t.rotation.x, t.rotation.y, t.rotation.z],
        }
    }
}

/// Per-frame scalar outputs. Geometry is fetched with the copy functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlexusFrameState {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Scroll progress in [0, 1].
    pub progress: f32,
    /// Transform of the decorative background group.
    pub group: PlexusTransform,
    /// Transform of the floating hero shape.
    pub shape: PlexusTransform,
    pub background_color: PlexusColor,
    pub point_color: PlexusColor,
    pub line_color: PlexusColor,
    pub line_opacity: f32,
    /// Number of particles (positions to copy).
    pub particle_count: usize,
    /// Number of active line segments (segments to copy).
    pub segment_count: usize,
    /// Qualifying pairs that did not fit in the segment buffer.
    pub dropped_edges: usize,
}

impl From<&FrameOutput<'_>> for PlexusFrameState {
    fn from(out: &FrameOutput<'_>) -> Self {
        Self {
            frame: out.frame,
            progress: *out.progress,
            group: out.group.into(),
            shape: out.shape.into(),
            background_color: out.background_color.into(),
            point_color: out.point_color().into(),
            line_color: out.line_color().into(),
            line_opacity: out.line_opacity(),
            particle_count: out.particle_positions().len(),
            segment_count: out.line_segments().len(),
            dropped_edges: out.plexus.dropped_edges,
        }
    }
}

/// Advance the scene by one frame.
///
/// Thread-safe: acquires the `RwLock` write lock for the duration of the frame.
///
/// Returns
/// - `PlexusErrorCode::Ok` (0) on success with `out_state` populated
/// - `PlexusErrorCode::NullPointer` if any pointer is null
/// - `PlexusErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `plexus_scene_new`.
/// - `input` must be null or point to a valid `PlexusFrameInput`.
/// - `out_state` must be null or point to writable memory for one `PlexusFrameState`.
#[no_mangle]
pub unsafe extern "C" fn plexus_scene_advance(
    ptr: *const PlexusSceneInstance,
    input: *const PlexusFrameInput,
    out_state: *mut PlexusFrameState,
) -> PlexusErrorCode {
    if out_state.is_null() {
        return track_error(&DefaultPlexusError::null_pointer("out_state"));
    }
    let Some(input) = (unsafe { input.as_ref() }) else {
        return track_error(&DefaultPlexusError::null_pointer("input"));
    };

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let state = with_scene_mut(instance, |scene| {
            PlexusFrameState::from(&scene.advance(&FrameInput::from(input)))
        })?;

        unsafe {
            *out_state = state;
        }
        Ok(())
    })
}

/// Copy particle positions into `out_xyz` as packed `x, y, z` floats.
///
/// `capacity` is the length of `out_xyz` in floats. At most
/// `capacity / 3` particles are copied; `out_written` receives the number of
/// particles written.
///
/// Returns
/// - `PlexusErrorCode::Ok` (0) on success
/// - `PlexusErrorCode::NullPointer` if any pointer is null
/// - `PlexusErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `plexus_scene_new`.
/// - `out_xyz` must be null or valid for writes of `capacity` floats.
/// - `out_written` must be null or point to a writable `usize`.
#[no_mangle]
pub unsafe extern "C" fn plexus_scene_copy_positions(
    ptr: *const PlexusSceneInstance,
    out_xyz: *mut f32,
    capacity: usize,
    out_written: *mut usize,
) -> PlexusErrorCode {
    if out_xyz.is_null() {
        return track_error(&DefaultPlexusError::null_pointer("out_xyz"));
    }
    if out_written.is_null() {
        return track_error(&DefaultPlexusError::null_pointer("out_written"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        // SAFETY: caller guarantees `out_xyz` is valid for `capacity` floats.
        let out = unsafe { slice::from_raw_parts_mut(out_xyz, capacity) };

        let written = with_scene(instance, |scene| {
            let positions = scene.plexus().positions();
            let count = positions.len().min(capacity / 3);
            for (dst, p) in out.chunks_exact_mut(3).zip(&positions[..count]) {
                dst.copy_from_slice(&[p.x, p.y, p.z]);
            }
            count
        })?;

        unsafe {
            *out_written = written;
        }
        Ok(())
    })
}

/// Copy active line segments into `out_xyz` as packed
/// `ax, ay, az, bx, by, bz` floats.
///
/// `capacity` is the length of `out_xyz` in floats. At most
/// `capacity / 6` segments are copied; `out_written` receives the number of
/// segments written.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `plexus_scene_new`.
/// - `out_xyz` must be null or valid for writes of `capacity` floats.
/// - `out_written` must be null or point to a writable `usize`.
#[no_mangle]
pub unsafe extern "C" fn plexus_scene_copy_segments(
    ptr: *const PlexusSceneInstance,
    out_xyz: *mut f32,
    capacity: usize,
    out_written: *mut usize,
) -> PlexusErrorCode {
    if out_xyz.is_null() {
        return track_error(&DefaultPlexusError::null_pointer("out_xyz"));
    }
    if out_written.is_null() {
        return track_error(&DefaultPlexusError::null_pointer("out_written"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        // SAFETY: caller guarantees `out_xyz` is valid for `capacity` floats.
        let out = unsafe { slice::from_raw_parts_mut(out_xyz, capacity) };

        let written = with_scene(instance, |scene| {
            let segments = scene.plexus().edges().segments();
            let count = segments.len().min(capacity / 6);
            for (dst, [a, b]) in out.chunks_exact_mut(6).zip(&segments[..count]) {
                dst.copy_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
            }
            count
        })?;

        unsafe {
            *out_written = written;
        }
        Ok(())
    })
}
