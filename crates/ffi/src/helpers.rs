use crate::error::{with_last_error_mut, DefaultPlexusError, PlexusError, PlexusErrorCode};
use crate::instance::PlexusSceneInstance;
use plexus_core::BackgroundScene;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl PlexusError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl PlexusError) -> PlexusErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result and convert it to its code.
/// Successful results clear the previous error.
#[inline]
pub(crate) fn track_result<T>(result: Result<T, DefaultPlexusError>) -> Result<T, PlexusErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run `f` and collapse its result into an FFI error code.
#[inline]
pub(crate) fn handle_ffi_result_error<F>(f: F) -> PlexusErrorCode
where
    F: FnOnce() -> Result<(), DefaultPlexusError>,
{
    match track_result(f()) {
        Ok(()) => PlexusErrorCode::Ok,
        Err(code) => code,
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = PlexusErrorCode::Ok;
    });
}

/// Borrow an instance from a raw pointer handed out by `plexus_scene_new`.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const PlexusSceneInstance,
) -> Result<&'a PlexusSceneInstance, DefaultPlexusError> {
    // SAFETY: callers guarantee `ptr` is null or came from `plexus_scene_new`
    // and has not been destroyed.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultPlexusError::null_pointer("instance"))
}

/// Run `f` with shared access to the scene.
pub(crate) fn with_scene<F, T>(instance: &PlexusSceneInstance, f: F) -> Result<T, DefaultPlexusError>
where
    F: FnOnce(&BackgroundScene) -> T,
{
    let scene = instance
        .scene
        .read()
        .map_err(|_| DefaultPlexusError::lock_poisoned("RwLock"))?;
    Ok(f(&scene))
}

/// Run `f` with exclusive access to the scene.
pub(crate) fn with_scene_mut<F, T>(
    instance: &PlexusSceneInstance,
    f: F,
) -> Result<T, DefaultPlexusError>
where
    F: FnOnce(&mut BackgroundScene) -> T,
{
    let mut scene = instance
        .scene
        .write()
        .map_err(|_| DefaultPlexusError::lock_poisoned("RwLock"))?;
    Ok(f(&mut scene))
}
