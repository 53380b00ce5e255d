use plexus_core::ConfigError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait PlexusError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> PlexusErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `PlexusError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultPlexusError {
    code: PlexusErrorCode,
    msg: String,
}

impl DefaultPlexusError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: PlexusErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: PlexusErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a scene configuration rejected by the core.
    pub fn invalid_config(error: &ConfigError) -> Self {
        Self {
            code: PlexusErrorCode::InvalidConfig,
            msg: format!("Invalid scene configuration: {error}"),
        }
    }

    /// Create error for invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: PlexusErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<ConfigError> for DefaultPlexusError {
    fn from(error: ConfigError) -> Self {
        Self::invalid_config(&error)
    }
}

impl PlexusError for DefaultPlexusError {
    fn code(&self) -> PlexusErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by plexus functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlexusErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Scene configuration rejected: particle count, distances or ranges out of bounds.
    InvalidConfig = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is stored here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, PlexusErrorCode)> = const { RefCell::new((None, PlexusErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, PlexusErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, PlexusErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the message cannot be converted to a C string.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error, or until the thread terminates.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// PlexusSceneInstance* scene = nullptr;
/// PlexusErrorCode err = plexus_scene_new(config, nullptr, &scene);
/// if (err != PlexusErrorCode::Ok) {
///     const char* error = plexus_get_last_error();
///     if (error) {
///         printf("Scene creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn plexus_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `PlexusErrorCode::Ok` (0) if no error has occurred on this thread.
#[no_mangle]
pub extern "C" fn plexus_get_last_error_code() -> PlexusErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
