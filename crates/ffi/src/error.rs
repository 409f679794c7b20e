use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use temp_converter_core::PersistenceError;

/// Common interface for FFI error types.
///
/// This trait provides a unified way to handle errors across the FFI boundary,
/// allowing both simple error codes and custom error messages.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait TempConvError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> TempConvErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `TempConvError` for common FFI error scenarios.
///
/// This struct wraps a `TempConvErrorCode` and provides convenient constructors
/// for each error type (except Ok, which represents success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultTempConvError {
    code: TempConvErrorCode,
    msg: String,
}

impl DefaultTempConvError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: TempConvErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: TempConvErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for a call made from inside a change callback that would
    /// have to mutate the model while it is still notifying.
    ///
    /// # Arguments
    /// * `operation` - The FFI function that was called (e.g., `"temp_conv_set_celsius"`)
    pub fn reentrant(operation: &str) -> Self {
        Self {
            code: TempConvErrorCode::Reentrant,
            msg: format!("'{operation}' cannot be called from inside a change callback"),
        }
    }
}

impl From<PersistenceError> for DefaultTempConvError {
    fn from(error: PersistenceError) -> Self {
        Self {
            code: TempConvErrorCode::Persistence,
            msg: error.to_string(),
        }
    }
}

impl TempConvError for DefaultTempConvError {
    fn code(&self) -> TempConvErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by temperature converter functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempConvErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter passed to function.
    InvalidParameter = 2,

    /// The model was mutated (or subscriptions changed) from inside one of
    /// its own change callbacks.
    Reentrant = 3,

    /// The preference file could not be read, parsed or written.
    Persistence = 4,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// Allows callers to retrieve diagnostic information after a failed call.
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, TempConvErrorCode)> = const { RefCell::new((None, TempConvErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, TempConvErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, TempConvErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the error message cannot be converted to C string.
///
/// # Lifetime
/// The returned pointer is valid until:
/// - The next FFI call on this thread that sets or clears the error
/// - The thread terminates
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// TempConvInstance* model = NULL;
/// if (temp_conv_load("prefs.json", &model) != Ok) {
///     const char* error = temp_conv_get_last_error();
///     if (error) {
///         printf("Restore failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn temp_conv_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns:
/// - `TempConvErrorCode::Ok` (0) if no error has occurred
/// - The specific error code from the last failed operation
#[no_mangle]
pub extern "C" fn temp_conv_get_last_error_code() -> TempConvErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{clear_last_error, track_error};
    use std::ffi::CStr;

    #[test]
    fn test_last_error_round_trip() {
        let code = track_error(&DefaultTempConvError::null_pointer("out_value"));
        assert_eq!(code, TempConvErrorCode::NullPointer);
        assert_eq!(temp_conv_get_last_error_code(), TempConvErrorCode::NullPointer);

        let msg = unsafe { CStr::from_ptr(temp_conv_get_last_error()) };
        assert_eq!(msg.to_str().unwrap(), "Parameter 'out_value' cannot be null");

        clear_last_error();
        assert_eq!(temp_conv_get_last_error_code(), TempConvErrorCode::Ok);
        assert!(temp_conv_get_last_error().is_null());
    }

    #[test]
    fn test_persistence_error_maps_to_code() {
        let error = DefaultTempConvError::from(PersistenceError::NonFiniteValue {
            key: "celsius".to_string(),
            value: f64::INFINITY,
        });
        assert_eq!(error.code(), TempConvErrorCode::Persistence);
        assert!(error.msg().contains("celsius"));
    }
}
