use crate::error::{with_last_error_mut, DefaultTempConvError, TempConvError, TempConvErrorCode};
use crate::instance::TempConvInstance;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use temp_converter_core::TemperatureModel;

/// Set the thread-local error message and code.
/// Internal helper for FFI functions to record failure details.
/// Accepts any type implementing `TempConvError` trait.
pub(crate) fn set_last_error(error: &impl TempConvError) {
    tracing::debug!(code = ?error.code(), msg = error.msg(), "FFI call failed");
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
/// More efficient than handling results for immediate errors.
#[inline]
pub(crate) fn track_error(error: &impl TempConvError) -> TempConvErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Internal helper called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = TempConvErrorCode::Ok;
    });
}

/// Convert a result into an FFI error code, recording the error on failure
/// and clearing it on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultTempConvError>) -> Result<T, TempConvErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its result into a bare error code.
pub(crate) fn handle_ffi_result<F>(f: F) -> TempConvErrorCode
where
    F: FnOnce() -> Result<(), DefaultTempConvError>,
{
    match track_result(f()) {
        Ok(()) => TempConvErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow an instance from a raw pointer handed over by the host.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `temp_conv_new` / `temp_conv_load`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const TempConvInstance,
) -> Result<&'a TempConvInstance, DefaultTempConvError> {
    if ptr.is_null() {
        return Err(DefaultTempConvError::null_pointer("ptr"));
    }
    // SAFETY: non-null and, per the caller contract, points to a live instance.
    Ok(unsafe { &*ptr })
}

/// Borrow the model mutably for `operation`.
///
/// Fails with `Reentrant` when called from inside a change callback, because
/// the model is still borrowed by the setter that is notifying.
pub(crate) fn with_model_mut<F, R>(
    instance: &TempConvInstance,
    operation: &str,
    f: F,
) -> Result<R, DefaultTempConvError>
where
    F: FnOnce(&mut TemperatureModel) -> R,
{
    let mut model = instance
        .model
        .try_borrow_mut()
        .map_err(|_| DefaultTempConvError::reentrant(operation))?;
    Ok(f(&mut model))
}

/// Read a host-owned C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid for `'a`.
pub(crate) unsafe fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultTempConvError> {
    if ptr.is_null() {
        return Err(DefaultTempConvError::null_pointer(param_name));
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str().map_err(|e| {
        DefaultTempConvError::invalid_parameter(format!("Parameter '{param_name}' is not UTF-8: {e}"))
    })
}
