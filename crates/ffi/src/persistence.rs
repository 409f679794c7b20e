use std::os::raw::c_char;

use temp_converter_core::{load_model, save_reading, JsonFilePreferences};

use crate::error::{DefaultTempConvError, TempConvErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, str_from_ptr, track_error, track_result};
use crate::instance::{write_instance, TempConvInstance};

/// Create a model restored from the JSON preference file at `path`.
/// Call when the screen is created.
///
/// A missing file is not an error: the model starts at 0 °C.
///
/// Returns
/// - `TempConvErrorCode::Ok` with a new instance in `out_instance`
/// - `TempConvErrorCode::NullPointer` if `path` or `out_instance` is null
/// - `TempConvErrorCode::InvalidParameter` if `path` is not UTF-8
/// - `TempConvErrorCode::Persistence` if the file cannot be read or parsed;
///   `out_instance` is set to null. Fall back to `temp_conv_new` if desired.
///
/// # Safety
/// - `path` must be null or a NUL-terminated string.
/// - `out_instance` must be null or point to writable memory.
/// - On success the caller owns the instance and MUST call `temp_conv_destroy`.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_load(
    path: *const c_char,
    out_instance: *mut *mut TempConvInstance,
) -> TempConvErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultTempConvError::null_pointer("out_instance"));
    }

    match track_result(unsafe { restore(path) }) {
        Ok(instance) => {
            unsafe { write_instance(out_instance, Some(instance)) };
            TempConvErrorCode::Ok
        }
        Err(code) => {
            unsafe { write_instance(out_instance, None) };
            code
        }
    }
}

/// Open the preference file and wrap the restored model.
///
/// # Safety
/// `path` must be null or a NUL-terminated string.
unsafe fn restore(path: *const c_char) -> Result<Box<TempConvInstance>, DefaultTempConvError> {
    let path = unsafe { str_from_ptr(path, "path") }?;
    let store = JsonFilePreferences::open(path)?;
    let model = load_model(&store)?;
    Ok(TempConvInstance::from_model(model))
}

/// Save the current Celsius reading to the JSON preference file at `path`.
/// Call when the screen is hidden. Only reads the model, so it may also be
/// called from inside a change callback.
///
/// Returns
/// - `TempConvErrorCode::Ok` once the file is written
/// - `TempConvErrorCode::NullPointer` if `ptr` or `path` is null
/// - `TempConvErrorCode::InvalidParameter` if `path` is not UTF-8
/// - `TempConvErrorCode::Persistence` if the file cannot be read or written,
///   or the value is not finite
///
/// # Safety
/// - `ptr` must be null or a live instance pointer.
/// - `path` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_save(
    ptr: *const TempConvInstance,
    path: *const c_char,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let path = unsafe { str_from_ptr(path, "path") }?;
        let mut store = JsonFilePreferences::open(path)?;
        save_reading(&instance.reading(), &mut store)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{temp_conv_destroy, temp_conv_new};
    use crate::model::{temp_conv_get, temp_conv_set_fahrenheit, temp_conv_set_kelvin, TempConvScale};
    use std::ffi::CString;
    use std::ptr;

    fn temp_path(name: &str) -> CString {
        let path = std::env::temp_dir().join(format!(
            "temp_converter_ffi_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        CString::new(path.to_string_lossy().into_owned()).unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut instance = ptr::null_mut();

        unsafe {
            temp_conv_new(0.0, &mut instance);
            temp_conv_set_fahrenheit(instance, 212.0);
            assert_eq!(temp_conv_save(instance, path.as_ptr()), TempConvErrorCode::Ok);
            temp_conv_destroy(instance);

            let mut restored = ptr::null_mut();
            assert_eq!(temp_conv_load(path.as_ptr(), &mut restored), TempConvErrorCode::Ok);
            let mut c = 0.0;
            temp_conv_get(restored, TempConvScale::Celsius, &mut c);
            assert!((c - 100.0).abs() < 1e-9);
            temp_conv_destroy(restored);
        }

        let _ = std::fs::remove_file(path.to_str().unwrap());
    }

    /// Instance and file a change callback saves to
    struct SaveOnChange {
        instance: *const TempConvInstance,
        path: CString,
        code: std::cell::Cell<Option<TempConvErrorCode>>,
    }

    extern "C" fn save_on_change(user_data: *mut std::os::raw::c_void) {
        let target = unsafe { &*user_data.cast::<SaveOnChange>() };
        let code = unsafe { temp_conv_save(target.instance, target.path.as_ptr()) };
        target.code.set(Some(code));
    }

    #[test]
    fn test_save_from_inside_callback() {
        let mut instance = ptr::null_mut();
        unsafe { temp_conv_new(0.0, &mut instance) };
        let target = SaveOnChange {
            instance,
            path: temp_path("callback"),
            code: std::cell::Cell::new(None),
        };

        unsafe {
            let mut id = 0;
            crate::subscription::temp_conv_subscribe(
                instance,
                Some(save_on_change),
                ptr::from_ref(&target).cast_mut().cast(),
                &mut id,
            );
            temp_conv_set_kelvin(instance, 310.15);
        }
        assert_eq!(target.code.get(), Some(TempConvErrorCode::Ok));

        unsafe {
            let mut restored = ptr::null_mut();
            assert_eq!(temp_conv_load(target.path.as_ptr(), &mut restored), TempConvErrorCode::Ok);
            let mut c = 0.0;
            temp_conv_get(restored, TempConvScale::Celsius, &mut c);
            assert!((c - 37.0).abs() < 1e-9);
            temp_conv_destroy(restored);
            temp_conv_destroy(instance);
        }

        let _ = std::fs::remove_file(target.path.to_str().unwrap());
    }

    #[test]
    fn test_load_missing_file_starts_at_freezing() {
        let path = temp_path("missing");
        let mut instance = ptr::null_mut();
        unsafe {
            assert_eq!(temp_conv_load(path.as_ptr(), &mut instance), TempConvErrorCode::Ok);
            let mut k = 0.0;
            temp_conv_get(instance, TempConvScale::Kelvin, &mut k);
            assert!((k - 273.15).abs() < 1e-9);
            temp_conv_destroy(instance);
        }
    }

    #[test]
    fn test_load_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(path.to_str().unwrap(), "[1, 2").unwrap();
        let mut instance = ptr::null_mut();
        let code = unsafe { temp_conv_load(path.as_ptr(), &mut instance) };
        assert_eq!(code, TempConvErrorCode::Persistence);
        assert!(instance.is_null());
        let _ = std::fs::remove_file(path.to_str().unwrap());
    }

    #[test]
    fn test_save_non_finite() {
        let path = temp_path("nan");
        let mut instance = ptr::null_mut();
        unsafe {
            temp_conv_new(f64::NAN, &mut instance);
            assert_eq!(temp_conv_save(instance, path.as_ptr()), TempConvErrorCode::Persistence);
            temp_conv_destroy(instance);
        }
    }
}
