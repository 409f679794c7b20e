use temp_converter_core::{Scale, TemperatureReading};

use crate::error::{DefaultTempConvError, TempConvErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, with_model_mut};
use crate::instance::TempConvInstance;

/// Temperature scale selector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempConvScale {
    Celsius = 0,
    Fahrenheit = 1,
    Kelvin = 2,
}

impl From<TempConvScale> for Scale {
    fn from(scale: TempConvScale) -> Scale {
        match scale {
            TempConvScale::Celsius => Scale::Celsius,
            TempConvScale::Fahrenheit => Scale::Fahrenheit,
            TempConvScale::Kelvin => Scale::Kelvin,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// FFI-friendly copy of the three values.
/// Keep this layout stable for C/Kotlin/Swift consumers.
pub struct TempConvReading {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl From<TemperatureReading> for TempConvReading {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            celsius: *reading.celsius(),
            fahrenheit: *reading.fahrenheit(),
            kelvin: *reading.kelvin(),
        }
    }
}

/// Shared body of the setters.
///
/// # Safety
/// `ptr` must be null or a live instance pointer.
unsafe fn set_value(
    ptr: *const TempConvInstance,
    scale: Scale,
    value: f64,
    operation: &str,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_model_mut(instance, operation, |model| model.set(scale, value))
    })
}

/// Set the value on `scale`; the other two are derived and every callback
/// runs before this returns.
///
/// Returns
/// - `TempConvErrorCode::Ok` on success
/// - `TempConvErrorCode::NullPointer` if `ptr` is null
/// - `TempConvErrorCode::Reentrant` if called from inside a change callback
///
/// The value is not clamped. Clamp to the slider bounds
/// (`temp_conv_slider_spec`) before calling if the UI needs it.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `temp_conv_new` / `temp_conv_load`.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_set(
    ptr: *const TempConvInstance,
    scale: TempConvScale,
    value: f64,
) -> TempConvErrorCode {
    unsafe { set_value(ptr, scale.into(), value, "temp_conv_set") }
}

/// Set the Celsius value. See `temp_conv_set`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `temp_conv_new` / `temp_conv_load`.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_set_celsius(
    ptr: *const TempConvInstance,
    celsius: f64,
) -> TempConvErrorCode {
    unsafe { set_value(ptr, Scale::Celsius, celsius, "temp_conv_set_celsius") }
}

/// Set the Fahrenheit value. See `temp_conv_set`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `temp_conv_new` / `temp_conv_load`.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_set_fahrenheit(
    ptr: *const TempConvInstance,
    fahrenheit: f64,
) -> TempConvErrorCode {
    unsafe { set_value(ptr, Scale::Fahrenheit, fahrenheit, "temp_conv_set_fahrenheit") }
}

/// Set the Kelvin value. See `temp_conv_set`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `temp_conv_new` / `temp_conv_load`.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_set_kelvin(
    ptr: *const TempConvInstance,
    kelvin: f64,
) -> TempConvErrorCode {
    unsafe { set_value(ptr, Scale::Kelvin, kelvin, "temp_conv_set_kelvin") }
}

/// Read the current value on `scale` into `out_value`.
///
/// Safe to call from inside a change callback; it then returns the
/// freshly updated value.
///
/// # Safety
/// - `ptr` must be null or a live instance pointer.
/// - `out_value` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_get(
    ptr: *const TempConvInstance,
    scale: TempConvScale,
    out_value: *mut f64,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_value.is_null() {
            return Err(DefaultTempConvError::null_pointer("out_value"));
        }
        let value = instance.reading().value(scale.into());
        unsafe {
            *out_value = value;
        }
        Ok(())
    })
}

/// Read all three values at once into `out_reading`.
///
/// # Safety
/// - `ptr` must be null or a live instance pointer.
/// - `out_reading` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_get_reading(
    ptr: *const TempConvInstance,
    out_reading: *mut TempConvReading,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_reading.is_null() {
            return Err(DefaultTempConvError::null_pointer("out_reading"));
        }
        let reading = TempConvReading::from(instance.reading());
        unsafe {
            *out_reading = reading;
        }
        Ok(())
    })
}
