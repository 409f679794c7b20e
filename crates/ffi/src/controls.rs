use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::LazyLock;

use temp_converter_core::{display_value, Scale, SliderSpec, ABOUT};

use crate::error::{DefaultTempConvError, TempConvErrorCode};
use crate::helpers::handle_ffi_result;
use crate::model::TempConvScale;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
/// Fixed configuration of one slider.
/// `label` and `unit` point to static strings. **DO NOT FREE THEM**.
pub struct TempConvSliderSpec {
    pub min: i32,
    pub max: i32,
    pub label: *const c_char,
    pub unit: *const c_char,
}

fn label_cstr(scale: Scale) -> &'static CStr {
    match scale {
        Scale::Celsius => c"Celsius",
        Scale::Fahrenheit => c"Fahrenheit",
        Scale::Kelvin => c"Kelvin",
    }
}

fn unit_cstr(scale: Scale) -> &'static CStr {
    match scale {
        Scale::Celsius => c"°C",
        Scale::Fahrenheit => c"°F",
        Scale::Kelvin => c"K",
    }
}

/// Fill `out_spec` with the bounds, label and unit of the slider for `scale`.
///
/// # Safety
/// `out_spec` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_slider_spec(
    scale: TempConvScale,
    out_spec: *mut TempConvSliderSpec,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        if out_spec.is_null() {
            return Err(DefaultTempConvError::null_pointer("out_spec"));
        }
        let scale = Scale::from(scale);
        let spec = SliderSpec::for_scale(scale);
        unsafe {
            *out_spec = TempConvSliderSpec {
                min: spec.bounds.min,
                max: spec.bounds.max,
                label: label_cstr(scale).as_ptr(),
                unit: unit_cstr(scale).as_ptr(),
            };
        }
        Ok(())
    })
}

/// Integer a slider should show for `value` (round half up).
#[no_mangle]
pub extern "C" fn temp_conv_display_value(value: f64) -> i32 {
    display_value(value)
}

/// Clamp a user-driven value to the slider bounds of `scale`.
#[no_mangle]
pub extern "C" fn temp_conv_clamp_input(scale: TempConvScale, value: f64) -> f64 {
    SliderSpec::for_scale(scale.into()).clamp_input(value)
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
/// About dialog text. All pointers are static. **DO NOT FREE THEM**.
pub struct TempConvAbout {
    pub title: *const c_char,
    pub message: *const c_char,
    pub dismiss_label: *const c_char,
}

static ABOUT_CSTRINGS: LazyLock<[CString; 3]> = LazyLock::new(|| {
    [ABOUT.title, ABOUT.message, ABOUT.dismiss_label]
        .map(|text| CString::new(text).unwrap_or_default())
});

/// Static about-dialog text.
#[no_mangle]
pub extern "C" fn temp_conv_about() -> TempConvAbout {
    let [title, message, dismiss_label] = &*ABOUT_CSTRINGS;
    TempConvAbout {
        title: title.as_ptr(),
        message: message.as_ptr(),
        dismiss_label: dismiss_label.as_ptr(),
    }
}
