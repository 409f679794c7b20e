use std::os::raw::c_void;

use temp_converter_core::SubscriptionId;

use crate::error::{DefaultTempConvError, TempConvErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, with_model_mut};
use crate::instance::TempConvInstance;

/// Change callback. Carries no payload besides `user_data`: re-read the
/// values with `temp_conv_get` / `temp_conv_get_reading`.
pub type TempConvCallback = extern "C" fn(user_data: *mut c_void);

/// Register `callback`. It runs once after every setter call, after all
/// three values are updated, in registration order.
///
/// `user_data` is passed back untouched; the host keeps ownership and must
/// keep it valid until the callback is unsubscribed or the instance destroyed.
///
/// Returns
/// - `TempConvErrorCode::Ok` with the subscription id in `out_id`
/// - `TempConvErrorCode::NullPointer` if `ptr`, `callback` or `out_id` is null
/// - `TempConvErrorCode::Reentrant` if called from inside a change callback
///
/// # Safety
/// - `ptr` must be null or a live instance pointer.
/// - `out_id` must be null or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_subscribe(
    ptr: *const TempConvInstance,
    callback: Option<TempConvCallback>,
    user_data: *mut c_void,
    out_id: *mut u64,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let Some(callback) = callback else {
            return Err(DefaultTempConvError::null_pointer("callback"));
        };
        if out_id.is_null() {
            return Err(DefaultTempConvError::null_pointer("out_id"));
        }

        let id = with_model_mut(instance, "temp_conv_subscribe", |model| {
            model.subscribe(move |_| callback(user_data))
        })?;
        unsafe {
            *out_id = id.as_u64();
        }
        Ok(())
    })
}

/// Remove a callback registered with `temp_conv_subscribe`.
///
/// Returns
/// - `TempConvErrorCode::Ok` if the callback was removed
/// - `TempConvErrorCode::InvalidParameter` if `id` was not returned by
///   `temp_conv_subscribe` or is already removed
/// - `TempConvErrorCode::Reentrant` if called from inside a change callback
///
/// # Safety
/// `ptr` must be null or a live instance pointer.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_unsubscribe(
    ptr: *const TempConvInstance,
    id: u64,
) -> TempConvErrorCode {
    handle_ffi_result(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let id = SubscriptionId::from_u64(id);
        let removed = !instance.is_internal(id)
            && with_model_mut(instance, "temp_conv_unsubscribe", |model| {
                model.unsubscribe(id)
            })?;
        if removed {
            Ok(())
        } else {
            Err(DefaultTempConvError::invalid_parameter(format!(
                "No subscription with id {}",
                id.as_u64()
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::temp_conv_get_last_error_code;
    use crate::instance::{temp_conv_destroy, temp_conv_new};
    use crate::model::{temp_conv_get, temp_conv_set_celsius, temp_conv_set_kelvin, TempConvScale};
    use std::cell::Cell;
    use std::ptr;

    /// Host-side state handed to the callback through `user_data`
    struct Probe {
        instance: *const TempConvInstance,
        calls: Cell<u32>,
        fahrenheit_seen: Cell<f64>,
        nested_set: Cell<Option<TempConvErrorCode>>,
    }

    impl Probe {
        fn new(instance: *const TempConvInstance) -> Self {
            Self {
                instance,
                calls: Cell::new(0),
                fahrenheit_seen: Cell::new(f64::NAN),
                nested_set: Cell::new(None),
            }
        }

        fn user_data(&self) -> *mut c_void {
            ptr::from_ref(self).cast_mut().cast()
        }
    }

    extern "C" fn on_change(user_data: *mut c_void) {
        let probe = unsafe { &*user_data.cast::<Probe>() };
        probe.calls.set(probe.calls.get() + 1);

        let mut f = f64::NAN;
        unsafe { temp_conv_get(probe.instance, TempConvScale::Fahrenheit, &mut f) };
        probe.fahrenheit_seen.set(f);

        let nested = unsafe { temp_conv_set_celsius(probe.instance, 0.0) };
        probe.nested_set.set(Some(nested));
    }

    fn new_instance() -> *mut TempConvInstance {
        let mut instance = ptr::null_mut();
        unsafe { temp_conv_new(0.0, &mut instance) };
        instance
    }

    #[test]
    fn test_callback_rereads_updated_values() {
        let instance = new_instance();
        let probe = Probe::new(instance);
        let mut id = 0;

        unsafe {
            let code = temp_conv_subscribe(instance, Some(on_change), probe.user_data(), &mut id);
            assert_eq!(code, TempConvErrorCode::Ok);

            temp_conv_set_celsius(instance, 100.0);
        }

        assert_eq!(probe.calls.get(), 1);
        assert!((probe.fahrenheit_seen.get() - 212.0).abs() < 1e-9);

        unsafe { temp_conv_destroy(instance) };
    }

    #[test]
    fn test_set_inside_callback_is_reentrant() {
        let instance = new_instance();
        let probe = Probe::new(instance);
        let mut id = 0;

        unsafe {
            temp_conv_subscribe(instance, Some(on_change), probe.user_data(), &mut id);
            let code = temp_conv_set_kelvin(instance, 0.0);
            // The outer call succeeds; only the nested one is refused
            assert_eq!(code, TempConvErrorCode::Ok);
        }

        assert_eq!(probe.nested_set.get(), Some(TempConvErrorCode::Reentrant));
        assert_eq!(probe.calls.get(), 1);

        let mut c = 0.0;
        unsafe { temp_conv_get(instance, TempConvScale::Celsius, &mut c) };
        assert!((c + 273.15).abs() < 1e-9);

        unsafe { temp_conv_destroy(instance) };
    }

    #[test]
    fn test_unsubscribe_stops_callbacks() {
        let instance = new_instance();
        let probe = Probe::new(instance);
        let mut id = 0;

        unsafe {
            temp_conv_subscribe(instance, Some(on_change), probe.user_data(), &mut id);
            assert_eq!(temp_conv_unsubscribe(instance, id), TempConvErrorCode::Ok);
            temp_conv_set_celsius(instance, 50.0);

            assert_eq!(
                temp_conv_unsubscribe(instance, id),
                TempConvErrorCode::InvalidParameter
            );
            assert_eq!(
                temp_conv_get_last_error_code(),
                TempConvErrorCode::InvalidParameter
            );
            temp_conv_destroy(instance);
        }

        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn test_ids_never_issued_are_rejected() {
        let instance = new_instance();

        unsafe {
            // The first id belongs to the instance's own snapshot subscriber
            assert_eq!(temp_conv_unsubscribe(instance, 1), TempConvErrorCode::InvalidParameter);
            assert_eq!(
                temp_conv_unsubscribe(instance, 999),
                TempConvErrorCode::InvalidParameter
            );

            temp_conv_set_celsius(instance, 100.0);
            let mut f = 0.0;
            temp_conv_get(instance, TempConvScale::Fahrenheit, &mut f);
            assert!((f - 212.0).abs() < 1e-9);

            temp_conv_destroy(instance);
        }
    }

    #[test]
    fn test_null_callback() {
        let instance = new_instance();
        let mut id = 0;
        unsafe {
            let code = temp_conv_subscribe(instance, None, ptr::null_mut(), &mut id);
            assert_eq!(code, TempConvErrorCode::NullPointer);
            temp_conv_destroy(instance);
        }
    }
}
