use std::cell::{Cell, RefCell};
use std::ptr;
use std::rc::Rc;

use temp_converter_core::{Celsius, SubscriptionId, TemperatureModel, TemperatureReading};

use crate::error::{DefaultTempConvError, TempConvErrorCode};
use crate::helpers::{clear_last_error, track_error};

/// The temperature model as seen by a host UI.
/// Holds the model plus a copy of its latest reading.
///
/// # Threading
/// `TempConvInstance` is **not** thread-safe. Create it, drive it and destroy
/// it on the UI thread only; change callbacks run synchronously on that
/// thread before the setter returns.
///
/// # Callbacks
/// The model is mutably borrowed while it notifies. Getters read `snapshot`,
/// which the first (internal) subscriber refreshes before any host callback
/// runs, so a host callback that re-reads the values sees the updated triple.
/// The internal subscriber's id is never handed out and cannot be
/// unsubscribed.
/// Setters and (un)subscribe calls made from inside a callback fail with
/// `TempConvErrorCode::Reentrant`.
///
/// # Usage from a mobile host
/// ```c
/// static void on_change(void* user_data) {
///     Screen* screen = user_data;
///     double c = 0, f = 0, k = 0;
///     temp_conv_get(screen->model, Celsius, &c);
///     temp_conv_get(screen->model, Fahrenheit, &f);
///     temp_conv_get(screen->model, Kelvin, &k);
///     screen_set_sliders(screen, temp_conv_display_value(c),
///                        temp_conv_display_value(f), temp_conv_display_value(k));
/// }
///
/// void screen_create(Screen* screen) {
///     if (temp_conv_load(screen->prefs_path, &screen->model) != Ok) {
///         temp_conv_new(0.0, &screen->model);
///     }
///     uint64_t id = 0;
///     temp_conv_subscribe(screen->model, on_change, screen, &id);
/// }
///
/// void screen_hide(Screen* screen) {
///     temp_conv_save(screen->model, screen->prefs_path);
/// }
/// ```
pub struct TempConvInstance {
    pub(crate) model: RefCell<TemperatureModel>,
    pub(crate) snapshot: Rc<Cell<TemperatureReading>>,
    snapshot_id: SubscriptionId,
}

impl TempConvInstance {
    /// Wrap a model, registering the snapshot subscriber first so it runs
    /// ahead of every host callback.
    pub(crate) fn from_model(mut model: TemperatureModel) -> Box<Self> {
        let snapshot = Rc::new(Cell::new(model.reading()));
        let sink = Rc::clone(&snapshot);
        let snapshot_id = model.subscribe(move |reading| sink.set(*reading));

        Box::new(Self {
            model: RefCell::new(model),
            snapshot,
            snapshot_id,
        })
    }

    /// Whether `id` names the internal snapshot subscriber
    pub(crate) fn is_internal(&self, id: SubscriptionId) -> bool {
        id == self.snapshot_id
    }

    /// Latest reading, safe to call while the model is notifying.
    pub(crate) fn reading(&self) -> TemperatureReading {
        self.snapshot.get()
    }
}

/// Create a new model holding `initial_celsius` and return it via out-parameter.
///
/// This function follows standard C error handling conventions:
/// - Returns `TempConvErrorCode::Ok` (0) on success with valid instance in `out_instance`
/// - Returns non-zero error code on failure
///
/// The value is not validated: any `double` is accepted, including values
/// outside the slider bounds.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call `temp_conv_destroy`
///   exactly once to avoid memory leaks.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_new(
    initial_celsius: f64,
    out_instance: *mut *mut TempConvInstance,
) -> TempConvErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultTempConvError::null_pointer("out_instance"));
    }

    let instance = TempConvInstance::from_model(TemperatureModel::new(Celsius::new(initial_celsius)));
    unsafe {
        *out_instance = Box::into_raw(instance);
    }
    clear_last_error();
    TempConvErrorCode::Ok
}

/// Destroys an instance previously created by `temp_conv_new` or `temp_conv_load`.
///
/// Behavior:
/// - If `ptr` is null, this function is a no-op.
/// - Registered callbacks are dropped with the instance and never called again.
///
/// # Safety
/// - The pointer MUST have been created by `temp_conv_new` or `temp_conv_load`.
/// - The pointer MUST NOT have been freed already.
/// - MUST NOT be called from inside a change callback of the same instance.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn temp_conv_destroy(ptr: *mut TempConvInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` and has not been
    // freed, per the contract above.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

/// Write `instance` to `out_instance`, or null it on failure.
///
/// # Safety
/// `out_instance` must be non-null and writable.
pub(crate) unsafe fn write_instance(
    out_instance: *mut *mut TempConvInstance,
    instance: Option<Box<TempConvInstance>>,
) {
    let raw = instance.map_or(ptr::null_mut(), Box::into_raw);
    unsafe {
        *out_instance = raw;
    }
}
