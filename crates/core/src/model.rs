//! Stateful temperature model with synchronous change notification
//!
//! The model owns the current [`TemperatureReading`] and a list of
//! subscriber callbacks. Every setter replaces the whole reading, then calls
//! each subscriber once, in registration order, before returning.
//!
//! # Usage
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use temp_converter_core::TemperatureModel;
//!
//! let mut model = TemperatureModel::default();
//! let seen = Rc::new(Cell::new(0.0));
//! let sink = Rc::clone(&seen);
//! model.subscribe(move |reading| sink.set(*reading.fahrenheit()));
//!
//! model.set_celsius(100.0);
//! assert!((seen.get() - 212.0).abs() < 1e-9);
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::core_types::{Celsius, Fahrenheit, Kelvin, Scale, TemperatureReading};

/// Handle returned by [`TemperatureModel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw identifier, for handing across the FFI boundary
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Rebuild an identifier from its raw value
    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }
}

type Listener = Box<dyn FnMut(&TemperatureReading)>;

/// The temperature model behind the three sliders.
///
/// Inputs are never rejected or clamped; slider bounds are the view's
/// business. Listeners receive the freshly updated reading and must not
/// assume anything about which scale was set.
pub struct TemperatureModel {
    reading: TemperatureReading,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl TemperatureModel {
    /// Create a model holding `initial`. No listener exists yet, so nothing
    /// is notified.
    pub fn new(initial: Celsius) -> Self {
        Self {
            reading: TemperatureReading::from_celsius(initial),
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Set the Celsius value and derive Fahrenheit and Kelvin.
    pub fn set_celsius(&mut self, celsius: f64) {
        trace!(celsius, "set_celsius");
        self.replace(TemperatureReading::from_celsius(Celsius::new(celsius)));
    }

    /// Set the Fahrenheit value and derive Celsius and Kelvin.
    pub fn set_fahrenheit(&mut self, fahrenheit: f64) {
        trace!(fahrenheit, "set_fahrenheit");
        self.replace(TemperatureReading::from_fahrenheit(Fahrenheit::new(
            fahrenheit,
        )));
    }

    /// Set the Kelvin value and derive Celsius and Fahrenheit.
    pub fn set_kelvin(&mut self, kelvin: f64) {
        trace!(kelvin, "set_kelvin");
        self.replace(TemperatureReading::from_kelvin(Kelvin::new(kelvin)));
    }

    /// Set the value on `scale` and derive the other two.
    pub fn set(&mut self, scale: Scale, value: f64) {
        trace!(%scale, value, "set");
        self.replace(TemperatureReading::from_scale(scale, value));
    }

    pub fn celsius(&self) -> f64 {
        *self.reading.celsius()
    }

    pub fn fahrenheit(&self) -> f64 {
        *self.reading.fahrenheit()
    }

    pub fn kelvin(&self) -> f64 {
        *self.reading.kelvin()
    }

    /// Current value on `scale`
    pub fn value(&self, scale: Scale) -> f64 {
        self.reading.value(scale)
    }

    /// The current reading, by value
    pub fn reading(&self) -> TemperatureReading {
        self.reading
    }

    /// Register a listener. It is called once after every setter call,
    /// after all three values have been updated.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TemperatureReading) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(id = id.0, total = self.listeners.len(), "Subscriber registered");
        id
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        let removed = self.listeners.len() != before;
        debug!(id = id.0, removed, "Subscriber removed");
        removed
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn replace(&mut self, reading: TemperatureReading) {
        self.reading = reading;
        self.notify();
    }

    fn notify(&mut self) {
        let reading = self.reading;
        for (_, listener) in &mut self.listeners {
            listener(&reading);
        }
    }
}

impl Default for TemperatureModel {
    fn default() -> Self {
        Self::new(Celsius::FREEZING)
    }
}

impl fmt::Debug for TemperatureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemperatureModel")
            .field("reading", &self.reading)
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
