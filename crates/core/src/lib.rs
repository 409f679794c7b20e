//! Temperature Converter Core Library
//!
//! The model behind a screen of three linked sliders: set a temperature in
//! Celsius, Fahrenheit or Kelvin and the other two scales are recalculated
//! and every subscriber is told to redraw.
//!
//! ## Layout
//! - `core_types`: unit newtypes, scales and the consistent reading triple
//! - `model`: the stateful model and its subscriber list
//! - `controls`: slider bounds, labels and display rounding for the view
//! - `persistence`: restoring and saving the last Celsius reading
//! - `about`: static about-dialog text

// Core types and utilities
pub mod core_types;

pub mod about;
pub mod controls;
pub mod model;
pub mod persistence;

// Re-export core types
pub use core_types::{Celsius, Fahrenheit, Kelvin, Scale, ScaleBounds, TemperatureReading};

pub use about::{AboutInfo, ABOUT};
pub use controls::{display_value, panel, SliderPosition, SliderSpec, SLIDERS};
pub use model::{SubscriptionId, TemperatureModel};
pub use persistence::{
    load_model, save_model, save_reading, JsonFilePreferences, MemoryPreferences, PersistenceError,
    PreferenceStore, CELSIUS_KEY,
};
