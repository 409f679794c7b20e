//! Core types and utilities

pub mod reading;
pub mod units;

pub use reading::TemperatureReading;
pub use units::*;
