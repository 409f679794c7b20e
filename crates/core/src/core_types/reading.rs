//! The reading: one temperature expressed on all three scales

use serde::Serialize;

use super::units::{Celsius, Fahrenheit, Kelvin, Scale};

/// A temperature stored on every scale at once.
///
/// A reading is only ever built from a single scale, with the other two
/// derived immediately, so the three fields always agree (to floating-point
/// rounding). There is no way to construct an inconsistent triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureReading {
    celsius: Celsius,
    fahrenheit: Fahrenheit,
    kelvin: Kelvin,
}

impl TemperatureReading {
    /// Build a reading from a Celsius value.
    #[must_use]
    pub fn from_celsius(celsius: Celsius) -> Self {
        Self {
            celsius,
            fahrenheit: celsius.to_fahrenheit(),
            kelvin: celsius.to_kelvin(),
        }
    }

    /// Build a reading from a Fahrenheit value.
    #[must_use]
    pub fn from_fahrenheit(fahrenheit: Fahrenheit) -> Self {
        Self {
            celsius: fahrenheit.to_celsius(),
            fahrenheit,
            kelvin: fahrenheit.to_kelvin(),
        }
    }

    /// Build a reading from a Kelvin value.
    #[must_use]
    pub fn from_kelvin(kelvin: Kelvin) -> Self {
        Self {
            celsius: kelvin.to_celsius(),
            fahrenheit: kelvin.to_fahrenheit(),
            kelvin,
        }
    }

    /// Build a reading from a raw value on the given scale.
    #[must_use]
    pub fn from_scale(scale: Scale, value: f64) -> Self {
        match scale {
            Scale::Celsius => Self::from_celsius(Celsius::new(value)),
            Scale::Fahrenheit => Self::from_fahrenheit(Fahrenheit::new(value)),
            Scale::Kelvin => Self::from_kelvin(Kelvin::new(value)),
        }
    }

    pub fn celsius(&self) -> Celsius {
        self.celsius
    }

    pub fn fahrenheit(&self) -> Fahrenheit {
        self.fahrenheit
    }

    pub fn kelvin(&self) -> Kelvin {
        self.kelvin
    }

    /// Raw value on the given scale.
    pub fn value(&self, scale: Scale) -> f64 {
        match scale {
            Scale::Celsius => *self.celsius,
            Scale::Fahrenheit => *self.fahrenheit,
            Scale::Kelvin => *self.kelvin,
        }
    }
}

impl Default for TemperatureReading {
    fn default() -> Self {
        Self::from_celsius(Celsius::FREEZING)
    }
}

impl From<Celsius> for TemperatureReading {
    fn from(c: Celsius) -> Self {
        Self::from_celsius(c)
    }
}

impl From<Fahrenheit> for TemperatureReading {
    fn from(f: Fahrenheit) -> Self {
        Self::from_fahrenheit(f)
    }
}

impl From<Kelvin> for TemperatureReading {
    fn from(k: Kelvin) -> Self {
        Self::from_kelvin(k)
    }
}
