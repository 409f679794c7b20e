//! Semantic unit types for the three temperature scales
//!
//! This module provides newtype wrappers so a Celsius value can never be
//! handed to code expecting Kelvin or Fahrenheit by accident.
//!
//! # Design Philosophy
//! - All temperature types wrap `f64`
//! - No validation: any value is accepted, bounds belong to the sliders
//! - Conversions go through `From`, using the exact published formulas
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use temp_converter_core::core_types::units::{Celsius, Fahrenheit, Kelvin};
//!
//! let boiling = Celsius::new(100.0);
//! let f: Fahrenheit = boiling.into();
//! let k: Kelvin = boiling.into();
//! assert!((*f - 212.0).abs() < 1e-9);
//! assert!((*k - 373.15).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Celsius to Kelvin offset (0°C = 273.15 K)
const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

/// Fahrenheit to Rankine offset (0°F = 459.67°R)
const FAHRENHEIT_RANKINE_OFFSET: f64 = 459.67;

/// Fahrenheit value of the water freezing point
const FAHRENHEIT_FREEZING: f64 = 32.0;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Generates the trait impls shared by all three temperature newtypes.
macro_rules! temperature_newtype {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f64_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl $name {
            /// Create a new temperature. The value is not validated.
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                $name(value)
            }

            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(t: $name) -> f64 {
                t.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:.1} ", $suffix), self.0)
            }
        }
    };
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

temperature_newtype!(Celsius, "°C");

impl Celsius {
    /// Absolute zero in Celsius
    pub const ABSOLUTE_ZERO: Celsius = Celsius(-CELSIUS_KELVIN_OFFSET);

    /// Water freezing point
    pub const FREEZING: Celsius = Celsius(0.0);

    /// Water boiling point at 1 atm
    pub const BOILING: Celsius = Celsius(100.0);

    /// Convert to Fahrenheit: `c × 9/5 + 32`
    #[inline]
    #[must_use]
    pub fn to_fahrenheit(self) -> Fahrenheit {
        Fahrenheit(self.0 * 9.0 / 5.0 + FAHRENHEIT_FREEZING)
    }

    /// Convert to Kelvin: `c + 273.15`
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_KELVIN_OFFSET)
    }
}

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fahrenheit(f64);

temperature_newtype!(Fahrenheit, "°F");

impl Fahrenheit {
    /// Absolute zero in Fahrenheit
    pub const ABSOLUTE_ZERO: Fahrenheit = Fahrenheit(-FAHRENHEIT_RANKINE_OFFSET);

    /// Convert to Celsius: `(f − 32) × 5/9`
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius((self.0 - FAHRENHEIT_FREEZING) * 5.0 / 9.0)
    }

    /// Convert to Kelvin: `(f + 459.67) × 5/9`
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin((self.0 + FAHRENHEIT_RANKINE_OFFSET) * 5.0 / 9.0)
    }
}

/// Temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

temperature_newtype!(Kelvin, "K");

impl Kelvin {
    /// Absolute zero
    pub const ABSOLUTE_ZERO: Kelvin = Kelvin(0.0);

    /// Convert to Celsius: `k − 273.15`
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius(self.0 - CELSIUS_KELVIN_OFFSET)
    }

    /// Convert to Fahrenheit: `k × 9/5 − 459.67`
    #[inline]
    #[must_use]
    pub fn to_fahrenheit(self) -> Fahrenheit {
        Fahrenheit(self.0 * 9.0 / 5.0 - FAHRENHEIT_RANKINE_OFFSET)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Fahrenheit {
        c.to_fahrenheit()
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Kelvin {
        c.to_kelvin()
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Celsius {
        f.to_celsius()
    }
}

impl From<Fahrenheit> for Kelvin {
    fn from(f: Fahrenheit) -> Kelvin {
        f.to_kelvin()
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Celsius {
        k.to_celsius()
    }
}

impl From<Kelvin> for Fahrenheit {
    fn from(k: Kelvin) -> Fahrenheit {
        k.to_fahrenheit()
    }
}

// ============================================================================
// SCALES
// ============================================================================

/// Inclusive integer range a scale's slider covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleBounds {
    /// Lowest slider value
    pub min: i32,
    /// Highest slider value
    pub max: i32,
}

impl ScaleBounds {
    /// Whether `value` lies within `[min, max]`
    #[inline]
    pub fn contains(self, value: f64) -> bool {
        value >= f64::from(self.min) && value <= f64::from(self.max)
    }

    /// Width of the range
    #[inline]
    pub fn span(self) -> i32 {
        self.max - self.min
    }
}

/// One of the three supported temperature scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub enum Scale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Scale {
    /// All scales in display order
    pub const ALL: [Scale; 3] = [Scale::Celsius, Scale::Fahrenheit, Scale::Kelvin];

    /// Human-readable scale name
    pub const fn name(self) -> &'static str {
        match self {
            Scale::Celsius => "Celsius",
            Scale::Fahrenheit => "Fahrenheit",
            Scale::Kelvin => "Kelvin",
        }
    }

    /// Unit symbol appended to displayed values
    pub const fn symbol(self) -> &'static str {
        match self {
            Scale::Celsius => "°C",
            Scale::Fahrenheit => "°F",
            Scale::Kelvin => "K",
        }
    }

    /// Slider bounds for this scale
    pub const fn bounds(self) -> ScaleBounds {
        match self {
            Scale::Celsius => ScaleBounds { min: -273, max: 5500 },
            Scale::Fahrenheit => ScaleBounds { min: -459, max: 9900 },
            Scale::Kelvin => ScaleBounds { min: 0, max: 5800 },
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScaleError(String);

impl fmt::Display for ParseScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown scale '{}' (expected celsius, fahrenheit or kelvin)",
            self.0
        )
    }
}

impl std::error::Error for ParseScaleError {}

impl FromStr for Scale {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(Scale::Celsius),
            "f" | "fahrenheit" => Ok(Scale::Fahrenheit),
            "k" | "kelvin" => Ok(Scale::Kelvin),
            _ => Err(ParseScaleError(s.to_string())),
        }
    }
}

// ============================================================================
// REFERENCE POINTS
// ============================================================================

/// A well-known temperature, for help text and demo tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    /// What happens at this temperature
    pub name: &'static str,
    /// The temperature itself
    pub temperature: Fahrenheit,
}

/// Common references, coldest first
pub const REFERENCE_POINTS: [ReferencePoint; 5] = [
    ReferencePoint {
        name: "Absolute zero",
        temperature: Fahrenheit::ABSOLUTE_ZERO,
    },
    ReferencePoint {
        name: "Freezing point of water",
        temperature: Fahrenheit(32.0),
    },
    ReferencePoint {
        name: "Warm summer's day in a temperate climate",
        temperature: Fahrenheit(72.0),
    },
    ReferencePoint {
        name: "Normal human body temperature",
        temperature: Fahrenheit(98.6),
    },
    ReferencePoint {
        name: "Boiling point of water at 1 atmosphere",
        temperature: Fahrenheit(212.0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_kelvin() {
        let c = Celsius(25.0);
        let k = c.to_kelvin();
        assert!((k.0 - 298.15).abs() < 1e-9);
    }

    #[test]
    fn test_kelvin_to_celsius() {
        let k = Kelvin(273.15);
        let c = k.to_celsius();
        assert!((c.0 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert!((Celsius(100.0).to_fahrenheit().0 - 212.0).abs() < 1e-9);
        assert!((Celsius(-40.0).to_fahrenheit().0 - -40.0).abs() < 1e-9);
    }

    #[test]
    fn test_fahrenheit_absolute_zero_is_zero_kelvin() {
        let k: Kelvin = Fahrenheit::ABSOLUTE_ZERO.into();
        assert!(k.0.abs() < 1e-9);
    }

    #[test]
    fn test_odd_celsius_keeps_fraction() {
        // 9/5 must not truncate to 1
        let f = Celsius(1.0).to_fahrenheit();
        assert!((f.0 - 33.8).abs() < 1e-9);
    }

    #[test]
    fn test_no_validation_below_absolute_zero() {
        let c = Celsius::new(-500.0);
        assert_eq!(c.value(), -500.0);
        assert!(c.to_kelvin().value() < 0.0);
    }

    #[test]
    fn test_total_ordering_with_nan() {
        let nan = Celsius::new(f64::NAN);
        assert!(nan > Celsius::BOILING);
        assert_eq!(Celsius::FREEZING.min(Celsius::BOILING), Celsius::FREEZING);
    }

    #[test]
    fn test_display() {
        assert_eq!(Celsius::new(21.456).to_string(), "21.5 °C");
        assert_eq!(Fahrenheit::new(32.0).to_string(), "32.0 °F");
        assert_eq!(Kelvin::new(0.0).to_string(), "0.0 K");
    }

    #[test]
    fn test_scale_from_str() {
        assert_eq!("C".parse::<Scale>(), Ok(Scale::Celsius));
        assert_eq!(" fahrenheit ".parse::<Scale>(), Ok(Scale::Fahrenheit));
        assert_eq!("Kelvin".parse::<Scale>(), Ok(Scale::Kelvin));
        assert!("rankine".parse::<Scale>().is_err());
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(Scale::Celsius.bounds(), ScaleBounds { min: -273, max: 5500 });
        assert_eq!(Scale::Fahrenheit.bounds(), ScaleBounds { min: -459, max: 9900 });
        assert_eq!(Scale::Kelvin.bounds(), ScaleBounds { min: 0, max: 5800 });
        assert!(Scale::Kelvin.bounds().contains(0.0));
        assert!(!Scale::Kelvin.bounds().contains(-0.5));
        assert_eq!(Scale::Celsius.bounds().span(), 5773);
    }

    #[test]
    fn test_reference_points_are_ascending() {
        for pair in REFERENCE_POINTS.windows(2) {
            assert!(pair[0].temperature < pair[1].temperature);
        }
    }
}
