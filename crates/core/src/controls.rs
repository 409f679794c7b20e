//! Configuration and repaint math for the three range controls
//!
//! The sliders only take integers, so every value shown to the user goes
//! through [`display_value`]. User drags are clamped to the slider bounds
//! here, before they reach the model.

use crate::core_types::{Scale, ScaleBounds, TemperatureReading};

/// Fixed configuration of one slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSpec {
    pub scale: Scale,
    pub bounds: ScaleBounds,
    /// Title shown next to the slider
    pub label: &'static str,
    /// Unit suffix shown after the value
    pub unit: &'static str,
}

/// The three sliders in display order
pub const SLIDERS: [SliderSpec; 3] = [
    SliderSpec::for_scale(Scale::Celsius),
    SliderSpec::for_scale(Scale::Fahrenheit),
    SliderSpec::for_scale(Scale::Kelvin),
];

impl SliderSpec {
    pub const fn for_scale(scale: Scale) -> Self {
        Self {
            scale,
            bounds: scale.bounds(),
            label: scale.name(),
            unit: scale.symbol(),
        }
    }

    /// Integer the slider shows for `value`, pinned to the slider bounds.
    pub fn position(&self, value: f64) -> i32 {
        display_value(value).clamp(self.bounds.min, self.bounds.max)
    }

    /// Clamp a user-driven value to the slider bounds.
    ///
    /// NaN has no position on the track and maps to the minimum.
    pub fn clamp_input(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::from(self.bounds.min);
        }
        value.clamp(f64::from(self.bounds.min), f64::from(self.bounds.max))
    }

    /// Position of `value` along the track, in `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        let offset = self.position(value) - self.bounds.min;
        f64::from(offset) / f64::from(self.bounds.span())
    }
}

/// Round for display: ties go up (-2.5 shows as -2), saturating at the
/// `i32` range. NaN displays as 0.
pub fn display_value(value: f64) -> i32 {
    // `round` sends ties away from zero, so only negative ties need fixing.
    // Adding 0.5 first would round 0.49999999999999994 up.
    let rounded = if value.fract() == -0.5 {
        value.ceil()
    } else {
        value.round()
    };
    // `as` saturates and maps NaN to 0
    rounded as i32
}

/// What one slider should show after a repaint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderPosition {
    pub spec: SliderSpec,
    /// Integer shown on the slider
    pub position: i32,
    /// Position along the track, in `[0, 1]`
    pub fraction: f64,
}

/// Repaint data for all three sliders, in display order.
pub fn panel(reading: &TemperatureReading) -> [SliderPosition; 3] {
    SLIDERS.map(|spec| {
        let value = reading.value(spec.scale);
        SliderPosition {
            spec,
            position: spec.position(value),
            fraction: spec.fraction(value),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Celsius;

    #[test]
    fn test_display_value_rounds_half_up() {
        assert_eq!(display_value(2.5), 3);
        assert_eq!(display_value(2.49), 2);
        assert_eq!(display_value(-2.5), -2);
        assert_eq!(display_value(-0.5), 0);
        assert_eq!(display_value(-2.51), -3);
        assert_eq!(display_value(273.15), 273);
    }

    #[test]
    fn test_display_value_just_below_half() {
        // Largest double below 0.5; adding 0.5 to it rounds to 1.0
        let below_half = 0.49999999999999994_f64;
        assert!(below_half < 0.5);
        assert_eq!(display_value(below_half), 0);
        assert_eq!(display_value(-below_half), 0);
        assert_eq!(display_value(-1.5), -1);
    }

    #[test]
    fn test_display_value_saturates() {
        assert_eq!(display_value(f64::INFINITY), i32::MAX);
        assert_eq!(display_value(f64::NEG_INFINITY), i32::MIN);
        assert_eq!(display_value(f64::NAN), 0);
    }

    #[test]
    fn test_position_is_pinned_to_bounds() {
        let kelvin = SliderSpec::for_scale(Scale::Kelvin);
        assert_eq!(kelvin.position(-12.0), 0);
        assert_eq!(kelvin.position(9000.0), 5800);
        assert_eq!(kelvin.position(300.4), 300);
    }

    #[test]
    fn test_clamp_input() {
        let celsius = SliderSpec::for_scale(Scale::Celsius);
        assert_eq!(celsius.clamp_input(-300.0), -273.0);
        assert_eq!(celsius.clamp_input(6000.0), 5500.0);
        assert_eq!(celsius.clamp_input(21.5), 21.5);
        assert_eq!(celsius.clamp_input(f64::NAN), -273.0);
    }

    #[test]
    fn test_fraction_covers_track() {
        let fahrenheit = SliderSpec::for_scale(Scale::Fahrenheit);
        assert_eq!(fahrenheit.fraction(-459.0), 0.0);
        assert_eq!(fahrenheit.fraction(9900.0), 1.0);
        let mid = fahrenheit.fraction(4720.5);
        assert!(mid > 0.49 && mid < 0.51);
    }

    #[test]
    fn test_slider_labels() {
        let labels: Vec<_> = SLIDERS.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Celsius", "Fahrenheit", "Kelvin"]);
        assert_eq!(SLIDERS[2].unit, "K");
    }

    #[test]
    fn test_panel_for_boiling_water() {
        let reading = TemperatureReading::from_celsius(Celsius::BOILING);
        let [c, f, k] = panel(&reading);
        assert_eq!(c.position, 100);
        assert_eq!(f.position, 212);
        assert_eq!(k.position, 373);
        assert_eq!(k.spec.scale, Scale::Kelvin);
    }
}
