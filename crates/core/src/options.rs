//! Lenient resolution of numeric command-line options.
//!
//! Unlike color and style names, numeric options are never rejected. A value
//! outside its range is dropped and the built-in default is used in its place:
//!
//! | Option     | Range | Default                      |
//! |------------|-------|------------------------------|
//! | speed      | 0–5   | delay 3 (speed 2)            |
//! | rotation   | 1–4   | 1                            |
//! | brightness | 1–4   | 4                            |
//!
//! Each discarded value is logged at `warn`.

use tracing::warn;

use crate::frame::{Rotation, StyleDelay};
use crate::palette::BrightnessLevel;
use crate::session::StyleParams;

fn in_u8<T>(value: i64, ctor: impl FnOnce(u8) -> Option<T>) -> Option<T> {
    u8::try_from(value).ok().and_then(ctor)
}

/// Resolve a brightness option, falling back to the maximum level.
pub fn resolve_brightness(value: i64) -> BrightnessLevel {
    in_u8(value, BrightnessLevel::new).unwrap_or_else(|| {
        warn!(value, "Brightness outside 1-4, using {}", BrightnessLevel::MAX);
        BrightnessLevel::MAX
    })
}

/// Resolve a speed option into a countdown delay.
pub fn resolve_speed(value: i64) -> StyleDelay {
    in_u8(value, StyleDelay::from_speed).unwrap_or_else(|| {
        let fallback = StyleDelay::default();
        warn!(
            value,
            "Speed outside 0-5, using delay {}",
            fallback.value()
        );
        fallback
    })
}

/// Resolve a rotation option, falling back to 1.
pub fn resolve_rotation(value: i64) -> Rotation {
    in_u8(value, Rotation::new).unwrap_or_else(|| {
        let fallback = Rotation::default();
        warn!(value, "Rotation outside 1-4, using {}", fallback.value());
        fallback
    })
}

/// Build style parameters from optional raw option values.
pub fn style_params(
    speed: Option<i64>,
    rotation: Option<i64>,
    brightness: Option<i64>,
) -> StyleParams {
    let defaults = StyleParams::default();
    StyleParams {
        delay: speed.map(resolve_speed).unwrap_or(defaults.delay),
        rotation: rotation.map(resolve_rotation).unwrap_or(defaults.rotation),
        brightness: brightness
            .map(resolve_brightness)
            .unwrap_or(defaults.brightness),
    }
}

/// Parse a style byte given as decimal or `0x`-prefixed hex.
pub fn parse_style_byte(s: &str) -> Option<u8> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_in_range_is_kept() {
        for n in 1..=4 {
            assert_eq!(resolve_brightness(n).level(), n as u8);
        }
    }

    #[test]
    fn brightness_out_of_range_defaults_to_max() {
        assert_eq!(resolve_brightness(0), BrightnessLevel::MAX);
        assert_eq!(resolve_brightness(5), BrightnessLevel::MAX);
        assert_eq!(resolve_brightness(-1), BrightnessLevel::MAX);
        assert_eq!(resolve_brightness(1000), BrightnessLevel::MAX);
    }

    #[test]
    fn speed_is_inverted() {
        assert_eq!(resolve_speed(0).value(), 5);
        assert_eq!(resolve_speed(5).value(), 0);
    }

    #[test]
    fn speed_out_of_range_defaults_to_mid_delay() {
        assert_eq!(resolve_speed(6).value(), 3);
        assert_eq!(resolve_speed(-2).value(), 3);
    }

    #[test]
    fn rotation_out_of_range_defaults_to_one() {
        assert_eq!(resolve_rotation(0).value(), 1);
        assert_eq!(resolve_rotation(5).value(), 1);
        assert_eq!(resolve_rotation(3).value(), 3);
    }

    #[test]
    fn absent_options_use_defaults() {
        let params = style_params(None, None, None);
        assert_eq!(params, StyleParams::default());
        assert_eq!(params.delay.value(), 3);
        assert_eq!(params.rotation.value(), 1);
        assert_eq!(params.brightness, BrightnessLevel::MAX);
    }

    #[test]
    fn mixed_options_resolve_independently() {
        let params = style_params(Some(4), Some(9), Some(2));
        assert_eq!(params.delay.value(), 1);
        assert_eq!(params.rotation.value(), 1);
        assert_eq!(params.brightness.level(), 2);
    }

    #[test]
    fn style_byte_accepts_decimal_and_hex() {
        assert_eq!(parse_style_byte("17"), Some(17));
        assert_eq!(parse_style_byte("0x11"), Some(0x11));
        assert_eq!(parse_style_byte("0XFF"), Some(0xFF));
        assert_eq!(parse_style_byte("256"), None);
        assert_eq!(parse_style_byte("0xZZ"), None);
    }
}
