//! Display formatting and parsing
//!
//! Results are rounded to a fixed number of significant digits so float
//! noise never reaches the display (`0.1 + 0.2` shows `0.3`).

/// Default number of significant digits shown
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 10;

/// Formats a value with [`DEFAULT_SIGNIFICANT_DIGITS`]
#[must_use]
pub fn format_number(value: f64) -> String {
    format_number_with(value, DEFAULT_SIGNIFICANT_DIGITS)
}

/// Formats a value for the display
///
/// - rounds to `significant_digits` (clamped to 1..=17)
/// - strips trailing fractional zeros and collapses `-0` to `0`
/// - renders non-finite values as `Infinity`, `-Infinity` and `NaN`
/// - switches to exponent form (`1.5e+21`, `2e-7`) outside `1e-6 ..< 1e21`
#[must_use]
pub fn format_number_with(value: f64, significant_digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = significant_digits.clamp(1, 17) - 1;
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-6..21).contains(&exponent) {
        let rounded: f64 = scientific.parse().unwrap_or(value);
        format!("{rounded}")
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    }
}

/// Parses display text into a number
///
/// Accepts in-progress entry such as `"12."` as well as `Infinity` and `NaN`.
/// Anything unparseable reads as `NaN`.
#[must_use]
pub fn parse_display(display: &str) -> f64 {
    display.trim().parse().unwrap_or(f64::NAN)
}

/// Returns true when the display holds a finite, plain (non-exponent) number
/// that digit entry may extend
#[must_use]
pub fn is_editable(display: &str) -> bool {
    !display.contains('e') && parse_display(display).is_finite()
}

/// Serde adapter for `f64` fields that may hold `Infinity` or `NaN`
///
/// Finite values stay JSON numbers. Non-finite values are written as their
/// display text (`"Infinity"`, `"-Infinity"`, `"NaN"`), which JSON numbers
/// cannot express. Reading also accepts `null` as `NaN`.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Reading {
///     #[serde(with = "papertube_calc::core::format::display_float")]
///     value: f64,
/// }
///
/// let json = serde_json::to_string(&Reading { value: f64::INFINITY }).unwrap();
/// assert_eq!(json, r#"{"value":"Infinity"}"#);
/// let back: Reading = serde_json::from_str(&json).unwrap();
/// assert_eq!(back.value, f64::INFINITY);
/// ```
pub mod display_float {
    use super::{format_number, parse_display};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Writes finite values as numbers and the rest as display text
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&format_number(*value))
        }
    }

    /// Reads a number, a display string or `null`
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(DisplayFloatVisitor)
    }

    struct DisplayFloatVisitor;

    impl<'de> Visitor<'de> for DisplayFloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, \"Infinity\", \"-Infinity\" or \"NaN\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            let value = parse_display(v);
            if value.is_nan() && !v.trim().eq_ignore_ascii_case("nan") {
                return Err(E::invalid_value(de::Unexpected::Str(v), &self));
            }
            Ok(value)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }
    }
}

fn trim_fraction(mantissa: &str) -> &str {
    if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    }
}
