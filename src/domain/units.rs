//! Temperature-range formatting.
//!
//! Stored temperatures are display strings like `65-75°F`. Conversion works
//! on the numeric range and is applied independently to each bound; inputs
//! that don't contain a recognizable range produce the empty string, never
//! an error.

use regex::Regex;
use std::sync::LazyLock;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\d.]+)-([\d.]+)").unwrap()
});

fn parse_range(s: &str) -> Option<(f64, f64)> {
    let caps = RANGE_RE.captures(s)?;
    let low = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let high = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some((low, high))
}

/// `"65-75°F"` (or `"65-75"`) → `"18-24°C"`. Empty string when no range is found.
pub fn convert_to_celsius(fahrenheit: &str) -> String {
    match parse_range(fahrenheit) {
        Some((low_f, high_f)) => {
            let low_c = ((low_f - 32.0) * 5.0 / 9.0).round();
            let high_c = ((high_f - 32.0) * 5.0 / 9.0).round();
            format!("{low_c:.0}-{high_c:.0}°C")
        }
        None => String::new(),
    }
}

/// `"18-24°C"` → `"64-75°F"`. Empty string when no range is found.
pub fn convert_to_fahrenheit(celsius: &str) -> String {
    match parse_range(celsius) {
        Some((low_c, high_c)) => {
            let low_f = (low_c * 9.0 / 5.0 + 32.0).round();
            let high_f = (high_c * 9.0 / 5.0 + 32.0).round();
            format!("{low_f:.0}-{high_f:.0}°F")
        }
        None => String::new(),
    }
}

/// Renders a stored temperature with its converted twin appended.
///
/// A string with no unit marker is treated as Fahrenheit. When the range
/// can't be parsed the stored string is returned as-is.
pub fn display_temperature(stored: &str) -> String {
    if stored.contains("°F") {
        let celsius = convert_to_celsius(stored);
        if celsius.is_empty() {
            stored.to_string()
        } else {
            format!("{stored} ({celsius})")
        }
    } else if stored.contains("°C") {
        let fahrenheit = convert_to_fahrenheit(stored);
        if fahrenheit.is_empty() {
            stored.to_string()
        } else {
            format!("{stored} ({fahrenheit})")
        }
    } else {
        let with_unit = format!("{stored}°F");
        let celsius = convert_to_celsius(&with_unit);
        if celsius.is_empty() {
            stored.to_string()
        } else {
            format!("{with_unit} ({celsius})")
        }
    }
}
