//! Rendering of evaluated values.
//!
//! Numbers use Rust's shortest round-trip decimal form and never switch to
//! exponent notation, so `1e21` prints as `1000000000000000000000` and `1e-7`
//! as `0.0000001`. Non-finite results print as `Infinity`, `-Infinity` and
//! `NaN`.

use super::eval::Value;

/// Format an evaluated cell value for output.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Error => "#ERR".to_string(),
        Value::Blank => String::new(),
    }
}

/// Format a number using the shortest decimal form that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else {
        n.to_string()
    }
}
