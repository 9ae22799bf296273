//! Tolerant numeric parsing for loosely typed upstream values.
//!
//! Upstream tables deliver prices and volumes as numbers or as
//! locale-formatted strings (`"120,50"`). Parsing never fails: a value
//! that cannot be read as a finite number yields `None`.

use serde_json::Value;

/// Parse a number out of a loosely typed value.
///
/// - JSON numbers pass through when finite.
/// - Strings are trimmed; a comma decimal separator is accepted, and a
///   trailing unit (`"250 мл"`) is ignored — only the leading numeric
///   prefix is read.
/// - Everything else (null, booleans, objects, empty or garbage strings)
///   yields `None`.
///
/// # Examples
///
/// ```
/// use menu_gateway_types::parse_numeric;
/// use serde_json::json;
///
/// assert_eq!(parse_numeric(&json!("120,50")), Some(120.5));
/// assert_eq!(parse_numeric(&json!("250 мл")), Some(250.0));
/// assert_eq!(parse_numeric(&json!(340)), Some(340.0));
/// assert_eq!(parse_numeric(&json!("")), None);
/// ```
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                return None;
            }
            // Comma is the decimal separator in the upstream locale.
            leading_float(&text.replacen(',', ".", 1))
        }
        _ => None,
    }
}

/// Parse the leading numeric prefix of a string: an optional sign,
/// digits, and at most one decimal point. The scan stops at the first
/// character outside that alphabet, so trailing units pass.
fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut seen_dot = false;
    let mut seen_digit = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a number out of an optional value. Absent fields count as missing.
pub fn parse_numeric_opt(value: Option<&Value>) -> Option<f64> {
    value.and_then(parse_numeric)
}
