//! Numeric coercion helpers

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::Value;

lazy_static! {
    static ref DECIMAL: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid decimal regex");
    static ref RADIX: Regex =
        Regex::new(r"^0([xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").expect("valid radix regex");
}

/// Whether a front-matter value coerces to a finite number
///
/// Coercion follows the usual JavaScript rules: blank strings, `null` and
/// booleans count as numbers, `"0x1f"` is hexadecimal, and anything that
/// only parses to an infinity does not count.
pub fn can_convert_to_number(value: &Value) -> bool {
    coerce_number(value).map(f64::is_finite).unwrap_or(false)
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        // [] is 0, [x] is x, longer lists are NaN
        Value::Sequence(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => match single {
                Value::Null => Some(0.0),
                Value::Sequence(_) | Value::Mapping(_) => coerce_number(single),
                Value::Bool(_) => None,
                other => coerce_number(other),
            },
            _ => None,
        },
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => coerce_number(&tagged.value),
    }
}

/// Parse a string the way `Number(string)` would
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    if let Some(caps) = RADIX.captures(s) {
        let digits = &caps[1];
        let radix = match digits.as_bytes()[0] {
            b'x' | b'X' => 16,
            b'o' | b'O' => 8,
            _ => 2,
        };
        return u128::from_str_radix(&digits[1..], radix)
            .ok()
            .map(|n| n as f64);
    }

    match s.trim_start_matches(['+', '-']) {
        "Infinity" => {
            return Some(if s.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            })
        }
        _ if DECIMAL.is_match(s) => {}
        _ => return None,
    }

    s.parse::<f64>().ok()
}
