//! Safe-integer coercion for attribute values.

use std::num::IntErrorKind;

/// Largest integer exactly representable as an IEEE-754 double (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Smallest integer exactly representable as an IEEE-754 double.
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

/// Convert an attribute string to a safe integer.
///
/// Numeric text (decimal, fraction, exponent, `0b`/`0o`/`0x` prefixes,
/// `Infinity`) is truncated toward zero and clamped to
/// [`MIN_SAFE_INTEGER`]..=[`MAX_SAFE_INTEGER`]. Empty or non-numeric text
/// converts to 0.
///
/// # Example
///
/// ```
/// use cnt_counter::{MAX_SAFE_INTEGER, to_safe_integer};
///
/// assert_eq!(to_safe_integer(""), 0);
/// assert_eq!(to_safe_integer(" 3.9 "), 3);
/// assert_eq!(to_safe_integer("-2.5"), -2);
/// assert_eq!(to_safe_integer("0x1f"), 31);
/// assert_eq!(to_safe_integer("1e100"), MAX_SAFE_INTEGER);
/// assert_eq!(to_safe_integer("fig"), 0);
/// ```
#[must_use]
pub fn to_safe_integer(value: &str) -> i64 {
    clamp_to_safe(to_number(value.trim()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn clamp_to_safe(number: f64) -> i64 {
    if number.is_nan() {
        return 0;
    }
    // Both bounds are exact in f64, so the cast cannot overflow.
    number
        .clamp(MIN_SAFE_INTEGER as f64, MAX_SAFE_INTEGER as f64)
        .trunc() as i64
}

fn to_number(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    if let Some(number) = parse_prefixed(s) {
        return number;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust accepts `inf` and `nan` spellings that are not numbers here
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return f64::NAN;
    }

    s.parse().unwrap_or(f64::NAN)
}

/// Parse `0b`, `0o` and `0x` literals. Returns `None` for other text.
#[allow(clippy::cast_precision_loss)]
fn parse_prefixed(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0b" | "0B" => (2, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0x" | "0X" => (16, &s[2..]),
        _ => return None,
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }

    let number = match u64::from_str_radix(digits, radix) {
        Ok(n) => n as f64,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => f64::INFINITY,
        Err(_) => f64::NAN,
    };
    Some(number)
}
