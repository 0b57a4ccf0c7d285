//! String and number coercion helpers.

use serde_json::Number;

// 2^63; every f64 below this truncates into i64 range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Trimmed, case-insensitive `true`/`false`.
pub(crate) fn string_to_bool(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn string_to_int(s: &str) -> Option<i32> {
    s.parse().ok()
}

pub(crate) fn string_to_long(s: &str) -> Option<i64> {
    s.parse().ok()
}

/// Overflowing, `inf` and `NaN` strings are rejected.
pub(crate) fn string_to_float(s: &str) -> Option<f32> {
    s.parse::<f32>().ok().filter(|f| f.is_finite())
}

/// Overflowing, `inf` and `NaN` strings are rejected.
pub(crate) fn string_to_double(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// A finite `f64` narrowed to `f32`, or `None` when it exceeds the `f32` range.
pub(crate) fn double_to_float(d: f64) -> Option<f32> {
    if d.is_finite() && d.abs() <= f64::from(f32::MAX) {
        Some(d as f32)
    } else {
        None
    }
}

/// A plain decimal string (`[+-]digits.digits`) scaled by `10^places`.
///
/// Extra fraction digits are truncated and missing ones are zero, using
/// integer arithmetic only. Returns `None` for anything else, including
/// exponents and values that overflow `i64`.
pub(crate) fn decimal_to_scaled(s: &str, places: u32) -> Option<i64> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (whole, fraction) = unsigned.split_once('.')?;
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut digits = fraction.bytes();
    let mut sub: i64 = 0;
    for _ in 0..places {
        let digit = digits.next().map_or(0, |b| i64::from(b - b'0'));
        sub = sub * 10 + digit;
    }

    let magnitude = whole.checked_mul(10_i64.pow(places))?.checked_add(sub)?;
    Some(if negative { -magnitude } else { magnitude })
}

/// A JSON number as `i64`, truncating any fraction toward zero.
///
/// Returns `None` when the number does not fit.
pub(crate) fn number_to_i64(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    let truncated = n.as_f64()?.trunc();
    if (-I64_BOUND..I64_BOUND).contains(&truncated) {
        Some(truncated as i64)
    } else {
        None
    }
}
