//! Floating point helpers shared by the formatter and the parser
//!
//! Magnitudes are IEEE doubles. Rendering goes through an exact integer
//! representation of the scaled value whenever it fits in 53 bits, so the
//! digits shown are the digits that were rounded.

/// Values closer to zero than this are treated as zero
pub const FPV_MIN_THRESHOLD: f64 = 1.0e-14;

/// Half-up rounding bias, nudged to absorb binary representation error
const ROUND_HALF_UP: f64 = 0.500_000_000_01;

/// Largest decimal precision rendered exactly
pub const MAX_DECIMAL_PRECISION: u32 = 12;

/// 2^53, the limit of exactly representable integers
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Check whether a value is indistinguishable from zero
pub fn is_effectively_zero(value: f64) -> bool {
    value.abs() < FPV_MIN_THRESHOLD
}

/// Round half-up (away from zero) to a number of decimal places
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places.min(MAX_DECIMAL_PRECISION) as i32);
    let scaled = (value.abs() * scale + ROUND_HALF_UP).floor();
    if scaled >= EXACT_INTEGER_LIMIT {
        return value;
    }
    (scaled / scale).copysign(value)
}

/// Snap to the nearest multiple of `factor`; non-positive factors are ignored
pub fn round_to_factor(value: f64, factor: f64) -> f64 {
    if !(factor > 0.0) || !factor.is_finite() {
        return value;
    }
    let steps = (value.abs() / factor + ROUND_HALF_UP).floor();
    (steps * factor).copysign(value)
}

/// Split a non-negative value into whole digits and exactly `places` fraction
/// digits, rounding half-up.
pub fn fixed_parts(value: f64, places: u32) -> (String, String) {
    let places = places.min(MAX_DECIMAL_PRECISION);
    let value = value.abs();
    let scale = 10u64.pow(places);
    let scaled = (value * scale as f64 + ROUND_HALF_UP).floor();

    if scaled < EXACT_INTEGER_LIMIT {
        let n = scaled as u64;
        let whole = (n / scale).to_string();
        let fraction = if places == 0 {
            String::new()
        } else {
            format!("{:0width$}", n % scale, width = places as usize)
        };
        return (whole, fraction);
    }

    // Too large for the exact path: fall back to std formatting
    let text = format!("{:.*}", places as usize, value);
    match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
        None => (text, String::new()),
    }
}

/// Remove trailing zeros from a fraction digit string
pub fn strip_trailing_zeros(fraction: &str) -> &str {
    fraction.trim_end_matches('0')
}

/// Insert a separator every three digits of a whole-number digit string
pub fn group_thousands(whole: &str, separator: char) -> String {
    let digits: Vec<char> = whole.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(*c);
    }
    out
}

/// Greatest common divisor
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Caller-chosen absolute tolerance comparison
pub fn within_tolerance(x: f64, y: f64, tolerance: f64) -> bool {
    (x - y).abs() <= tolerance.abs()
}
