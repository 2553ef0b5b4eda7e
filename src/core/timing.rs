// Randomization and time-unit helpers. Platform independent; the browser
// timers built on top of these live in `timers.rs`.

use crate::constants::{DEFAULT_WAIT_MAX_SECS, DEFAULT_WAIT_MIN_SECS, MILLIS_PER_SECOND};
use rand::Rng;

/// Uniform integer in `[min, max]`, both ends inclusive.
#[inline]
pub fn random_int_clamp(min: i32, max: i32) -> i32 {
    random_int_clamp_with(&mut rand::thread_rng(), min, max)
}

/// Like [`random_int_clamp`] with a caller-supplied generator. Reversed
/// bounds are swapped.
pub fn random_int_clamp_with<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Input accepted by [`seconds`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for TimeValue<'_> {
    fn from(n: f64) -> Self {
        TimeValue::Number(n)
    }
}

impl From<i32> for TimeValue<'_> {
    fn from(n: i32) -> Self {
        TimeValue::Number(n as f64)
    }
}

impl<'a> From<&'a str> for TimeValue<'a> {
    fn from(s: &'a str) -> Self {
        TimeValue::Text(s)
    }
}

/// Convert seconds to milliseconds.
///
/// Only numbers are converted. Text is parsed as an integer and returned as
/// is, so `seconds(5) == 5000.0` while `seconds("5") == 5.0`. Text without a
/// leading integer yields `NaN`.
pub fn seconds<'a>(n: impl Into<TimeValue<'a>>) -> f64 {
    match n.into() {
        TimeValue::Number(n) => n * MILLIS_PER_SECOND,
        TimeValue::Text(s) => parse_int_prefix(s).unwrap_or(f64::NAN),
    }
}

/// Parse the leading integer of `s` the way JavaScript's `parseInt` does:
/// surrounding whitespace and trailing garbage are ignored, a sign and a
/// `0x` prefix are honored. Values past the `i64` range lose precision
/// instead of failing, as they do in JavaScript.
pub fn parse_int_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let digits = &digits[..end];
    let value = if radix == 10 {
        digits.parse::<f64>().ok()?
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * radix as f64 + d as f64)
    };
    Some(if negative { -value } else { value })
}

/// Bounds for a sporadic timer, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitRange {
    pub min_secs: i32,
    pub max_secs: i32,
}

impl Default for WaitRange {
    fn default() -> Self {
        Self {
            min_secs: DEFAULT_WAIT_MIN_SECS,
            max_secs: DEFAULT_WAIT_MAX_SECS,
        }
    }
}

impl WaitRange {
    #[cfg(test)]
    pub const fn new(min_secs: i32, max_secs: i32) -> Self {
        Self { min_secs, max_secs }
    }

    /// Fill in whichever bound is missing from the default range.
    pub fn or_default(min_secs: Option<i32>, max_secs: Option<i32>) -> Self {
        let d = Self::default();
        Self {
            min_secs: min_secs.unwrap_or(d.min_secs),
            max_secs: max_secs.unwrap_or(d.max_secs),
        }
    }
}

/// Pick a whole number of seconds in `range` and return it in milliseconds.
pub fn sporadic_delay_ms<R: Rng + ?Sized>(rng: &mut R, range: WaitRange) -> i32 {
    let secs = random_int_clamp_with(rng, range.min_secs, range.max_secs);
    seconds(secs) as i32
}
