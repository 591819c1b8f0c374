//! Value sampling.
//!
//! Every sampler takes the caller's random source explicitly; there is no
//! hidden global state, so generation is reproducible under a seeded rng
//! and safe to run concurrently.

use certus_rational::Rational;
use rand::Rng;

use crate::config::DECIMAL_PRECISION;

/// Samples an integer uniformly from the inclusive range `[min, max]`.
///
/// # Panics
///
/// Panics if `min > max`. Configuration validation keeps callers inside
/// valid bounds; an inverted range here is a caller bug, not input error.
pub fn sample_integer<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    assert!(min <= max, "inverted range: [{min}, {max}]");
    rng.gen_range(min..=max)
}

/// Samples a fixed-precision decimal uniformly from `[min, max]`.
///
/// The value is drawn as a scaled integer, so the result is an exact
/// rational with at most `precision` decimal places.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn sample_decimal<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64, precision: u32) -> Rational {
    assert!(min <= max, "inverted range: [{min}, {max}]");
    let scale = 10i64.pow(precision);
    let scaled = rng.gen_range(min * scale..=max * scale);
    Rational::from_scaled(scaled, precision)
}

/// Samples a non-zero value in `[1, max]` under the decimal policy.
pub fn sample_value<R: Rng + ?Sized>(rng: &mut R, max: i64, allow_decimals: bool) -> Rational {
    if allow_decimals {
        sample_decimal(rng, 1, max, DECIMAL_PRECISION)
    } else {
        Rational::from(sample_integer(rng, 1, max))
    }
}

/// Picks a uniformly random element of a non-empty slice.
///
/// # Panics
///
/// Panics on an empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    assert!(!items.is_empty(), "cannot pick from an empty slice");
    &items[rng.gen_range(0..items.len())]
}
