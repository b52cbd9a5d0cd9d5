/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Returns the value as an `i64` if it is integral and exactly
/// representable, otherwise `None`.
///
/// ## Example
/// ```
/// use arcanesigil::util::num::f64_as_exact_integer;
///
/// assert_eq!(f64_as_exact_integer(5.0), Some(5));
/// assert_eq!(f64_as_exact_integer(-0.0), Some(0));
/// assert_eq!(f64_as_exact_integer(5.5), None);
/// assert_eq!(f64_as_exact_integer(f64::INFINITY), None);
/// assert_eq!(f64_as_exact_integer(1e300), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f64_as_exact_integer(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    Some(value as i64)
}
