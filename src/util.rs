/// Numeric conversion helpers.
///
/// Safe conversions between `f64` and `i64` that never lose information
/// silently.
pub mod num;
/// Stack growth for the recursive parser and evaluator.
pub mod stack;
