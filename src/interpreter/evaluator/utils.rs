use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Checks if the argument list matches the expected count.
/// Returns an error if the argument count does not match.
///
/// ## Example
/// ```
/// use arcanesigil::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// let arg_vals = vec![Value::Number(2.0), Value::Number(1.0)];
/// let line = 15;
///
/// assert!(check_arity(&arg_vals, 2, line).is_ok()); // Requires exactly 2 arguments.
/// assert!(check_arity(&arg_vals, 3, line).is_err());
/// ```
pub const fn check_arity<T>(args: &[T], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { expected,
                                                  found: args.len(),
                                                  line })
    }
}
