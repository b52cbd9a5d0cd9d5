use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read or assign an undefined variable.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a name bound by the builtin scope.
    #[error("Error on line {line}: Cannot assign to builtin '{name}'. Declare a variable to shadow it.")]
    BuiltinReassignment {
        /// The builtin name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Expected {expected} arguments but got {found}.")]
    ArgumentCountMismatch {
        /// The function's arity.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a value that is not a function.
    #[error("Error on line {line}: Can only call functions.")]
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Operands had incompatible types.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Operand must be a number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division or modulo by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Function calls nested deeper than the configured limit.
    #[error("Error on line {line}: Stack overflow: call depth exceeded {limit}.")]
    StackOverflow {
        /// The maximum call depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}
