/// Core evaluation logic and context management.
///
/// Contains the runtime context, statement execution, expression dispatch
/// and control-flow propagation.
pub mod core;

/// Lexical environments.
///
/// Name-to-value tables chained to their enclosing scope.
pub mod environment;

/// Binary operator evaluation.
///
/// Implements arithmetic, string concatenation, comparison and equality.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements numeric negation and logical not.
pub mod unary;

/// Function evaluation.
///
/// Handles calls to user-defined and native functions, arity checking and
/// the builtins registry.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides helpers shared by the evaluator and native functions.
pub mod utils;
