/// Entry points and error recovery.
///
/// Drives declaration parsing over a whole token sequence, collects the
/// reported errors and resynchronizes after each one.
pub mod core;

/// Binary-level expression parsing.
///
/// Assignment, logical `or`/`and`, equality, comparison, term and factor
/// levels of the precedence ladder.
pub mod binary;

/// Unary, call and primary expressions.
pub mod unary;

/// Statement and declaration parsing.
pub mod statement;

/// Brace-delimited blocks.
pub mod block;

/// The shared token cursor and list helpers.
pub mod utils;
