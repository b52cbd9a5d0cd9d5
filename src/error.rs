/// Lexing errors.
///
/// Raised while turning source text into tokens: unterminated strings and
/// characters that cannot begin any token. Always fatal to the tokenize call.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the errors detected while building the syntax tree, such as a
/// missing `;`, an invalid assignment target or an expression expected but
/// not found. Each one carries the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unknown variables, calls with the wrong number of arguments, type
/// mismatches or division by zero.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::{ParseError, ParseErrorKind, ParseErrors};
pub use runtime_error::RuntimeError;

/// Any error produced while compiling or executing a script.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// One or more declarations failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseErrors),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
