use std::fmt;

use thiserror::Error;

/// The reasons tokenization can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    /// A character that cannot begin any token.
    #[default]
    #[error("Unexpected character")]
    UnexpectedCharacter,
    /// A string literal with no closing quote.
    #[error("Unterminated string")]
    UnterminatedString,
    /// A numeric literal that could not be converted to a number.
    #[error("Invalid number literal")]
    InvalidNumber,
}

/// A fatal tokenization error and where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct LexError {
    /// What went wrong.
    pub kind:   LexErrorKind,
    /// The source text of the rejected token.
    pub lexeme: String,
    /// The source line where the error occurred.
    pub line:   usize,
    /// The source column where the error occurred.
    pub column: usize,
}

impl LexError {
    /// Returns a human-readable description without the position prefix.
    ///
    /// # Example
    /// ```
    /// use arcanesigil::error::{LexError, LexErrorKind};
    ///
    /// let err = LexError { kind:   LexErrorKind::UnexpectedCharacter,
    ///                      lexeme: "@".to_string(),
    ///                      line:   2,
    ///                      column: 5, };
    ///
    /// assert_eq!(err.message(), "Unexpected character '@'.");
    /// assert_eq!(err.to_string(),
    ///            "Error on line 2, column 5: Unexpected character '@'.");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            LexErrorKind::UnexpectedCharacter | LexErrorKind::InvalidNumber => {
                format!("{} '{}'.", self.kind, self.lexeme)
            },
            LexErrorKind::UnterminatedString => format!("{}.", self.kind),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "Error on line {}, column {}: {}",
               self.line,
               self.column,
               self.message())
    }
}
