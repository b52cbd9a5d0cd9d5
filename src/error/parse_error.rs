use std::fmt;

use thiserror::Error;

use crate::interpreter::lexer::Token;

/// The reasons a declaration can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The left side of `=` is not a plain identifier.
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    /// A call has more arguments than the language allows.
    #[error("Can't have more than {0} arguments.")]
    TooManyArguments(usize),
    /// A function declares more parameters than the language allows.
    #[error("Can't have more than {0} parameters.")]
    TooManyParameters(usize),
    /// An expression was required but the token cannot start one.
    #[error("Expect expression.")]
    ExpectedExpression,
    /// A specific token was required, e.g. `Expect ';' after value.`
    #[error("Expect {0}.")]
    Expected(&'static str),
}

/// A syntax error together with the token at which it was detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ParseError {
    /// The offending token.
    pub token: Token,
    /// What went wrong.
    pub kind:  ParseErrorKind,
}

impl ParseError {
    /// Creates an error located at `token`.
    #[must_use]
    pub fn new(token: &Token, kind: ParseErrorKind) -> Self {
        Self { token: token.clone(),
               kind }
    }

    /// Returns the message without position information, e.g.
    /// `Invalid assignment target.`
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "Error on line {}, column {} at {}: {}",
               self.token.line,
               self.token.column,
               Location(&self.token),
               self.kind)
    }
}

/// Renders where an error happened: the quoted lexeme, or `end` at `Eof`.
struct Location<'a>(&'a Token);

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_eof() {
            write!(f, "end")
        } else {
            write!(f, "'{}'", self.0.lexeme)
        }
    }
}

/// Every error reported while parsing one program, in source order.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ParseErrors(pub Vec<ParseError>);

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
