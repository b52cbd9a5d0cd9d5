use tracing::warn;

use crate::{
    error::{ParseError, ParseErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// The maximum number of call arguments or function parameters.
pub const MAX_ARGUMENTS: usize = 255;

/// Stands in for a missing end-of-input token.
static EOF: Token = Token::eof(0, 0);

/// A cursor over a token sequence, shared by the expression and statement
/// parsers.
///
/// The cursor never moves past the end-of-input token. A sequence that does
/// not end with one behaves as if it did. Errors recovered at declaration
/// boundaries are collected here.
pub struct TokenStream<'a> {
    tokens:      &'a [Token],
    current:     usize,
    errors:      Vec<ParseError>,
    block_depth: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens,
               current: 0,
               errors: Vec::new(),
               block_depth: 0 }
    }

    /// Returns the current token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        self.tokens.get(self.current).unwrap_or(&EOF)
    }

    /// Returns the most recently consumed token, or the current one if
    /// nothing has been consumed yet.
    #[must_use]
    pub fn previous(&self) -> &'a Token {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .unwrap_or_else(|| self.peek())
    }

    /// Returns `true` once the cursor reaches end of input.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Returns `true` if the current token has the given kind.
    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Consumes the current token if it has one of the given kinds.
    pub fn matches(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes a token of the given kind or fails with
    /// `Expect <what>.` at the current token.
    pub fn expect(&mut self, kind: TokenKind, what: &'static str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(self.peek(), ParseErrorKind::Expected(what)))
        }
    }

    /// Records an error recovered at a declaration boundary.
    pub fn report(&mut self, error: ParseError) {
        warn!(line = error.token.line, "{}", error.message());
        self.errors.push(error);
    }

    /// Marks the start of a block body.
    pub const fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    /// Marks the end of a block body, whether or not it closed properly.
    pub const fn leave_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    /// Returns `true` while parsing the declarations of a block.
    #[must_use]
    pub const fn in_block(&self) -> bool {
        self.block_depth > 0
    }

    /// Hands over every recorded error.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }
}

/// Parses a comma-separated list of items up to and including a closing
/// token.
///
/// This utility is shared by call arguments and function parameters. An
/// immediately encountered closing token produces an empty list. Lists
/// longer than [`MAX_ARGUMENTS`] fail with `too_many`, reported at the first
/// item past the limit.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, the list is too long
/// or the closing token is missing.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, T>(
    tokens: &mut TokenStream<'a>,
    parse_item: impl Fn(&mut TokenStream<'a>) -> ParseResult<T>,
    closing: (TokenKind, &'static str),
    too_many: ParseErrorKind)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();

    if !tokens.check(closing.0) {
        loop {
            if items.len() >= MAX_ARGUMENTS {
                return Err(ParseError::new(tokens.peek(), too_many));
            }
            items.push(parse_item(tokens)?);
            if tokens.matches(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
    }

    tokens.expect(closing.0, closing.1)?;
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns `Expect <what>.` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream<'_>,
                                                       what: &'static str)
                                                       -> ParseResult<String> {
    tokens.expect(TokenKind::Identifier, what)
          .map(|token| token.lexeme.clone())
}
