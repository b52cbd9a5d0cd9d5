use tracing::debug;

use crate::{
    ast::{Expr, Program},
    error::{ParseError, ParseErrorKind, ParseErrors},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_assignment, statement::parse_declaration, utils::TokenStream},
    },
    util::stack::with_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The result of parsing a whole program.
///
/// Parsing never gives up: declarations that fail to parse are dropped from
/// `program` and their errors collected in `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Every declaration that parsed successfully.
    pub program: Program,
    /// One error per broken declaration, in source order.
    pub errors:  Vec<ParseError>,
}

impl ParseOutput {
    /// Returns `true` if any declaration failed to parse.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Converts into the program, or every reported error if there was any.
    ///
    /// # Errors
    /// Returns [`ParseErrors`] when at least one declaration was broken.
    pub fn into_result(self) -> Result<Program, ParseErrors> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(ParseErrors(self.errors))
        }
    }
}

/// Parses a token sequence into a [`Program`].
///
/// Each top-level declaration is parsed in turn. When one fails, its error
/// is recorded, the parser [`synchronize`]s to the next statement boundary
/// and parsing resumes, so one syntax error only costs one statement.
///
/// # Example
/// ```
/// use arcanesigil::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("let x = ;\nlet y = 5;").unwrap();
/// let output = parse(&tokens);
///
/// assert_eq!(output.errors.len(), 1);
/// assert_eq!(output.program.statements.len(), 1);
/// ```
#[must_use]
pub fn parse(tokens: &[Token]) -> ParseOutput {
    let mut stream = TokenStream::new(tokens);
    let mut statements = Vec::new();

    while !stream.is_at_end() {
        if let Some(statement) = parse_declaration(&mut stream) {
            statements.push(statement);
        }
    }

    let errors = stream.take_errors();
    debug!(statements = statements.len(),
           errors = errors.len(),
           "parsed program");

    ParseOutput { program: Program { statements },
                  errors }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    with_stack(|| parse_assignment(tokens))
}

/// Parses a token sequence holding exactly one expression.
///
/// # Errors
/// Returns the first `ParseError`, or `Expect end of expression.` if tokens
/// remain after the expression.
///
/// # Example
/// ```
/// use arcanesigil::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::tokenize, parser::core::parse_standalone_expression},
/// };
///
/// let tokens = tokenize("1 + 2 * 3").unwrap();
/// let expr = parse_standalone_expression(&tokens).unwrap();
///
/// let Expr::Binary { op, right, .. } = expr else { panic!("not binary") };
/// assert_eq!(op, BinaryOperator::Add);
/// assert_eq!(right.node_type(), "BinaryExpression");
/// ```
pub fn parse_standalone_expression(tokens: &[Token]) -> ParseResult<Expr> {
    let mut stream = TokenStream::new(tokens);
    let expr = parse_expression(&mut stream)?;

    if !stream.is_at_end() {
        return Err(ParseError::new(stream.peek(),
                                   ParseErrorKind::Expected("end of expression")));
    }
    Ok(expr)
}

/// Discards tokens until a likely statement boundary.
///
/// Always consumes at least the token that caused the error, then stops
/// right after a `;` or right before a keyword that starts a statement.
/// Braced groups opened while skipping are skipped whole. Inside a block,
/// the `}` closing that block is never consumed, so the block still ends
/// where it should.
pub(in crate::interpreter::parser) fn synchronize(tokens: &mut TokenStream<'_>) {
    let mut open_braces = 0usize;
    let mut skipped_any = false;

    while !tokens.is_at_end() {
        let kind = tokens.peek().kind;

        if skipped_any
           && open_braces == 0
           && (tokens.previous().kind == TokenKind::Semicolon || starts_statement(kind))
        {
            return;
        }

        match kind {
            TokenKind::RightBrace if open_braces == 0 && tokens.in_block() => return,
            TokenKind::RightBrace => open_braces = open_braces.saturating_sub(1),
            TokenKind::LeftBrace => open_braces += 1,
            _ => {},
        }

        tokens.advance();
        skipped_any = true;
    }
}

const fn starts_statement(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::Fun
             | TokenKind::Var
             | TokenKind::Let
             | TokenKind::Const
             | TokenKind::For
             | TokenKind::If
             | TokenKind::While
             | TokenKind::Print
             | TokenKind::Return)
}
