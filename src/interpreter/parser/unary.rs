use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::{ParseError, ParseErrorKind},
    interpreter::{
        lexer::{Literal, Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{MAX_ARGUMENTS, TokenStream, parse_comma_separated},
        },
    },
    util::stack::with_stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | call
/// ```
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    if let Some(token) = tokens.matches(&[TokenKind::Minus, TokenKind::Bang]) {
        let op = if token.kind == TokenKind::Minus {
            UnaryOperator::Negate
        } else {
            UnaryOperator::Not
        };
        let expr = with_stack(|| parse_unary(tokens))?;
        return Ok(Expr::Unary { op,
                                expr: Box::new(expr),
                                line: token.line });
    }

    parse_call(tokens)
}

/// Parses a primary expression followed by any number of call suffixes.
///
/// Chained calls such as `f()()` call the result of the previous call.
///
/// Grammar:
/// ```text
///     call := primary ( "(" arguments? ")" )*
/// ```
///
/// # Errors
/// Fails on a malformed argument list, a missing `)` or more than
/// [`MAX_ARGUMENTS`] arguments.
fn parse_call(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut expr = parse_primary(tokens)?;

    while tokens.matches(&[TokenKind::LeftParen]).is_some() {
        let arguments = parse_comma_separated(tokens,
                                              parse_expression,
                                              (TokenKind::RightParen, "')' after arguments"),
                                              ParseErrorKind::TooManyArguments(MAX_ARGUMENTS))?;
        expr = Expr::Call { callee: Box::new(expr),
                            arguments,
                            line: tokens.previous().line };
    }

    Ok(expr)
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := "true" | "false" | "nil"
///              | NUMBER | STRING
///              | IDENTIFIER
///              | "(" expression ")"
/// ```
///
/// A parenthesized expression is kept as an [`Expr::Grouping`] node.
///
/// # Errors
/// Returns `Expect expression.` at the current token when it cannot start
/// an expression.
pub(crate) fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let token = tokens.peek();
    let line = token.line;

    let expr = match token.kind {
        TokenKind::False => Expr::Literal { value: false.into(),
                                            line },
        TokenKind::True => Expr::Literal { value: true.into(),
                                           line },
        TokenKind::Nil => Expr::Literal { value: LiteralValue::Nil,
                                          line },
        TokenKind::Number | TokenKind::String => Expr::Literal { value: literal_value(token)?,
                                                                 line },
        TokenKind::Identifier => Expr::Identifier { name: token.lexeme.clone(),
                                                    line },
        TokenKind::LeftParen => {
            tokens.advance();
            let inner = parse_expression(tokens)?;
            tokens.expect(TokenKind::RightParen, "')' after expression")?;
            return Ok(Expr::Grouping { expr: Box::new(inner),
                                       line });
        },
        _ => return Err(ParseError::new(token, ParseErrorKind::ExpectedExpression)),
    };

    tokens.advance();
    Ok(expr)
}

/// Converts the literal carried by a number or string token.
fn literal_value(token: &Token) -> ParseResult<LiteralValue> {
    match &token.literal {
        Some(Literal::Number(n)) => Ok(LiteralValue::Number(*n)),
        Some(Literal::Str(s)) => Ok(LiteralValue::Str(s.clone())),
        None => Err(ParseError::new(token, ParseErrorKind::ExpectedExpression)),
    }
}
