use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::{ParseError, ParseErrorKind},
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, unary::parse_unary, utils::TokenStream},
    },
};

/// Parses an assignment, the lowest-precedence expression.
///
/// Assignment is right-associative: `a = b = 3` parses as `a = (b = 3)`.
/// The target is parsed as an ordinary expression first and only accepted
/// if it turned out to be a plain identifier.
///
/// Grammar: `assignment := IDENTIFIER "=" assignment | logical_or`
///
/// # Errors
/// Returns `Invalid assignment target.` at the `=` token when the left side
/// is anything other than an identifier.
pub fn parse_assignment(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let target = parse_logical_or(tokens)?;

    if let Some(equals) = tokens.matches(&[TokenKind::Equal]) {
        let value = parse_assignment(tokens)?;

        return match target {
            Expr::Identifier { name, line } => Ok(Expr::Assignment { name,
                                                                     value: Box::new(value),
                                                                     line }),
            _ => Err(ParseError::new(equals, ParseErrorKind::InvalidAssignmentTarget)),
        };
    }

    Ok(target)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_logical_and(tokens)?;
    while let Some(token) = tokens.matches(&[TokenKind::Or]) {
        let right = parse_logical_and(tokens)?;
        left = Expr::Logical { left:  Box::new(left),
                               op:    LogicalOperator::Or,
                               right: Box::new(right),
                               line:  token.line, };
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("and" equality)*`
pub fn parse_logical_and(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_equality(tokens)?;
    while let Some(token) = tokens.matches(&[TokenKind::And]) {
        let right = parse_equality(tokens)?;
        left = Expr::Logical { left:  Box::new(left),
                               op:    LogicalOperator::And,
                               right: Box::new(right),
                               line:  token.line, };
    }
    Ok(left)
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_comparison,
                           &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses `<`, `<=`, `>` and `>=`.
///
/// The rule is: `comparison := term (("<" | "<=" | ">" | ">=") term)*`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_term,
                           &[BinaryOperator::Less,
                             BinaryOperator::LessEqual,
                             BinaryOperator::Greater,
                             BinaryOperator::GreaterEqual])
}

/// Parses addition and subtraction.
///
/// The rule is: `term := factor (("+" | "-") factor)*`
pub fn parse_term(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_factor, &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication, division and remainder.
///
/// The rule is: `factor := unary (("*" | "/" | "%") unary)*`
pub fn parse_factor(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           parse_unary,
                           &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod])
}

/// Parses one precedence level of left-associative binary operators.
///
/// `operand` parses the next-higher level; every following operator listed
/// in `operators` folds the running result into a new
/// [`Expr::Binary`] node.
fn parse_left_associative(tokens: &mut TokenStream<'_>,
                          operand: fn(&mut TokenStream<'_>) -> ParseResult<Expr>,
                          operators: &[BinaryOperator])
                          -> ParseResult<Expr> {
    let mut left = operand(tokens)?;
    loop {
        let token = tokens.peek();
        if let Some(op) = token_to_binary_operator(token.kind)
           && operators.contains(&op)
        {
            tokens.advance();
            let right = operand(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line: token.line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token kind to its corresponding binary operator.
///
/// Returns `None` for every token that is not a binary operator, including
/// the short-circuiting `and` and `or`.
///
/// # Example
/// ```
/// use arcanesigil::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Percent), Some(BinaryOperator::Mod));
/// assert_eq!(token_to_binary_operator(TokenKind::And), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}
