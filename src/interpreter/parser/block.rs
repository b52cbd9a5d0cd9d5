use crate::{
    ast::Statement,
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, statement::parse_declaration, utils::TokenStream},
    },
};

/// Parses the declarations of a block up to and including its closing brace.
///
/// A broken declaration inside the block is reported and dropped like a
/// top-level one; parsing continues with the rest of the block.
///
/// Grammar: `block := "{" declaration* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
///
/// # Errors
/// Returns `Expect '}' after block.` if input ends before the closing brace.
pub fn parse_block(tokens: &mut TokenStream<'_>) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();

    tokens.enter_block();
    while !tokens.check(TokenKind::RightBrace) && !tokens.is_at_end() {
        if let Some(statement) = parse_declaration(tokens) {
            statements.push(statement);
        }
    }
    tokens.leave_block();

    tokens.expect(TokenKind::RightBrace, "'}' after block")?;
    Ok(statements)
}
