use crate::{
    ast::{Expr, FunctionDecl, Statement},
    error::ParseErrorKind,
    interpreter::{
        lexer::TokenKind,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, synchronize},
            utils::{MAX_ARGUMENTS, TokenStream, parse_comma_separated, parse_identifier},
        },
    },
    util::stack::with_stack,
};

/// Parses a single declaration, recovering from errors.
///
/// A declaration may be one of:
/// - a function declaration (`fun`).
/// - a variable declaration (`var`, `let` or `const`).
/// - any other statement.
///
/// When the declaration is malformed, the error is reported on the token
/// stream, the stream is synchronized to the next statement boundary and
/// `None` is returned. Only the first error of a broken declaration is
/// reported.
pub fn parse_declaration(tokens: &mut TokenStream<'_>) -> Option<Statement> {
    let result = if tokens.matches(&[TokenKind::Fun]).is_some() {
        parse_function(tokens).map(Statement::Function)
    } else if tokens.matches(&[TokenKind::Var, TokenKind::Let, TokenKind::Const])
                    .is_some()
    {
        parse_variable_declaration(tokens)
    } else {
        parse_statement(tokens)
    };

    match result {
        Ok(statement) => Some(statement),
        Err(error) => {
            tokens.report(error);
            synchronize(tokens);
            None
        },
    }
}

/// Parses a statement that is not a declaration.
///
/// Dispatches on the leading keyword; anything else is an expression
/// statement.
///
/// # Errors
/// Propagates the first `ParseError` of the statement.
pub fn parse_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    with_stack(|| parse_keyword_statement(tokens))
}

fn parse_keyword_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    match tokens.peek().kind {
        TokenKind::For => {
            tokens.advance();
            parse_for(tokens)
        },
        TokenKind::If => {
            tokens.advance();
            parse_if(tokens)
        },
        TokenKind::Print => {
            tokens.advance();
            parse_print(tokens)
        },
        TokenKind::Return => {
            tokens.advance();
            parse_return(tokens)
        },
        TokenKind::While => {
            tokens.advance();
            parse_while(tokens)
        },
        TokenKind::LeftBrace => {
            tokens.advance();
            Ok(Statement::Block(parse_block(tokens)?))
        },
        _ => parse_expression_statement(tokens),
    }
}

/// Parses a function declaration after the `fun` keyword.
///
/// Grammar: `function := IDENTIFIER "(" parameters? ")" block`
///
/// # Errors
/// Fails on a missing name, parenthesis or brace, or more than
/// [`MAX_ARGUMENTS`] parameters.
fn parse_function(tokens: &mut TokenStream<'_>) -> ParseResult<FunctionDecl> {
    let line = tokens.peek().line;
    let name = parse_identifier(tokens, "function name")?;

    tokens.expect(TokenKind::LeftParen, "'(' after function name")?;
    let params = parse_comma_separated(tokens,
                                       |tokens| parse_identifier(tokens, "parameter name"),
                                       (TokenKind::RightParen, "')' after parameters"),
                                       ParseErrorKind::TooManyParameters(MAX_ARGUMENTS))?;

    tokens.expect(TokenKind::LeftBrace, "'{' before function body")?;
    let body = parse_block(tokens)?;

    Ok(FunctionDecl { name,
                      params,
                      body,
                      line })
}

/// Parses a variable declaration after `var`, `let` or `const`.
///
/// All three keywords produce the same [`Statement::Let`]; `const` bindings
/// are not protected from reassignment.
///
/// Grammar: `declaration := IDENTIFIER ("=" expression)? ";"`
fn parse_variable_declaration(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let line = tokens.peek().line;
    let name = parse_identifier(tokens, "variable name")?;

    let initializer = if tokens.matches(&[TokenKind::Equal]).is_some() {
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    tokens.expect(TokenKind::Semicolon, "';' after variable declaration")?;
    Ok(Statement::Let { name,
                        initializer,
                        line })
}

/// Parses `for (initializer; condition; increment) body`.
///
/// Every clause is optional. The initializer may be a variable declaration
/// or an expression statement.
fn parse_for(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    tokens.expect(TokenKind::LeftParen, "'(' after 'for'")?;

    let initializer = if tokens.matches(&[TokenKind::Semicolon]).is_some() {
        None
    } else if tokens.matches(&[TokenKind::Var, TokenKind::Let, TokenKind::Const])
                    .is_some()
    {
        Some(Box::new(parse_variable_declaration(tokens)?))
    } else {
        Some(Box::new(parse_expression_statement(tokens)?))
    };

    let condition = optional_expression(tokens, TokenKind::Semicolon)?;
    tokens.expect(TokenKind::Semicolon, "';' after loop condition")?;

    let increment = optional_expression(tokens, TokenKind::RightParen)?;
    tokens.expect(TokenKind::RightParen, "')' after for clauses")?;

    let body = parse_statement(tokens)?;
    Ok(Statement::For { initializer,
                        condition,
                        increment,
                        body: Box::new(body) })
}

/// Parses `if (condition) then_branch (else else_branch)?`.
///
/// An `else` binds to the nearest `if`.
fn parse_if(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    tokens.expect(TokenKind::LeftParen, "'(' after 'if'")?;
    let condition = parse_expression(tokens)?;
    tokens.expect(TokenKind::RightParen, "')' after if condition")?;

    let then_branch = Box::new(parse_statement(tokens)?);
    let else_branch = if tokens.matches(&[TokenKind::Else]).is_some() {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch })
}

/// Parses `print expression;`.
///
/// There is no print statement node: the statement becomes a call to
/// whatever `print` names at run time, exactly like `print(expression);`.
fn parse_print(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let line = tokens.previous().line;
    let value = parse_expression(tokens)?;
    tokens.expect(TokenKind::Semicolon, "';' after value")?;

    let callee = Expr::Identifier { name: "print".to_string(),
                                    line };
    Ok(Statement::Expression(Expr::Call { callee: Box::new(callee),
                                          arguments: vec![value],
                                          line }))
}

/// Parses `return expression?;`.
fn parse_return(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let line = tokens.previous().line;
    let value = optional_expression(tokens, TokenKind::Semicolon)?;
    tokens.expect(TokenKind::Semicolon, "';' after return value")?;

    Ok(Statement::Return { value, line })
}

/// Parses `while (condition) body`.
fn parse_while(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    tokens.expect(TokenKind::LeftParen, "'(' after 'while'")?;
    let condition = parse_expression(tokens)?;
    tokens.expect(TokenKind::RightParen, "')' after condition")?;

    let body = parse_statement(tokens)?;
    Ok(Statement::While { condition,
                          body: Box::new(body) })
}

/// Parses an expression followed by `;`.
fn parse_expression_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let expr = parse_expression(tokens)?;
    tokens.expect(TokenKind::Semicolon, "';' after expression")?;
    Ok(Statement::Expression(expr))
}

/// Parses an expression unless the next token is `terminator`.
fn optional_expression(tokens: &mut TokenStream<'_>,
                       terminator: TokenKind)
                       -> ParseResult<Option<Expr>> {
    if tokens.check(terminator) {
        Ok(None)
    } else {
        parse_expression(tokens).map(Some)
    }
}
