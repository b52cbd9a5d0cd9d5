use arcanesigil::{
    ast::{BinaryOperator, Expr, LiteralValue, LogicalOperator, Statement, UnaryOperator},
    error::ParseErrorKind,
    interpreter::{
        lexer::tokenize,
        parser::core::{parse, parse_standalone_expression},
    },
};

fn expr(source: &str) -> Expr {
    parse_standalone_expression(&tokenize(source).unwrap()).unwrap()
}

fn statements(source: &str) -> Vec<Statement> {
    let output = parse(&tokenize(source).unwrap());
    assert!(!output.has_errors(), "unexpected errors: {:?}", output.errors);
    output.program.statements
}

fn number(value: f64) -> Box<Expr> {
    Box::new(Expr::Literal { value: LiteralValue::Number(value),
                             line:  1, })
}

fn identifier(name: &str) -> Box<Expr> {
    Box::new(Expr::Identifier { name: name.to_string(),
                                line: 1, })
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expected = Expr::Binary { left:  number(1.0),
                                  op:    BinaryOperator::Add,
                                  right: Box::new(Expr::Binary { left:  number(2.0),
                                                                 op:    BinaryOperator::Mul,
                                                                 right: number(3.0),
                                                                 line:  1, }),
                                  line:  1, };

    assert_eq!(expr("1 + 2 * 3"), expected);
}

#[test]
fn binary_operators_are_left_associative() {
    let Expr::Binary { left, op, .. } = expr("8 - 4 - 2") else { panic!("not binary") };

    assert_eq!(op, BinaryOperator::Sub);
    assert!(matches!(*left, Expr::Binary { op: BinaryOperator::Sub, .. }));
}

#[test]
fn grouping_overrides_precedence() {
    let Expr::Binary { left, op, .. } = expr("(1 + 2) * 3") else { panic!("not binary") };

    assert_eq!(op, BinaryOperator::Mul);
    assert_eq!(left.node_type(), "Grouping");
}

#[test]
fn assignment_is_right_associative() {
    let expected = Expr::Assignment { name:  "a".to_string(),
                                      value: Box::new(Expr::Assignment { name:  "b".to_string(),
                                                                         value: number(3.0),
                                                                         line:  1, }),
                                      line:  1, };

    assert_eq!(expr("a = b = 3"), expected);
}

#[test]
fn logical_operators_nest_by_precedence() {
    let Expr::Logical { op, right, .. } = expr("a or b and c") else { panic!("not logical") };

    assert_eq!(op, LogicalOperator::Or);
    assert!(matches!(*right, Expr::Logical { op: LogicalOperator::And, .. }));
}

#[test]
fn comparison_binds_tighter_than_equality() {
    let Expr::Binary { op, left, .. } = expr("1 < 2 == true") else { panic!("not binary") };

    assert_eq!(op, BinaryOperator::Equal);
    assert!(matches!(*left, Expr::Binary { op: BinaryOperator::Less, .. }));
}

#[test]
fn unary_operators_nest() {
    let Expr::Unary { op, expr: inner, .. } = expr("!-x") else { panic!("not unary") };

    assert_eq!(op, UnaryOperator::Not);
    assert_eq!(*inner,
               Expr::Unary { op:   UnaryOperator::Negate,
                             expr: identifier("x"),
                             line: 1, });
}

#[test]
fn calls_chain() {
    let Expr::Call { callee, arguments, .. } = expr("f(1)(2, 3)") else { panic!("not a call") };

    assert_eq!(arguments.len(), 2);
    assert_eq!(*callee,
               Expr::Call { callee:    identifier("f"),
                            arguments: vec![*number(1.0)],
                            line:      1, });
}

#[test]
fn invalid_assignment_target() {
    let error = parse_standalone_expression(&tokenize("1 = 2").unwrap()).unwrap_err();

    assert_eq!(error.kind, ParseErrorKind::InvalidAssignmentTarget);
    assert_eq!(error.token.lexeme, "=");
    assert_eq!(error.message(), "Invalid assignment target.");
}

#[test]
fn missing_operand_expects_expression() {
    let error = parse_standalone_expression(&tokenize("1 +").unwrap()).unwrap_err();

    assert_eq!(error.kind, ParseErrorKind::ExpectedExpression);
    assert!(error.token.is_eof());
    assert_eq!(error.to_string(), "Error on line 1, column 4 at end: Expect expression.");
}

#[test]
fn argument_limit() {
    let args = |n: usize| vec!["1"; n].join(", ");

    assert!(parse_standalone_expression(&tokenize(&format!("f({})", args(255))).unwrap()).is_ok());

    let error = parse_standalone_expression(&tokenize(&format!("f({})", args(256))).unwrap())
                    .unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::TooManyArguments(255));
    assert_eq!(error.message(), "Can't have more than 255 arguments.");
}

#[test]
fn parameter_limit() {
    let params: Vec<_> = (0..256).map(|i| format!("p{i}")).collect();
    let source = format!("fun f({}) {{}}", params.join(", "));

    let output = parse(&tokenize(&source).unwrap());
    assert_eq!(output.errors[0].kind, ParseErrorKind::TooManyParameters(255));

    let source = format!("fun f({}) {{}}", params[..255].join(", "));
    let parsed = statements(&source);
    let Statement::Function(declaration) = &parsed[0] else { panic!("not a function") };
    assert_eq!(declaration.params.len(), 255);
    assert_eq!(declaration.params[254], "p254");
}

#[test]
fn print_desugars_to_a_call() {
    let expected = Statement::Expression(Expr::Call { callee:    identifier("print"),
                                                      arguments:
                                                          vec![Expr::Literal { value: LiteralValue::Str("hi".to_string()),
                                                                               line:  1, }],
                                                      line:      1, });

    assert_eq!(statements("print \"hi\";"), [expected]);
}

#[test]
fn declarations() {
    let parsed = statements("var a; let b = 1; const c = b; fun f(x, y) { return x; }");

    let types: Vec<_> = parsed.iter().map(Statement::node_type).collect();
    assert_eq!(types,
               ["LetStatement", "LetStatement", "LetStatement", "FunctionDeclaration"]);

    let Statement::Function(declaration) = &parsed[3] else { panic!("not a function") };
    assert_eq!(declaration.name, "f");
    assert_eq!(declaration.params, ["x", "y"]);
    assert_eq!(declaration.body.len(), 1);
}

#[test]
fn for_clauses_are_optional() {
    let parsed = statements("for (;;) {} for (let i = 0; i < 1;) {} for (i = 0; ; i = i + 1) {}");

    let Statement::For { initializer, condition, increment, .. } = &parsed[0] else {
        panic!("not a for loop")
    };
    assert!(initializer.is_none() && condition.is_none() && increment.is_none());

    let Statement::For { initializer, increment, .. } = &parsed[1] else { panic!("not a for loop") };
    assert_eq!(initializer.as_ref().map(|s| s.node_type()), Some("LetStatement"));
    assert!(increment.is_none());

    let Statement::For { initializer, condition, .. } = &parsed[2] else { panic!("not a for loop") };
    assert_eq!(initializer.as_ref().map(|s| s.node_type()), Some("ExpressionStatement"));
    assert!(condition.is_none());
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let parsed = statements("if (a) if (b) x; else y;");

    let Statement::If { then_branch, else_branch, .. } = &parsed[0] else { panic!("not an if") };
    assert!(else_branch.is_none());
    assert!(matches!(**then_branch, Statement::If { else_branch: Some(_), .. }));
}

#[test]
fn recovers_after_a_broken_declaration() {
    let output = parse(&tokenize("let x = ;\nlet y = 5;").unwrap());

    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(output.program.statements,
               [Statement::Let { name:        "y".to_string(),
                                 initializer: Some(Expr::Literal { value: LiteralValue::Number(5.0),
                                                                   line:  2, }),
                                 line:        2, }]);
}

#[test]
fn reports_one_error_per_broken_declaration() {
    let output = parse(&tokenize("let = 1;\nprint (1;\nfun (x) {}\nprint \"ok\";").unwrap());

    let lines: Vec<_> = output.errors.iter().map(|e| e.token.line).collect();
    assert_eq!(lines, [1, 2, 3]);
    assert_eq!(output.program.statements.len(), 1);

    let errors = output.into_result().unwrap_err();
    assert_eq!(errors.to_string().lines().count(), 3);
}

#[test]
fn errors_inside_blocks_are_recovered() {
    let output = parse(&tokenize("{ let a = ; let b = 2; }\nprint b;").unwrap());

    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.program.statements.len(), 2);
}

#[test]
fn recovery_inside_a_block_keeps_its_closing_brace() {
    let output = parse(&tokenize("fun f() { 1 + } print 2;").unwrap());

    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(output.errors[0].token.lexeme, "}");

    let types: Vec<_> = output.program.statements.iter().map(Statement::node_type).collect();
    assert_eq!(types, ["FunctionDeclaration", "ExpressionStatement"]);
}

#[test]
fn recovery_skips_braced_groups_whole() {
    let output = parse(&tokenize("let x = { let y = 1; } print 2;").unwrap());

    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.program.statements.len(), 1);
}

#[test]
fn deeply_nested_groupings_parse() {
    let depth = 2000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let mut parsed = expr(&source);
    let mut nesting = 0;
    while let Expr::Grouping { expr, .. } = parsed {
        parsed = *expr;
        nesting += 1;
    }
    assert_eq!(nesting, depth);
    assert_eq!(parsed, *number(1.0));
}

#[test]
fn missing_semicolon() {
    let output = parse(&tokenize("print 1").unwrap());

    assert_eq!(output.errors[0].kind, ParseErrorKind::Expected("';' after value"));
    assert_eq!(output.errors[0].message(), "Expect ';' after value.");
}

#[test]
fn unclosed_block() {
    let output = parse(&tokenize("{ print 1;").unwrap());

    assert_eq!(output.errors[0].kind, ParseErrorKind::Expected("'}' after block"));
    assert!(output.program.statements.is_empty());
}

#[test]
fn missing_eof_token_behaves_as_end_of_input() {
    let mut tokens = tokenize("print 1;").unwrap();
    tokens.pop();

    let output = parse(&tokens);
    assert!(!output.has_errors());
    assert_eq!(output.program.statements.len(), 1);
}
