/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant values that can appear directly
/// in source code: numbers, strings, booleans and `nil`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit floating-point literal.
    Number(f64),
    /// A string literal, without its quotes.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// The `nil` literal.
    Nil,
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Binary operators, grouped by precedence level in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `!`
    Not,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant carries the line of the token that introduced it, which the
/// evaluator uses for runtime diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or `nil`).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A parenthesized expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation or logical not).
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// An arithmetic, equality or comparison operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when the left does not decide.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `Math_sin(x)`).
    Call {
        /// The expression producing the function.
        callee:    Box<Self>,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line of the closing parenthesis.
        line:      usize,
    },
    /// Assignment to an existing variable.
    Assignment {
        /// Name of the assigned variable.
        name:  String,
        /// The assigned value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use arcanesigil::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::Grouping { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Logical { line, .. }
            | Self::Call { line, .. }
            | Self::Assignment { line, .. } => *line,
        }
    }

    /// The node kind name, e.g. `"BinaryExpression"`.
    #[must_use]
    pub const fn node_type(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "Literal",
            Self::Identifier { .. } => "Identifier",
            Self::Grouping { .. } => "Grouping",
            Self::Unary { .. } => "UnaryExpression",
            Self::Binary { .. } => "BinaryExpression",
            Self::Logical { .. } => "LogicalExpression",
            Self::Call { .. } => "CallExpression",
            Self::Assignment { .. } => "AssignmentExpression",
        }
    }
}

/// A function declaration: `fun name(params) { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function name.
    pub name:   String,
    /// Parameter names, in order.
    pub params: Vec<String>,
    /// Statements of the body.
    pub body:   Vec<Statement>,
    /// Line of the function name.
    pub line:   usize,
}

/// An AST node representing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `{ ... }`: a sequence of declarations in their own scope.
    Block(Vec<Self>),
    /// An expression evaluated for its side effects.
    Expression(Expr),
    /// `if (condition) then_branch else else_branch`
    If {
        /// The condition.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed otherwise, when present.
        else_branch: Option<Box<Self>>,
    },
    /// `while (condition) body`
    While {
        /// Checked before each iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
    },
    /// `for (initializer; condition; increment) body`
    For {
        /// Runs once, in a scope enclosing the whole loop.
        initializer: Option<Box<Self>>,
        /// Checked before each iteration; absent means loop forever.
        condition:   Option<Expr>,
        /// Evaluated after each iteration.
        increment:   Option<Expr>,
        /// The loop body.
        body:        Box<Self>,
    },
    /// `var`, `let` or `const` declaration.
    Let {
        /// Name of the declared variable.
        name:        String,
        /// Initial value; `nil` when absent.
        initializer: Option<Expr>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `return value;`
    Return {
        /// The returned value; `nil` when absent.
        value: Option<Expr>,
        /// Line of the `return` keyword.
        line:  usize,
    },
    /// A named function declaration.
    Function(FunctionDecl),
}

impl Statement {
    /// The node kind name, e.g. `"IfStatement"`.
    #[must_use]
    pub const fn node_type(&self) -> &'static str {
        match self {
            Self::Block(_) => "BlockStatement",
            Self::Expression(_) => "ExpressionStatement",
            Self::If { .. } => "IfStatement",
            Self::While { .. } => "WhileStatement",
            Self::For { .. } => "ForStatement",
            Self::Let { .. } => "LetStatement",
            Self::Return { .. } => "ReturnStatement",
            Self::Function(_) => "FunctionDeclaration",
        }
    }
}

/// The root of a parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// The successfully parsed top-level declarations, in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// The node kind name, always `"Program"`.
    #[must_use]
    pub const fn node_type(&self) -> &'static str {
        "Program"
    }
}
