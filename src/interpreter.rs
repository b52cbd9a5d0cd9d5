/// The evaluator module executes the syntax tree.
///
/// The evaluator walks statements and expressions, manages the chain of
/// lexical environments, calls native and user-defined functions and reports
/// runtime errors such as undefined variables or division by zero. It is the
/// core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, closures and control flow.
/// - Installs the builtins before user code runs.
pub mod evaluator;
/// Side effects of a running script.
///
/// Defines the `Event`s scripts produce and the `EventSink` trait that
/// receives them.
pub mod event;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each carrying its kind, lexeme, literal value and position. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with line and column.
/// - Handles number and string literals, identifiers, keywords and
///   operators.
/// - Reports lexical errors for unterminated strings and stray characters.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// A recursive-descent parser over the token sequence produced by the lexer.
/// It recovers from syntax errors at statement boundaries, so a single run
/// reports every broken declaration.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
pub mod value;
