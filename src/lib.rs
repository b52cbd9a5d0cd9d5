//! # arcanesigil
//!
//! arcanesigil is a small Lox-style scripting language written in Rust.
//! Source text is tokenized, parsed into a syntax tree and executed by a
//! tree-walking evaluator with closures, a handful of math builtins and a
//! rune-drawing primitive.
//!
//! Scripts never write to the terminal themselves: `print` and
//! `Sigil_drawRune` hand [`Event`]s to the [`EventSink`] supplied by the
//! caller.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of a script as a tree. The tree is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Names every node kind for tools that inspect the tree.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every failure carries the position it was detected at and renders as
/// `Error on line L, column C: message` or `Error on line L: message`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the event channel to provide a complete runtime for
/// scripts.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for each phase.
/// - Delivers script side effects as events.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::{
        evaluator::{
            core::Context,
            function::builtin::{Builtins, stringify},
        },
        event::{Event, EventSink, RuneEvent},
        lexer::tokenize,
        parser::core::{ParseOutput, parse},
        value::core::Value,
    },
};
use crate::ast::Program;

/// Tokenizes and parses a script.
///
/// # Errors
/// Returns [`Error::Lex`] if the source cannot be tokenized, or
/// [`Error::Parse`] with every recovered error if any declaration is broken.
///
/// # Examples
/// ```
/// use arcanesigil::compile;
///
/// let program = compile("let x = 1; print x;").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// assert!(compile("let = 1;").is_err());
/// ```
pub fn compile(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens).into_result()?;
    Ok(program)
}

/// Compiles and runs a script in a fresh [`Context`], sending its events to
/// `sink`.
///
/// Nothing is executed unless the whole script compiles.
///
/// # Errors
/// Returns the lexing or parsing error, or the first runtime error.
///
/// # Examples
/// ```
/// use std::sync::mpsc;
///
/// use arcanesigil::{Event, execute};
///
/// let (sender, receiver) = mpsc::channel();
/// execute("for (let i = 0; i < 3; i = i + 1) print i;", sender).unwrap();
///
/// let output: Vec<Event> = receiver.try_iter().collect();
/// assert_eq!(output.last(), Some(&Event::Output("2".into())));
///
/// // 'x' is not defined
/// assert!(execute("print x;", |_: Event| {}).is_err());
/// ```
pub fn execute(source: &str, sink: impl EventSink + 'static) -> Result<(), Error> {
    let program = compile(source)?;
    debug!(statements = program.statements.len(), "compiled script");

    let mut context = Context::new(sink);
    context.run(&program)?;
    Ok(())
}
