use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDecl, LiteralValue},
    error::RuntimeError,
    interpreter::evaluator::{
        core::{Context, EvalResult},
        environment::SharedEnvironment,
    },
    util::num::f64_as_exact_integer,
};

/// Signature of a native function: the running context, the evaluated
/// arguments and the line of the call.
pub type NativeFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// Represents a runtime value in the interpreter.
#[derive(Debug, Clone)]
pub enum Value {
    /// A double precision floating-point number. The language has no
    /// separate integer type.
    Number(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// The absence of a value.
    Nil,
    /// A callable function, native or user-defined.
    Function(Rc<Function>),
}

/// A callable value.
#[derive(Debug)]
pub enum Function {
    /// A function implemented in Rust and installed by the builtins
    /// registry.
    Native(NativeFunction),
    /// A function declared in a script, with its captured environment.
    User(UserFunction),
}

/// A builtin function with a fixed arity.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    /// The name it is bound to.
    pub name:  &'static str,
    /// The exact number of arguments it accepts.
    pub arity: usize,
    /// Its implementation.
    pub func:  NativeFn,
}

/// A function declared with `fun`, closing over the environment it was
/// declared in.
pub struct UserFunction {
    /// A copy of the declaration.
    pub declaration: Rc<FunctionDecl>,
    /// The environment active where the function was declared.
    pub closure:     SharedEnvironment,
}

impl Function {
    /// The function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Native(native) => native.name,
            Self::User(user) => &user.declaration.name,
        }
    }

    /// The number of arguments the function accepts.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Native(native) => native.arity,
            Self::User(user) => user.declaration.params.len(),
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

// The closure may hold this very function, so it is never printed.
impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
         .field("name", &self.declaration.name)
         .field("params", &self.declaration.params)
         .finish_non_exhaustive()
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::Str(s) => Self::from(s.as_str()),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Nil => Self::Nil,
        }
    }
}

/// Values of different types are never equal. Functions are equal only to
/// themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Returns the number, or an `ExpectedNumber` error for any other type.
    ///
    /// # Example
    /// ```
    /// use arcanesigil::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).as_number(1).unwrap(), 2.5);
    /// assert!(Value::Nil.as_number(1).is_err());
    /// ```
    pub const fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// `nil` and `false` are falsy; every other value is truthy.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// The name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Nil => "nil",
            Self::Function(_) => "function",
        }
    }
}

/// The canonical text of a value, as printed by `print`.
///
/// Integral numbers drop their fractional part (`5.0` prints as `5`),
/// `nil` prints as `null` and strings print without quotes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Nil => write!(f, "null"),
            Self::Function(function) => match function.as_ref() {
                Function::Native(native) => write!(f, "<native fn {}>", native.name),
                Function::User(user) => write!(f, "<fn {}>", user.declaration.name),
            },
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if let Some(integer) = f64_as_exact_integer(n) {
        return write!(f, "{integer}");
    }
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{n}")
    }
}
