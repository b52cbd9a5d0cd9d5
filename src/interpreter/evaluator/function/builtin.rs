use std::{
    f64::consts::PI,
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::debug;

use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        environment::Environment,
        function::print,
        utils::check_arity,
    },
    value::core::{Function, NativeFunction, Value},
};

/// Defines the native functions by generating a static table and a name
/// list.
///
/// Each entry provides a name, an exact arity and a function pointer with
/// the [`NativeFn`](crate::interpreter::value::core::NativeFn) signature.
///
/// The macro produces:
/// - `NATIVE_TABLE` (static table read by [`Builtins::register`]),
/// - `BUILTIN_FUNCTIONS` (public list of native function names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static NATIVE_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every native function, in registration order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "time"           => { arity: 0, func: time },
    "print"          => { arity: 1, func: print::print },
    "Math_abs"       => { arity: 1, func: math_abs },
    "Math_sqrt"      => { arity: 1, func: math_sqrt },
    "Math_sin"       => { arity: 1, func: math_sin },
    "Math_cos"       => { arity: 1, func: math_cos },
    "Math_random"    => { arity: 0, func: math_random },
    "Sigil_drawRune" => { arity: 3, func: print::draw_rune },
}

/// Numeric constants installed next to the native functions.
pub const BUILTIN_CONSTANTS: &[(&str, f64)] = &[("Math_PI", PI)];

/// The registry of native bindings.
pub struct Builtins;

impl Builtins {
    /// Installs every native function and constant into `env`.
    ///
    /// Registering into the same environment again rebinds the same names,
    /// so each name is bound exactly once.
    ///
    /// # Example
    /// ```
    /// use arcanesigil::interpreter::evaluator::{environment::Environment, function::builtin::Builtins};
    ///
    /// let mut env = Environment::new();
    /// Builtins::register(&mut env);
    ///
    /// assert!(env.contains_local("Math_sqrt"));
    /// assert!(env.contains_local("Math_PI"));
    /// ```
    pub fn register(env: &mut Environment) {
        for native in NATIVE_TABLE {
            env.define(native.name,
                       Value::Function(Rc::new(Function::Native(*native))));
        }
        for (name, value) in BUILTIN_CONSTANTS {
            env.define(*name, Value::Number(*value));
        }
        debug!(count = env.len(), "registered builtins");
    }

    /// Every name [`Builtins::register`] binds.
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN_FUNCTIONS.iter()
                         .copied()
                         .chain(BUILTIN_CONSTANTS.iter().map(|(name, _)| *name))
    }
}

/// Converts a value to the text `print` shows.
///
/// # Example
/// ```
/// use arcanesigil::interpreter::{evaluator::function::builtin::stringify, value::core::Value};
///
/// assert_eq!(stringify(&Value::Number(5.0)), "5");
/// assert_eq!(stringify(&Value::Number(5.5)), "5.5");
/// assert_eq!(stringify(&Value::Nil), "null");
/// ```
#[must_use]
pub fn stringify(value: &Value) -> String {
    value.to_string()
}

/// Applies a unary `f64` method to a single numeric argument.
///
/// Non-numeric arguments produce an `ExpectedNumber` error.
///
/// # Example
/// ```
/// use arcanesigil::{
///     Context, Event,
///     interpreter::{evaluator::function::builtin::math_sqrt, value::core::Value},
/// };
///
/// let mut context = Context::new(|_: Event| {});
/// let r = math_sqrt(&mut context, &[Value::Number(16.0)], 1).unwrap();
///
/// assert_eq!(r, Value::Number(4.0));
/// ```
macro_rules! math_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
            check_arity(args, 1, line)?;

            Ok(Value::Number(args[0].as_number(line)?.$real_fn()))
        }
    };
}

math_builtin!(math_abs, abs);
math_builtin!(math_sqrt, sqrt);
math_builtin!(math_sin, sin);
math_builtin!(math_cos, cos);

/// Seconds since the Unix epoch, with sub-second precision.
pub fn time(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;

    let seconds = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_or(0.0, |elapsed| elapsed.as_secs_f64());
    Ok(Value::Number(seconds))
}

/// A uniformly distributed number in `[0, 1)`.
pub fn math_random(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 0, line)?;

    Ok(Value::Number(rand::random::<f64>()))
}
