use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            environment::{Environment, SharedEnvironment},
            utils::check_arity,
        },
        value::core::{Function, UserFunction, Value},
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// Calling anything but a function is a `NotCallable` error.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize,
                            env: &SharedEnvironment)
                            -> EvalResult<Value> {
        let callee = self.eval(callee, env)?;

        let mut arg_vals = Vec::with_capacity(arguments.len());
        for argument in arguments {
            arg_vals.push(self.eval(argument, env)?);
        }

        match callee {
            Value::Function(function) => self.call_function(&function, &arg_vals, line),
            _ => Err(RuntimeError::NotCallable { line }),
        }
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` when the argument count differs from the
    ///   function's arity.
    /// - `StackOverflow` when user calls nest deeper than the context allows.
    /// - Any error raised by the function body.
    ///
    /// # Example
    /// ```
    /// use arcanesigil::{Context, Event, interpreter::value::core::Value};
    ///
    /// let mut context = Context::new(|_: Event| {});
    /// let abs = context.globals().borrow().get("Math_abs").unwrap();
    ///
    /// let Value::Function(function) = abs else { panic!("Math_abs is a function") };
    /// let result = context.call_function(&function, &[Value::Number(-2.0)], 1).unwrap();
    ///
    /// assert_eq!(result, Value::Number(2.0));
    /// ```
    pub fn call_function(&mut self,
                         function: &Function,
                         arg_vals: &[Value],
                         line: usize)
                         -> EvalResult<Value> {
        check_arity(arg_vals, function.arity(), line)?;
        trace!(name = function.name(), args = arg_vals.len(), line, "calling function");

        match function {
            Function::Native(native) => (native.func)(self, arg_vals, line),
            Function::User(user) => self.call_user_defined_function(user, arg_vals, line),
        }
    }

    /// Executes a user-defined function.
    ///
    /// The body runs in a fresh scope enclosed by the function's closure,
    /// with each parameter bound to its argument. Falling off the end of the
    /// body returns `nil`.
    fn call_user_defined_function(&mut self,
                                  function: &UserFunction,
                                  arg_vals: &[Value],
                                  line: usize)
                                  -> EvalResult<Value> {
        self.enter_call(line)?;

        let mut scope = Environment::with_parent(Rc::clone(&function.closure));
        for (param, value) in function.declaration.params.iter().zip(arg_vals) {
            scope.define(param.as_str(), value.clone());
        }
        let scope = scope.shared();

        let result = self.execute_block(&function.declaration.body, &scope);
        self.leave_call();

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}
