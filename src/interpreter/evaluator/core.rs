use std::{collections::HashSet, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{Expr, FunctionDecl, LogicalOperator, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            environment::{Environment, SharedEnvironment, WeakEnvironment},
            function::builtin::Builtins,
        },
        event::{Event, EventSink},
        value::core::{Function, UserFunction, Value},
    },
    util::stack::with_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const MAX_CALL_DEPTH: usize = 256;

/// Number of tracked closure environments before dead ones are pruned.
const CLOSURE_PRUNE_THRESHOLD: usize = 64;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding to the nearest function call.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// A context owns a fresh builtin scope and a global scope enclosed by it,
/// the sink receiving the script's events, and the call-depth bookkeeping.
/// Nothing is shared between contexts.
///
/// ## Usage
///
/// ```
/// use std::sync::mpsc;
///
/// use arcanesigil::{Context, Event, compile};
///
/// let program = compile("fun twice(x) { return x * 2; } print twice(21);").unwrap();
/// let (sender, receiver) = mpsc::channel();
///
/// let mut context = Context::new(sender);
/// context.run(&program).unwrap();
///
/// assert_eq!(receiver.recv().unwrap(), Event::Output("42".into()));
/// ```
pub struct Context {
    builtins:       SharedEnvironment,
    globals:        SharedEnvironment,
    sink:           Box<dyn EventSink>,
    depth:          usize,
    max_call_depth: usize,
    closures:       Vec<WeakEnvironment>,
    prune_at:       usize,
}

impl Context {
    /// Creates a context whose events go to `sink`, with the builtins
    /// registered and an empty global scope.
    pub fn new(sink: impl EventSink + 'static) -> Self {
        let mut builtins = Environment::new();
        Builtins::register(&mut builtins);
        let builtins = builtins.shared();
        let globals = Environment::with_parent(Rc::clone(&builtins)).shared();

        Self { builtins,
               globals,
               sink: Box::new(sink),
               depth: 0,
               max_call_depth: MAX_CALL_DEPTH,
               closures: Vec::new(),
               prune_at: CLOSURE_PRUNE_THRESHOLD }
    }

    /// Sets the maximum depth of nested function calls.
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// The scope top-level declarations are bound in.
    #[must_use]
    pub const fn globals(&self) -> &SharedEnvironment {
        &self.globals
    }

    /// Forwards an event to the sink.
    pub fn emit(&mut self, event: Event) {
        self.sink.emit(event);
    }

    /// Executes every statement of a program in the global scope.
    ///
    /// A top-level `return` ends the program early.
    ///
    /// # Errors
    /// Returns the first runtime error; statements after it do not run.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        debug!(statements = program.statements.len(), "executing program");
        let globals = Rc::clone(&self.globals);
        self.execute_block(&program.statements, &globals)?;
        Ok(())
    }

    /// Executes statements in order in `env`, stopping at the first
    /// `return`.
    ///
    /// # Errors
    /// Propagates the first runtime error.
    pub fn execute_block(&mut self,
                         statements: &[Statement],
                         env: &SharedEnvironment)
                         -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a single statement.
    ///
    /// Blocks run in a new scope enclosed by `env`; `for` loops run their
    /// initializer, condition, increment and body in one scope of their own.
    ///
    /// # Errors
    /// Propagates any runtime error raised while executing the statement.
    pub fn execute(&mut self, statement: &Statement, env: &SharedEnvironment) -> EvalResult<Flow> {
        with_stack(|| self.execute_statement(statement, env))
    }

    fn execute_statement(&mut self,
                         statement: &Statement,
                         env: &SharedEnvironment)
                         -> EvalResult<Flow> {
        match statement {
            Statement::Expression(expr) => {
                self.eval(expr, env)?;
                Ok(Flow::Normal)
            },
            Statement::Let { name,
                             initializer,
                             .. } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Nil,
                };
                env.borrow_mut().define(name.as_str(), value);
                Ok(Flow::Normal)
            },
            Statement::Block(statements) => {
                let scope = Environment::with_parent(Rc::clone(env)).shared();
                self.execute_block(statements, &scope)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch, } => {
                if self.eval(condition, env)?.is_truthy() {
                    self.execute(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, env)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::While { condition, body } => {
                while self.eval(condition, env)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },
            Statement::For { initializer,
                             condition,
                             increment,
                             body, } => {
                self.execute_for(initializer.as_deref(),
                                 condition.as_ref(),
                                 increment.as_ref(),
                                 body,
                                 env)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
            Statement::Function(declaration) => {
                self.declare_function(declaration, env);
                Ok(Flow::Normal)
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant.
    ///
    /// # Errors
    /// Returns a `RuntimeError` for undefined variables, invalid operands,
    /// failed calls or assignments to builtins.
    pub fn eval(&mut self, expr: &Expr, env: &SharedEnvironment) -> EvalResult<Value> {
        with_stack(|| self.eval_expr(expr, env))
    }

    fn eval_expr(&mut self, expr: &Expr, env: &SharedEnvironment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, line } => {
                env.borrow()
                   .get(name)
                   .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                  line: *line, })
            },
            Expr::Grouping { expr, .. } => self.eval(expr, env),
            Expr::Unary { op, expr, line } => {
                let operand = self.eval(expr, env)?;
                Self::eval_unary(*op, &operand, *line)
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Logical { left, op, right, .. } => {
                let left = self.eval(left, env)?;
                let decided = match op {
                    LogicalOperator::Or => left.is_truthy(),
                    LogicalOperator::And => !left.is_truthy(),
                };
                if decided { Ok(left) } else { self.eval(right, env) }
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line, env),
            Expr::Assignment { name, value, line } => {
                let value = self.eval(value, env)?;
                self.assign(name, value.clone(), *line, env)?;
                Ok(value)
            },
        }
    }

    fn execute_for(&mut self,
                   initializer: Option<&Statement>,
                   condition: Option<&Expr>,
                   increment: Option<&Expr>,
                   body: &Statement,
                   env: &SharedEnvironment)
                   -> EvalResult<Flow> {
        let scope = Environment::with_parent(Rc::clone(env)).shared();

        if let Some(initializer) = initializer {
            self.execute(initializer, &scope)?;
        }

        loop {
            if let Some(condition) = condition
               && !self.eval(condition, &scope)?.is_truthy()
            {
                break;
            }
            if let Flow::Return(value) = self.execute(body, &scope)? {
                return Ok(Flow::Return(value));
            }
            if let Some(increment) = increment {
                self.eval(increment, &scope)?;
            }
        }

        Ok(Flow::Normal)
    }

    /// Binds a function value closing over `env`.
    ///
    /// The binding makes `env` reachable from itself, so the environment is
    /// remembered and its chain is cleared when the context is dropped.
    fn declare_function(&mut self, declaration: &FunctionDecl, env: &SharedEnvironment) {
        trace!(name = %declaration.name, "declaring function");
        self.track_closure(env);
        let function = UserFunction { declaration: Rc::new(declaration.clone()),
                                      closure:     Rc::clone(env), };
        env.borrow_mut()
           .define(declaration.name.as_str(),
                   Value::Function(Rc::new(Function::User(function))));
    }

    /// Assigns to the nearest scope binding `name`.
    ///
    /// Builtin bindings are read-only; a script has to declare its own
    /// variable to shadow one.
    fn assign(&self,
              name: &str,
              value: Value,
              line: usize,
              env: &SharedEnvironment)
              -> EvalResult<()> {
        let mut scope = Rc::clone(env);
        loop {
            if scope.borrow().contains_local(name) {
                if Rc::ptr_eq(&scope, &self.builtins) {
                    return Err(RuntimeError::BuiltinReassignment { name: name.to_string(),
                                                                   line });
                }
                scope.borrow_mut().define(name, value);
                return Ok(());
            }

            let parent = scope.borrow().parent().cloned();
            match parent {
                Some(parent) => scope = parent,
                None => {
                    return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                               line });
                },
            }
        }
    }

    fn track_closure(&mut self, env: &SharedEnvironment) {
        if self.closures.len() >= self.prune_at {
            self.closures.retain(|closure| closure.strong_count() > 0);
            self.prune_at = (self.closures.len() * 2).max(CLOSURE_PRUNE_THRESHOLD);
        }
        self.closures.push(Rc::downgrade(env));
    }

    /// Increments the call depth, failing once it exceeds the limit.
    pub(crate) const fn enter_call(&mut self, line: usize) -> EvalResult<()> {
        if self.depth >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow { limit: self.max_call_depth,
                                                     line });
        }
        self.depth += 1;
        Ok(())
    }

    /// Undoes [`Self::enter_call`].
    pub(crate) const fn leave_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Function values hold their closure, and closures hold the bindings of
/// the functions declared in them. Clearing every environment on the chain
/// of every live closure breaks those cycles. Functions taken out of a
/// dropped context can no longer see their captured variables.
impl Drop for Context {
    fn drop(&mut self) {
        let mut pending: Vec<SharedEnvironment> =
            self.closures.iter().filter_map(std::rc::Weak::upgrade).collect();
        pending.push(Rc::clone(&self.globals));
        pending.push(Rc::clone(&self.builtins));

        let mut cleared = HashSet::new();
        while let Some(env) = pending.pop() {
            if !cleared.insert(Rc::as_ptr(&env)) {
                continue;
            }
            let values = env.borrow_mut().clear();
            if let Some(parent) = env.borrow().parent() {
                pending.push(Rc::clone(parent));
            }
            drop(values);
        }
        debug!(environments = cleared.len(), "released context environments");
    }
}
