use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::interpreter::value::core::Value;

/// An environment shared between scopes and closures.
pub type SharedEnvironment = Rc<RefCell<Environment>>;

/// A non-owning handle to a [`SharedEnvironment`].
pub type WeakEnvironment = Weak<RefCell<Environment>>;

/// A lexical scope: a table of bindings chained to its enclosing scope.
///
/// Lookups that miss locally continue in the parent, so inner scopes see
/// and may shadow the bindings of outer ones.
#[derive(Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<SharedEnvironment>,
}

impl Environment {
    /// Creates a root environment with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment enclosed by `parent`.
    #[must_use]
    pub fn with_parent(parent: SharedEnvironment) -> Self {
        Self { values: HashMap::new(),
               parent: Some(parent), }
    }

    /// Wraps the environment for sharing.
    #[must_use]
    pub fn shared(self) -> SharedEnvironment {
        Rc::new(RefCell::new(self))
    }

    /// Binds `name` in this scope, replacing any previous local binding.
    ///
    /// # Example
    /// ```
    /// use arcanesigil::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Number(1.0));
    /// env.define("x", Value::Number(2.0));
    ///
    /// assert_eq!(env.len(), 1);
    /// assert_eq!(env.get("x"), Some(Value::Number(2.0)));
    /// ```
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks `name` up in this scope, then in each enclosing scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.borrow().get(name),
        }
    }

    /// Returns `true` if `name` is bound in this scope itself.
    #[must_use]
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The enclosing scope, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&SharedEnvironment> {
        self.parent.as_ref()
    }

    /// The number of bindings in this scope, excluding enclosing ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if this scope has no bindings of its own.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes and returns every local binding. The parent link is kept.
    ///
    /// The bindings are handed back so they can be dropped once the
    /// environment is no longer borrowed.
    pub fn clear(&mut self) -> HashMap<String, Value> {
        std::mem::take(&mut self.values)
    }
}

// Only names are printed: values may be closures over this environment.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.values.keys().collect();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("has_parent", &self.parent.is_some())
         .finish()
    }
}
