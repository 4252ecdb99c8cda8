//! Chained lexical scopes for variables and functions.
//!
//! An [`Environment`] is a cheap handle to one scope. Each scope owns two
//! separate tables (variables and functions) and an optional handle to its
//! enclosing scope. Lookups walk outward; writes only ever touch the scope
//! they are called on.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{undefined_variable, EvalResult};
use crate::value::{Function, Value};

/// A single-threaded shared cell for scope tables.
///
/// # Why This Exists
/// Scopes are shared between the handle a statement runs against, the
/// child scopes that point back at it, and call scopes created later from
/// a function's defining scope. All of them go through [`LocalScope::new`]
/// instead of ad-hoc `Rc::new(RefCell::new(..))` calls.
///
/// # Thread Safety
/// Not thread-safe. One interpreter run owns one scope chain, so `Rc` is
/// enough.
///
/// `#[repr(transparent)]` keeps the layout of `Rc<RefCell<T>>`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// Bindings of a single scope.
#[derive(Debug, Default)]
pub struct Scope {
    variables: FxHashMap<String, Value>,
    functions: FxHashMap<String, Rc<Function>>,
    parent: Option<Environment>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: Environment) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }
}

/// Handle to a scope in the chain.
///
/// Cloning the handle does not copy bindings; both handles see the same
/// scope.
#[derive(Clone, Debug, Default)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// Create a root environment with no parent.
    pub fn new() -> Self {
        Environment(LocalScope::new(Scope::new()))
    }

    /// Create a child scope whose lookups fall back to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(LocalScope::new(Scope::with_parent(self.clone())))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Number of scopes from this one up to the root, inclusive.
    pub fn depth(&self) -> usize {
        self.parent().map_or(1, |parent| parent.depth() + 1)
    }

    /// Insert or overwrite a variable in this scope only.
    #[inline]
    pub fn set_variable(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().variables.insert(name.into(), value);
    }

    /// Look up a variable, walking outward through enclosing scopes.
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.variables.get(name) {
            return Some(value.clone());
        }
        scope.parent.as_ref()?.get_variable(name)
    }

    /// Like [`get_variable`](Self::get_variable), failing with
    /// `UndefinedVariable`.
    pub fn lookup_variable(&self, name: &str) -> EvalResult {
        self.get_variable(name)
            .ok_or_else(|| undefined_variable(name))
    }

    /// Find a variable together with the scope that binds it.
    pub fn resolve_variable(&self, name: &str) -> Option<(Value, Environment)> {
        let scope = self.0.borrow();
        if let Some(value) = scope.variables.get(name) {
            return Some((value.clone(), self.clone()));
        }
        scope.parent.as_ref()?.resolve_variable(name)
    }

    /// Overwrite `name` in the nearest scope that already binds it, or bind
    /// it here if no scope does.
    pub fn assign_enclosing(&self, name: &str, value: Value) {
        match self.resolve_variable(name) {
            Some((_, owner)) => owner.set_variable(name, value),
            None => self.set_variable(name, value),
        }
    }

    /// Define a function in this scope, replacing any previous definition
    /// of the same name here.
    pub fn define_function(&self, function: impl Into<Rc<Function>>) {
        let function = function.into();
        self.0
            .borrow_mut()
            .functions
            .insert(function.name().to_string(), function);
    }

    /// Look up a function, walking outward through enclosing scopes.
    pub fn get_function(&self, name: &str) -> Option<Rc<Function>> {
        self.resolve_function(name).map(|(function, _)| function)
    }

    /// Find a function together with the scope that defines it.
    pub fn resolve_function(&self, name: &str) -> Option<(Rc<Function>, Environment)> {
        let scope = self.0.borrow();
        if let Some(function) = scope.functions.get(name) {
            return Some((Rc::clone(function), self.clone()));
        }
        scope.parent.as_ref()?.resolve_function(name)
    }

    /// Names bound directly in this scope, sorted.
    pub fn local_variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().variables.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
