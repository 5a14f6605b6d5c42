use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A chained mutable scope: globals own no enclosing environment, every
/// other environment (block, function call, closure) points back to the
/// scope it was created inside.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment { enclosing, variables: HashMap::new() }
    }

    /// Wraps a fresh environment for use as a shared, mutable scope.
    pub fn new_shared(enclosing: Option<Rc<RefCell<Environment>>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::new(enclosing)))
    }

    /// Unconditionally binds `name` in this scope, shadowing any outer
    /// binding of the same name.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .unwrap_or_else(|| panic!("resolver recorded depth {distance} but no enclosing environment exists"));

        for _ in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("resolver recorded depth {distance} but the chain is shorter"));
            environment = parent;
        }

        environment
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'", name.lexeme)))
    }

    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'", name.lexeme)))
    }

    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let lookup = |vars: &HashMap<String, Object>| {
            vars.get(&name.lexeme).cloned().ok_or_else(|| {
                RuntimeError::new(name.clone(), format!("Undefined variable '{}'", name.lexeme))
            })
        };

        if distance > 0 {
            lookup(&self.ancestor(distance).borrow().variables)
        } else {
            lookup(&self.variables)
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}
