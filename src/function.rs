use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Exec, RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::Token;

#[derive(Debug)]
struct FunctionInner {
    name: Option<Token>,
    params: Vec<Token>,
    body: Vec<Stmt>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

/// A user-defined function or method. Cheap to clone (shares its body and
/// closure through `Rc`); two `Function`s compare equal only if they are
/// the exact same allocation, per the language's identity-equality rule
/// for callables.
#[derive(Debug, Clone)]
pub struct Function {
    inner: Rc<FunctionInner>,
}

impl Function {
    pub fn new(
        name: Option<Token>,
        params: Vec<Token>,
        body: Vec<Stmt>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function {
            inner: Rc::new(FunctionInner { name, params, body, closure, is_initializer }),
        }
    }

    pub fn from_declaration(
        name: Token,
        params: Vec<Token>,
        body: Vec<Stmt>,
        closure: Rc<RefCell<Environment>>,
    ) -> Self {
        let is_initializer = name.lexeme == "init";
        Function::new(Some(name), params, body, closure, is_initializer)
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_ref().map(|t| t.lexeme.as_str())
    }

    pub fn is_initializer(&self) -> bool {
        self.inner.is_initializer
    }

    /// Returns a copy of this function whose closure defines `this` as
    /// `instance`, enclosing the function's original closure. Calling the
    /// bound copy resolves `this` (and `super`, if the original closure
    /// chain defines it) to the receiver.
    pub fn bind(&self, instance: Object) -> Function {
        let env = Environment::new_shared(Some(Rc::clone(&self.inner.closure)));
        env.borrow_mut().define("this", instance);
        Function::new(
            self.inner.name.clone(),
            self.inner.params.clone(),
            self.inner.body.clone(),
            env,
            self.inner.is_initializer,
        )
    }

    fn bound_this(&self) -> Object {
        self.inner.closure.borrow().variables.get("this").cloned()
            .expect("initializer's closure must define 'this'")
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Exec<Object> {
        let env = Environment::new_shared(Some(Rc::clone(&self.inner.closure)));

        for (param, arg) in self.inner.params.iter().zip(arguments) {
            env.borrow_mut().define(&param.lexeme, arg);
        }

        match interpreter.execute_block(&self.inner.body, env) {
            Ok(()) => {
                if self.inner.is_initializer {
                    Ok(self.bound_this())
                } else {
                    Ok(Object::Literal(Literal::Nil))
                }
            }
            Err(Unwind::Return(value)) => {
                if self.inner.is_initializer {
                    Ok(self.bound_this())
                } else {
                    Ok(value)
                }
            }
            Err(error) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.inner.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "<fn {name}>"),
            None => write!(f, "<anonymous fn>"),
        }
    }
}

/// A native (Rust-implemented) callable registered as a global, or as a
/// method on a built-in class. `receiver` is set by `bind` for native
/// instance/static methods and passed back to `function` on each call.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub receiver: Option<Box<Object>>,
    pub function: fn(&mut Interpreter, Option<&Object>, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl NativeFunction {
    pub fn new(
        name: &str,
        arity: usize,
        function: fn(&mut Interpreter, Option<&Object>, Vec<Object>) -> Result<Object, RuntimeError>,
    ) -> Self {
        NativeFunction { name: name.to_string(), arity, receiver: None, function }
    }

    pub fn bind(&self, receiver: Object) -> NativeFunction {
        NativeFunction { receiver: Some(Box::new(receiver)), ..self.clone() }
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Exec<Object> {
        (self.function)(interpreter, self.receiver.as_deref(), arguments).map_err(Unwind::from)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.function as usize == other.function as usize
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
