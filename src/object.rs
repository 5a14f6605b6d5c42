use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::error::Exec;
use crate::function::{Function, NativeFunction};
use crate::interpreter::Interpreter;
use crate::literal::Literal;

/// Any value a variable can hold or a function can return. Arithmetic and
/// string concatenation are not implemented here as operator overloads:
/// the `+` operator needs to call an instance's `toString` method to
/// stringify it, which only the interpreter (holding a `&mut Interpreter`)
/// can do, so all of that logic lives in `interpreter.rs`'s binary-operator
/// handling instead.
#[derive(Debug, Clone)]
pub enum Object {
    Literal(Literal),
    Function(Function),
    NativeFunction(NativeFunction),
    Class(Rc<RefCell<Class>>),
    Instance(Rc<RefCell<Instance>>),
}

impl Object {
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Literal(literal) => literal.is_truthy(),
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Literal(literal) => literal.type_str(),
            Object::Function(_) => "function",
            Object::NativeFunction(_) => "native function",
            Object::Class(_) => "class",
            Object::Instance(_) => "instance",
        }
    }
}

/// Equality for callables and classes is identity, not structure: two
/// distinct classes named `Foo` are never equal, and a function is only
/// equal to the specific closure it was created as.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Literal(left), Object::Literal(right)) => left == right,
            (Object::Function(left), Object::Function(right)) => left == right,
            (Object::NativeFunction(left), Object::NativeFunction(right)) => left == right,
            (Object::Class(left), Object::Class(right)) => Rc::ptr_eq(left, right),
            (Object::Instance(left), Object::Instance(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl PartialOrd for Object {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Object::Literal(left), Object::Literal(right)) => left.partial_cmp(right),
            _ => None,
        }
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

impl From<f64> for Object {
    fn from(number: f64) -> Self {
        Object::Literal(Literal::Number(number))
    }
}

impl From<bool> for Object {
    fn from(boolean: bool) -> Self {
        Object::Literal(Literal::Bool(boolean))
    }
}

impl From<String> for Object {
    fn from(string: String) -> Self {
        Object::Literal(Literal::String(string))
    }
}

impl From<&str> for Object {
    fn from(string: &str) -> Self {
        Object::Literal(Literal::String(string.to_owned()))
    }
}

impl From<Function> for Object {
    fn from(value: Function) -> Self {
        Object::Function(value)
    }
}

impl From<NativeFunction> for Object {
    fn from(value: NativeFunction) -> Self {
        Object::NativeFunction(value)
    }
}

impl From<Rc<RefCell<Class>>> for Object {
    fn from(value: Rc<RefCell<Class>>) -> Self {
        Object::Class(value)
    }
}

impl From<Instance> for Object {
    fn from(value: Instance) -> Self {
        Object::Instance(Rc::new(RefCell::new(value)))
    }
}

impl From<Rc<RefCell<Instance>>> for Object {
    fn from(value: Rc<RefCell<Instance>>) -> Self {
        Object::Instance(value)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Literal(literal) => write!(f, "{literal}"),
            Object::Function(function) => write!(f, "{function}"),
            Object::NativeFunction(function) => write!(f, "{function}"),
            Object::Class(class) => write!(f, "{}", class.borrow()),
            Object::Instance(instance) => write!(f, "{}", instance.borrow()),
        }
    }
}

/// Anything that can be invoked with `(...)`: user functions, native
/// functions, and bound methods of either kind. Class construction is
/// handled separately by the interpreter rather than through this trait,
/// since building an `Instance` needs the class's own shared `Rc`, not
/// just a `&self` borrow of it.
pub trait Callable: Debug {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Exec<Object>;

    fn arity(&self) -> usize;
}
