use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::array::NativeData;
use crate::error::{Exec, RuntimeError};
use crate::function::{Function, NativeFunction};
use crate::object::Object;
use crate::token::Token;

/// A method is either user-defined (walks the Lox body) or native
/// (implemented in Rust) — built-in classes (`Array`, `String`, ...) mix
/// freely with user classes that subclass them, so lookup doesn't need to
/// know which kind it found until it binds the receiver.
#[derive(Debug, Clone)]
pub enum Method {
    User(Function),
    Native(NativeFunction),
}

impl Method {
    pub fn bind(&self, receiver: Object) -> Method {
        match self {
            Method::User(f) => Method::User(f.bind(receiver)),
            Method::Native(f) => Method::Native(f.bind(receiver)),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Method::User(f) => crate::object::Callable::arity(f),
            Method::Native(f) => crate::object::Callable::arity(f),
        }
    }

    pub fn is_initializer(&self) -> bool {
        matches!(self, Method::User(f) if f.is_initializer())
    }
}

impl From<Method> for Object {
    fn from(method: Method) -> Self {
        match method {
            Method::User(f) => Object::Function(f),
            Method::Native(f) => Object::NativeFunction(f),
        }
    }
}

/// A class: its own methods, an optional superclass to fall back to, and
/// an optional metaclass holding its static methods. Static field storage
/// (`static_fields`) plays the role spec.md assigns to "the class is also
/// an instance" — rather than literally wrapping each `Class` in an
/// `Instance` of its metaclass (which would require `Class` and `Instance`
/// to be the same Rust type), static dispatch walks the metaclass's method
/// chain directly and stores static fields alongside the class. Externally
/// this is indistinguishable from spec.md's model: `class_value.class ==
/// metaclass` holds conceptually (`Class::metaclass` is exactly that
/// field), and static method/field access goes through the same
/// lookup-then-bind shape `Instance::get`/`set` uses below.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Method>,
    pub metaclass: Option<Rc<RefCell<Class>>>,
    pub static_fields: HashMap<String, Object>,
    /// Set for built-in classes (`Array`) whose instances carry native
    /// storage the constructor must initialize.
    pub native_constructor: Option<fn(Vec<Object>) -> Result<NativeData, String>>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<RefCell<Class>>>,
        methods: HashMap<String, Method>,
        metaclass: Option<Rc<RefCell<Class>>>,
    ) -> Self {
        Class {
            name,
            superclass,
            methods,
            metaclass,
            static_fields: HashMap::new(),
            native_constructor: None,
        }
    }

    pub fn find_method(&self, name: &str) -> Option<Method> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }
        self.superclass.as_ref().and_then(|s| s.borrow().find_method(name))
    }

    /// Arity of `init`, or 0 if the class declares none.
    pub fn initializer_arity(&self) -> usize {
        self.find_method("init").map(|m| m.arity()).unwrap_or(0)
    }

    /// Static member access: `ClassName.member`. Mirrors `Instance::get`
    /// but reads from `static_fields` and walks the metaclass chain.
    pub fn get_static(this: &Rc<RefCell<Class>>, name: &Token) -> Exec<Object> {
        if let Some(value) = this.borrow().static_fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        let metaclass = this.borrow().metaclass.clone();
        if let Some(metaclass) = metaclass {
            if let Some(method) = metaclass.borrow().find_method(&name.lexeme) {
                return Ok(method.bind(Object::Class(Rc::clone(this))).into());
            }
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined property '{}'", name.lexeme)).into())
    }

    pub fn set_static(this: &Rc<RefCell<Class>>, name: &Token, value: Object) {
        this.borrow_mut().static_fields.insert(name.lexeme.clone(), value);
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An instance of a class. Owns its field table; shares (but does not own)
/// its class via `Rc`. Built-in classes stash private state in `native`
/// (e.g. the backing `Vec<Object>` for `Array`).
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, Object>,
    pub native: RefCell<Option<NativeData>>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new(), native: RefCell::new(None) }
    }

    pub fn get(&self, name: &Token, receiver: &Object) -> Exec<Object> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = self.class.borrow().find_method(&name.lexeme) {
            return Ok(method.bind(receiver.clone()).into());
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined property '{}'", name.lexeme)).into())
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.class.borrow().name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Unwind;
    use crate::literal::Literal;
    use crate::token::Type;

    fn token(name: &str) -> Token {
        Token::new(Type::Identifier, name.to_string(), None, 1)
    }

    fn empty_class(name: &str, superclass: Option<Rc<RefCell<Class>>>) -> Rc<RefCell<Class>> {
        Rc::new(RefCell::new(Class::new(name.to_string(), superclass, HashMap::new(), None)))
    }

    #[test]
    fn find_method_falls_through_to_superclass() {
        let base = empty_class("Base", None);
        base.borrow_mut().methods.insert("greet".to_string(), Method::Native(NativeFunction::new("greet", 0, |_, _, _| unreachable!())));
        let derived = empty_class("Derived", Some(Rc::clone(&base)));

        assert!(derived.borrow().find_method("greet").is_some());
    }

    #[test]
    fn find_method_skips_an_intermediate_class_that_does_not_override() {
        let a = empty_class("A", None);
        a.borrow_mut().methods.insert("foo".to_string(), Method::Native(NativeFunction::new("foo", 0, |_, _, _| unreachable!())));
        let b = empty_class("B", Some(Rc::clone(&a)));
        let c = empty_class("C", Some(Rc::clone(&b)));

        assert!(c.borrow().find_method("foo").is_some());
    }

    #[test]
    fn find_method_missing_returns_none() {
        let class = empty_class("Foo", None);
        assert!(class.borrow().find_method("missing").is_none());
    }

    #[test]
    fn instance_get_reads_a_field_before_a_method() {
        let class = empty_class("Foo", None);
        let mut instance = Instance::new(Rc::clone(&class));
        instance.set(&token("x"), Object::from(1.0));

        let receiver = Object::Literal(Literal::Nil);
        assert_eq!(instance.get(&token("x"), &receiver).unwrap(), Object::from(1.0));
    }

    #[test]
    fn instance_get_undefined_property_is_an_error() {
        let class = empty_class("Foo", None);
        let instance = Instance::new(class);
        let receiver = Object::Literal(Literal::Nil);

        let Err(Unwind::Error(error)) = instance.get(&token("missing"), &receiver) else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Undefined property 'missing'");
    }

    #[test]
    fn static_field_set_and_get_roundtrip() {
        let class = empty_class("Foo", None);
        Class::set_static(&class, &token("count"), Object::from(1.0));
        assert_eq!(Class::get_static(&class, &token("count")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn static_field_is_not_inherited_by_a_subclass() {
        let base = empty_class("Base", None);
        Class::set_static(&base, &token("value"), Object::from(1.0));
        let derived = empty_class("Derived", Some(base));

        let Err(Unwind::Error(error)) = Class::get_static(&derived, &token("value")) else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Undefined property 'value'");
    }

    #[test]
    fn display_instance_matches_book_format() {
        let class = empty_class("Foo", None);
        let instance = Instance::new(class);
        assert_eq!(format!("{instance}"), "<Foo instance>");
    }

    #[test]
    fn display_class_is_the_bare_name() {
        let class = empty_class("Foo", None);
        assert_eq!(format!("{}", *class.borrow()), "Foo");
    }
}
