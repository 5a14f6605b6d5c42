use std::cell::RefCell;
use std::rc::Rc;

use crate::class::Instance;
use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::token::Token;

/// Private storage a built-in class's instances carry alongside their
/// (empty) user-visible field table. `Array` is the only native type for
/// now; new built-ins add a variant here rather than a new `Instance`
/// shape.
#[derive(Debug, Clone)]
pub enum NativeData {
    Array(Vec<Object>),
}

/// Reads `index` as a non-negative integer usable as a `Vec` index.
/// Out-of-range and fractional indices are both runtime errors — arrays
/// never return `nil` for a bad index, they fail loudly.
fn index_of(index: &Object, token: &Token, len: usize) -> Result<usize, RuntimeError> {
    let n = match index {
        Object::Literal(Literal::Number(n)) => *n,
        other => {
            return Err(RuntimeError::new(
                token.clone(),
                format!("Array index must be a number, got {}.", other.type_name()),
            ))
        }
    };

    if n.fract() != 0.0 || n < 0.0 {
        return Err(RuntimeError::new(token.clone(), format!("Invalid array index {n}.")));
    }

    let i = n as usize;
    if i >= len {
        return Err(RuntimeError::new(
            token.clone(),
            format!("Array index {i} out of bounds for length {len}."),
        ));
    }

    Ok(i)
}

fn as_instance(object: &Object) -> &Rc<RefCell<Instance>> {
    match object {
        Object::Instance(rc) => rc,
        _ => unreachable!("array operations are only dispatched on Array instances"),
    }
}

/// Native methods don't carry the call-site token; errors raised deep
/// inside them attribute to a synthetic token so `RuntimeError`'s
/// `[line N]` trailer still renders something, at line 0.
fn native_token(name: &str) -> Token {
    Token::new(crate::token::Type::Identifier, name.to_string(), None, 0)
}

pub fn get(object: &Object, index: &Object, token: &Token) -> Result<Object, RuntimeError> {
    let instance = as_instance(object).borrow();
    let native = instance.native.borrow();
    match native.as_ref() {
        Some(NativeData::Array(elements)) => {
            let i = index_of(index, token, elements.len())?;
            Ok(elements[i].clone())
        }
        None => unreachable!("Array instance missing its native storage"),
    }
}

pub fn set(object: &Object, index: &Object, value: Object, token: &Token) -> Result<Object, RuntimeError> {
    let instance = as_instance(object).borrow();
    let mut native = instance.native.borrow_mut();
    match native.as_mut() {
        Some(NativeData::Array(elements)) => {
            let i = index_of(index, token, elements.len())?;
            elements[i] = value.clone();
            Ok(value)
        }
        None => unreachable!("Array instance missing its native storage"),
    }
}

/// `Array`'s `native_constructor`: the single constructor argument is the
/// array's length, every slot starts out `nil`.
pub fn native_constructor(args: Vec<Object>) -> Result<NativeData, String> {
    if args.len() != 1 {
        return Err(format!("Expected 1 argument but got {}.", args.len()));
    }

    match &args[0] {
        Object::Literal(Literal::Number(n)) if *n >= 0.0 && n.fract() == 0.0 => {
            Ok(NativeData::Array(vec![Object::Literal(Literal::Nil); *n as usize]))
        }
        other => Err(format!("Array constructor requires a non-negative integer length, got {other}.")),
    }
}

pub fn native_get(_interpreter: &mut Interpreter, receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    let receiver = receiver.expect("get called without a receiver");
    if args.is_empty() {
        return Err(RuntimeError::new(native_token("get"), "get requires an index argument.".to_string()));
    }
    get(receiver, &args.remove(0), &native_token("get"))
}

pub fn native_set(_interpreter: &mut Interpreter, receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    let receiver = receiver.expect("set called without a receiver");
    if args.len() < 2 {
        return Err(RuntimeError::new(native_token("set"), "set requires an index and a value.".to_string()));
    }
    let value = args.remove(1);
    let index = args.remove(0);
    set(receiver, &index, value, &native_token("set"))
}

pub fn native_length(_interpreter: &mut Interpreter, receiver: Option<&Object>, _args: Vec<Object>) -> Result<Object, RuntimeError> {
    let instance = as_instance(receiver.expect("length called without a receiver")).borrow();
    let len = match instance.native.borrow().as_ref() {
        Some(NativeData::Array(elements)) => elements.len(),
        None => unreachable!(),
    };
    Ok(Object::from(len as f64))
}

pub fn native_fill(_interpreter: &mut Interpreter, receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let receiver = receiver.expect("fill called without a receiver");
    let instance = as_instance(receiver).borrow();
    let value = args.into_iter().next().unwrap_or(Object::Literal(Literal::Nil));
    if let Some(NativeData::Array(elements)) = instance.native.borrow_mut().as_mut() {
        for slot in elements.iter_mut() {
            *slot = value.clone();
        }
    }
    Ok(receiver.clone())
}

pub fn native_foreach(interpreter: &mut Interpreter, receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let receiver = receiver.expect("foreach called without a receiver");
    let callback = args
        .into_iter()
        .next()
        .ok_or_else(|| RuntimeError::new(native_token("foreach"), "foreach requires a callback argument."))?;

    let elements = {
        let instance = as_instance(receiver).borrow();
        match instance.native.borrow().as_ref() {
            Some(NativeData::Array(elements)) => elements.clone(),
            None => unreachable!(),
        }
    };

    let callable: Box<dyn Callable> = match &callback {
        Object::Function(f) => Box::new(f.clone()),
        Object::NativeFunction(f) => Box::new(f.clone()),
        other => {
            return Err(RuntimeError::new(
                native_token("foreach"),
                format!("foreach callback must be callable, got {}.", other.type_name()),
            ))
        }
    };

    for (i, element) in elements.into_iter().enumerate() {
        let call_args = vec![element, Object::from(i as f64)];
        match callable.call(interpreter, call_args) {
            Ok(_) => {}
            Err(Unwind::Error(error)) => return Err(error),
            Err(Unwind::Return(_)) => unreachable!("return cannot escape a native call boundary"),
        }
    }

    Ok(receiver.clone())
}
