use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::array::{self, NativeData};
use crate::class::{Class, Instance, Method};
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::function::NativeFunction;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::Object;
use crate::token::{Token, Type};

type NativeFn = fn(&mut Interpreter, Option<&Object>, Vec<Object>) -> Result<Object, RuntimeError>;

fn here() -> Token {
    Token::new(Type::Identifier, "native".to_string(), None, 0)
}

/// Registers every free function and built-in class into `globals`, and
/// returns the `Array` class so the interpreter can build array-literal
/// instances against the same class value its built-in methods dispatch on.
pub fn register(globals: &Rc<RefCell<Environment>>) -> Rc<RefCell<Class>> {
    let mut env = globals.borrow_mut();

    for (name, arity, f) in [
        ("clock", 0, clock as NativeFn),
        ("string", 1, string_fn),
        ("number", 1, number_fn),
        ("typeOf", 1, type_of),
        ("is", 2, is_fn),
        ("fields", 1, fields_fn),
        ("methods", 1, methods_fn),
        ("hasField", 2, has_field),
        ("hasMethod", 2, has_method),
    ] {
        env.define(name, Object::NativeFunction(NativeFunction::new(name, arity, f)));
    }

    env.define("Console", Object::Class(console_class()));
    env.define("String", Object::Class(string_class()));
    env.define("Math", Object::Class(math_class()));

    let array_class = array_class();
    env.define("Array", Object::Class(Rc::clone(&array_class)));

    array_class
}

fn static_class(name: &str, statics: &[(&str, usize, NativeFn)]) -> Rc<RefCell<Class>> {
    let mut static_methods = HashMap::new();
    for &(method_name, arity, f) in statics {
        static_methods.insert(method_name.to_string(), Method::Native(NativeFunction::new(method_name, arity, f)));
    }
    let metaclass = Rc::new(RefCell::new(Class::new(format!("{name} metaclass"), None, static_methods, None)));
    Rc::new(RefCell::new(Class::new(name.to_string(), None, HashMap::new(), Some(metaclass))))
}

fn console_class() -> Rc<RefCell<Class>> {
    static_class(
        "Console",
        &[("readLine", 0, console_read_line), ("writeLine", 1, console_write_line), ("write", 1, console_write)],
    )
}

fn string_class() -> Rc<RefCell<Class>> {
    static_class(
        "String",
        &[("length", 1, string_length), ("charAt", 2, string_char_at), ("charCodeAt", 2, string_char_code_at)],
    )
}

fn math_class() -> Rc<RefCell<Class>> {
    static_class("Math", &[("mod", 2, math_mod), ("round", 2, math_round)])
}

fn array_class() -> Rc<RefCell<Class>> {
    let mut methods = HashMap::new();
    methods.insert("get".to_string(), Method::Native(NativeFunction::new("get", 1, array::native_get)));
    methods.insert("set".to_string(), Method::Native(NativeFunction::new("set", 2, array::native_set)));
    methods.insert("length".to_string(), Method::Native(NativeFunction::new("length", 0, array::native_length)));
    methods.insert("fill".to_string(), Method::Native(NativeFunction::new("fill", 1, array::native_fill)));
    methods.insert("foreach".to_string(), Method::Native(NativeFunction::new("foreach", 1, array::native_foreach)));

    let class = Rc::new(RefCell::new(Class::new("Array".to_string(), None, methods, None)));
    class.borrow_mut().native_constructor = Some(array::native_constructor);
    class
}

// ---- free functions ----

fn clock(_interpreter: &mut Interpreter, _receiver: Option<&Object>, _args: Vec<Object>) -> Result<Object, RuntimeError> {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs_f64();
    Ok(Object::from(seconds))
}

fn string_fn(interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let value = args.into_iter().next().unwrap_or(Object::Literal(Literal::Nil));
    stringify_or_err(interpreter, &value).map(Object::from)
}

fn number_fn(_interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let value = args.into_iter().next().unwrap_or(Object::Literal(Literal::Nil));
    let result = match value {
        Object::Literal(Literal::Number(n)) => Some(n),
        Object::Literal(Literal::String(s)) => s.trim().parse::<f64>().ok(),
        Object::Literal(Literal::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        _ => None,
    };
    Ok(result.map(Object::from).unwrap_or(Object::Literal(Literal::Nil)))
}

fn type_name_of(value: &Object) -> &'static str {
    match value {
        Object::Literal(Literal::Nil) => "nil",
        Object::Literal(Literal::Bool(_)) => "boolean",
        Object::Literal(Literal::String(_)) => "string",
        Object::Literal(Literal::Number(_)) => "number",
        Object::Class(_) => "class",
        Object::Instance(_) => "instance",
        Object::Function(_) | Object::NativeFunction(_) => "function",
    }
}

fn type_of(_interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let value = args.into_iter().next().unwrap_or(Object::Literal(Literal::Nil));
    Ok(Object::from(type_name_of(&value)))
}

/// `is(value, typeCodeOrClass)`: a string argument is matched against
/// `typeOf`, a class argument walks the value's class/superclass chain.
fn is_fn(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "is requires a value and a type.".to_string()));
    }
    let target = args.remove(1);
    let value = args.remove(0);

    let result = match target {
        Object::Literal(Literal::String(code)) => type_name_of(&value) == code,
        Object::Class(target_class) => match &value {
            Object::Instance(instance) => {
                let mut current = Some(Rc::clone(&instance.borrow().class));
                let mut found = false;
                while let Some(class) = current {
                    if Rc::ptr_eq(&class, &target_class) {
                        found = true;
                        break;
                    }
                    current = class.borrow().superclass.clone();
                }
                found
            }
            _ => false,
        },
        _ => false,
    };

    Ok(Object::from(result))
}

fn fields_fn(interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let instance = expect_instance(args.into_iter().next(), "fields")?;
    let names: Vec<Object> = instance.borrow().fields.keys().map(|k| Object::from(k.as_str())).collect();
    Ok(wrap_array(interpreter, names))
}

fn methods_fn(interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let instance = expect_instance(args.into_iter().next(), "methods")?;
    let mut names = Vec::new();
    let mut current = Some(Rc::clone(&instance.borrow().class));
    while let Some(class) = current {
        names.extend(class.borrow().methods.keys().cloned());
        current = class.borrow().superclass.clone();
    }
    let names: Vec<Object> = names.into_iter().map(Object::from).collect();
    Ok(wrap_array(interpreter, names))
}

fn has_field(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "hasField requires an instance and a field name.".to_string()));
    }
    let name = expect_string(args.remove(1), "hasField")?;
    let instance = expect_instance(Some(args.remove(0)), "hasField")?;
    Ok(Object::from(instance.borrow().fields.contains_key(&name)))
}

fn has_method(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "hasMethod requires an instance and a method name.".to_string()));
    }
    let name = expect_string(args.remove(1), "hasMethod")?;
    let instance = expect_instance(Some(args.remove(0)), "hasMethod")?;
    let found = instance.borrow().class.borrow().find_method(&name).is_some();
    Ok(Object::from(found))
}

// ---- Console ----

fn console_read_line(_interpreter: &mut Interpreter, _receiver: Option<&Object>, _args: Vec<Object>) -> Result<Object, RuntimeError> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => Ok(Object::Literal(Literal::Nil)),
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Ok(Object::from(line))
        }
        Err(error) => Err(RuntimeError::new(here(), format!("Console.readLine failed: {error}"))),
    }
}

fn console_write_line(interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let value = args.into_iter().next().unwrap_or(Object::Literal(Literal::Nil));
    let text = stringify_or_err(interpreter, &value)?;
    interpreter.write_line(&text);
    Ok(Object::Literal(Literal::Nil))
}

fn console_write(interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let value = args.into_iter().next().unwrap_or(Object::Literal(Literal::Nil));
    let text = stringify_or_err(interpreter, &value)?;
    interpreter.write_str(&text);
    Ok(Object::Literal(Literal::Nil))
}

// ---- String ----

fn string_length(_interpreter: &mut Interpreter, _receiver: Option<&Object>, args: Vec<Object>) -> Result<Object, RuntimeError> {
    let s = expect_string_arg(args.into_iter().next(), "String.length")?;
    Ok(Object::from(s.encode_utf16().count() as f64))
}

fn string_char_at(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "String.charAt requires a string and an index.".to_string()));
    }
    let index = expect_number_arg(args.remove(1), "String.charAt")?;
    let s = expect_string_arg(Some(args.remove(0)), "String.charAt")?;
    let units: Vec<u16> = s.encode_utf16().collect();
    let i = check_string_index(index, units.len())?;
    let ch = char::from_u32(units[i] as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
    Ok(Object::from(ch.to_string()))
}

fn string_char_code_at(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "String.charCodeAt requires a string and an index.".to_string()));
    }
    let index = expect_number_arg(args.remove(1), "String.charCodeAt")?;
    let s = expect_string_arg(Some(args.remove(0)), "String.charCodeAt")?;
    let units: Vec<u16> = s.encode_utf16().collect();
    let i = check_string_index(index, units.len())?;
    Ok(Object::from(units[i] as f64))
}

fn check_string_index(index: f64, len: usize) -> Result<usize, RuntimeError> {
    if index < 0.0 || index.fract() != 0.0 || index as usize >= len {
        return Err(RuntimeError::new(here(), format!("String index {index} out of bounds for length {len}.")));
    }
    Ok(index as usize)
}

// ---- Math ----

fn math_mod(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "Math.mod requires two numbers.".to_string()));
    }
    let b = expect_number_arg(args.remove(1), "Math.mod")?;
    let a = expect_number_arg(args.remove(0), "Math.mod")?;
    Ok(Object::from(((a % b) + b) % b))
}

fn math_round(_interpreter: &mut Interpreter, _receiver: Option<&Object>, mut args: Vec<Object>) -> Result<Object, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(here(), "Math.round requires a value and a digit count.".to_string()));
    }
    let digits = expect_number_arg(args.remove(1), "Math.round")?;
    let v = expect_number_arg(args.remove(0), "Math.round")?;
    let factor = 10f64.powi(digits as i32);
    Ok(Object::from((v * factor).round() / factor))
}

// ---- shared argument helpers ----

fn stringify_or_err(interpreter: &mut Interpreter, value: &Object) -> Result<String, RuntimeError> {
    match interpreter.stringify(value) {
        Ok(text) => Ok(text),
        Err(Unwind::Error(error)) => Err(error),
        Err(Unwind::Return(_)) => unreachable!("return cannot escape a native call boundary"),
    }
}

fn expect_instance(value: Option<Object>, who: &str) -> Result<Rc<RefCell<Instance>>, RuntimeError> {
    match value {
        Some(Object::Instance(instance)) => Ok(instance),
        Some(other) => Err(RuntimeError::new(here(), format!("{who} requires an instance, got {}.", other.type_name()))),
        None => Err(RuntimeError::new(here(), format!("{who} requires an instance argument."))),
    }
}

fn expect_string(value: Object, who: &str) -> Result<String, RuntimeError> {
    match value {
        Object::Literal(Literal::String(s)) => Ok(s),
        other => Err(RuntimeError::new(here(), format!("{who} requires a string, got {}.", other.type_name()))),
    }
}

fn expect_string_arg(value: Option<Object>, who: &str) -> Result<String, RuntimeError> {
    match value {
        Some(Object::Literal(Literal::String(s))) => Ok(s),
        Some(other) => Err(RuntimeError::new(here(), format!("{who} requires a string, got {}.", other.type_name()))),
        None => Err(RuntimeError::new(here(), format!("{who} requires a string argument."))),
    }
}

fn expect_number_arg(value: Object, who: &str) -> Result<f64, RuntimeError> {
    match value {
        Object::Literal(Literal::Number(n)) => Ok(n),
        other => Err(RuntimeError::new(here(), format!("{who} requires a number, got {}.", other.type_name()))),
    }
}

fn wrap_array(interpreter: &Interpreter, elements: Vec<Object>) -> Object {
    let instance = Instance::new(interpreter.array_class());
    *instance.native.borrow_mut() = Some(NativeData::Array(elements));
    Object::from(instance)
}
