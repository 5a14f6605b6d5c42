use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::array::{self};
use crate::class::{Class, Instance, Method};
use crate::environment::Environment;
use crate::error::{Exec, RuntimeError, Unwind};
use crate::expr::{Expr, ExprId, ExprVisitor};
use crate::function::Function;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Walks the AST and evaluates it directly, the opposite of compiling to
/// bytecode first. Holds two environments — `globals`, which never changes
/// once built-ins are registered, and `environment`, the current lexical
/// scope, swapped in and out as blocks and calls are entered and left.
///
/// `locals` is the resolver's output: for every variable-reference
/// expression id it records how many environments out to walk to find the
/// binding, so `this`, closures, and shadowed locals all resolve to the
/// scope the resolver determined statically rather than whatever happens
/// to be defined at the time.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    array_class: Rc<RefCell<Class>>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        let globals = Environment::new_shared(None);
        let array_class = crate::builtins::register(&globals);

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            array_class,
            out,
        }
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => unreachable!("the resolver rejects 'return' outside a function"),
            }
        }
        Ok(())
    }

    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> Exec<()> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Exec<Object> {
        expr.accept(self)
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Exec<()> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                result = Err(error);
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn lookup_variable(&self, id: ExprId, name: &Token) -> Exec<Object> {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.borrow().get_at(distance, name).map_err(Unwind::from),
            None => self.globals.borrow().get(name).map_err(Unwind::from),
        }
    }

    /// Converts a value to its printed representation, calling the value's
    /// `toString` method if its class (or an ancestor) defines one.
    pub fn stringify(&mut self, object: &Object) -> Exec<String> {
        if let Object::Instance(rc) = object {
            let method = rc.borrow().class.borrow().find_method("toString");
            if let Some(method) = method {
                let bound = method.bind(object.clone());
                let result = self.call_method(bound, vec![])?;
                return Ok(format!("{result}"));
            }
        }

        Ok(format!("{object}"))
    }

    fn call_method(&mut self, method: Method, arguments: Vec<Object>) -> Exec<Object> {
        match method {
            Method::User(f) => f.call(self, arguments),
            Method::Native(f) => f.call(self, arguments),
        }
    }

    pub fn array_class(&self) -> Rc<RefCell<Class>> {
        Rc::clone(&self.array_class)
    }

    pub fn write_line(&mut self, text: &str) {
        writeln!(self.out, "{text}").expect("writing to the output sink should not fail");
    }

    pub fn write_str(&mut self, text: &str) {
        write!(self.out, "{text}").expect("writing to the output sink should not fail");
    }

    fn check_numbers(&self, left: &Object, right: &Object, token: &Token) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok((*l, *r)),
            _ => Err(RuntimeError::new(token.clone(), "Operands must be numbers.".to_string())),
        }
    }

    /// Dispatches a property/index read on either an instance (field,
    /// bound method, or array element) or a class (static field/method).
    /// Per the language's Get/Set rule: a numeric index against an array
    /// instance is an array access; any other index is coerced to a
    /// string and used as a field/method name.
    fn get_property(&mut self, object: Object, index: Object, bracket: &Token) -> Exec<Object> {
        if is_number(&index) && is_array_instance(&object) {
            return Ok(array::get(&object, &index, bracket)?);
        }

        let name = self.stringify(&index)?;
        let token = Token::new(Type::Identifier, name, None, bracket.line);

        match &object {
            Object::Instance(rc) => rc.borrow().get(&token, &object),
            Object::Class(rc) => Class::get_static(rc, &token),
            other => Err(RuntimeError::new(
                bracket.clone(),
                format!("Only instances and classes have properties, got {}.", other.type_name()),
            )
            .into()),
        }
    }

    fn set_property(&mut self, object: Object, index: Object, value: Object, bracket: &Token) -> Exec<Object> {
        if is_number(&index) && is_array_instance(&object) {
            return Ok(array::set(&object, &index, value, bracket)?);
        }

        let name = self.stringify(&index)?;
        let token = Token::new(Type::Identifier, name, None, bracket.line);

        match &object {
            Object::Instance(rc) => {
                rc.borrow_mut().set(&token, value.clone());
                Ok(value)
            }
            Object::Class(rc) => {
                Class::set_static(rc, &token, value.clone());
                Ok(value)
            }
            other => Err(RuntimeError::new(
                bracket.clone(),
                format!("Only instances and classes have fields, got {}.", other.type_name()),
            )
            .into()),
        }
    }

    fn call(&mut self, callee: Object, arguments: Vec<Object>, paren: &Token) -> Exec<Object> {
        match callee {
            Object::Class(rc) => self.instantiate(rc, arguments, paren),
            Object::Function(f) => {
                check_arity(f.arity(), arguments.len(), paren)?;
                f.call(self, arguments)
            }
            Object::NativeFunction(f) => {
                check_arity(f.arity(), arguments.len(), paren)?;
                f.call(self, arguments)
            }
            other => Err(RuntimeError::new(paren.clone(), format!("Can only call functions and classes, got {}.", other.type_name())).into()),
        }
    }

    /// Building an instance needs the class's own shared `Rc` (to populate
    /// `Instance.class`), which the `Callable` trait's `&self` receiver
    /// can't provide — so construction is handled here instead of through
    /// `Callable::call`.
    fn instantiate(&mut self, class: Rc<RefCell<Class>>, arguments: Vec<Object>, paren: &Token) -> Exec<Object> {
        let native_constructor = class.borrow().native_constructor;

        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(&class))));

        if let Some(constructor) = native_constructor {
            let native = constructor(arguments.clone()).map_err(|message| RuntimeError::new(paren.clone(), message))?;
            *instance.borrow().native.borrow_mut() = Some(native);
        }

        let init = class.borrow().find_method("init");
        match init {
            Some(method) => {
                check_arity(method.arity(), arguments.len(), paren)?;
                let bound = method.bind(Object::Instance(Rc::clone(&instance)));
                self.call_method(bound, arguments)
            }
            None => {
                if native_constructor.is_none() && !arguments.is_empty() {
                    return Err(RuntimeError::new(paren.clone(), format!("Expected 0 arguments but got {}.", arguments.len())).into());
                }
                Ok(Object::Instance(instance))
            }
        }
    }
}

fn is_number(object: &Object) -> bool {
    matches!(object, Object::Literal(Literal::Number(_)))
}

fn is_array_instance(object: &Object) -> bool {
    match object {
        Object::Instance(rc) => matches!(rc.borrow().native.borrow().as_ref(), Some(array::NativeData::Array(_))),
        _ => false,
    }
}

fn check_arity(expected: usize, got: usize, paren: &Token) -> Result<(), RuntimeError> {
    if expected != got {
        return Err(RuntimeError::new(paren.clone(), format!("Expected {expected} arguments but got {got}.")));
    }
    Ok(())
}

impl<'a> ExprVisitor<Exec<Object>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Literal(data) = expr else { unreachable!() };
        Ok(Object::Literal(data.value.clone()))
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Unary(data) = expr else { unreachable!() };
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Minus => match right {
                Object::Literal(Literal::Number(n)) => Ok(Object::from(-n)),
                other => Err(RuntimeError::new(data.operator.clone(), format!("Operand must be a number, got {}.", other.type_name())).into()),
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Binary(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let op = &data.operator;

        match op.r#type {
            Type::Greater => { let (l, r) = self.check_numbers(&left, &right, op)?; Ok(Object::from(l > r)) }
            Type::GreaterEqual => { let (l, r) = self.check_numbers(&left, &right, op)?; Ok(Object::from(l >= r)) }
            Type::Less => { let (l, r) = self.check_numbers(&left, &right, op)?; Ok(Object::from(l < r)) }
            Type::LessEqual => { let (l, r) = self.check_numbers(&left, &right, op)?; Ok(Object::from(l <= r)) }
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::Minus => { let (l, r) = self.check_numbers(&left, &right, op)?; Ok(Object::from(l - r)) }
            Type::Star => { let (l, r) = self.check_numbers(&left, &right, op)?; Ok(Object::from(l * r)) }
            Type::Slash => {
                let (l, r) = self.check_numbers(&left, &right, op)?;
                // IEEE-754 division: by zero yields inf/nan, never an error.
                Ok(Object::from(l / r))
            }
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(_)), _) | (_, Object::Literal(Literal::String(_))) => {
                    let l = self.stringify(&left)?;
                    let r = self.stringify(&right)?;
                    Ok(Object::from(l + &r))
                }
                _ => Err(RuntimeError::new(op.clone(), "Operands must be two numbers or two strings.".to_string()).into()),
            },
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Logical(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;

        match data.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.evaluate(&data.expr)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Variable(data) = expr else { unreachable!() };
        self.lookup_variable(data.id, &data.name)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Assign(data) = expr else { unreachable!() };
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(&distance) => self.environment.borrow_mut().assign_at(distance, &data.name, value.clone()),
            None => self.globals.borrow_mut().assign(&data.name, value.clone()).map_err(Unwind::from)?,
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Call(data) = expr else { unreachable!() };

        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        self.call(callee, arguments, &data.paren)
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Get(data) = expr else { unreachable!() };
        let object = self.evaluate(&data.object)?;
        let index = self.evaluate(&data.index)?;
        self.get_property(object, index, &data.bracket)
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Set(data) = expr else { unreachable!() };
        let object = self.evaluate(&data.object)?;
        let index = self.evaluate(&data.index)?;
        let value = self.evaluate(&data.value)?;
        self.set_property(object, index, value, &data.bracket)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::This(data) = expr else { unreachable!() };
        self.lookup_variable(data.id, &data.keyword)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Super(data) = expr else { unreachable!() };

        let distance = *self.locals.get(&data.id).expect("resolver always records 'super' depth");
        let super_token = Token::new(Type::Super, "super".to_string(), None, data.keyword.line);
        let this_token = Token::new(Type::This, "this".to_string(), None, data.keyword.line);

        let superclass = self.environment.borrow().get_at(distance, &super_token).map_err(Unwind::from)?;
        let instance = self.environment.borrow().get_at(distance - 1, &this_token).map_err(Unwind::from)?;

        let Object::Class(superclass) = superclass else { unreachable!("'super' always resolves to a class") };

        let method = superclass.borrow().find_method(&data.method.lexeme).ok_or_else(|| {
            RuntimeError::new(data.method.clone(), format!("Undefined property '{}'.", data.method.lexeme))
        })?;

        Ok(method.bind(instance).into())
    }

    fn visit_function_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::FunctionExpr(data) = expr else { unreachable!() };
        let function = Function::new(None, data.params.clone(), data.body.clone(), Rc::clone(&self.environment), false);
        Ok(Object::Function(function))
    }

    fn visit_array_expr(&mut self, expr: &Expr) -> Exec<Object> {
        let Expr::Array(data) = expr else { unreachable!() };

        let mut elements = Vec::with_capacity(data.elements.len());
        for element in &data.elements {
            elements.push(self.evaluate(element)?);
        }

        let instance = Instance::new(Rc::clone(&self.array_class));
        *instance.native.borrow_mut() = Some(array::NativeData::Array(elements));
        Ok(Object::Instance(Rc::new(RefCell::new(instance))))
    }
}

impl<'a> StmtVisitor<Exec<()>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        let text = self.stringify(&value)?;
        self.write_line(&text);
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Return(data) = stmt else { unreachable!() };
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::Literal(Literal::Nil),
        };
        Err(Unwind::Return(value))
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Var(data) = stmt else { unreachable!() };
        let value = match &data.initializer {
            Some(expr) => self.evaluate(expr)?,
            None => Object::Literal(Literal::Nil),
        };
        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Function(data) = stmt else { unreachable!() };
        let function = Function::from_declaration(data.name.clone(), data.params.clone(), data.body.clone(), Rc::clone(&self.environment));
        self.environment.borrow_mut().define(&data.name.lexeme, Object::Function(function));
        Ok(())
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(rc) => Some(rc),
                    _ => {
                        let Expr::Variable(var) = expr else { unreachable!() };
                        return Err(RuntimeError::new(var.name.clone(), "Superclass must be a class.".to_string()).into());
                    }
                }
            }
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::Literal(Literal::Nil));

        let method_env = match &superclass {
            Some(superclass) => {
                let env = Environment::new_shared(Some(Rc::clone(&self.environment)));
                env.borrow_mut().define("super", Object::Class(Rc::clone(superclass)));
                env
            }
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };
            let f = Function::from_declaration(function.name.clone(), function.params.clone(), function.body.clone(), Rc::clone(&method_env));
            methods.insert(function.name.lexeme.clone(), Method::User(f));
        }

        // Static methods close over a separate environment: `super` there
        // must resolve to the superclass's metaclass (so `super.foo()`
        // reaches an inherited static method), not the superclass instance
        // `method_env` binds `super` to above.
        let static_method_env = match &superclass {
            Some(superclass) => {
                let metaclass = superclass.borrow().metaclass.clone().expect("every class value has a metaclass");
                let env = Environment::new_shared(Some(Rc::clone(&self.environment)));
                env.borrow_mut().define("super", Object::Class(metaclass));
                env
            }
            None => Rc::clone(&self.environment),
        };

        let mut static_methods = HashMap::new();
        for method in &data.static_methods {
            let Stmt::Function(function) = method else { unreachable!() };
            let f = Function::new(Some(function.name.clone()), function.params.clone(), function.body.clone(), Rc::clone(&static_method_env), false);
            static_methods.insert(function.name.lexeme.clone(), Method::User(f));
        }

        let metaclass_superclass = superclass.as_ref().and_then(|s| s.borrow().metaclass.clone());
        let metaclass = Rc::new(RefCell::new(Class::new(
            format!("{} metaclass", data.name.lexeme),
            metaclass_superclass,
            static_methods,
            None,
        )));

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods, Some(metaclass))));

        self.environment
            .borrow_mut()
            .assign(&data.name, Object::Class(class))
            .map_err(Unwind::from)?;

        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let scope = Environment::new_shared(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, scope)
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)?;
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Exec<()> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::{ArrayData, BinaryData, GroupingData, LiteralData, UnaryData};

    fn literal(id: ExprId, value: Literal) -> Expr {
        Expr::Literal(LiteralData { id, value })
    }

    #[test]
    fn evaluate_literal() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = literal(0, Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary_minus() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Unary(UnaryData {
            id: 0,
            operator: Token::new(Type::Minus, "-".to_string(), None, 1),
            right: Box::new(literal(1, Literal::Number(12.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));
    }

    #[test]
    fn evaluate_unary_minus_on_non_number_errors() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Unary(UnaryData {
            id: 0,
            operator: Token::new(Type::Minus, "-".to_string(), None, 1),
            right: Box::new(literal(1, Literal::String("x".to_string()))),
        });
        let Err(Unwind::Error(error)) = interpreter.evaluate(&expr) else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Operand must be a number, got string.");
    }

    #[test]
    fn evaluate_unary_bang_never_errors_on_any_type() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Unary(UnaryData {
            id: 0,
            operator: Token::new(Type::Bang, "!".to_string(), None, 1),
            right: Box::new(literal(1, Literal::Nil)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_binary_arithmetic() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Binary(BinaryData {
            id: 0,
            left: Box::new(literal(1, Literal::Number(12.0))),
            operator: Token::new(Type::Minus, "-".to_string(), None, 1),
            right: Box::new(literal(2, Literal::Number(5.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(7.0));
    }

    #[test]
    fn evaluate_binary_plus_coerces_to_string_concat() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Binary(BinaryData {
            id: 0,
            left: Box::new(literal(1, Literal::String("count: ".to_string()))),
            operator: Token::new(Type::Plus, "+".to_string(), None, 1),
            right: Box::new(literal(2, Literal::Number(3.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("count: 3"));
    }

    #[test]
    fn evaluate_binary_division_by_zero_yields_infinity() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Binary(BinaryData {
            id: 0,
            left: Box::new(literal(1, Literal::Number(1.0))),
            operator: Token::new(Type::Slash, "/".to_string(), None, 1),
            right: Box::new(literal(2, Literal::Number(0.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(f64::INFINITY));
    }

    #[test]
    fn evaluate_grouping() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Grouping(GroupingData { id: 0, expr: Box::new(literal(1, Literal::Number(12.0))) });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_array_literal_builds_native_array() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Array(ArrayData {
            id: 0,
            elements: vec![literal(1, Literal::Number(1.0)), literal(2, Literal::Number(2.0))],
            bracket: Token::new(Type::LeftBracket, "[".to_string(), None, 1),
        });
        let value = interpreter.evaluate(&expr).unwrap();
        assert!(is_array_instance(&value));
    }

    #[test]
    fn stringify_nil() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        assert_eq!(interpreter.stringify(&Object::Literal(Literal::Nil)).unwrap(), "nil");
    }

    #[test]
    fn stringify_whole_number_drops_fraction() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        assert_eq!(interpreter.stringify(&Object::from(3.0)).unwrap(), "3");
    }
}
