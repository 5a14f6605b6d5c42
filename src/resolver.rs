use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::{Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
    Subclass,
}

/// Static analysis pass between parsing and interpretation: resolves every
/// variable reference to a scope depth (walked by the interpreter's
/// `Environment::get_at`/`assign_at`) and rejects a handful of
/// statically-detectable errors (`return` outside a function, `this`
/// outside a class, self-inheriting classes, reading a local in its own
/// initializer).
///
/// Unlike a resolver keyed by variable name or token, this one keys its
/// output by `ExprId` — the same name used twice in one expression (`a +
/// a`) is two distinct nodes and must resolve independently, which a
/// token-keyed side table cannot express once tokens are cloned freely.
pub struct Resolver<'a, 'b> {
    interpreter: &'a mut Interpreter<'b>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    errors: Vec<ResolveError>,
}

impl<'a, 'b> Resolver<'a, 'b> {
    pub fn new(interpreter: &'a mut Interpreter<'b>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            errors: vec![],
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> Vec<ResolveError> {
        for statement in statements {
            self.resolve_stmt(statement);
        }
        self.errors
    }

    fn resolve_function_body(&mut self, params: &[Token], body: &[Stmt], r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        for stmt in body {
            self.resolve_stmt(stmt);
        }
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("stack to be not empty");
        if scope.contains_key(&name.lexeme) {
            self.errors.push(ResolveError {
                token: name.clone(),
                message: format!("Already a variable with name '{}' in this scope.", name.lexeme),
            });
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes.last_mut().expect("stack to be not empty").insert(name.lexeme.to_owned(), true);
    }

    fn resolve_local(&mut self, id: crate::expr::ExprId, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}

impl<'a, 'b> ExprVisitor<()> for Resolver<'a, 'b> {
    fn visit_variable_expr(&mut self, expr: &Expr) {
        let Expr::Variable(variable) = expr else { unreachable!() };

        if let Some(scope) = self.scopes.last() {
            if let Some(false) = scope.get(&variable.name.lexeme) {
                self.errors.push(ResolveError {
                    token: variable.name.clone(),
                    message: "Can't read local variable in its own initializer.".to_string(),
                });
            }
        }

        self.resolve_local(variable.id, &variable.name);
    }

    fn visit_assign_expr(&mut self, expr: &Expr) {
        let Expr::Assign(assign) = expr else { unreachable!() };

        self.resolve_expr(&assign.value);
        self.resolve_local(assign.id, &assign.name);
    }

    fn visit_literal_expr(&mut self, expr: &Expr) {
        let Expr::Literal(_) = expr else { unreachable!() };
    }

    fn visit_logical_expr(&mut self, expr: &Expr) {
        let Expr::Logical(logical) = expr else { unreachable!() };

        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_unary_expr(&mut self, expr: &Expr) {
        let Expr::Unary(unary) = expr else { unreachable!() };

        self.resolve_expr(&unary.right);
    }

    fn visit_binary_expr(&mut self, expr: &Expr) {
        let Expr::Binary(binary) = expr else { unreachable!() };

        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.resolve_expr(&grouping.expr);
    }

    fn visit_call_expr(&mut self, expr: &Expr) {
        let Expr::Call(call) = expr else { unreachable!() };

        self.resolve_expr(&call.callee);
        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) {
        let Expr::Get(get) = expr else { unreachable!() };

        self.resolve_expr(&get.object);
        self.resolve_expr(&get.index);
    }

    fn visit_set_expr(&mut self, expr: &Expr) {
        let Expr::Set(set) = expr else { unreachable!() };

        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
        self.resolve_expr(&set.index);
    }

    fn visit_this_expr(&mut self, expr: &Expr) {
        let Expr::This(this) = expr else { unreachable!() };

        if let ClassType::None = self.current_class {
            self.errors.push(ResolveError {
                token: this.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });
            return;
        }

        self.resolve_local(this.id, &this.keyword);
    }

    fn visit_super_expr(&mut self, expr: &Expr) {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        match self.current_class {
            ClassType::Subclass => (),
            ClassType::None => self.errors.push(ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' outside of a class.".to_string(),
            }),
            ClassType::Class => self.errors.push(ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' in a class with no superclass.".to_string(),
            }),
        }

        self.resolve_local(super_expr.id, &super_expr.keyword);
    }

    fn visit_function_expr(&mut self, expr: &Expr) {
        let Expr::FunctionExpr(function) = expr else { unreachable!() };

        self.resolve_function_body(&function.params, &function.body, FunctionType::Function);
    }

    fn visit_array_expr(&mut self, expr: &Expr) {
        let Expr::Array(array) = expr else { unreachable!() };

        for element in &array.elements {
            self.resolve_expr(element);
        }
    }
}

impl<'a, 'b> StmtVisitor<()> for Resolver<'a, 'b> {
    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(block) = stmt else { unreachable!() };

        self.begin_scope();
        for stmt in &block.statements {
            self.resolve_stmt(stmt);
        }
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(var) = stmt else { unreachable!() };

        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Function(function) = stmt else { unreachable!() };

        self.declare(&function.name);
        self.define(&function.name);

        self.resolve_function_body(&function.params, &function.body, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(expr) = stmt else { unreachable!() };

        self.resolve_expr(&expr.expr);
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(if_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(print) = stmt else { unreachable!() };

        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Return(return_stmt) = stmt else { unreachable!() };

        if let FunctionType::None = self.current_function {
            self.errors.push(ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }

        if let Some(value) = &return_stmt.value {
            if let FunctionType::Initializer = self.current_function {
                self.errors.push(ResolveError {
                    token: return_stmt.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(while_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&while_stmt.condition);
        self.resolve_stmt(&while_stmt.body);
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Class(class_stmt) = stmt else { unreachable!() };

        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class_stmt.name);
        self.define(&class_stmt.name);

        if let Some(ref superclass) = class_stmt.superclass {
            if let Expr::Variable(variable) = superclass {
                if class_stmt.name.lexeme == variable.name.lexeme {
                    self.errors.push(ResolveError {
                        token: variable.name.clone(),
                        message: "A class can't inherit from itself.".to_string(),
                    });
                }
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes.last_mut().expect("stack to be not empty").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("stack to be not empty").insert("this".to_string(), true);

        for method in &class_stmt.methods {
            let Stmt::Function(function) = method else { unreachable!() };
            let declaration = if function.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
            self.resolve_function_body(&function.params, &function.body, declaration);
        }

        self.end_scope();

        if class_stmt.superclass.is_some() {
            self.end_scope();
        }

        // Static methods resolve in their own `this`-scope (bound to the
        // class value itself at call time) outside the instance scopes
        // above. When the class has a superclass they also get an outer
        // `super` scope, bound at call time to the superclass's metaclass,
        // so `super.foo()` inside a static method resolves to an inherited
        // static method rather than an instance one.
        if class_stmt.superclass.is_some() {
            self.begin_scope();
            self.scopes.last_mut().expect("stack to be not empty").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("stack to be not empty").insert("this".to_string(), true);

        for method in &class_stmt.static_methods {
            let Stmt::Function(function) = method else { unreachable!() };
            self.resolve_function_body(&function.params, &function.body, FunctionType::Method);
        }

        self.end_scope();

        if class_stmt.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn resolve_errors(source: &str) -> Vec<ResolveError> {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty(), "unexpected scan errors: {scan_errors:?}");
        let (statements, parse_errors) = Parser::new(tokens).parse();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");

        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        Resolver::new(&mut interpreter).resolve(&statements)
    }

    #[test]
    fn return_at_top_level_is_a_resolve_error() {
        let errors = resolve_errors("return 1;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Can't return from top-level code.");
    }

    #[test]
    fn return_value_from_initializer_is_a_resolve_error() {
        let errors = resolve_errors("class Foo { init() { return 1; } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Can't return a value from an initializer.");
    }

    #[test]
    fn bare_return_in_initializer_is_allowed() {
        let errors = resolve_errors("class Foo { init() { return; } }");
        assert!(errors.is_empty());
    }

    #[test]
    fn self_inheriting_class_is_a_resolve_error() {
        let errors = resolve_errors("class Foo < Foo {}");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "A class can't inherit from itself.");
    }

    #[test]
    fn this_outside_a_class_is_a_resolve_error() {
        let errors = resolve_errors("print this;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Can't use 'this' outside of a class.");
    }

    #[test]
    fn super_without_a_superclass_is_a_resolve_error() {
        let errors = resolve_errors("class Foo { bar() { super.bar(); } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Can't use 'super' in a class with no superclass.");
    }

    #[test]
    fn redeclaring_a_local_in_the_same_scope_is_a_resolve_error() {
        let errors = resolve_errors("{ var a = 1; var a = 2; }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Already a variable with name 'a' in this scope.");
    }

    #[test]
    fn reading_a_local_in_its_own_initializer_is_a_resolve_error() {
        let errors = resolve_errors("var a = 1; { var a = a; }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Can't read local variable in its own initializer.");
    }

    #[test]
    fn well_formed_class_with_inheritance_resolves_cleanly() {
        let errors = resolve_errors("class Base {} class Derived < Base { init() { super.init(); } }");
        assert!(errors.is_empty());
    }
}
