use crate::error::ParseError;
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, Type};

type ParseResult<T> = Result<T, ParseError>;

/// Returns if the next token is any of the given types.
macro_rules! matches {
    ( $self:ident, $( $type:expr ),+ ) => {
        {
            if $( $self.check($type) ) ||* {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Recursive-descent parser producing an `ExprId`-tagged AST.
///
/// - Program       -> Declaration* EOF ;
/// - Block         -> "{" Declaration* "}" ;
/// - Declaration   -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl     -> "class" IDENTIFIER ( "<" IDENTIFIER )? "{" ( "class"? Function )* "}" ;
/// - FunDecl       -> "fun" Function ;
/// - VarDecl       -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Function      -> IDENTIFIER "(" Parameters? ")" Block ;
/// - Parameters    -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement     -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt | WhileStmt | Block ;
/// - ExprStmt      -> Expression ";" ;
/// - ForStmt       -> "for" "(" ( Declaration | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt        -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt     -> "print" Expression ";" ;
/// - ReturnStmt    -> "return" Expression? ";" ;
/// - WhileStmt     -> "while" "(" Expression ")" Statement ;
/// - Expression    -> Assignment ;
/// - Assignment    -> ( Call "." IDENTIFIER | Call "[" Expression "]" | IDENTIFIER ) ( "=" | "+=" | "-=" | "*=" | "/=" ) Assignment | LogicOr ;
/// - LogicOr       -> LogicAnd ( "or" LogicAnd )* ;
/// - LogicAnd      -> Equality ( "and" Equality )* ;
/// - Equality      -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison    -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term          -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor        -> Unary ( ( "*" | "/" ) Unary )* ;
/// - Unary         -> ( "!" | "-" ) Unary | Call ;
/// - Arguments     -> Expression ( "," Expression )* ;
/// - Call          -> Primary ( "(" Arguments? ")" | "." IDENTIFIER | "[" Expression "]" )* ;
/// - Primary       -> NUMBER | STRING | "false" | "true" | "nil" | "this" | "(" Expression ")"
///                   | IDENTIFIER | "super" "." IDENTIFIER | ArrayLiteral | FunctionExpr ;
/// - ArrayLiteral  -> "[" Arguments? "]" ;
/// - FunctionExpr  -> "fun" "(" Parameters? ")" Block ;
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_id: ExprId,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0, next_id: 0, errors: vec![] }
    }

    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        (statements, self.errors)
    }

    fn next_id(&mut self) -> ExprId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    fn check(&self, r#type: Type) -> bool {
        !self.is_at_end() && self.peek().r#type == r#type
    }

    /// Looks one token past the current one without consuming anything.
    /// Used by `declaration()` to tell a named `fun` declaration from a
    /// `fun (...) {...}` expression statement before committing to either.
    fn check_next(&self, r#type: Type) -> bool {
        self.tokens.get(self.current + 1).is_some_and(|token| token.r#type == r#type)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<&Token> {
        if self.check(r#type) {
            return Ok(self.advance());
        }

        Err(ParseError { token: self.peek().clone(), message: message.to_string() })
    }

    /// Parses a declaration, recovering and recording a `ParseError` if the
    /// statement is malformed rather than aborting the whole parse.
    fn declaration(&mut self) -> Option<Stmt> {
        let statement = if matches!(self, Type::Class) {
            self.class_declaration()
        } else if self.check(Type::Fun) && !self.check_next(Type::LeftParen) {
            self.advance();
            self.function("function")
        } else if matches!(self, Type::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match statement {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?.clone();

        let superclass = if matches!(self, Type::Less) {
            self.consume(Type::Identifier, "Expect superclass name.")?;
            let id = self.next_id();
            Some(Expr::Variable(VariableData { id, name: self.previous().clone() }))
        } else {
            None
        };

        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = vec![];
        let mut static_methods = vec![];
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if matches!(self, Type::Class) {
                static_methods.push(self.function("static method")?);
            } else {
                methods.push(self.function("method")?);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData { name, superclass, methods, static_methods }))
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?.clone();

        let initializer = if matches!(self, Type::Equal) { Some(self.expression()?) } else { None };

        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;
        let body = self.statement()?;

        Ok(Stmt::While(WhileData { condition, body: Box::new(body) }))
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::For) {
            return self.for_statement();
        }
        if matches!(self, Type::If) {
            return self.if_statement();
        }
        if matches!(self, Type::Print) {
            return self.print_statement();
        }
        if matches!(self, Type::Return) {
            return self.return_statement();
        }
        if matches!(self, Type::While) {
            return self.while_statement();
        }
        if matches!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if matches!(self, Type::Semicolon) {
            None
        } else if matches!(self, Type::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(Type::RightParen) { Some(self.expression()?) } else { None };
        self.consume(Type::RightParen, "Expect ')' after loop clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![body, Stmt::Expression(ExpressionData { expr: increment })],
            });
        }

        let condition = match condition {
            Some(condition) => condition,
            None => Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(true) }),
        };
        body = Stmt::While(WhileData { condition, body: Box::new(body) });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if matches!(self, Type::Else) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintData { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().to_owned();

        let value = if self.check(Type::Semicolon) { None } else { Some(self.expression()?) };

        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    /// Parses the shared shape of a named function: a plain declaration, an
    /// instance method, or (when called from `class_declaration`) a static
    /// method.
    fn function(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?.to_owned();

        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;
        let params = self.parameters()?;
        self.consume(Type::RightParen, "Expect ')' after parameters.")?;

        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;

        if kind == "static method" && name.lexeme == "init" && !params.is_empty() {
            self.errors.push(ParseError {
                token: name.clone(),
                message: "Static 'init' method takes no parameters.".to_string(),
            });
        }

        Ok(Stmt::Function(FunctionData { name, params, body }))
    }

    fn parameters(&mut self) -> ParseResult<Vec<Token>> {
        let mut params = vec![];

        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    self.errors.push(ParseError {
                        token: self.peek().to_owned(),
                        message: "Can't have more than 255 parameters.".to_string(),
                    });
                }

                params.push(self.consume(Type::Identifier, "Expect parameter name.")?.to_owned());

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        Ok(params)
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block.")?;

        Ok(statements)
    }

    /// Parses an assignment, including `+=`/`-=`/`*=`/`/=`, which desugar
    /// into `target = target OP value` against the same target expression.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        let compound_op = if matches!(self, Type::PlusEqual) {
            Some(Type::Plus)
        } else if matches!(self, Type::MinusEqual) {
            Some(Type::Minus)
        } else if matches!(self, Type::StarEqual) {
            Some(Type::Star)
        } else if matches!(self, Type::SlashEqual) {
            Some(Type::Slash)
        } else {
            None
        };

        if let Some(op_type) = compound_op {
            let op_token = self.previous().clone();
            let rhs = self.assignment()?;
            let operator = Token::new(op_type, op_token.lexeme.trim_end_matches('=').to_string(), None, op_token.line);
            let value = Expr::Binary(BinaryData {
                id: self.next_id(),
                left: Box::new(expr.clone()),
                operator,
                right: Box::new(rhs),
            });
            return self.build_assign_target(expr, op_token, value);
        }

        if matches!(self, Type::Equal) {
            let equals = self.previous().to_owned();
            let value = self.assignment()?;
            return self.build_assign_target(expr, equals, value);
        }

        Ok(expr)
    }

    fn build_assign_target(&mut self, target: Expr, equals: Token, value: Expr) -> ParseResult<Expr> {
        match target {
            Expr::Variable(data) => Ok(Expr::Assign(AssignData { id: self.next_id(), name: data.name, value: Box::new(value) })),
            Expr::Get(data) => Ok(Expr::Set(SetData {
                id: self.next_id(),
                object: data.object,
                index: data.index,
                value: Box::new(value),
                bracket: data.bracket,
            })),
            _ => Err(ParseError { token: equals, message: "Invalid assignment target.".to_string() }),
        }
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while matches!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while matches!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while matches!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while matches!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while matches!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while matches!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { id: self.next_id(), operator, right: Box::new(right) }));
        }

        self.call()
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = vec![];

        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    self.errors.push(ParseError {
                        token: self.peek().to_owned(),
                        message: "Can't have more than 255 arguments.".to_string(),
                    });
                }

                arguments.push(self.expression()?);

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?.clone();

        Ok(Expr::Call(CallData { id: self.next_id(), callee: Box::new(callee), paren, arguments }))
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if matches!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?.clone();
                let index = Expr::Literal(LiteralData { id: self.next_id(), value: Literal::String(name.lexeme.clone()) });
                expr = Expr::Get(GetData { id: self.next_id(), object: Box::new(expr), index: Box::new(index), bracket: name });
            } else if matches!(self, Type::LeftBracket) {
                let bracket = self.previous().clone();
                let index = self.expression()?;
                self.consume(Type::RightBracket, "Expect ']' after index.")?;
                expr = Expr::Get(GetData { id: self.next_id(), object: Box::new(expr), index: Box::new(index), bracket });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::False) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(false) }));
        }

        if matches!(self, Type::True) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(true) }));
        }

        if matches!(self, Type::Nil) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }

        if matches!(self, Type::Number, Type::String) {
            let value = self.previous().clone().literal.expect("number or string to have a literal value");
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value }));
        }

        if matches!(self, Type::Super) {
            let keyword = self.previous().clone();
            self.consume(Type::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(Type::Identifier, "Expect superclass method name.")?.clone();
            return Ok(Expr::Super(SuperData { id: self.next_id(), keyword, method }));
        }

        if matches!(self, Type::This) {
            return Ok(Expr::This(ThisData { id: self.next_id(), keyword: self.previous().clone() }));
        }

        if matches!(self, Type::Fun) {
            return self.function_expr();
        }

        if matches!(self, Type::Identifier) {
            return Ok(Expr::Variable(VariableData { id: self.next_id(), name: self.previous().clone() }));
        }

        if matches!(self, Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { id: self.next_id(), expr: Box::new(expr) }));
        }

        if matches!(self, Type::LeftBracket) {
            return self.array_literal();
        }

        Err(ParseError { token: self.peek().clone(), message: "Expect expression.".to_string() })
    }

    fn array_literal(&mut self) -> ParseResult<Expr> {
        let bracket = self.previous().clone();
        let mut elements = vec![];

        if !self.check(Type::RightBracket) {
            loop {
                elements.push(self.expression()?);
                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        self.consume(Type::RightBracket, "Expect ']' after array elements.")?;

        Ok(Expr::Array(ArrayData { id: self.next_id(), elements, bracket }))
    }

    fn function_expr(&mut self) -> ParseResult<Expr> {
        let keyword = self.previous().clone();
        self.consume(Type::LeftParen, "Expect '(' after 'fun'.")?;
        let params = self.parameters()?;
        self.consume(Type::RightParen, "Expect ')' after parameters.")?;
        self.consume(Type::LeftBrace, "Expect '{' before function body.")?;
        let body = self.block()?;

        Ok(Expr::FunctionExpr(FunctionExprData { id: self.next_id(), keyword, params, body }))
    }

    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class | Type::Fun | Type::Var | Type::For | Type::If | Type::While | Type::Print | Type::Return => return,
                _ => {
                    self.advance();
                }
            };
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> (Vec<Stmt>, Vec<ParseError>) {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty(), "unexpected scan errors: {scan_errors:?}");
        Parser::new(tokens).parse()
    }

    #[test]
    fn parses_expression_statement() {
        let (statements, errors) = parse("1 + 2;");
        assert!(errors.is_empty());
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Stmt::Expression(_)));
    }

    #[test]
    fn parses_var_declaration_without_initializer() {
        let (statements, errors) = parse("var a;");
        assert!(errors.is_empty());
        let Stmt::Var(data) = &statements[0] else { panic!("expected a var statement") };
        assert!(data.initializer.is_none());
    }

    #[test]
    fn binary_respects_precedence_of_star_over_plus() {
        let (statements, errors) = parse("1 + 2 * 3;");
        assert!(errors.is_empty());
        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        let Expr::Binary(top) = &data.expr else { panic!("expected a binary expression") };
        assert_eq!(top.operator.r#type, Type::Plus);
        assert!(matches!(*top.right, Expr::Binary(_)));
    }

    #[test]
    fn array_literal_parses_as_array_expr() {
        let (statements, errors) = parse("[1, 2, 3];");
        assert!(errors.is_empty());
        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        let Expr::Array(array) = &data.expr else { panic!("expected an array expression") };
        assert_eq!(array.elements.len(), 3);
    }

    #[test]
    fn compound_assignment_desugars_to_assign_with_binary_value() {
        let (statements, errors) = parse("a += 1;");
        assert!(errors.is_empty());
        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        let Expr::Assign(assign) = &data.expr else { panic!("expected an assign expression") };
        let Expr::Binary(binary) = assign.value.as_ref() else { panic!("expected a binary value") };
        assert_eq!(binary.operator.r#type, Type::Plus);
    }

    #[test]
    fn static_method_is_collected_separately_from_instance_methods() {
        let (statements, errors) = parse("class Foo { class bar() {} baz() {} }");
        assert!(errors.is_empty());
        let Stmt::Class(data) = &statements[0] else { panic!("expected a class statement") };
        assert_eq!(data.static_methods.len(), 1);
        assert_eq!(data.methods.len(), 1);
    }

    #[test]
    fn fun_followed_by_paren_parses_as_an_expression_statement() {
        let (statements, errors) = parse("fun (x) { return x; }(5);");
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        let Expr::Call(call) = &data.expr else { panic!("expected a call expression") };
        assert!(matches!(*call.callee, Expr::FunctionExpr(_)));
    }

    #[test]
    fn fun_followed_by_identifier_parses_as_a_named_declaration() {
        let (statements, errors) = parse("fun f() {}");
        assert!(errors.is_empty());
        assert!(matches!(statements[0], Stmt::Function(_)));
    }

    #[test]
    fn missing_semicolon_is_a_parse_error() {
        let (_, errors) = parse("var a = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect ';' after variable declaration.");
    }

    #[test]
    fn too_many_parameters_is_a_parse_error() {
        let params = (0..256).map(|i| format!("a{i}")).collect::<Vec<_>>().join(", ");
        let (_, errors) = parse(&format!("fun f({params}) {{}}"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Can't have more than 255 parameters.");
    }

    #[test]
    fn invalid_assignment_target_is_a_parse_error() {
        let (_, errors) = parse("1 = 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Invalid assignment target.");
    }
}
