use std::fmt;

use crate::object::Object;
use crate::token::{Line, Token, Type};

fn token_where(token: &Token) -> String {
    if token.r#type == Type::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// An error raised while scanning source text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanError {
    pub line: Line,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

/// An error raised while turning tokens into an AST.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.token.line, token_where(&self.token), self.message)
    }
}

/// An error raised by the static resolver (use-before-define, misused
/// `this`/`super`/`return`, self-inheriting class, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.token.line, token_where(&self.token), self.message)
    }
}

/// An error raised while evaluating the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.token.line)
    }
}

/// Non-local control flow raised while executing statements: either a
/// genuine runtime error, or the sentinel used to unwind a `return` to its
/// enclosing function call. Modeled as an explicit outcome rather than a
/// second panicking error type so `?` composes across statement execution
/// and `Function::call` is the only place that has to distinguish them.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

/// Result type for statement execution and expression evaluation.
pub type Exec<T> = Result<T, Unwind>;
