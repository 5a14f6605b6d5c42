#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping, first-class functions, classes with single inheritance, and a small
//! built-in standard library. Rocks is a tree-walk interpreter with a hand-written recursive
//! descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an iterator over the characters
//! in the source code. It is a simple state machine that returns the next token in the source code
//! when called.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected character.
//! Scan errors are collected rather than raised immediately: the scanner keeps going after one, so a
//! single run can report every offending character at once instead of stopping at the first.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically an
//! [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of code
//! that do not produce a value but instead perform some action. These actions modify the state of the
//! program and thus, are called side-effects. For example, a variable decleration or an if clause
//! would be classified as statements.
//!
//! For example, the string `print 1 + 2;` would be converted into the following AST:
//! ```text
//! PrintStatement {
//!     BinaryExpression {
//!         left: Number(1),
//!         operator: Plus,
//!         right: Number(2),
//!     }
//! }
//! ```
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens. For example, the
//! following expression is invalid because it is missing the right-hand operand:
//! ```text
//! 1 !=
//! ```
//! However, much like the scanner, the parser will continue parsing the source code even if it
//! has already encountered a syntax error using a technique called synchronization. This is useful
//! because it allows the user to fix multiple syntax errors at once.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexical scoping. The resolver is implemented in the
//! [`resolver`](resolver) module as a tree-walk pass over the AST, run between the parser and the
//! interpreter since it requires the AST to already exist. The resolver reports errors as a
//! [`ResolveError`](error::ResolveError). These errors are syntactically valid but semantically invalid,
//! and therefore, cannot be caught by the scanner or the parser. For example, the following expression
//! is valid Rocks syntax but it is semantically invalid because the variable `a` is defined
//! twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is _interpreting_. Interpreting is the process of evaluating the
//! AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a tree-walk
//! interpreter. Thanks to all the previous steps, the interpreter is able to evaluate the AST and produce
//! a result. The interpreter reports errors as a [`RuntimeError`](error::RuntimeError). While the
//! scanner, the parser and the resolver try to catch as many errors as possible before running the
//! code, most errors can only be caught at runtime. For example, the following expression is valid
//! Rocks syntax but it is semantically invalid because it tries to add a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter is also responsible for managing the environment. The environment is a mapping of
//! variable names to their values. The environment is implemented in the [`environment`](environment)
//! module as a chain of hash maps, one per lexical scope, which lets the interpreter implement closures
//! and block scoping. The interpreter also owns the registration of the built-in
//! [`Console`/`String`/`Math`/`Array`](builtins) classes and free functions every program starts with.

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod array;
pub mod builtins;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Drives the four interpreter stages over a piece of source text and owns
/// the two pieces of state a run can leave behind: whether a compile-time
/// error was seen (scan/parse/resolve) and whether a runtime error was
/// seen. `main.rs` reads these after `run_file`/`run_prompt` to decide the
/// process exit code. Unlike the book's reference implementation, these
/// flags live on the driver instead of behind `static mut` globals, so a
/// test can build any number of independent `rocks` instances, each with
/// its own output sink, in the same process.
#[allow(non_camel_case_types)]
pub struct rocks<'a> {
    interpreter: interpreter::Interpreter<'a>,
    had_error: bool,
    had_runtime_error: bool,
}

impl<'a> rocks<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        rocks { interpreter: interpreter::Interpreter::new(out), had_error: false, had_runtime_error: false }
    }

    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(&path).expect("Should have been able to read the file");

        self.run(contents);

        if self.had_error {
            process::exit(65);
        }
        if self.had_runtime_error {
            process::exit(70);
        }
    }

    pub fn run_prompt(&mut self) {
        let history_path = home::home_dir().map(|home| home.join(".rocks_history"));

        let mut editor = DefaultEditor::new().expect("readline editor to initialize");
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(line);
                    self.had_error = false;
                    self.had_runtime_error = false;
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("Error: {error}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: String) {
        let scanner = Scanner::new(&source);
        let (tokens, scan_errors) = scanner.scan_tokens();

        for error in &scan_errors {
            eprintln!("{error}");
        }
        if !scan_errors.is_empty() {
            self.had_error = true;
            return;
        }

        let parser = Parser::new(tokens);
        let (statements, parse_errors) = parser.parse();

        for error in &parse_errors {
            eprintln!("{error}");
        }
        if !parse_errors.is_empty() {
            self.had_error = true;
            return;
        }

        let resolver = Resolver::new(&mut self.interpreter);
        let resolve_errors = resolver.resolve(&statements);

        for error in &resolve_errors {
            eprintln!("{error}");
        }
        if !resolve_errors.is_empty() {
            self.had_error = true;
            return;
        }

        if let Err(error) = self.interpreter.interpret(&statements) {
            eprintln!("{error}");
            self.had_runtime_error = true;
        }
    }
}
