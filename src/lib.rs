//! A tree-walk interpreter for Lox, a small dynamically typed scripting
//! language with lexical scoping, first-class functions, closures, and
//! single-inheritance classes. The pipeline is the classic four stages:
//! scan, parse, resolve, interpret.
//!
//! ## Scanning
//! The [`scanner`] turns the source text into a flat list of tokens in a
//! single forward pass. Strings may span lines and carry no escape
//! sequences, block comments nest, and every scan ends with an `EOF` token.
//! Problems at this stage are [`ScanError`](error::ScanError)s: an
//! unexpected character, an unterminated string or block comment. The
//! scanner reports them and keeps going, so one bad character does not hide
//! the next one.
//!
//! ## Parsing
//! The [`parser`] is a hand-written recursive descent parser producing
//! [`Expr`](expr::Expr) and [`Stmt`](stmt::Stmt) trees. On a
//! [`ParseError`](error::ParseError) it reports, synchronizes to the next
//! statement boundary, and keeps parsing so several errors surface in one
//! run; if anything was reported the parse as a whole fails and nothing is
//! executed.
//!
//! ## Resolving
//! The [`resolver`] is a static pass over the finished tree. It computes,
//! for every local variable use, how many scopes away the binding lives,
//! and hands those distances to the interpreter. The same pass rejects
//! programs that are grammatically fine but semantically broken, like
//! reading a variable in its own initializer or using `this` outside a
//! class. The strict [`Profile`] additionally rejects locals that are never
//! read.
//!
//! ## Interpreting
//! The [`interpreter`] walks the tree and evaluates it. Values are
//! [`Object`]s: literals, functions, classes, instances, and arrays.
//! Functions capture their defining [`environment`], which is what makes
//! closures work; classes carry their methods plus a metaclass for
//! class-level methods. `break`, `continue`, and `return` travel as control
//! signals distinct from [`RuntimeError`](error::RuntimeError)s, so a loop
//! can catch a `break` while a type error keeps unwinding to the top.
//!
//! Diagnostics never go straight to a stream; everything funnels through a
//! [`Reporter`], and program output goes to a writer the embedder supplies.

use std::fs;
use std::io::Write;
use std::process;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod array;
pub mod ast;
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

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

pub use error::{CollectingReporter, Reporter, StderrReporter};
pub use object::Object;
pub use resolver::Profile;

/// How a run failed. Compile failures cover scanning, parsing, and
/// resolution; they map to exit code 65 where runtime failures map to 70.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Compile,
    Runtime,
}

/// The interpreter driver: owns the pipeline state that survives between
/// runs, which is what lets the prompt keep definitions from previous
/// lines. Program output goes to the writer given at construction;
/// diagnostics go to the [`Reporter`].
pub struct Lox<'w> {
    interpreter: Interpreter<'w>,
    reporter: Box<dyn Reporter>,
    profile: Profile,
}

impl<'w> Lox<'w> {
    pub fn new(stdout: &'w mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(stdout),
            reporter: Box::new(StderrReporter),
            profile: Profile::default(),
        }
    }

    /// Selects the resolver profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Redirects diagnostics to the given reporter.
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Allows or forbids property access on class objects themselves.
    /// Forbidding it matches the published language; allowing it (the
    /// default) enables static fields alongside class-level methods.
    pub fn with_class_fields(mut self, class_fields: bool) -> Self {
        self.interpreter.set_class_fields(class_fields);
        self
    }

    /// Runs a piece of source through the whole pipeline. Diagnostics are
    /// reported along the way; the result carries the value of the last
    /// top-level expression statement, if any.
    pub fn run(&mut self, source: &str) -> Result<Option<Object>, Failure> {
        let tokens = Scanner::new(source, self.reporter.as_mut())
            .scan_tokens()
            .map_err(|_| Failure::Compile)?;

        let statements = Parser::new(tokens, self.reporter.as_mut())
            .parse()
            .map_err(|_| Failure::Compile)?;

        Resolver::new(&mut self.interpreter, self.reporter.as_mut(), self.profile)
            .resolve(&statements)
            .map_err(|_| Failure::Compile)?;

        match self.interpreter.interpret(&statements) {
            Ok(value) => Ok(value),
            Err(error) => {
                error.report(self.reporter.as_mut());
                Err(Failure::Runtime)
            }
        }
    }

    /// Executes a script file, exiting the process on failure: 65 for a
    /// compile error, 70 for a runtime error, 66 for an unreadable file.
    pub fn run_file(&mut self, path: &str) {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => {
                self.reporter.report_error(&format!("Could not read {path}: {error}"));
                process::exit(66);
            }
        };

        match self.run(&source) {
            Ok(_) => (),
            Err(Failure::Compile) => process::exit(65),
            Err(Failure::Runtime) => process::exit(70),
        }
    }

    /// Runs the interactive prompt. Each line is executed against the same
    /// interpreter, the value of a trailing expression is echoed back, and
    /// errors are reported without ending the session. History persists in
    /// the user's home directory.
    pub fn run_prompt(&mut self) {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(error) => {
                self.reporter.report_error(&format!("Could not start the prompt: {error}"));
                return;
            }
        };

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(history) = &history {
            // A missing or unreadable history file is normal on first run.
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    if let Ok(Some(value)) = self.run(&line) {
                        let text = value.to_string();
                        self.interpreter.print_line(&text);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(error) => {
                    self.reporter.report_error(&format!("Could not read the line: {error}"));
                    break;
                }
            }
        }

        if let Some(history) = &history {
            if let Err(error) = editor.save_history(history) {
                self.reporter
                    .report_warning(&format!("Could not save the prompt history: {error}"));
            }
        }
    }
}
