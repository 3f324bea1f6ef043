use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use crate::error::{Reporter, ResolveError};
use crate::expr::{self, Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::token::Token;

/// Controls the diagnostics the resolver emits beyond the always-on checks.
/// The strict profile rejects local variables that are never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Strict,
    NonStrict,
}

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Anonymous,
    Method,
    ClassMethod,
    Initializer,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

#[derive(Clone, Copy, PartialEq, PartialOrd)]
enum VarState {
    Declared,
    Defined,
    Read,
}

struct Variable {
    name: Token,
    state: VarState,
}

/// Walks the tree after parsing and records, for every local variable use,
/// how many scopes away the binding lives. Everything it cannot find is
/// implicitly global and left for the interpreter to look up at runtime.
/// The same pass rejects the semantically invalid programs a parser cannot
/// see: duplicate locals, `this`/`super` misuse, self-inheritance, and the
/// rest.
pub struct Resolver<'a, 'w> {
    interpreter: &'a mut Interpreter<'w>,
    scopes: Vec<HashMap<String, Variable>>,
    current_function: FunctionType,
    current_class: ClassType,
    profile: Profile,
    reporter: &'a mut dyn Reporter,
    first_error: Option<ResolveError>,
}

impl<'a, 'w> Resolver<'a, 'w> {
    pub fn new(
        interpreter: &'a mut Interpreter<'w>,
        reporter: &'a mut dyn Reporter,
        profile: Profile,
    ) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            profile,
            reporter,
            first_error: None,
        }
    }

    /// Resolves a whole program. Every error found along the way is
    /// reported; the first one comes back as the failure.
    pub fn resolve(&mut self, statements: &[Stmt]) -> Result<(), ResolveError> {
        self.resolve_stmts(statements);

        match self.first_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn error(&mut self, token: Token, message: &str) {
        let error = ResolveError { token, message: message.to_string() };
        error.report(&mut *self.reporter);
        self.first_error.get_or_insert(error);
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Ends the innermost scope. In the strict profile a binding that was
    /// never read is an error.
    fn end_scope(&mut self) {
        let scope = self.scopes.pop().expect("stack to be not empty");

        if self.profile == Profile::NonStrict {
            return;
        }

        let mut unused: Vec<Token> = scope
            .into_values()
            .filter(|variable| variable.state < VarState::Read)
            .map(|variable| variable.name)
            .collect();
        unused.sort_by_key(|name| (name.line, name.lexeme.clone()));

        for name in unused {
            self.error(name, "Local variable is never used");
        }
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.error(
                name.clone(),
                &format!("A variable is already defined with name '{}' in this scope", name.lexeme),
            );
            return;
        }

        scope.insert(
            name.lexeme.clone(),
            Variable { name: name.clone(), state: VarState::Declared },
        );
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        scope.insert(
            name.lexeme.clone(),
            Variable { name: name.clone(), state: VarState::Defined },
        );
    }

    /// Binds a name the language itself introduces (`this`, `super`). These
    /// are exempt from the unused check.
    fn declare_implicit(&mut self, name: &str) {
        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert(
                name.to_string(),
                Variable { name: Token::from(name), state: VarState::Read },
            );
    }

    /// Records the scope distance for a node. The innermost scope holding
    /// the name wins; a miss means the name is global.
    fn resolve_local(&mut self, id: usize, name: &Token, is_read: bool) {
        for (i, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(variable) = scope.get_mut(&name.lexeme) {
                if is_read {
                    variable.state = VarState::Read;
                }
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }

    fn resolve_function(&mut self, function: &expr::FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}

impl ExprVisitor<()> for Resolver<'_, '_> {
    fn visit_literal_expr(&mut self, _literal: &crate::literal::Literal) {}

    fn visit_grouping_expr(&mut self, grouping: &expr::GroupingData) {
        self.resolve_expr(&grouping.expr);
    }

    fn visit_unary_expr(&mut self, unary: &expr::UnaryData) {
        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, binary: &expr::BinaryData) {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_logical_expr(&mut self, logical: &expr::LogicalData) {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_variable_expr(&mut self, variable: &expr::VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(entry) = scope.get(&variable.name.lexeme) {
                if entry.state == VarState::Declared {
                    self.error(
                        variable.name.clone(),
                        "Cannot read local variable in its own initializer",
                    );
                }
            }
        }

        self.resolve_local(variable.id, &variable.name, true);
    }

    fn visit_assign_expr(&mut self, assign: &expr::AssignData) {
        self.resolve_expr(&assign.value);
        self.resolve_local(assign.id, &assign.name, false);
    }

    fn visit_call_expr(&mut self, call: &expr::CallData) {
        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, get: &expr::GetData) {
        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, set: &expr::SetData) {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_this_expr(&mut self, this: &expr::ThisData) {
        if self.current_class == ClassType::None {
            self.error(this.keyword.clone(), "Cannot use 'this' outside of a class");
            return;
        }

        self.resolve_local(this.id, &this.keyword, true);
    }

    fn visit_super_expr(&mut self, super_expr: &expr::SuperData) {
        match self.current_class {
            ClassType::None => {
                self.error(super_expr.keyword.clone(), "Cannot use 'super' outside of a class");
            }
            ClassType::Class => {
                self.error(
                    super_expr.keyword.clone(),
                    "Cannot use 'super' in a class with no superclass",
                );
            }
            ClassType::Subclass if self.current_function == FunctionType::ClassMethod => {
                self.error(super_expr.keyword.clone(), "Cannot use 'super' in a class method");
            }
            ClassType::Subclass => (),
        }

        self.resolve_local(super_expr.id, &super_expr.keyword, true);
    }

    fn visit_function_expr(&mut self, function: &Rc<expr::FunctionData>) {
        self.resolve_function(function, FunctionType::Anonymous);
    }
}

impl StmtVisitor<()> for Resolver<'_, '_> {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) {
        self.resolve_expr(&stmt.expr);
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) {
        self.resolve_expr(&stmt.expr);
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) {
        self.declare(&stmt.name);
        if let Some(initializer) = &stmt.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&stmt.name);
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) {
        self.begin_scope();
        self.resolve_stmts(&stmt.statements);
        self.end_scope();
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) {
        self.resolve_expr(&stmt.condition);
        self.resolve_stmt(&stmt.then_branch);
        if let Some(else_branch) = &stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) {
        self.resolve_expr(&stmt.condition);
        self.resolve_stmt(&stmt.body);
    }

    fn visit_for_stmt(&mut self, stmt: &stmt::ForData) {
        self.begin_scope();

        if let Some(initializer) = &stmt.initializer {
            self.resolve_stmt(initializer);
        }
        if let Some(condition) = &stmt.condition {
            self.resolve_expr(condition);
        }
        if let Some(increment) = &stmt.increment {
            self.resolve_expr(increment);
        }
        self.resolve_stmt(&stmt.body);

        self.end_scope();
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) {
        self.declare(&stmt.name);
        self.define(&stmt.name);

        self.resolve_function(&stmt.function, FunctionType::Function);
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) {
        if let Some(value) = &stmt.value {
            if self.current_function == FunctionType::Initializer {
                self.error(
                    stmt.keyword.clone(),
                    "Cannot return a value from an initializer",
                );
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&stmt.name);
        self.define(&stmt.name);

        if let Some(superclass) = &stmt.superclass {
            if let Expr::Variable(variable) = superclass {
                if stmt.name.lexeme == variable.name.lexeme {
                    self.error(variable.name.clone(), "A class cannot inherit from itself");
                }
            } else {
                unreachable!("superclass is always parsed as a variable");
            }

            self.current_class = ClassType::Subclass;

            self.resolve_expr(superclass);

            self.begin_scope();
            self.declare_implicit("super");
        }

        self.begin_scope();
        self.declare_implicit("this");

        for method in &stmt.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let declaration = if function.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(&function.function, declaration);
        }

        for class_method in &stmt.class_methods {
            let Stmt::Function(function) = class_method else { unreachable!() };

            self.resolve_function(&function.function, FunctionType::ClassMethod);
        }

        self.end_scope();

        if stmt.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn visit_break_stmt(&mut self, _stmt: &stmt::BreakData) {}

    fn visit_continue_stmt(&mut self, _stmt: &stmt::ContinueData) {}
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CollectingReporter;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn resolve(source: &str, profile: Profile) -> CollectingReporter {
        let mut reporter = CollectingReporter::default();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens().unwrap();
        let statements = Parser::new(tokens, &mut reporter).parse().unwrap();

        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        let result = Resolver::new(&mut interpreter, &mut reporter, profile).resolve(&statements);

        assert_eq!(result.is_err(), !reporter.errors.is_empty());
        reporter
    }

    #[test]
    fn duplicate_local_is_an_error() {
        let reporter = resolve("{ var a = 1; var a = 2; print a; }", Profile::NonStrict);
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'a': A variable is already defined with name 'a' in this scope"],
        );
    }

    #[test]
    fn duplicate_global_is_allowed() {
        let reporter = resolve("var a = 1; var a = 2; print a;", Profile::Strict);
        assert!(reporter.errors.is_empty());
    }

    #[test]
    fn reading_a_local_in_its_own_initializer_is_an_error() {
        let reporter = resolve("var a = 1; { var a = a; print a; }", Profile::NonStrict);
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'a': Cannot read local variable in its own initializer"],
        );
    }

    #[test]
    fn this_outside_a_class_is_an_error() {
        let reporter = resolve("print this;", Profile::Strict);
        assert_eq!(reporter.errors, ["[line 1] Error at 'this': Cannot use 'this' outside of a class"]);
    }

    #[test]
    fn super_without_a_superclass_is_an_error() {
        let reporter = resolve(
            "class Foo { bar() { return super.bar(); } }",
            Profile::Strict,
        );
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'super': Cannot use 'super' in a class with no superclass"],
        );
    }

    #[test]
    fn super_in_a_class_method_is_an_error() {
        let reporter = resolve(
            "class A { f() { return 1; } } class B < A { class f() { return super.f(); } }",
            Profile::Strict,
        );
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'super': Cannot use 'super' in a class method"],
        );
    }

    #[test]
    fn inheriting_from_itself_is_an_error() {
        let reporter = resolve("class Foo < Foo {}", Profile::Strict);
        assert_eq!(reporter.errors, ["[line 1] Error at 'Foo': A class cannot inherit from itself"]);
    }

    #[test]
    fn returning_a_value_from_init_is_an_error() {
        let reporter = resolve(
            "class Foo { init() { return 1; } }",
            Profile::Strict,
        );
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'return': Cannot return a value from an initializer"],
        );
    }

    #[test]
    fn bare_return_from_init_is_allowed() {
        let reporter = resolve("class Foo { init() { return; } }", Profile::Strict);
        assert!(reporter.errors.is_empty());
    }

    #[test]
    fn unused_local_is_an_error_in_the_strict_profile() {
        let reporter = resolve("{ var unused = 1; }", Profile::Strict);
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'unused': Local variable is never used"],
        );
    }

    #[test]
    fn assignment_alone_does_not_count_as_a_read() {
        let reporter = resolve("{ var a = 1; a = 2; }", Profile::Strict);
        assert_eq!(
            reporter.errors,
            ["[line 1] Error at 'a': Local variable is never used"],
        );
    }

    #[test]
    fn non_strict_profile_allows_unused_locals() {
        let reporter = resolve("{ var unused = 1; }", Profile::NonStrict);
        assert!(reporter.errors.is_empty());
    }

    #[test]
    fn unused_globals_are_not_reported() {
        let reporter = resolve("var unused = 1;", Profile::Strict);
        assert!(reporter.errors.is_empty());
    }
}
