use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::array::Array;
use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::{self, Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// The reasons evaluation stops early. `break`/`continue` are caught by the
/// innermost loop and `return` by the innermost call; a runtime error rides
/// the same channel but is caught by nothing short of the top level. Keeping
/// the signals as enum arms (instead of error values) means no handler can
/// mistake one for a failure.
#[derive(Debug)]
pub enum Unwind {
    Break,
    Continue,
    Return(Object),
    Error(RuntimeError),
}

impl Unwind {
    /// Unpacks the unwind at the top of the interpreter, where only a
    /// runtime error can still be in flight.
    fn into_error(self) -> RuntimeError {
        match self {
            Unwind::Error(error) => error,
            signal => unreachable!("control signal escaped the top level: {signal:?}"),
        }
    }
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type Execution = Result<(), Unwind>;
type Evaluation = Result<Object, Unwind>;

/// Walks the resolved tree and makes it happen. Program output goes to the
/// injected writer; diagnostics are the caller's problem.
pub struct Interpreter<'w> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    class_fields: bool,
    stdout: &'w mut dyn Write,
}

impl<'w> Interpreter<'w> {
    pub fn new(stdout: &'w mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name;
            globals.borrow_mut().define(name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            class_fields: true,
            stdout,
        }
    }

    /// Allows or forbids property access on class objects themselves.
    pub fn set_class_fields(&mut self, class_fields: bool) {
        self.class_fields = class_fields;
    }

    /// Records how many scopes away a node's binding lives. Called by the
    /// resolver; nodes without an entry are globals.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Writes a line of program output.
    pub fn print_line(&mut self, text: &str) {
        let _ = writeln!(self.stdout, "{text}");
    }

    /// Executes the statements in order. Returns the value of the last
    /// top-level expression statement, which is what the REPL echoes back.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<Option<Object>, RuntimeError> {
        let mut result = None;

        for statement in statements {
            match statement {
                Stmt::Expression(data) => {
                    result = Some(self.evaluate(&data.expr).map_err(Unwind::into_error)?);
                }
                _ => {
                    self.execute(statement).map_err(Unwind::into_error)?;
                    result = None;
                }
            }
        }

        Ok(result)
    }

    fn execute(&mut self, stmt: &Stmt) -> Execution {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Evaluation {
        expr.accept(self)
    }

    /// Executes the statements with the given environment as the current
    /// one, restoring the previous environment afterwards no matter how the
    /// block ends.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Execution {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    /// Reads a variable through the resolver's depth map, or from the
    /// globals when no depth was recorded.
    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn check_arity(
        &self,
        arity: Option<usize>,
        got: usize,
        paren: &Token,
    ) -> Result<(), RuntimeError> {
        if let Some(expected) = arity {
            if expected != got {
                return Err(RuntimeError {
                    token: paren.clone(),
                    message: format!("Expected {expected} arguments but got {got}."),
                });
            }
        }

        Ok(())
    }

    fn call_object(&mut self, callee: Object, paren: &Token, arguments: Vec<Object>) -> Evaluation {
        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(native) => native,
            Object::ArrayMethod(method) => method,
            Object::Class(class) => {
                self.check_arity(class.borrow().arity(), arguments.len(), paren)?;
                return Ok(Class::construct(class, self, paren, arguments)?);
            }
            _ => {
                return Err(Unwind::from(RuntimeError {
                    token: paren.clone(),
                    message: String::from("Can only call functions and classes."),
                }));
            }
        };

        self.check_arity(callable.arity(), arguments.len(), paren)?;
        Ok(callable.call(self, paren, arguments)?)
    }

    fn run_for(&mut self, stmt: &stmt::ForData) -> Execution {
        if let Some(initializer) = &stmt.initializer {
            self.execute(initializer)?;
        }

        loop {
            if let Some(condition) = &stmt.condition {
                if !self.evaluate(condition)?.is_truthy() {
                    break;
                }
            }

            match self.execute(&stmt.body) {
                // A continue still runs the increment below.
                Ok(()) | Err(Unwind::Continue) => (),
                Err(Unwind::Break) => break,
                Err(other) => return Err(other),
            }

            if let Some(increment) = &stmt.increment {
                self.evaluate(increment)?;
            }
        }

        Ok(())
    }
}

impl ExprVisitor<Evaluation> for Interpreter<'_> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Evaluation {
        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, grouping: &expr::GroupingData) -> Evaluation {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &expr::UnaryData) -> Evaluation {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => Ok((-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: String::from("Operand must be a number."),
            })?),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &expr::BinaryData) -> Evaluation {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let numbers = |left: &Object, right: &Object| -> Result<(f64, f64), RuntimeError> {
            match (left.as_number(), right.as_number()) {
                (Some(left), Some(right)) => Ok((left, right)),
                _ => Err(RuntimeError {
                    token: binary.operator.clone(),
                    message: String::from("Operands must be numbers."),
                }),
            }
        };

        match binary.operator.r#type {
            Type::Plus => Ok((left + right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: String::from("Operands must be two numbers or two strings."),
            })?),
            Type::Minus => Ok((left - right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: String::from("Operands must be numbers."),
            })?),
            Type::Star => Ok((left * right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: String::from("Operands must be numbers."),
            })?),
            Type::Slash => Ok((left / right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: String::from("Operands must be numbers."),
            })?),
            Type::Greater => {
                let (left, right) = numbers(&left, &right)?;
                Ok(Object::from(left > right))
            }
            Type::GreaterEqual => {
                let (left, right) = numbers(&left, &right)?;
                Ok(Object::from(left >= right))
            }
            Type::Less => {
                let (left, right) = numbers(&left, &right)?;
                Ok(Object::from(left < right))
            }
            Type::LessEqual => {
                let (left, right) = numbers(&left, &right)?;
                Ok(Object::from(left <= right))
            }
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    /// Short-circuits: the result is one of the operands, and the right
    /// side is never evaluated when the left side decides.
    fn visit_logical_expr(&mut self, logical: &expr::LogicalData) -> Evaluation {
        let left = self.evaluate(&logical.left)?;

        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_variable_expr(&mut self, variable: &expr::VariableData) -> Evaluation {
        Ok(self.look_up_variable(variable.id, &variable.name)?)
    }

    fn visit_assign_expr(&mut self, assign: &expr::AssignData) -> Evaluation {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment
                    .borrow_mut()
                    .assign_at(*distance, &assign.name, value.clone());
            }
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            }
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &expr::CallData) -> Evaluation {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        self.call_object(callee, &call.paren, arguments)
    }

    fn visit_get_expr(&mut self, get: &expr::GetData) -> Evaluation {
        let object = self.evaluate(&get.object)?;

        match object {
            Object::Instance(instance) => Ok(Instance::get(&instance, &get.name)?),
            Object::Class(class) if self.class_fields => Ok(Class::get(&class, &get.name)?),
            Object::Array(array) => Ok(Array::get(&array, &get.name)?),
            _ => Err(Unwind::from(RuntimeError {
                token: get.name.clone(),
                message: String::from("Only instances have properties."),
            })),
        }
    }

    fn visit_set_expr(&mut self, set: &expr::SetData) -> Evaluation {
        let object = self.evaluate(&set.object)?;
        let value = self.evaluate(&set.value)?;

        match object {
            Object::Instance(instance) => {
                instance.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            }
            Object::Class(class) if self.class_fields => {
                class.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            }
            Object::Array(_) => Err(Unwind::from(RuntimeError {
                token: set.name.clone(),
                message: String::from("Arrays do not have settable properties."),
            })),
            _ => Err(Unwind::from(RuntimeError {
                token: set.name.clone(),
                message: String::from("Only instances have fields."),
            })),
        }
    }

    fn visit_this_expr(&mut self, this: &expr::ThisData) -> Evaluation {
        Ok(self.look_up_variable(this.id, &this.keyword)?)
    }

    /// `super.m` starts the method search one class above the one the
    /// surrounding method was defined in, then binds the hit to the current
    /// instance.
    fn visit_super_expr(&mut self, super_expr: &expr::SuperData) -> Evaluation {
        let distance = *self.locals.get(&super_expr.id)
            .expect("'super' to have a resolved depth");

        let superclass = self.environment.borrow().get_at(distance, &super_expr.keyword)?;
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let Object::Class(superclass) = superclass else {
            unreachable!("'super' is always bound to a class");
        };

        let method = superclass.borrow().find_method(&super_expr.method.lexeme);
        match method {
            Some(method) => Ok(Object::from(method.bind(object))),
            None => Err(Unwind::from(RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            })),
        }
    }

    fn visit_function_expr(&mut self, function: &Rc<expr::FunctionData>) -> Evaluation {
        Ok(Object::from(Function {
            name: None,
            declaration: Rc::clone(function),
            closure: Rc::clone(&self.environment),
            is_initializer: false,
        }))
    }
}

impl StmtVisitor<Execution> for Interpreter<'_> {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) -> Execution {
        self.evaluate(&stmt.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) -> Execution {
        let value = self.evaluate(&stmt.expr)?;
        self.print_line(&value.to_string());
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) -> Execution {
        let value = match &stmt.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&stmt.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) -> Execution {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&stmt.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) -> Execution {
        if self.evaluate(&stmt.condition)?.is_truthy() {
            self.execute(&stmt.then_branch)
        } else if let Some(else_branch) = &stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) -> Execution {
        while self.evaluate(&stmt.condition)?.is_truthy() {
            match self.execute(&stmt.body) {
                Ok(()) => (),
                Err(Unwind::Break) => break,
                Err(Unwind::Continue) => continue,
                Err(other) => return Err(other),
            }
        }

        Ok(())
    }

    /// The loop clauses run in their own scope so the initializer variable
    /// is local to the loop.
    fn visit_for_stmt(&mut self, stmt: &stmt::ForData) -> Execution {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        let previous = mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)));

        let result = self.run_for(stmt);

        self.environment = previous;
        result
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) -> Execution {
        let function = Function {
            name: Some(stmt.name.clone()),
            declaration: Rc::clone(&stmt.function),
            closure: Rc::clone(&self.environment),
            is_initializer: false,
        };

        self.environment.borrow_mut().define(&stmt.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) -> Execution {
        let value = match &stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    /// Classes are defined in two phases so methods can refer to the class
    /// by name. Methods capture the environment holding `super` when a
    /// superclass exists; class-level methods land on the metaclass.
    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) -> Execution {
        let superclass = match &stmt.superclass {
            Some(superclass_expr) => match self.evaluate(superclass_expr)? {
                Object::Class(class) => Some(class),
                _ => {
                    let Expr::Variable(variable) = superclass_expr else { unreachable!() };
                    return Err(Unwind::from(RuntimeError {
                        token: variable.name.clone(),
                        message: String::from("Superclass must be a class."),
                    }));
                }
            },
            None => None,
        };

        self.environment
            .borrow_mut()
            .define(&stmt.name.lexeme, Object::from(Literal::Nil));

        let previous = superclass.as_ref().map(|superclass| {
            let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
            environment.borrow_mut().define("super", Object::from(Rc::clone(superclass)));
            mem::replace(&mut self.environment, environment)
        });

        let mut methods = HashMap::new();
        for method in &stmt.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            methods.insert(function.name.lexeme.clone(), Function {
                name: Some(function.name.clone()),
                declaration: Rc::clone(&function.function),
                closure: Rc::clone(&self.environment),
                is_initializer: function.name.lexeme == "init",
            });
        }

        let mut class_methods = HashMap::new();
        for class_method in &stmt.class_methods {
            let Stmt::Function(function) = class_method else { unreachable!() };

            class_methods.insert(function.name.lexeme.clone(), Function {
                name: Some(function.name.clone()),
                declaration: Rc::clone(&function.function),
                closure: Rc::clone(&self.environment),
                is_initializer: false,
            });
        }

        let metaclass = Class::new(
            format!("{} metaclass", stmt.name.lexeme),
            superclass.as_ref().and_then(|superclass| superclass.borrow().metaclass.clone()),
            class_methods,
            None,
        );

        let class = Class::new(
            stmt.name.lexeme.clone(),
            superclass,
            methods,
            Some(Rc::new(RefCell::new(metaclass))),
        );

        if let Some(previous) = previous {
            self.environment = previous;
        }

        self.environment
            .borrow_mut()
            .assign(&stmt.name, Object::from(Rc::new(RefCell::new(class))))?;

        Ok(())
    }

    fn visit_break_stmt(&mut self, _stmt: &stmt::BreakData) -> Execution {
        Err(Unwind::Break)
    }

    fn visit_continue_stmt(&mut self, _stmt: &stmt::ContinueData) -> Execution {
        Err(Unwind::Continue)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CollectingReporter;
    use crate::parser::Parser;
    use crate::resolver::{Profile, Resolver};
    use crate::scanner::Scanner;

    fn run(source: &str) -> (String, Result<Option<Object>, RuntimeError>) {
        let mut reporter = CollectingReporter::default();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens().unwrap();
        let statements = Parser::new(tokens, &mut reporter).parse().unwrap();

        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        Resolver::new(&mut interpreter, &mut reporter, Profile::NonStrict)
            .resolve(&statements)
            .unwrap();

        let result = interpreter.interpret(&statements);
        drop(interpreter);

        (String::from_utf8(output).unwrap(), result)
    }

    fn stdout(source: &str) -> String {
        let (output, result) = run(source);
        result.unwrap();
        output
    }

    fn failure(source: &str) -> RuntimeError {
        run(source).1.unwrap_err()
    }

    #[test]
    fn expression_statement_value_is_returned() {
        let (output, result) = run("1 + 2 * 3;");
        assert_eq!(result.unwrap(), Some(Object::from(7.0)));
        assert_eq!(output, "");
    }

    #[test]
    fn print_goes_to_the_injected_writer() {
        assert_eq!(stdout("print 1 + 2 * 3;"), "7\n");
    }

    #[test]
    fn declarations_yield_no_value() {
        let (_, result) = run("1; var a = 2; print a;");
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn logical_operators_return_an_operand() {
        assert_eq!(stdout("print \"hi\" or 2; print nil or \"yes\"; print nil and 1;"), "hi\nyes\nnil\n");
    }

    #[test]
    fn logical_operators_short_circuit() {
        let source = "\
            var called = false;\n\
            fun touch() { called = true; return true; }\n\
            nil and touch();\n\
            print called;\n\
            1 or touch();\n\
            print called;";
        assert_eq!(stdout(source), "false\nfalse\n");
    }

    #[test]
    fn equality_is_same_tag_only() {
        assert_eq!(
            stdout("print nil == nil; print \"x\" == \"x\"; print 1 == 1; print 1 == \"1\"; print true == 1;"),
            "true\ntrue\ntrue\nfalse\nfalse\n",
        );
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        assert_eq!(stdout("print 0/0 == 0/0; print 0/0 != 0/0;"), "false\ntrue\n");
    }

    #[test]
    fn closures_bind_by_scope_not_by_later_shadowing() {
        let source = "\
            var a = \"g\";\n\
            {\n\
              fun f() { print a; }\n\
              f();\n\
              var a = \"b\";\n\
              f();\n\
            }";
        assert_eq!(stdout(source), "g\ng\n");
    }

    #[test]
    fn counter_closure_keeps_its_cell() {
        let source = "\
            fun make() {\n\
              var x = 0;\n\
              fun inc() { x = x + 1; return x; }\n\
              return inc;\n\
            }\n\
            var c = make();\n\
            print c(); print c(); print c();";
        assert_eq!(stdout(source), "1\n2\n3\n");
    }

    #[test]
    fn for_continue_runs_the_increment() {
        assert_eq!(
            stdout("for (var i = 0; i < 5; i = i + 1) { if (i < 3) continue; print i; }"),
            "3\n4\n",
        );
    }

    #[test]
    fn break_leaves_only_the_loop() {
        let source = "\
            fun f() {\n\
              while (true) { break; }\n\
              return \"after\";\n\
            }\n\
            print f();";
        assert_eq!(stdout(source), "after\n");
    }

    #[test]
    fn methods_bind_their_receiver() {
        let source = "\
            class P {\n\
              init(n) { this.n = n; }\n\
              greet() { return this.n; }\n\
            }\n\
            var m = P(\"x\").greet;\n\
            print m();";
        assert_eq!(stdout(source), "x\n");
    }

    #[test]
    fn initializer_always_returns_the_instance() {
        assert_eq!(
            stdout("class C { init() { return; } } var x = C(); print x;"),
            "C instance\n",
        );
    }

    #[test]
    fn super_bypasses_the_current_class() {
        let source = "\
            class A { method() { return \"A\"; } }\n\
            class B < A { test() { return super.method(); } }\n\
            class C < B {}\n\
            print C().test();";
        assert_eq!(stdout(source), "A\n");
    }

    #[test]
    fn class_methods_live_on_the_metaclass() {
        assert_eq!(
            stdout("class M { class sq(n) { return n * n; } } print M.sq(3);"),
            "9\n",
        );
    }

    #[test]
    fn class_methods_are_inherited() {
        let source = "\
            class A { class make() { return \"made\"; } }\n\
            class B < A {}\n\
            print B.make();";
        assert_eq!(stdout(source), "made\n");
    }

    #[test]
    fn arrays_store_and_report_length() {
        assert_eq!(
            stdout("var a = Array(3); a.set(1, \"x\"); print a.length; print a.get(1); print a;"),
            "3\nx\n[nil x nil]\n",
        );
    }

    #[test]
    fn adding_mismatched_types_fails() {
        let error = failure("\"a\" + 0;");
        assert_eq!(error.message, "Operands must be two numbers or two strings.");
        assert_eq!(error.token.line, 1);
    }

    #[test]
    fn comparing_non_numbers_fails() {
        assert_eq!(failure("1 < \"2\";").message, "Operands must be numbers.");
    }

    #[test]
    fn undefined_variable_fails() {
        assert_eq!(failure("print missing;").message, "Undefined variable 'missing'.");
    }

    #[test]
    fn arity_mismatch_fails() {
        let error = failure("fun f(a) { return a; }\nf();");
        assert_eq!(error.message, "Expected 1 arguments but got 0.");
        assert_eq!(error.token.line, 2);
    }

    #[test]
    fn calling_a_non_callable_fails() {
        assert_eq!(failure("\"hi\"();").message, "Can only call functions and classes.");
    }

    #[test]
    fn array_index_out_of_range_fails() {
        assert_eq!(failure("Array(2).get(2);").message, "Array index out of range.");
    }

    #[test]
    fn class_fields_switch_restricts_classes() {
        let mut reporter = CollectingReporter::default();
        let tokens = Scanner::new("class C {}\nC.value = 1;", &mut reporter)
            .scan_tokens()
            .unwrap();
        let statements = Parser::new(tokens, &mut reporter).parse().unwrap();

        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        interpreter.set_class_fields(false);
        Resolver::new(&mut interpreter, &mut reporter, Profile::NonStrict)
            .resolve(&statements)
            .unwrap();

        let error = interpreter.interpret(&statements).unwrap_err();
        assert_eq!(error.message, "Only instances have fields.");
    }
}
