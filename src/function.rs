use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::array::Array;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr;
use crate::interpreter::{Interpreter, Unwind};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::token::Token;

/// A user-defined function. The declaration is shared with the AST; the
/// closure is the environment the function was declared in, which is what
/// makes captured variables outlive their block.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Option<Token>,
    pub declaration: Rc<expr::FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    /// Returns a copy of this function with `this` bound to the given
    /// object in a new frame between the body and the closure.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    /// The instance an initializer always evaluates to.
    fn bound_this(&self) -> Result<Object, RuntimeError> {
        self.closure.borrow().get_at(0, &Token::from("this"))
    }
}

impl Callable for Function {
    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        _paren: &Token,
        arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(&param.lexeme, argument);
        }

        let environment = Rc::new(RefCell::new(environment));
        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => (),
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    return self.bound_this();
                }
                return Ok(value);
            }
            Err(Unwind::Error(error)) => return Err(error),
            Err(Unwind::Break) | Err(Unwind::Continue) => {
                unreachable!("loop signal escaped a function body")
            }
        }

        if self.is_initializer {
            return self.bound_this();
        }

        Ok(Object::from(Literal::Nil))
    }

    fn arity(&self) -> Option<usize> {
        Some(self.declaration.params.len())
    }
}

/// Two function values are the same function only if they share both the
/// declaration and the captured environment.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration)
            && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<fn {}>", name.lexeme),
            None => write!(f, "<fn #anon>"),
        }
    }
}

pub type NativeFn =
    fn(&mut Interpreter<'_>, &Token, Vec<Object>) -> Result<Object, RuntimeError>;

/// A function provided by the host. Natives bypass environment creation and
/// receive the call-site token so their errors carry a line number.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Option<usize>,
    pub function: NativeFn,
}

impl Callable for NativeFunction {
    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        paren: &Token,
        arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, paren, arguments)
    }

    fn arity(&self) -> Option<usize> {
        self.arity
    }
}

impl NativeFunction {
    /// The built-in functions every interpreter starts with.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: "clock",
                arity: Some(0),
                function: |_, _, _| {
                    let now = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap()
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            NativeFunction {
                name: "pprint",
                arity: None,
                function: |interpreter, _, arguments| {
                    let line = arguments
                        .iter()
                        .map(Object::to_string)
                        .collect::<Vec<_>>()
                        .join(" ");
                    interpreter.print_line(&line);
                    Ok(Object::from(Literal::Nil))
                },
            },
            NativeFunction {
                name: "Array",
                arity: Some(1),
                function: |_, paren, arguments| {
                    let size = arguments[0].as_number().ok_or_else(|| RuntimeError {
                        token: paren.clone(),
                        message: String::from("Array size must be a number."),
                    })?;

                    if size < 0.0 || size.fract() != 0.0 {
                        return Err(RuntimeError {
                            token: paren.clone(),
                            message: String::from("Array size must be a non-negative integer."),
                        });
                    }

                    Ok(Object::from(Array::with_size(size as usize)))
                },
            },
        ]
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
