use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

use crate::array::{Array, ArrayMethod};
use crate::class::{Class, Instance};
use crate::error::RuntimeError;
use crate::function::{Function, NativeFunction};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::token::Token;

/// Represents a value that can be stored in a variable or returned from a
/// function. This is an enum that wraps all the possible types of values in
/// the language.
#[derive(Debug, Clone)]
pub enum Object {
    Literal(Literal),
    Function(Function),
    NativeFunction(NativeFunction),
    Class(Rc<RefCell<Class>>),
    Instance(Rc<RefCell<Instance>>),
    Array(Rc<RefCell<Array>>),
    ArrayMethod(ArrayMethod),
}

impl Object {
    /// Returns the truthiness of the object. Only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Literal(literal) => literal.as_bool(),
            _ => true,
        }
    }

    /// Returns the object as a number if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Literal(literal) => literal.as_number(),
            _ => None,
        }
    }
}

/// Equality is same-tag only. Literals compare by value (IEEE-754 for
/// numbers, so NaN is not equal to itself); everything else compares by
/// reference identity.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Literal(left), Object::Literal(right)) => left == right,
            (Object::Function(left), Object::Function(right)) => left == right,
            (Object::NativeFunction(left), Object::NativeFunction(right)) => left == right,
            (Object::Class(left), Object::Class(right)) => Rc::ptr_eq(left, right),
            (Object::Instance(left), Object::Instance(right)) => Rc::ptr_eq(left, right),
            (Object::Array(left), Object::Array(right)) => Rc::ptr_eq(left, right),
            (Object::ArrayMethod(left), Object::ArrayMethod(right)) => left == right,
            _ => false,
        }
    }
}

impl Add for Object {
    type Output = Option<Self>;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Object::Literal(left), Object::Literal(right)) => left + right,
            _ => None,
        }.map(|x| x.into())
    }
}

impl Sub for Object {
    type Output = Option<Self>;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Object::Literal(left), Object::Literal(right)) => left - right,
            _ => None,
        }.map(|x| x.into())
    }
}

impl Mul for Object {
    type Output = Option<Self>;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Object::Literal(left), Object::Literal(right)) => left * right,
            _ => None,
        }.map(|x| x.into())
    }
}

impl Div for Object {
    type Output = Option<Self>;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Object::Literal(left), Object::Literal(right)) => left / right,
            _ => None,
        }.map(|x| x.into())
    }
}

impl Neg for Object {
    type Output = Option<Self>;

    fn neg(self) -> Self::Output {
        match self {
            Object::Literal(literal) => -literal,
            _ => None,
        }.map(|x| x.into())
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

impl From<f64> for Object {
    fn from(number: f64) -> Self {
        Object::Literal(Literal::Number(number))
    }
}

impl From<bool> for Object {
    fn from(boolean: bool) -> Self {
        Object::Literal(Literal::Bool(boolean))
    }
}

impl From<String> for Object {
    fn from(string: String) -> Self {
        Object::Literal(Literal::String(string))
    }
}

impl From<&str> for Object {
    fn from(string: &str) -> Self {
        Object::Literal(Literal::String(string.to_owned()))
    }
}

impl From<Function> for Object {
    fn from(value: Function) -> Self {
        Object::Function(value)
    }
}

impl From<NativeFunction> for Object {
    fn from(value: NativeFunction) -> Self {
        Object::NativeFunction(value)
    }
}

impl From<Rc<RefCell<Class>>> for Object {
    fn from(value: Rc<RefCell<Class>>) -> Self {
        Object::Class(value)
    }
}

impl From<Instance> for Object {
    fn from(value: Instance) -> Self {
        Object::Instance(Rc::new(RefCell::new(value)))
    }
}

impl From<Rc<RefCell<Instance>>> for Object {
    fn from(value: Rc<RefCell<Instance>>) -> Self {
        Object::Instance(value)
    }
}

impl From<Rc<RefCell<Array>>> for Object {
    fn from(value: Rc<RefCell<Array>>) -> Self {
        Object::Array(value)
    }
}

impl From<ArrayMethod> for Object {
    fn from(value: ArrayMethod) -> Self {
        Object::ArrayMethod(value)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Literal(literal) => write!(f, "{literal}"),
            Object::Function(function) => write!(f, "{function}"),
            Object::NativeFunction(function) => write!(f, "{function}"),
            Object::Class(class) => write!(f, "{}", class.borrow()),
            Object::Instance(instance) => write!(f, "{}", instance.borrow()),
            Object::Array(array) => write!(f, "{}", array.borrow()),
            Object::ArrayMethod(method) => write!(f, "{method}"),
        }
    }
}

/// Represents a callable object in the language.
pub trait Callable: Debug {
    /// Calls the object with the given arguments and the current state of
    /// the interpreter. The call-site token is passed along so errors raised
    /// inside the call carry the failing line.
    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        paren: &Token,
        arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError>;

    /// Returns the arity of the object. `None` means variadic.
    fn arity(&self) -> Option<usize>;
}
