use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::token::Token;

/// A fixed-size array created by the `Array(n)` native. Elements start out
/// as `nil` and are reached through the `get`/`set` methods and the
/// `length` property; no other property exists on an array.
#[derive(Debug, Clone)]
pub struct Array {
    pub elements: Vec<Object>,
}

impl Array {
    pub fn with_size(size: usize) -> Rc<RefCell<Array>> {
        Rc::new(RefCell::new(Array {
            elements: vec![Object::from(Literal::Nil); size],
        }))
    }

    /// Property access on an array object.
    pub fn get(this: &Rc<RefCell<Array>>, name: &Token) -> Result<Object, RuntimeError> {
        match name.lexeme.as_str() {
            "length" => Ok(Object::from(this.borrow().elements.len() as f64)),
            "get" => Ok(Object::from(ArrayMethod {
                array: Rc::clone(this),
                kind: ArrayMethodKind::Get,
            })),
            "set" => Ok(Object::from(ArrayMethod {
                array: Rc::clone(this),
                kind: ArrayMethodKind::Set,
            })),
            _ => Err(RuntimeError {
                token: name.clone(),
                message: format!("Undefined property '{}'.", name.lexeme),
            }),
        }
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArrayMethodKind {
    Get,
    Set,
}

/// An array method bound to its array, ready to be called.
#[derive(Debug, Clone)]
pub struct ArrayMethod {
    pub array: Rc<RefCell<Array>>,
    pub kind: ArrayMethodKind,
}

impl ArrayMethod {
    fn index(&self, paren: &Token, argument: &Object) -> Result<usize, RuntimeError> {
        let index = argument.as_number().ok_or_else(|| RuntimeError {
            token: paren.clone(),
            message: String::from("Array index must be a number."),
        })?;

        let length = self.array.borrow().elements.len();
        if index < 0.0 || index.fract() != 0.0 || index as usize >= length {
            return Err(RuntimeError {
                token: paren.clone(),
                message: String::from("Array index out of range."),
            });
        }

        Ok(index as usize)
    }
}

impl Callable for ArrayMethod {
    fn call(
        &self,
        _interpreter: &mut Interpreter<'_>,
        paren: &Token,
        mut arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        match self.kind {
            ArrayMethodKind::Get => {
                let index = self.index(paren, &arguments[0])?;
                Ok(self.array.borrow().elements[index].clone())
            }
            ArrayMethodKind::Set => {
                let index = self.index(paren, &arguments[0])?;
                let value = arguments.remove(1);
                self.array.borrow_mut().elements[index] = value;
                Ok(Object::from(Literal::Nil))
            }
        }
    }

    fn arity(&self) -> Option<usize> {
        match self.kind {
            ArrayMethodKind::Get => Some(1),
            ArrayMethodKind::Set => Some(2),
        }
    }
}

impl PartialEq for ArrayMethod {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.array, &other.array) && self.kind == other.kind
    }
}

impl Display for ArrayMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ArrayMethodKind::Get => write!(f, "<native fn get>"),
            ArrayMethodKind::Set => write!(f, "<native fn set>"),
        }
    }
}
