use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::token::Token;

/// A class declaration brought to life. Instance methods live on the class;
/// class-level methods live on a sibling metaclass whose superclass is the
/// superclass's metaclass, so static lookup walks the same chain instance
/// lookup does. The `fields` map holds static state assigned directly on
/// the class object.
#[derive(Clone)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Function>,
    pub metaclass: Option<Rc<RefCell<Class>>>,
    pub fields: HashMap<String, Object>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<RefCell<Class>>>,
        methods: HashMap<String, Function>,
        metaclass: Option<Rc<RefCell<Class>>>,
    ) -> Self {
        Class { name, superclass, methods, metaclass, fields: HashMap::new() }
    }

    /// Looks a method up on this class, then up the superclass chain.
    /// The nearest definition wins.
    pub fn find_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.borrow().find_method(name))
    }

    /// The number of arguments a construction call expects: the arity of
    /// `init` wherever it is on the chain, or zero.
    pub fn arity(&self) -> Option<usize> {
        match self.find_method("init") {
            Some(initializer) => initializer.arity(),
            None => Some(0),
        }
    }

    /// Calls the class: creates an instance and runs `init` on it when one
    /// exists anywhere up the chain. The construction expression always
    /// evaluates to the instance.
    pub fn construct(
        this: &Rc<RefCell<Class>>,
        interpreter: &mut Interpreter<'_>,
        paren: &Token,
        arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::from(this)));

        let initializer = this.borrow().find_method("init");
        if let Some(initializer) = initializer {
            initializer
                .bind(Object::from(Rc::clone(&instance)))
                .call(interpreter, paren, arguments)?;
        }

        Ok(Object::from(instance))
    }

    /// Property access on the class object itself: static fields first,
    /// then class-level methods through the metaclass chain, bound to the
    /// class.
    pub fn get(this: &Rc<RefCell<Class>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(field) = this.borrow().fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        let method = this
            .borrow()
            .metaclass
            .as_ref()
            .and_then(|metaclass| metaclass.borrow().find_method(&name.lexeme));

        if let Some(method) = method {
            return Ok(Object::from(method.bind(Object::from(Rc::clone(this)))));
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined property '{}'.", name.lexeme),
        })
    }

    /// Property assignment on the class object stores a static field.
    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An instance of a class: a class pointer and a bag of fields.
#[derive(Clone)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    /// Property access: a field shadows a method of the same name; methods
    /// come back bound to this instance.
    pub fn get(this: &Rc<RefCell<Instance>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(field) = this.borrow().fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        let method = this.borrow().class.borrow().find_method(&name.lexeme);
        if let Some(method) = method {
            return Ok(Object::from(method.bind(Object::from(Rc::clone(this)))));
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined property '{}'.", name.lexeme),
        })
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl From<&Rc<RefCell<Class>>> for Instance {
    fn from(class: &Rc<RefCell<Class>>) -> Self {
        Instance { class: Rc::clone(class), fields: HashMap::new() }
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<instance {}>", self.class.borrow().name)
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.class.borrow().name)
    }
}
