use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A lexical scope holding name to value bindings, chained to its enclosing
/// scope. The global scope has no enclosing frame.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Binds a name in this frame. Redefinition is allowed at any level;
    /// the REPL re-declares names all the time.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    /// Walks exactly `distance` frames up the chain. Only called with
    /// distances the resolver recorded, so the frames exist.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .expect("enclosing environment to exist at resolved depth");

        for _ in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .expect("enclosing environment to exist at resolved depth");
            environment = parent;
        }

        environment
    }

    /// Looks the name up in this frame, then up the chain.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Reassigns an existing name, searching up the chain.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Reads a name at an exact distance recorded by the resolver.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let variable = if distance > 0 {
            self.ancestor(distance).borrow().variables.get(&name.lexeme).cloned()
        } else {
            self.variables.get(&name.lexeme).cloned()
        };

        variable.ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Writes a name at an exact distance recorded by the resolver.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::literal::Literal;

    fn token(name: &str) -> Token {
        Token::from(name)
    }

    #[test]
    fn define_and_get() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(1.0));
        assert_eq!(environment.get(&token("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn redefinition_overwrites() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(1.0));
        environment.define("a", Object::from("shadow"));
        assert_eq!(environment.get(&token("a")).unwrap(), Object::from("shadow"));
    }

    #[test]
    fn get_walks_the_chain() {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("a", Object::from(1.0));

        let local = Environment::new(Some(Rc::clone(&globals)));
        assert_eq!(local.get(&token("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn assign_undefined_is_an_error() {
        let mut environment = Environment::default();
        let result = environment.assign(&token("missing"), Object::from(Literal::Nil));
        assert_eq!(result.unwrap_err().message, "Undefined variable 'missing'.");
    }

    #[test]
    fn get_at_reads_the_exact_frame() {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("a", Object::from("global"));

        let middle = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&globals)))));
        middle.borrow_mut().define("a", Object::from("middle"));

        let inner = Environment::new(Some(Rc::clone(&middle)));
        assert_eq!(inner.get_at(1, &token("a")).unwrap(), Object::from("middle"));
        assert_eq!(inner.get_at(2, &token("a")).unwrap(), Object::from("global"));
    }

    #[test]
    fn assign_at_writes_the_exact_frame() {
        let globals = Rc::new(RefCell::new(Environment::default()));
        globals.borrow_mut().define("a", Object::from("global"));

        let mut inner = Environment::new(Some(Rc::clone(&globals)));
        inner.define("a", Object::from("inner"));
        inner.assign_at(1, &token("a"), Object::from("changed"));

        assert_eq!(globals.borrow().get(&token("a")).unwrap(), Object::from("changed"));
        assert_eq!(inner.get_at(0, &token("a")).unwrap(), Object::from("inner"));
    }
}
