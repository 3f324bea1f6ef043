use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Reporter, ScanError};
use crate::literal::Literal;
use crate::token::{Token, Type};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    line: usize,
    reporter: &'a mut dyn Reporter,
    first_error: Option<ScanError>,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str, reporter: &'a mut dyn Reporter) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec![],
            line: 1,
            reporter,
            first_error: None,
        }
    }

    /// Scans the source code and returns a vector of tokens ending in `EOF`.
    /// Scanning always runs over the whole input; if anything was reported
    /// along the way the first error is returned instead of the tokens.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, ScanError> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));

        match self.first_error.take() {
            Some(error) => Err(error),
            None => Ok(std::mem::take(&mut self.tokens)),
        }
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> Option<char> {
        self.source.next()
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    /// Returns the next next character without consuming it.
    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    /// Returns if the character after the current one is the expected
    /// character. Leaves the peek cursor where it found it, so checks can
    /// chain.
    fn match_next(&mut self, expected: char) -> bool {
        self.source.reset_cursor();
        let matched = self.peek_next() == Some(expected);
        self.source.reset_cursor();
        matched
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Consumes one character and adds it as a single char token.
    fn add_single_char_token(&mut self, r#type: Type) {
        if let Some(c) = self.advance() {
            self.add_token(r#type, c.to_string(), None);
        }
    }

    /// Consumes two characters and adds them as a double char token.
    fn add_double_char_token(&mut self, r#type: Type) {
        if let (Some(first), Some(second)) = (self.advance(), self.advance()) {
            self.add_token(r#type, format!("{first}{second}"), None);
        }
    }

    /// Reports a scan error and keeps scanning.
    fn error(&mut self, line: usize, message: String) {
        let error = ScanError { line, message };
        error.report(&mut *self.reporter);
        self.first_error.get_or_insert(error);
    }

    /// Handles a string literal. Strings may span multiple lines and carry
    /// no escape sequences; the raw characters between the quotes become
    /// the literal.
    fn string(&mut self) {
        self.advance(); // Move past the starting double quote.
        let start = self.line;

        let mut value = Vec::new();
        while let Some(c) = self.source.next_if(|&c| c != '"') {
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            self.error(start, String::from("Unterminated string"));
            return;
        }

        self.advance(); // Move past the closing double quote.

        let value: String = value.into_iter().collect();

        // The literal does not include the double quotes unlike the lexeme.
        self.tokens.push(Token::new(
            Type::String,
            value.clone(),
            Some(Literal::String(value)),
            start,
        ));
    }

    /// Handles a number literal. A trailing dot is not part of the number;
    /// it is left for the next scan as a `Dot` token.
    fn number(&mut self) {
        let mut value = Vec::new();

        while let Some(c) = self.source.next_if(|c| c.is_ascii_digit()) {
            value.push(c);
        }

        if self.peek() == Some('.') {
            if self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                value.push(self.advance().unwrap()); // Consume the dot.

                while let Some(c) = self.source.next_if(|c| c.is_ascii_digit()) {
                    value.push(c);
                }
            } else {
                // The dot is not ours; leave it for the next scan.
                self.source.reset_cursor();
            }
        }

        let value: String = value.into_iter().collect();
        let number: f64 = value.parse().unwrap();

        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        let mut value = Vec::new();

        // is_alphanumeric does not include underscores.
        while let Some(c) = self.source.next_if(|&c| c.is_alphanumeric() || c == '_') {
            value.push(c);
        }

        let value = String::from_iter(value);
        let token_type = match value.as_str() {
            "and"      => Type::And,
            "break"    => Type::Break,
            "class"    => Type::Class,
            "continue" => Type::Continue,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Skips a block comment. Block comments nest; every `/*` needs its own
    /// matching `*/`.
    fn block_comment(&mut self) {
        let start = self.line;

        self.advance(); // Move past the slash.
        self.advance(); // Move past the star.

        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some('\n') => self.line += 1,
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    depth -= 1;
                }
                Some('/') if self.peek() == Some('*') => {
                    self.advance();
                    depth += 1;
                }
                Some(_) => (),
                None => {
                    self.error(start, String::from("Unterminated block comment"));
                    return;
                }
            }
        }
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let Some(c) = self.peek() else { return };
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();
                self.line += 1;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                self.error(self.line, format!("Unexpected character '{c}'"));
            },
        }
    }
}
