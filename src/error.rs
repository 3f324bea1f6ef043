use crate::token::{Token, Type};

/// Receives formatted diagnostics from every stage of the pipeline.
/// The interpreter never writes errors anywhere else, so embedders can
/// redirect them by supplying their own implementation.
pub trait Reporter {
    fn report_error(&mut self, message: &str);
    fn report_warning(&mut self, message: &str);
}

/// The default reporter. Errors and warnings go to stderr.
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn report_warning(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// A reporter that keeps every message around, used by tests and embedders
/// that want to inspect diagnostics instead of printing them.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Reporter for CollectingReporter {
    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn report_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

/// Represents an error that occurs during scanning.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl ScanError {
    pub fn report(&self, reporter: &mut dyn Reporter) {
        reporter.report_error(&format!(
            "[line {line}] Error: {message}",
            line = self.line,
            message = self.message,
        ));
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn report(&self, reporter: &mut dyn Reporter) {
        reporter.report_error(&at_token(&self.token, &self.message));
    }
}

/// Represents an error that occurs during resolution. These are
/// syntactically valid programs that are semantically invalid.
#[derive(Debug, Clone)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl ResolveError {
    pub fn report(&self, reporter: &mut dyn Reporter) {
        reporter.report_error(&at_token(&self.token, &self.message));
    }
}

/// Represents an error that occurs during runtime. Reported as the message
/// followed by a trace line naming the failing site.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn report(&self, reporter: &mut dyn Reporter) {
        reporter.report_error(&format!(
            "{message}\n[line {line}]",
            message = self.message,
            line = self.token.line,
        ));
    }
}

fn at_token(token: &Token, message: &str) -> String {
    if token.r#type == Type::EOF {
        format!("[line {line}] Error at end: {message}", line = token.line)
    } else {
        format!(
            "[line {line}] Error at '{lexeme}': {message}",
            line = token.line,
            lexeme = token.lexeme,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_error_shape() {
        let mut reporter = CollectingReporter::default();
        ParseError {
            token: Token::new(Type::Semicolon, ";".to_string(), None, 3),
            message: "Expect expression".to_string(),
        }
        .report(&mut reporter);

        assert_eq!(reporter.errors, ["[line 3] Error at ';': Expect expression"]);
    }

    #[test]
    fn parse_error_at_end_shape() {
        let mut reporter = CollectingReporter::default();
        ParseError {
            token: Token::new(Type::EOF, String::new(), None, 7),
            message: "Expect ';' after value".to_string(),
        }
        .report(&mut reporter);

        assert_eq!(reporter.errors, ["[line 7] Error at end: Expect ';' after value"]);
    }

    #[test]
    fn runtime_error_shape() {
        let mut reporter = CollectingReporter::default();
        RuntimeError {
            token: Token::new(Type::Plus, "+".to_string(), None, 2),
            message: "Operands must be numbers.".to_string(),
        }
        .report(&mut reporter);

        assert_eq!(reporter.errors, ["Operands must be numbers.\n[line 2]"]);
    }
}
