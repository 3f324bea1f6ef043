use std::rc::Rc;

use crate::expr::{self, ExprVisitor};
use crate::literal::Literal;
use crate::stmt::{self, StmtVisitor};

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// Serializes the tree into a compact parenthesized form. Handy for
/// debugging and for asserting parse shapes in tests.
pub struct AstPrinter;

impl AstPrinter {
    /// Prints the statements using the visitor pattern.
    pub fn print(&mut self, statements: &[stmt::Stmt]) -> String {
        statements
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn block(&mut self, statements: &[stmt::Stmt]) -> String {
        let mut string = String::from("{");
        for stmt in statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";

        string
    }

    fn function(&mut self, label: &str, name: Option<&str>, function: &expr::FunctionData) -> String {
        let mut string = String::new();
        string += "(";
        string += label;
        if let Some(name) = name {
            string += " ";
            string += name;
        }
        string += " (";
        string += &function.params.iter().map(|p| p.lexeme.clone()).collect::<Vec<_>>().join(" ");
        string += ") ";
        string += &self.block(&function.body);
        string += ")";

        string
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.to_string()
    }

    fn visit_grouping_expr(&mut self, grouping: &expr::GroupingData) -> String {
        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &expr::UnaryData) -> String {
        parenthesize!(self, &unary.operator.lexeme, unary.expr)
    }

    fn visit_binary_expr(&mut self, binary: &expr::BinaryData) -> String {
        parenthesize!(self, &binary.operator.lexeme, binary.left, binary.right)
    }

    fn visit_logical_expr(&mut self, logical: &expr::LogicalData) -> String {
        parenthesize!(self, &logical.operator.lexeme, logical.left, logical.right)
    }

    fn visit_variable_expr(&mut self, variable: &expr::VariableData) -> String {
        variable.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, assign: &expr::AssignData) -> String {
        parenthesize!(self, &format!("= {}", assign.name.lexeme), assign.value)
    }

    fn visit_call_expr(&mut self, call: &expr::CallData) -> String {
        let mut string = call.callee.accept(self);
        string += "(";
        string += &call.arguments.iter().map(|arg| arg.accept(self)).collect::<Vec<_>>().join(" ");
        string += ")";

        string
    }

    fn visit_get_expr(&mut self, get: &expr::GetData) -> String {
        format!("(. {} {})", get.object.accept(self), get.name.lexeme)
    }

    fn visit_set_expr(&mut self, set: &expr::SetData) -> String {
        format!(
            "(=. {} {} {})",
            set.object.accept(self),
            set.name.lexeme,
            set.value.accept(self),
        )
    }

    fn visit_this_expr(&mut self, _this: &expr::ThisData) -> String {
        String::from("this")
    }

    fn visit_super_expr(&mut self, super_expr: &expr::SuperData) -> String {
        format!("(super {})", super_expr.method.lexeme)
    }

    fn visit_function_expr(&mut self, function: &Rc<expr::FunctionData>) -> String {
        self.function("fun", None, function)
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) -> String {
        parenthesize!(self, "expr", stmt.expr)
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) -> String {
        parenthesize!(self, "print", stmt.expr)
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) -> String {
        match &stmt.initializer {
            Some(initializer) => {
                format!("(var {} = {})", stmt.name.lexeme, initializer.accept(self))
            }
            None => format!("(var {})", stmt.name.lexeme),
        }
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) -> String {
        self.block(&stmt.statements)
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) -> String {
        let mut string = parenthesize!(self, "if", stmt.condition, stmt.then_branch);
        if let Some(else_branch) = &stmt.else_branch {
            string.pop();
            string += " else ";
            string += &else_branch.accept(self);
            string += ")";
        }

        string
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) -> String {
        parenthesize!(self, "while", stmt.condition, stmt.body)
    }

    fn visit_for_stmt(&mut self, stmt: &stmt::ForData) -> String {
        let mut parts = vec![String::from("for")];
        if let Some(initializer) = &stmt.initializer {
            parts.push(initializer.accept(self));
        }
        if let Some(condition) = &stmt.condition {
            parts.push(condition.accept(self));
        }
        if let Some(increment) = &stmt.increment {
            parts.push(increment.accept(self));
        }
        parts.push(stmt.body.accept(self));

        format!("({})", parts.join(" "))
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) -> String {
        self.function("fun", Some(stmt.name.lexeme.as_str()), &stmt.function)
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) -> String {
        match &stmt.value {
            Some(value) => parenthesize!(self, "return", value),
            None => String::from("(return)"),
        }
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) -> String {
        let mut string = format!("(class {}", stmt.name.lexeme);

        if let Some(expr::Expr::Variable(superclass)) = &stmt.superclass {
            string += &format!(" < {}", superclass.name.lexeme);
        }

        for class_method in &stmt.class_methods {
            if let stmt::Stmt::Function(method) = class_method {
                string += " ";
                string += &self.function("class", Some(method.name.lexeme.as_str()), &method.function);
            }
        }

        for method in &stmt.methods {
            if let stmt::Stmt::Function(method) = method {
                string += " ";
                string += &self.function("method", Some(method.name.lexeme.as_str()), &method.function);
            }
        }

        string += ")";
        string
    }

    fn visit_break_stmt(&mut self, _stmt: &stmt::BreakData) -> String {
        String::from("(break)")
    }

    fn visit_continue_stmt(&mut self, _stmt: &stmt::ContinueData) -> String {
        String::from("(continue)")
    }
}
