use std::fmt;

use crate::source_loc::*;

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr, SourceLoc),
    Var(String, Option<Expr>, SourceLoc),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Binary(Box<Expr>, BinaryOperator, Box<Expr>, SourceLoc),
    // Condition, then branch, else branch.
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    Grouping(Box<Expr>),
    LiteralBool(bool),
    LiteralNumber(f64),
    LiteralNil,
    LiteralString(String),
    Variable(String, SourceLoc),
    Unary(UnaryOperator, Box<Expr>, SourceLoc),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UnaryOperator {
    Minus,
    Not,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,

    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl UnaryOperator {
    pub fn lexeme(&self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
        }
    }
}

impl BinaryOperator {
    pub fn lexeme(&self) -> &'static str {
        use self::BinaryOperator::*;
        match self {
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

// Prints the tree in a fully parenthesized prefix form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Binary(left, op, right, _) => write!(f, "({} {} {})", op, left, right),
            Expr::Conditional(condition, then_expr, else_expr) => {
                write!(f, "(?: {} {} {})", condition, then_expr, else_expr)
            }
            Expr::Grouping(expr) => write!(f, "(group {})", expr),
            Expr::LiteralBool(b) => write!(f, "{}", b),
            Expr::LiteralNumber(x) => write!(f, "{}", x),
            Expr::LiteralNil => write!(f, "nil"),
            Expr::LiteralString(s) => write!(f, "\"{}\"", s),
            Expr::Variable(name, _) => write!(f, "{}", name),
            Expr::Unary(op, expr, _) => write!(f, "({} {})", op, expr),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "(; {})", expr),
            Stmt::Print(expr, _) => write!(f, "(print {})", expr),
            Stmt::Var(name, None, _) => write!(f, "(var {})", name),
            Stmt::Var(name, Some(initializer), _) => write!(f, "(var {} {})", name, initializer),
        }
    }
}
