use std::io::{self, Write};

use crate::ast::*;
use crate::source_loc::*;
use crate::value::*;

pub struct Interpreter<W: Write = io::Stdout> {
    // Where print statements write.
    out: W,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Interpreter<io::Stdout> {
        Interpreter::with_output(io::stdout())
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Interpreter<io::Stdout> {
        Interpreter::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Interpreter<W> {
        Interpreter {
            out,
        }
    }

    #[allow(dead_code)]
    pub fn into_output(self) -> W {
        self.out
    }

    // The public interface to execute an entire program.  Stops at the first
    // runtime error; statements after it don't run.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements.iter() {
            self.execute(stmt)?;
        }

        Ok(())
    }

    pub fn execute(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(())
            }
            Stmt::Print(expr, loc) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value.to_runtime_string())
                    .map_err(|err| {
                        RuntimeError::new(*loc, &format!("Unable to write output: {}", err))
                    })
            }
            Stmt::Var(_, initializer, _) => {
                // Nothing binds variables, but the initializer still runs.
                if let Some(expr) = initializer {
                    self.evaluate(expr)?;
                }

                Ok(())
            }
        }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        use crate::value::Value::*;
        match expr {
            Expr::Binary(left, op, right, loc) => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;

                match op {
                    // Math operators.
                    BinaryOperator::Plus => {
                        match (left_val, right_val) {
                            (NumberVal(x1), NumberVal(x2)) => Ok(NumberVal(x1 + x2)),
                            (StringVal(s1), StringVal(s2)) => Ok(StringVal(s1 + &s2)),
                            _ => Err(RuntimeError::new(*loc, "Operands must be two numbers or two strings.")),
                        }
                    }
                    BinaryOperator::Minus => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(NumberVal(x1 - x2))
                    }
                    BinaryOperator::Multiply => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(NumberVal(x1 * x2))
                    }
                    BinaryOperator::Divide => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(NumberVal(x1 / x2))
                    }
                    // Comparison operators.
                    BinaryOperator::Equal => Ok(BoolVal(left_val.is_equal(&right_val))),
                    BinaryOperator::NotEqual => Ok(BoolVal(!left_val.is_equal(&right_val))),
                    BinaryOperator::Less => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(BoolVal(x1 < x2))
                    }
                    BinaryOperator::LessEqual => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(BoolVal(x1 <= x2))
                    }
                    BinaryOperator::Greater => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(BoolVal(x1 > x2))
                    }
                    BinaryOperator::GreaterEqual => {
                        let (x1, x2) = number_operands(&left_val, &right_val, *loc)?;
                        Ok(BoolVal(x1 >= x2))
                    }
                }
            }
            Expr::Conditional(condition, then_expr, else_expr) => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_expr)
                }
                else {
                    self.evaluate(else_expr)
                }
            }
            Expr::Grouping(e) => self.evaluate(e),
            Expr::LiteralBool(b) => Ok(BoolVal(*b)),
            Expr::LiteralNil => Ok(NilVal),
            Expr::LiteralNumber(x) => Ok(NumberVal(*x)),
            Expr::LiteralString(s) => Ok(StringVal(s.clone())),
            Expr::Variable(id, loc) => {
                Err(RuntimeError::new(*loc, &format!("Undefined variable '{}'.", id)))
            }
            Expr::Unary(op, e, loc) => {
                let v = self.evaluate(e)?;

                match op {
                    UnaryOperator::Minus => {
                        match v {
                            NumberVal(x) => Ok(NumberVal(-x)),
                            _ => Err(RuntimeError::new(*loc, "Operand must be a number.")),
                        }
                    }
                    UnaryOperator::Not => Ok(BoolVal(!v.is_truthy())),
                }
            }
        }
    }
}

fn number_operands(left: &Value, right: &Value, loc: SourceLoc)
    -> Result<(f64, f64), RuntimeError>
{
    match (left, right) {
        (Value::NumberVal(x1), Value::NumberVal(x2)) => Ok((*x1, *x2)),
        _ => Err(RuntimeError::new(loc, "Operands must be numbers.")),
    }
}
