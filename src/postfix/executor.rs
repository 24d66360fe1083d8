use crate::error::{CalcError, Result};
use crate::token::{Scalar, Token};
use log::trace;

/// Stack machine over a postfix token sequence.
pub struct Executor {
    stack: Vec<Scalar>,
}

impl Executor {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn execute(&mut self, tokens: &[Token]) -> Result<Scalar> {
        self.stack.clear();

        for token in tokens {
            match token {
                Token::Number(value) => self.stack.push(*value),

                Token::Operation(operator) => {
                    let right = self.pop_operand(operator.symbol())?;
                    let left = self.pop_operand(operator.symbol())?;
                    let result = operator.apply(left, right)?;
                    trace!("{left} {} {right} = {result}", operator.symbol());
                    self.stack.push(result);
                }

                Token::Function(function) => {
                    let arity = function
                        .arity()
                        .ok_or_else(|| CalcError::UnresolvedArity(function.name().to_string()))?;
                    if self.stack.len() < arity {
                        return Err(CalcError::ArgumentCount {
                            name: function.name().to_string(),
                            given: self.stack.len(),
                        });
                    }
                    let args = self.stack.split_off(self.stack.len() - arity);
                    let result = function.call(&args)?;
                    trace!("{}({:?}) = {result}", function.name(), args);
                    self.stack.push(result);
                }

                Token::OpenGroup | Token::CloseGroup | Token::Separator => {
                    return Err(CalcError::UnexpectedInPostfix(token.describe()))
                }
            }
        }

        match self.stack.as_slice() {
            [result] => Ok(*result),
            rest => Err(CalcError::Leftover(rest.len())),
        }
    }

    fn pop_operand(&mut self, symbol: &'static str) -> Result<Scalar> {
        self.stack.pop().ok_or(CalcError::OperandCount(symbol))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn evaluate_postfix(tokens: &[Token]) -> Result<Scalar> {
    Executor::new().execute(tokens)
}
