use crate::error::{CalcError, Result};
use crate::functions::NameTables;
use crate::token::{FunctionToken, Operator, Scalar, Token};
use log::trace;

/// Splits an expression into tokens, resolving names against `tables`.
///
/// The scan keeps one pending piece of text and decides for every character
/// whether it extends that piece or starts a new one. Each finished piece is
/// resolved immediately, so errors surface in source order.
pub fn tokenize(expression: &str, tables: &NameTables) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(tables);
    for c in expression.chars() {
        lexer.feed(c)?;
    }
    lexer.flush()?;
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    tables: &'a NameTables,
    current: String,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(tables: &'a NameTables) -> Self {
        Self {
            tables,
            current: String::new(),
            tokens: Vec::new(),
        }
    }

    fn feed(&mut self, c: char) -> Result<()> {
        match c {
            c if c.is_whitespace() => self.flush(),
            '(' | ')' | ',' => {
                self.flush()?;
                self.tokens.push(match c {
                    '(' => Token::OpenGroup,
                    ')' => Token::CloseGroup,
                    _ => Token::Separator,
                });
                Ok(())
            }
            '.' => {
                if self.current.is_empty() || self.extends_number(c) {
                    self.current.push(c);
                    Ok(())
                } else {
                    self.flush()?;
                    self.current.push(c);
                    self.flush()
                }
            }
            '0'..='9' => {
                if self.extends_number(c) || self.extends_name(c) {
                    self.current.push(c);
                    Ok(())
                } else {
                    self.restart(c)
                }
            }
            c if Operator::is_symbol_char(c) => {
                if is_operation(&self.current) {
                    self.current.push(c);
                    Ok(())
                } else {
                    self.restart(c)
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                if is_name(&self.current) && !is_number(&self.current) {
                    self.current.push(c);
                    Ok(())
                } else {
                    self.restart(c)
                }
            }
            _ => Err(CalcError::UnexpectedCharacter(c)),
        }
    }

    fn extends_number(&self, c: char) -> bool {
        let mut candidate = self.current.clone();
        candidate.push(c);
        is_number(&candidate)
    }

    fn extends_name(&self, c: char) -> bool {
        !self.current.is_empty() && is_name(&self.current) && (c == '_' || c.is_ascii_alphanumeric())
    }

    fn restart(&mut self, c: char) -> Result<()> {
        self.flush()?;
        self.current.push(c);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.current.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.current);
        let token = self.resolve(&text)?;
        trace!("Token {text:?} -> {token:?}");
        self.tokens.push(token);
        Ok(())
    }

    fn resolve(&self, text: &str) -> Result<Token> {
        if is_number(text) {
            return Ok(Token::Number(parse_number(text)?));
        }
        if is_operation(text) {
            return Operator::try_from(text).map(Token::Operation);
        }
        if let Some(value) = self.tables.constant(text) {
            return Ok(Token::Number(value));
        }
        if let Some(callable) = self.tables.function(text) {
            return Ok(Token::Function(FunctionToken::unresolved(callable.clone())));
        }
        Err(CalcError::UnknownToken(text.to_string()))
    }
}

/// Digits with at most one decimal point, e.g. `12`, `3.4`, `.09`, `5.`.
pub(crate) fn is_number(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

pub(crate) fn is_operation(text: &str) -> bool {
    !text.is_empty() && text.chars().all(Operator::is_symbol_char)
}

/// Letters, digits and underscores. Pure digit runs also qualify.
pub(crate) fn is_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn parse_number(text: &str) -> Result<Scalar> {
    if !text.contains('.') {
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Scalar::Int(value));
        }
    }
    text.parse::<f64>()
        .map(Scalar::Float)
        .map_err(|_| CalcError::UnknownToken(text.to_string()))
}
