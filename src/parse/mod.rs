mod lexer;
mod validator;

pub use lexer::tokenize;
pub use validator::validate_and_rewrite;

use crate::error::Result;
use crate::functions::NameTables;
use crate::token::Token;
use log::debug;

/// Tokenizes and validates an expression, producing an infix sequence with
/// every function arity resolved and implicit multiplications made explicit.
pub fn parse_tokens(expression: &str, tables: &NameTables) -> Result<Vec<Token>> {
    debug!("Parsing expression: {}", expression);
    let tokens = tokenize(expression, tables)?;
    debug!("Tokens: {:?}", tokens);
    let tokens = validate_and_rewrite(tokens)?;
    debug!("Validated tokens: {:?}", tokens);
    Ok(tokens)
}
