//! Evaluation of single-line arithmetic and comparison expressions such as
//! `2pi + sqrt(16)` or `1034 // 12 < 90`.
//!
//! An expression goes through four passes: tokenizing, validation (which
//! also resolves function arities and inserts implicit multiplication),
//! conversion to postfix order, and a stack-machine evaluation.

pub mod error;
pub mod functions;
pub mod parse;
pub mod postfix;
pub mod token;

pub use error::{CalcError, ErrorKind, Result};
pub use functions::{load_module, NameTables};
pub use token::{Arity, Operator, Scalar, Token};

use log::debug;
use parse::parse_tokens;
use postfix::{evaluate_postfix, to_postfix};

/// Evaluates `expression` against the constants and functions in `tables`.
pub fn evaluate(expression: &str, tables: &NameTables) -> Result<Scalar> {
    let tokens = parse_tokens(expression, tables)?;
    let postfix = to_postfix(tokens);
    debug!("Postfix: {:?}", postfix);
    let result = evaluate_postfix(&postfix)?;
    debug!("Result: {result}");
    Ok(result)
}

/// Evaluates with the default modules plus the named ones.
pub fn evaluate_with_modules<S: AsRef<str>>(modules: &[S], expression: &str) -> Result<Scalar> {
    let tables = NameTables::with_modules(modules)?;
    evaluate(expression, &tables)
}

/// Name tables with the default modules, extended through registration.
#[derive(Debug, Clone)]
pub struct Calculator {
    tables: NameTables,
}

impl Calculator {
    pub fn new() -> Self {
        let mut tables = NameTables::default();
        functions::register_defaults(&mut tables);
        Self { tables }
    }

    pub fn with_module(mut self, name: &str) -> Result<Self> {
        load_module(name, &mut self.tables)?;
        Ok(self)
    }

    pub fn register_constant(&mut self, name: &str, value: impl Into<Scalar>) {
        self.tables.register_constant(name, value);
    }

    pub fn register_function<F>(&mut self, name: &str, arity: Arity, function: F)
    where
        F: Fn(&[Scalar]) -> Result<Scalar> + Send + Sync + 'static,
    {
        self.tables.register_function(name, arity, function);
    }

    pub fn tables(&self) -> &NameTables {
        &self.tables
    }

    pub fn evaluate(&self, expression: &str) -> Result<Scalar> {
        evaluate(expression, &self.tables)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
