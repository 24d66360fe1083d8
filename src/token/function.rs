use crate::error::{CalcError, Result};
use crate::token::Scalar;
use std::fmt;
use std::sync::Arc;

pub type NativeFunction = Arc<dyn Fn(&[Scalar]) -> Result<Scalar> + Send + Sync>;

/// Argument counts a registered callable accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive bounds.
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

/// A named function registered in the name tables.
pub struct Callable {
    name: String,
    arity: Arity,
    function: NativeFunction,
}

impl Callable {
    pub fn new<F>(name: &str, arity: Arity, function: F) -> Self
    where
        F: Fn(&[Scalar]) -> Result<Scalar> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            arity,
            function: Arc::new(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Invokes the function after checking the argument count against its arity.
    pub fn call(&self, args: &[Scalar]) -> Result<Scalar> {
        if !self.arity.accepts(args.len()) {
            return Err(CalcError::ArgumentCount {
                name: self.name.clone(),
                given: args.len(),
            });
        }
        (self.function)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Function reference inside a token sequence.
///
/// The lexer produces it with an unknown call-site arity. The validator
/// replaces it with a resolved copy once the matching close-group has been
/// seen, so a token with `arity == None` never reaches evaluation from a
/// validated sequence.
#[derive(Debug, Clone)]
pub struct FunctionToken {
    callable: Arc<Callable>,
    arity: Option<usize>,
}

impl FunctionToken {
    pub fn unresolved(callable: Arc<Callable>) -> Self {
        Self {
            callable,
            arity: None,
        }
    }

    pub fn resolved(&self, arity: usize) -> Self {
        Self {
            callable: Arc::clone(&self.callable),
            arity: Some(arity),
        }
    }

    pub fn name(&self) -> &str {
        self.callable.name()
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn call(&self, args: &[Scalar]) -> Result<Scalar> {
        self.callable.call(args)
    }
}

impl PartialEq for FunctionToken {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.arity == other.arity
    }
}
