mod compiler;
mod executor;

pub use compiler::{to_postfix, PostfixCompiler};
pub use executor::{evaluate_postfix, Executor};
