use thiserror::Error;

/// Failure categories reported by [`CalcError::kind`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Grammar,
    Grouping,
    Arity,
    Arithmetic,
    Module,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Wrong tokens order: {0}")]
    WrongOrder(&'static str),

    #[error("Bracers are not balanced")]
    Unbalanced,

    #[error("Unexpected arguments count for function: {name}:{given}")]
    ArgumentCount { name: String, given: usize },

    #[error("Operation {0} requires 2 arguments")]
    OperandCount(&'static str),

    #[error("Function {0} reached evaluation with unresolved arity")]
    UnresolvedArity(String),

    #[error("Malformed postfix sequence: {0} values left on the stack")]
    Leftover(usize),

    #[error("Malformed postfix sequence: unexpected {0}")]
    UnexpectedInPostfix(&'static str),

    #[error("{0}")]
    Arithmetic(String),

    #[error("No module named '{0}'")]
    UnknownModule(String),
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::UnexpectedCharacter(_)
            | CalcError::UnsupportedOperation(_)
            | CalcError::UnknownToken(_) => ErrorKind::Lex,
            CalcError::WrongOrder(_) => ErrorKind::Grammar,
            CalcError::Unbalanced => ErrorKind::Grouping,
            CalcError::ArgumentCount { .. }
            | CalcError::OperandCount(_)
            | CalcError::UnresolvedArity(_)
            | CalcError::Leftover(_)
            | CalcError::UnexpectedInPostfix(_) => ErrorKind::Arity,
            CalcError::Arithmetic(_) => ErrorKind::Arithmetic,
            CalcError::UnknownModule(_) => ErrorKind::Module,
        }
    }

    pub(crate) fn division_by_zero() -> Self {
        CalcError::Arithmetic("division by zero".to_string())
    }

    pub(crate) fn modulo_by_zero() -> Self {
        CalcError::Arithmetic("integer division or modulo by zero".to_string())
    }

    pub fn domain() -> Self {
        CalcError::Arithmetic("math domain error".to_string())
    }

    pub fn range() -> Self {
        CalcError::Arithmetic("math range error".to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_cli_output() {
        assert_eq!(
            CalcError::UnexpectedCharacter('#').to_string(),
            "Unexpected character: #"
        );
        assert_eq!(CalcError::Unbalanced.to_string(), "Bracers are not balanced");
        assert_eq!(
            CalcError::ArgumentCount {
                name: "sin".to_string(),
                given: 2
            }
            .to_string(),
            "Unexpected arguments count for function: sin:2"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(CalcError::UnknownToken("x".into()).kind(), ErrorKind::Lex);
        assert_eq!(CalcError::WrongOrder("x").kind(), ErrorKind::Grammar);
        assert_eq!(CalcError::Leftover(2).kind(), ErrorKind::Arity);
        assert_eq!(CalcError::division_by_zero().kind(), ErrorKind::Arithmetic);
        assert_eq!(CalcError::UnknownModule("os".into()).kind(), ErrorKind::Module);
    }
}
