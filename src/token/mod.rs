use crate::error::{CalcError, Result};

mod function;
mod scalar;

pub use function::*;
pub use scalar::*;

/// One lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(Scalar),
    Operation(Operator),
    Function(FunctionToken),
    OpenGroup,
    CloseGroup,
    Separator,
}

impl Token {
    pub fn is_function(&self) -> bool {
        matches!(self, Token::Function(_))
    }

    /// Tokens after which another value must be joined by multiplication.
    pub(crate) fn ends_value(&self) -> bool {
        matches!(self, Token::Number(_) | Token::CloseGroup)
    }

    /// Name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Number(_) => "number",
            Token::Operation(_) => "operation",
            Token::Function(_) => "function",
            Token::OpenGroup => "'('",
            Token::CloseGroup => "')'",
            Token::Separator => "','",
        }
    }
}

impl From<Operator> for Token {
    fn from(value: Operator) -> Self {
        Token::Operation(value)
    }
}

impl From<Scalar> for Token {
    fn from(value: Scalar) -> Self {
        Token::Number(value)
    }
}

/// Binary operators. Equality compares the operator only, priority is
/// derived from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
    LessThan,
    LessThanOrEqual,
    Equal,
    NotEqual,
    GreaterThanOrEqual,
    GreaterThan,
}

/// Every supported operator, in lookup order.
pub const OPERATORS: [Operator; 13] = [
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
    Operator::FloorDivide,
    Operator::Modulo,
    Operator::Power,
    Operator::LessThan,
    Operator::LessThanOrEqual,
    Operator::Equal,
    Operator::NotEqual,
    Operator::GreaterThanOrEqual,
    Operator::GreaterThan,
];

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::FloorDivide => "//",
            Operator::Modulo => "%",
            Operator::Power => "^",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
        }
    }

    /// Higher binds tighter. Comparisons bind loosest.
    pub fn priority(&self) -> u8 {
        match self {
            Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::Equal
            | Operator::NotEqual
            | Operator::GreaterThanOrEqual
            | Operator::GreaterThan => 0,
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide | Operator::FloorDivide | Operator::Modulo => 2,
            Operator::Power => 3,
        }
    }

    /// Characters that may appear in an operator symbol.
    pub fn is_symbol_char(c: char) -> bool {
        matches!(c, '+' | '-' | '/' | '%' | '^' | '*' | '<' | '>' | '=' | '!')
    }

    pub fn apply(&self, left: Scalar, right: Scalar) -> Result<Scalar> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => left / right,
            Operator::FloorDivide => left.floor_div(right),
            Operator::Modulo => left % right,
            Operator::Power => left.pow(right),
            Operator::LessThan => Ok(Scalar::Bool(left.numeric_cmp(right).is_some_and(|o| o.is_lt()))),
            Operator::LessThanOrEqual => Ok(Scalar::Bool(left.numeric_cmp(right).is_some_and(|o| o.is_le()))),
            Operator::Equal => Ok(Scalar::Bool(left.numeric_eq(right))),
            Operator::NotEqual => Ok(Scalar::Bool(!left.numeric_eq(right))),
            Operator::GreaterThanOrEqual => Ok(Scalar::Bool(left.numeric_cmp(right).is_some_and(|o| o.is_ge()))),
            Operator::GreaterThan => Ok(Scalar::Bool(left.numeric_cmp(right).is_some_and(|o| o.is_gt()))),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self> {
        OPERATORS
            .iter()
            .find(|op| op.symbol() == value)
            .copied()
            .ok_or_else(|| CalcError::UnsupportedOperation(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_symbol_round_trips_through_lookup() {
        for op in OPERATORS {
            assert_eq!(Operator::try_from(op.symbol()), Ok(op));
            assert!(op.symbol().chars().all(Operator::is_symbol_char));
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(
            Operator::try_from("+-"),
            Err(CalcError::UnsupportedOperation("+-".to_string()))
        );
        assert!(Operator::try_from("!").is_err());
    }

    #[test]
    fn test_priorities() {
        assert!(Operator::Power.priority() > Operator::Multiply.priority());
        assert!(Operator::FloorDivide.priority() == Operator::Modulo.priority());
        assert!(Operator::Add.priority() > Operator::LessThan.priority());
    }

    #[test]
    fn test_comparisons_produce_booleans() {
        assert_eq!(
            Operator::LessThan.apply(Scalar::Int(2), Scalar::Int(5)),
            Ok(Scalar::Bool(true))
        );
        assert_eq!(
            Operator::NotEqual.apply(Scalar::Int(12), Scalar::Float(12.0)),
            Ok(Scalar::Bool(false))
        );
        assert_eq!(
            Operator::GreaterThanOrEqual.apply(Scalar::Float(f64::NAN), Scalar::Int(0)),
            Ok(Scalar::Bool(false))
        );
    }
}
