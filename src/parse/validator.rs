use crate::error::{CalcError, Result};
use crate::token::{Operator, Token};
use log::trace;

/// A function call whose closing bracket has not been reached yet.
struct PendingCall {
    /// Group depth right after the call's opening bracket.
    depth: usize,
    /// Position of the function token in the output sequence.
    index: usize,
    separators: usize,
}

/// Checks token adjacency, resolves function-call arities and inserts the
/// multiplications left implicit between adjacent values.
pub fn validate_and_rewrite(tokens: Vec<Token>) -> Result<Vec<Token>> {
    if tokens.is_empty() {
        return Err(CalcError::WrongOrder("empty expression"));
    }

    let last = tokens.len() - 1;
    let mut depth = 0usize;
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut calls: Vec<PendingCall> = Vec::new();
    let mut prev: Option<&Token> = None;

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Number(_) | Token::Function(_) => match prev {
                Some(p) if p.ends_value() => output.push(Operator::Multiply.into()),
                Some(Token::Function(_)) => {
                    return Err(CalcError::WrongOrder("function without argument list"))
                }
                _ => {}
            },

            Token::Operation(_) => match prev {
                None => return Err(CalcError::WrongOrder("expression starts with an operation")),
                _ if index == last => {
                    return Err(CalcError::WrongOrder("expression ends with an operation"))
                }
                Some(p) if !p.ends_value() => {
                    return Err(CalcError::WrongOrder("operation has no left operand"))
                }
                _ => {}
            },

            Token::OpenGroup => {
                depth += 1;
                match prev {
                    Some(p) if p.ends_value() => output.push(Operator::Multiply.into()),
                    Some(Token::Function(_)) => calls.push(PendingCall {
                        depth,
                        index: output.len() - 1,
                        separators: 0,
                    }),
                    _ => {}
                }
            }

            Token::CloseGroup => {
                depth = depth.checked_sub(1).ok_or(CalcError::Unbalanced)?;
                if matches!(
                    prev,
                    Some(Token::Separator | Token::Operation(_) | Token::Function(_))
                ) {
                    return Err(CalcError::WrongOrder("group closed without a value"));
                }
                match calls.last() {
                    Some(call) if call.depth == depth + 1 => {
                        let arity = if matches!(prev, Some(Token::OpenGroup)) {
                            0
                        } else {
                            call.separators + 1
                        };
                        resolve_call(&mut output, call.index, arity);
                        calls.pop();
                    }
                    _ if matches!(prev, Some(Token::OpenGroup)) => {
                        return Err(CalcError::WrongOrder("empty group"))
                    }
                    _ => {}
                }
            }

            Token::Separator => {
                if matches!(
                    prev,
                    None | Some(Token::OpenGroup | Token::Separator | Token::Operation(_) | Token::Function(_))
                ) {
                    return Err(CalcError::WrongOrder("argument separator without a value"));
                }
                match calls.last_mut() {
                    Some(call) if call.depth == depth => call.separators += 1,
                    _ => return Err(CalcError::WrongOrder("argument separator outside a function call")),
                }
            }
        }
        output.push(token.clone());
        prev = Some(token);
    }

    if depth != 0 {
        return Err(CalcError::Unbalanced);
    }
    if matches!(prev, Some(Token::Function(_))) {
        return Err(CalcError::WrongOrder("function without argument list"));
    }
    Ok(output)
}

/// Replaces the function token at `index` with one carrying its call arity.
fn resolve_call(output: &mut [Token], index: usize, arity: usize) {
    if let Some(Token::Function(function)) = output.get(index) {
        trace!("Resolved {} to {} argument(s)", function.name(), arity);
        output[index] = Token::Function(function.resolved(arity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::NameTables;
    use crate::parse::tokenize;
    use crate::token::{Arity, FunctionToken, Operator::*, Scalar};

    fn tables() -> NameTables {
        let mut tables = NameTables::default();
        tables.register_constant("pi", 3.14);
        for name in ["test", "func_name"] {
            tables.register_function(name, Arity::AtLeast(0), |_| Ok(Scalar::Int(42)));
        }
        tables
    }

    fn parse(expression: &str) -> Result<Vec<Token>> {
        validate_and_rewrite(tokenize(expression, &tables())?)
    }

    fn num(value: impl Into<Scalar>) -> Token {
        Token::Number(value.into())
    }

    fn mul() -> Token {
        Token::Operation(Multiply)
    }

    fn func(name: &str, arity: usize) -> Token {
        let tables = tables();
        let callable = tables.function(name).unwrap().clone();
        Token::Function(FunctionToken::unresolved(callable).resolved(arity))
    }

    fn assert_wrong_order(expression: &str) {
        match parse(expression) {
            Err(CalcError::WrongOrder(_)) => {}
            other => panic!("{expression:?}: expected wrong order, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_groups_pass_through() {
        let tokens = parse("(2+(5-6))").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpenGroup,
                num(2_i64),
                Token::Operation(Add),
                Token::OpenGroup,
                num(5_i64),
                Token::Operation(Subtract),
                num(6_i64),
                Token::CloseGroup,
                Token::CloseGroup,
            ]
        );
    }

    #[test]
    fn test_function_arity_from_separators() {
        let tokens = parse("func_name(2,4,78)").unwrap();
        assert_eq!(tokens[0], func("func_name", 3));
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_empty_call_has_zero_arity() {
        assert_eq!(
            parse("test()").unwrap(),
            vec![func("test", 0), Token::OpenGroup, Token::CloseGroup]
        );
    }

    #[test]
    fn test_nested_calls_resolve_independently() {
        let tokens = parse("test(1, test(test(), 1), 2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                func("test", 3),
                Token::OpenGroup,
                num(1_i64),
                Token::Separator,
                func("test", 2),
                Token::OpenGroup,
                func("test", 0),
                Token::OpenGroup,
                Token::CloseGroup,
                Token::Separator,
                num(1_i64),
                Token::CloseGroup,
                Token::Separator,
                num(2_i64),
                Token::CloseGroup,
            ]
        );
    }

    #[test]
    fn test_call_with_grouped_argument() {
        let tokens = parse("test((1, 2))");
        // The separator sits one level deeper than the call.
        assert!(matches!(tokens, Err(CalcError::WrongOrder(_))));
        assert_eq!(parse("test((1))").unwrap()[0], func("test", 1));
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(parse("3 4").unwrap(), vec![num(3_i64), mul(), num(4_i64)]);
        assert_eq!(parse("2pi").unwrap(), vec![num(2_i64), mul(), num(3.14)]);
        assert_eq!(parse("pi pi").unwrap(), vec![num(3.14), mul(), num(3.14)]);
        assert_eq!(
            parse("2(3)").unwrap(),
            vec![num(2_i64), mul(), Token::OpenGroup, num(3_i64), Token::CloseGroup]
        );
        assert_eq!(
            parse("2 test()").unwrap(),
            vec![num(2_i64), mul(), func("test", 0), Token::OpenGroup, Token::CloseGroup]
        );
        assert_eq!(
            parse("(2)4").unwrap(),
            vec![Token::OpenGroup, num(2_i64), Token::CloseGroup, mul(), num(4_i64)]
        );
        assert_eq!(
            parse("(2)(3)").unwrap(),
            vec![
                Token::OpenGroup,
                num(2_i64),
                Token::CloseGroup,
                mul(),
                Token::OpenGroup,
                num(3_i64),
                Token::CloseGroup,
            ]
        );
        assert_eq!(
            parse("(2)test()").unwrap(),
            vec![
                Token::OpenGroup,
                num(2_i64),
                Token::CloseGroup,
                mul(),
                func("test", 0),
                Token::OpenGroup,
                Token::CloseGroup,
            ]
        );
    }

    #[test]
    fn test_unbalanced_groups() {
        for expression in ["2 + ((4 - 1)*(2-2)", "2 + ((4 - 1)*2)-2)", ")2 + 3("] {
            assert_eq!(parse(expression), Err(CalcError::Unbalanced), "{expression}");
        }
    }

    #[test]
    fn test_wrong_orders() {
        for expression in [
            "2 + ()",
            "(2 + func_name)",
            "(2 + func_name(1,)",
            "(2 + 1*)",
            "(*2 + 1)",
            "func_name - 2",
            "func_name(,1)",
            "func_name(1,,1)",
            "func_name,1",
            "func_name func_name(1)",
            "1, 3",
            "func_name(1,*3)",
            "2 +",
            "* 2",
            "2 + func_name",
            "",
            "   ",
        ] {
            assert_wrong_order(expression);
        }
    }
}
