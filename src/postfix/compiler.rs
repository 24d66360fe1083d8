use crate::token::Token;

pub struct PostfixCompiler;

impl PostfixCompiler {
    /// Reorders a validated infix sequence into postfix order (shunting-yard).
    ///
    /// Operators of equal priority associate to the left. Function tokens are
    /// emitted right after the close-group of their argument list.
    pub fn compile(tokens: Vec<Token>) -> Vec<Token> {
        let mut output = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Token> = Vec::new();

        for token in tokens {
            match token {
                Token::Number(_) => output.push(token),
                Token::Function(_) | Token::OpenGroup => stack.push(token),
                Token::Separator => {
                    while let Some(top) = stack.pop_if(|top| *top != Token::OpenGroup) {
                        output.push(top);
                    }
                }
                Token::CloseGroup => {
                    while let Some(top) = stack.pop() {
                        if top == Token::OpenGroup {
                            break;
                        }
                        output.push(top);
                    }
                    if let Some(function) = stack.pop_if(|top| top.is_function()) {
                        output.push(function);
                    }
                }
                Token::Operation(operator) => {
                    while let Some(top) = stack.pop_if(|top| {
                        matches!(top, Token::Operation(other) if other.priority() >= operator.priority())
                    }) {
                        output.push(top);
                    }
                    stack.push(token);
                }
            }
        }

        while let Some(top) = stack.pop() {
            output.push(top);
        }
        output
    }
}

pub fn to_postfix(tokens: Vec<Token>) -> Vec<Token> {
    PostfixCompiler::compile(tokens)
}
