//! 前置単項演算式の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 前置単項式を解析
    ///
    /// `! ~ - + delete` と前置 `++ --`。被演算子も前置単項式なので `-a ** b` は `(-a) ** b`。
    pub(crate) fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_span();

        let operator = match self.current_token() {
            Some(Token::Bang) => Some(UnaryOperator::Not),
            Some(Token::Tilde) => Some(UnaryOperator::BitNot),
            Some(Token::Minus) => Some(UnaryOperator::Neg),
            Some(Token::Plus) => Some(UnaryOperator::Plus),
            Some(Token::Delete) => Some(UnaryOperator::Delete),
            _ => None,
        };
        if let Some(operator) = operator {
            self.advance();
            let operand = self.with_recursion_limit(|p| p.parse_unary_expression())?;
            return Ok(Expression::Unary(UnaryExpression {
                operator,
                operand: Box::new(operand),
                span: self.span_from(start),
            }));
        }

        let update = match self.current_token() {
            Some(Token::PlusPlus) => Some(UpdateOperator::Increment),
            Some(Token::MinusMinus) => Some(UpdateOperator::Decrement),
            _ => None,
        };
        if let Some(operator) = update {
            self.advance();
            let operand = self.with_recursion_limit(|p| p.parse_unary_expression())?;
            return Ok(Expression::Update(UpdateExpression {
                operator,
                is_prefix: true,
                operand: Box::new(operand),
                span: self.span_from(start),
            }));
        }

        self.parse_postfix_expression()
    }
}
