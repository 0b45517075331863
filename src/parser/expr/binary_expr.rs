//! 二項演算式の解析
//!
//! 演算子の優先順位に従って二項演算式を解析する。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// OR式を解析
    pub(crate) fn parse_or_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and_expression()?;

        while self.match_token(&Token::OrOr) {
            let right = self.parse_and_expression()?;
            left = binary(left, BinaryOperator::Or, right);
        }

        Ok(left)
    }

    /// AND式を解析
    pub(crate) fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_equality_expression()?;

        while self.match_token(&Token::AndAnd) {
            let right = self.parse_equality_expression()?;
            left = binary(left, BinaryOperator::And, right);
        }

        Ok(left)
    }

    /// 等価式を解析
    pub(crate) fn parse_equality_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_relational_expression()?;

        while let Some(op) = self.match_tokens(&[Token::EqEq, Token::NotEq]) {
            let op = match op {
                Token::EqEq => BinaryOperator::Eq,
                _ => BinaryOperator::Ne,
            };
            let right = self.parse_relational_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// 比較式を解析
    pub(crate) fn parse_relational_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_bitwise_or_expression()?;

        while let Some(op) = self.match_tokens(&[Token::LtEq, Token::GtEq, Token::Lt, Token::Gt]) {
            let op = match op {
                Token::LtEq => BinaryOperator::Le,
                Token::GtEq => BinaryOperator::Ge,
                Token::Lt => BinaryOperator::Lt,
                _ => BinaryOperator::Gt,
            };
            let right = self.parse_bitwise_or_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// ビット演算OR式を解析
    pub(crate) fn parse_bitwise_or_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_bitwise_xor_expression()?;

        while self.match_token(&Token::Or) {
            let right = self.parse_bitwise_xor_expression()?;
            left = binary(left, BinaryOperator::BitOr, right);
        }

        Ok(left)
    }

    /// ビット演算XOR式を解析
    pub(crate) fn parse_bitwise_xor_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_bitwise_and_expression()?;

        while self.match_token(&Token::Caret) {
            let right = self.parse_bitwise_and_expression()?;
            left = binary(left, BinaryOperator::BitXor, right);
        }

        Ok(left)
    }

    /// ビット演算AND式を解析
    pub(crate) fn parse_bitwise_and_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_shift_expression()?;

        while self.match_token(&Token::Ampersand) {
            let right = self.parse_shift_expression()?;
            left = binary(left, BinaryOperator::BitAnd, right);
        }

        Ok(left)
    }

    /// シフト式を解析
    pub(crate) fn parse_shift_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_additive_expression()?;

        while let Some(op) = self.match_tokens(&[Token::LtLt, Token::GtGtGt, Token::GtGt]) {
            let op = match op {
                Token::LtLt => BinaryOperator::Shl,
                Token::GtGtGt => BinaryOperator::Sar,
                _ => BinaryOperator::Shr,
            };
            let right = self.parse_additive_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// 加減算式を解析
    pub(crate) fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(op) = self.match_tokens(&[Token::Plus, Token::Minus]) {
            let op = match op {
                Token::Plus => BinaryOperator::Add,
                _ => BinaryOperator::Sub,
            };
            let right = self.parse_multiplicative_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// 乗除算式を解析
    pub(crate) fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_exponent_expression()?;

        while let Some(op) = self.match_tokens(&[Token::Star, Token::Slash, Token::Percent]) {
            let op = match op {
                Token::Star => BinaryOperator::Mul,
                Token::Slash => BinaryOperator::Div,
                _ => BinaryOperator::Mod,
            };
            let right = self.parse_exponent_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// べき乗式を解析（右結合）
    pub(crate) fn parse_exponent_expression(&mut self) -> ParseResult<Expression> {
        let base = self.parse_unary_expression()?;

        if self.match_token(&Token::StarStar) {
            let exponent = self.with_recursion_limit(|p| p.parse_exponent_expression())?;
            return Ok(binary(base, BinaryOperator::Pow, exponent));
        }

        Ok(base)
    }
}

fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    let span = left.span().to(right.span());
    Expression::Binary(BinaryExpression {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        span,
    })
}
