//! 一次式の解析
//!
//! 識別子・リテラルに加えて、括弧式とタプル、インライン配列、`new`、
//! 型変換、`type(...)`、`payable(...)` を扱う。
//! 基本型トークンは呼び出し対象にならず、`(` が続けば常に型変換として読む。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 一次式を解析
    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            Some(Token::True)
            | Some(Token::False)
            | Some(Token::DecimalNumber(_))
            | Some(Token::HexNumber(_))
            | Some(Token::String(_))
            | Some(Token::HexString(_))
            | Some(Token::UnicodeString(_)) => Ok(Expression::Literal(self.parse_literal()?)),
            Some(Token::Identifier(name)) => {
                let is_call = matches!(self.peek(1), Some(Token::LeftParen));
                match name.as_str() {
                    "payable" if is_call => self.parse_payable_conversion(),
                    "type" if is_call => self.parse_meta_type(),
                    _ => Ok(Expression::Identifier(self.expect_identifier()?)),
                }
            }
            Some(Token::ElementaryType(_)) => self.parse_elementary_type_expression(),
            Some(Token::New) => self.parse_new_expression(),
            Some(Token::LeftParen) => self.parse_parenthesized_or_tuple(),
            Some(Token::LeftBracket) => self.parse_inline_array(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// 式位置の基本型: `uint(x)` は型変換、それ以外は型そのもの（`uint[]` など）
    fn parse_elementary_type_expression(&mut self) -> ParseResult<Expression> {
        let type_name = self.parse_elementary_type_name(false)?;
        if !self.check(&Token::LeftParen) {
            return Ok(Expression::ElementaryType(type_name));
        }

        let start = type_name.span;
        self.expect(Token::LeftParen)?;
        let argument = self.with_struct_literals(|p| p.parse_expression_internal())?;
        self.expect(Token::RightParen)?;
        Ok(Expression::TypeCast(TypeCastExpression {
            type_name,
            argument: Box::new(argument),
            span: self.span_from(start),
        }))
    }

    /// `payable(x)`
    fn parse_payable_conversion(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword("payable")?;
        let arguments = self.parse_call_arguments()?;
        Ok(Expression::PayableConversion(PayableConversionExpression {
            arguments,
            span: self.span_from(start),
        }))
    }

    /// `type(C)`
    fn parse_meta_type(&mut self) -> ParseResult<Expression> {
        let start = self.expect_keyword("type")?;
        self.expect(Token::LeftParen)?;
        let type_name = self.parse_type_name_internal()?;
        self.expect(Token::RightParen)?;
        Ok(Expression::MetaType(MetaTypeExpression {
            type_name,
            span: self.span_from(start),
        }))
    }

    /// `new T`（被演算子は常に型名として読む）
    fn parse_new_expression(&mut self) -> ParseResult<Expression> {
        let start = self.expect(Token::New)?;
        let type_name = self.parse_type_name_internal()?;
        Ok(Expression::New(NewExpression {
            type_name,
            span: self.span_from(start),
        }))
    }

    /// 括弧式またはタプルを解析
    ///
    /// 要素が1つでカンマがなければ括弧式、それ以外（空要素・末尾カンマを含む）はタプル。
    fn parse_parenthesized_or_tuple(&mut self) -> ParseResult<Expression> {
        let start = self.expect(Token::LeftParen)?;

        if self.match_token(&Token::RightParen) {
            return Ok(Expression::Tuple(TupleExpression {
                elements: Vec::new(),
                span: self.span_from(start),
            }));
        }

        let mut elements = Vec::new();
        let mut saw_comma = false;
        loop {
            if self.check(&Token::Comma) || self.check(&Token::RightParen) {
                elements.push(None);
            } else {
                elements.push(Some(self.with_struct_literals(|p| p.parse_expression_internal())?));
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
            saw_comma = true;
        }
        self.expect(Token::RightParen)?;
        let span = self.span_from(start);

        if !saw_comma {
            if let Some(Some(expression)) = elements.pop() {
                return Ok(Expression::Parenthesized(ParenthesizedExpression {
                    expression: Box::new(expression),
                    span,
                }));
            }
        }

        Ok(Expression::Tuple(TupleExpression { elements, span }))
    }

    /// `[a, b, c]`
    fn parse_inline_array(&mut self) -> ParseResult<Expression> {
        let start = self.expect(Token::LeftBracket)?;
        let mut elements = Vec::new();

        while !self.check(&Token::RightBracket) && !self.is_at_end() {
            elements.push(self.with_struct_literals(|p| p.parse_expression_internal())?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expect(Token::RightBracket)?;
        Ok(Expression::InlineArray(InlineArrayExpression {
            elements,
            span: self.span_from(start),
        }))
    }
}
