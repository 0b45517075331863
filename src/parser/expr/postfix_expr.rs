// 後置演算式の解析
//
// 添字・スライス、メンバーアクセス、関数呼び出し、構造体リテラル、後置 ++/-- を解析する。
// いずれも同じ最上位の優先順位で左から右へ連鎖する。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 後置式を解析
    pub(crate) fn parse_postfix_expression(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            let start = expr.span();

            match self.current_token() {
                Some(Token::LeftBracket) => {
                    expr = self.parse_index_or_slice(expr)?;
                }
                Some(Token::Dot) => {
                    self.advance();
                    let member = self.expect_identifier()?;
                    expr = Expression::Member(MemberExpression {
                        object: Box::new(expr),
                        member,
                        span: self.span_from(start),
                    });
                }
                Some(Token::LeftParen) => {
                    let arguments = self.parse_call_arguments()?;
                    expr = Expression::Call(CallExpression {
                        callee: Box::new(expr),
                        arguments,
                        span: self.span_from(start),
                    });
                }
                Some(Token::LeftBrace) if self.at_struct_literal_start() => {
                    match self.parse_struct_literal(expr)? {
                        Ok(literal) => expr = literal,
                        Err(original) => {
                            expr = original;
                            break;
                        }
                    }
                }
                Some(Token::PlusPlus) | Some(Token::MinusMinus) => {
                    let operator = if self.check(&Token::PlusPlus) {
                        UpdateOperator::Increment
                    } else {
                        UpdateOperator::Decrement
                    };
                    self.advance();
                    expr = Expression::Update(UpdateExpression {
                        operator,
                        is_prefix: false,
                        operand: Box::new(expr),
                        span: self.span_from(start),
                    });
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// `a[i]` / `a[]` / `a[from:to]`
    fn parse_index_or_slice(&mut self, base: Expression) -> ParseResult<Expression> {
        let start = base.span();
        self.expect(Token::LeftBracket)?;

        if self.match_token(&Token::RightBracket) {
            return Ok(Expression::Index(IndexExpression {
                base: Box::new(base),
                index: None,
                span: self.span_from(start),
            }));
        }

        let from = if self.check(&Token::Colon) {
            None
        } else {
            Some(Box::new(self.with_struct_literals(|p| p.parse_expression_internal())?))
        };

        if self.match_token(&Token::Colon) {
            let to = if self.check(&Token::RightBracket) {
                None
            } else {
                Some(Box::new(self.with_struct_literals(|p| p.parse_expression_internal())?))
            };
            self.expect(Token::RightBracket)?;
            return Ok(Expression::Slice(SliceExpression {
                base: Box::new(base),
                from,
                to,
                span: self.span_from(start),
            }));
        }

        self.expect(Token::RightBracket)?;
        Ok(Expression::Index(IndexExpression {
            base: Box::new(base),
            index: from,
            span: self.span_from(start),
        }))
    }

    /// `{ identifier :` が続くか
    fn at_struct_literal_start(&self) -> bool {
        matches!(self.peek(1), Some(Token::Identifier(_))) && matches!(self.peek(2), Some(Token::Colon))
    }

    /// 構造体リテラル（呼び出しオプション）を解析する
    ///
    /// `try` の式位置では、直後に `(` が続く呼び出しオプションのときだけ採用し、
    /// それ以外は巻き戻して元の式を返す（`{` は本体ブロックになる）。
    fn parse_struct_literal(
        &mut self,
        type_expression: Expression,
    ) -> ParseResult<Result<Expression, Expression>> {
        let checkpoint = self.checkpoint();
        let start = type_expression.span();
        let fields = self.with_struct_literals(|p| p.parse_named_arguments())?;

        if self.restrict_struct_literal && !self.check(&Token::LeftParen) {
            log::trace!("struct literal rejected in try expression position");
            self.rewind(checkpoint);
            return Ok(Err(type_expression));
        }

        Ok(Ok(Expression::Struct(StructExpression {
            type_expression: Box::new(type_expression),
            fields,
            span: self.span_from(start),
        })))
    }

    /// `{name: value, ...}` を解析
    pub(crate) fn parse_named_arguments(&mut self) -> ParseResult<Vec<NamedArgument>> {
        self.expect(Token::LeftBrace)?;
        let mut arguments = Vec::new();

        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let name = self.expect_identifier()?;
            let start = name.span;
            self.expect(Token::Colon)?;
            let value = self.parse_expression_internal()?;
            arguments.push(NamedArgument {
                name,
                value,
                span: self.span_from(start),
            });
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expect(Token::RightBrace)?;
        Ok(arguments)
    }

    /// 呼び出し引数 `(a, b)` / `({a: 1})` を解析
    pub(crate) fn parse_call_arguments(&mut self) -> ParseResult<CallArguments> {
        let start = self.expect(Token::LeftParen)?;

        if self.check(&Token::LeftBrace) {
            let arguments = self.with_struct_literals(|p| p.parse_named_arguments())?;
            self.expect(Token::RightParen)?;
            return Ok(CallArguments::Named {
                arguments,
                span: self.span_from(start),
            });
        }

        let arguments = self.with_struct_literals(|p| p.parse_arguments())?;
        self.expect(Token::RightParen)?;
        Ok(CallArguments::Positional {
            arguments,
            span: self.span_from(start),
        })
    }

    /// 位置引数リストを解析
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut args = Vec::new();

        while !self.check(&Token::RightParen) && !self.is_at_end() {
            args.push(self.parse_expression_internal()?);
            if !self.check(&Token::RightParen) {
                self.expect(Token::Comma)?;
            }
        }

        Ok(args)
    }
}
