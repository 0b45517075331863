//! 式の解析
//!
//! 優先順位（低い順）:
//! 代入 < 三項 < `||` < `&&` < `== !=` < `< > <= >=` < `|` < `^` < `&`
//! < シフト < `+ -` < `* / %` < `**` < 前置単項 < 後置（呼び出し・メンバー・添字）
//!
//! 代入と `**` は右結合、それ以外の二項演算子は左結合。

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 式を解析（内部実装）
    pub(super) fn parse_expression_internal(&mut self) -> ParseResult<Expression> {
        self.parse_assignment_expression()
    }

    /// 代入式を解析（右結合）
    ///
    /// 括弧・三項・代入の入れ子はすべてここを通るので、深さはここで数える。
    fn parse_assignment_expression(&mut self) -> ParseResult<Expression> {
        self.with_recursion_limit(|p| p.parse_assignment_expression_inner())
    }

    fn parse_assignment_expression_inner(&mut self) -> ParseResult<Expression> {
        let left = self.parse_conditional_expression()?;

        let Some(operator) = self.match_assignment_operator() else {
            return Ok(left);
        };
        if !left.is_assignable() {
            return Err(self.invalid("invalid left-hand side of assignment", left.span()));
        }

        let right = self.parse_assignment_expression()?;
        let span = left.span().to(right.span());
        Ok(Expression::Assignment(AssignmentExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }))
    }

    fn match_assignment_operator(&mut self) -> Option<AssignmentOperator> {
        let operator = match self.current_token()? {
            Token::Assign => AssignmentOperator::Assign,
            Token::OrAssign => AssignmentOperator::OrAssign,
            Token::CaretAssign => AssignmentOperator::XorAssign,
            Token::AndAssign => AssignmentOperator::AndAssign,
            Token::LtLtAssign => AssignmentOperator::ShlAssign,
            Token::GtGtAssign => AssignmentOperator::ShrAssign,
            Token::GtGtGtAssign => AssignmentOperator::SarAssign,
            Token::PlusAssign => AssignmentOperator::AddAssign,
            Token::MinusAssign => AssignmentOperator::SubAssign,
            Token::StarAssign => AssignmentOperator::MulAssign,
            Token::SlashAssign => AssignmentOperator::DivAssign,
            Token::PercentAssign => AssignmentOperator::ModAssign,
            _ => return None,
        };
        self.advance();
        Some(operator)
    }

    /// 三項演算式を解析
    ///
    /// 両分岐とも完全な式として読むため、`a ? b : c ? d : e` は偽分岐側に入れ子になる。
    fn parse_conditional_expression(&mut self) -> ParseResult<Expression> {
        let condition = self.parse_or_expression()?;
        if !self.match_token(&Token::Question) {
            return Ok(condition);
        }

        let if_true = self.with_struct_literals(|p| p.parse_assignment_expression())?;
        self.expect(Token::Colon)?;
        let if_false = self.parse_assignment_expression()?;

        let span = condition.span().to(if_false.span());
        Ok(Expression::Ternary(TernaryExpression {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
            span,
        }))
    }

    /// 括弧などの内側では構造体リテラルの制限を外して解析する
    pub(super) fn with_struct_literals<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.restrict_struct_literal, false);
        let result = f(self);
        self.restrict_struct_literal = saved;
        result
    }

    /// `try` の式位置用: `{` を構造体リテラルとして読まない
    pub(super) fn without_struct_literals<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.restrict_struct_literal, true);
        let result = f(self);
        self.restrict_struct_literal = saved;
        result
    }
}
