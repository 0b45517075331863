//! リテラル式の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 現在位置のリテラルを解析
    pub(crate) fn parse_literal(&mut self) -> ParseResult<Literal> {
        let start = self.current_span();
        match self.current_token() {
            Some(Token::True) | Some(Token::False) => {
                let value = self.check(&Token::True);
                self.advance();
                Ok(Literal::Boolean(BooleanLiteral { value, span: start }))
            }
            Some(Token::DecimalNumber(_)) | Some(Token::HexNumber(_)) => {
                Ok(Literal::Number(self.parse_number_literal()?))
            }
            Some(Token::String(_)) => Ok(Literal::String(self.parse_string_parts(StringKind::Plain))),
            Some(Token::HexString(_)) => Ok(Literal::HexString(self.parse_string_parts(StringKind::Hex))),
            Some(Token::UnicodeString(_)) => {
                Ok(Literal::UnicodeString(self.parse_string_parts(StringKind::Unicode)))
            }
            _ => Err(self.unexpected("literal")),
        }
    }

    /// 数値リテラルと、直後にあれば単位（`1 ether`, `2 days`）を解析
    fn parse_number_literal(&mut self) -> ParseResult<NumberLiteral> {
        let start = self.current_span();
        let (value, kind) = match self.current_token() {
            Some(Token::DecimalNumber(text)) => (text.clone(), NumberKind::Decimal),
            Some(Token::HexNumber(text)) => (text.clone(), NumberKind::Hex),
            _ => return Err(self.unexpected("number literal")),
        };
        self.advance();

        let unit = self
            .current_token()
            .and_then(|t| t.identifier())
            .and_then(NumberUnit::from_keyword);
        if unit.is_some() {
            self.advance();
        }

        Ok(NumberLiteral {
            value,
            kind,
            unit,
            span: self.span_from(start),
        })
    }

    /// 隣接する同種の文字列リテラルを1つに連結する
    fn parse_string_parts(&mut self, kind: StringKind) -> StringLiteral {
        let start = self.current_span();
        let mut digits = String::new();
        let mut bytes = Vec::new();
        let mut parts = Vec::new();

        loop {
            match (kind, self.current_token()) {
                (StringKind::Plain, Some(Token::String(part)))
                | (StringKind::Unicode, Some(Token::UnicodeString(part))) => {
                    bytes.extend_from_slice(part)
                }
                (StringKind::Hex, Some(Token::HexString(part))) => {
                    digits.push_str(part);
                    bytes.extend(decode_hex(part));
                }
                _ => break,
            }
            parts.push(self.current_span());
            self.advance();
        }

        let value = match kind {
            StringKind::Hex => digits,
            StringKind::Plain | StringKind::Unicode => String::from_utf8_lossy(&bytes).into_owned(),
        };
        StringLiteral {
            value,
            bytes,
            parts,
            span: self.span_from(start),
        }
    }
}

/// 偶数桁の16進数字列をバイト列に戻す
fn decode_hex(digits: &str) -> impl Iterator<Item = u8> + '_ {
    (0..digits.len())
        .step_by(2)
        .filter_map(move |i| digits.get(i..i + 2))
        .filter_map(|pair| u8::from_str_radix(pair, 16).ok())
}

#[derive(Clone, Copy)]
enum StringKind {
    Plain,
    Hex,
    Unicode,
}
