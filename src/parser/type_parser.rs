//! 型名とパラメータリストの解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 型名を解析（配列の添字を含む）
    pub(super) fn parse_type_name_internal(&mut self) -> ParseResult<TypeName> {
        self.with_recursion_limit(|p| p.parse_type_name_inner())
    }

    fn parse_type_name_inner(&mut self) -> ParseResult<TypeName> {
        let base = match self.current_token() {
            Some(Token::ElementaryType(_)) => TypeName::Elementary(self.parse_elementary_type_name(true)?),
            Some(Token::Mapping) => TypeName::Mapping(self.parse_mapping_type()?),
            Some(Token::Function) => TypeName::Function(self.parse_function_type()?),
            Some(Token::Identifier(_)) => TypeName::UserDefined(self.parse_identifier_path()?),
            _ => return Err(self.unexpected("type name")),
        };
        self.parse_array_suffixes(base)
    }

    /// `T[N][]...` を左から順に包む（最後の添字が最外側）
    pub(super) fn parse_array_suffixes(&mut self, mut ty: TypeName) -> ParseResult<TypeName> {
        while self.check(&Token::LeftBracket) {
            let start = ty.span();
            self.advance();
            let size = if self.check(&Token::RightBracket) {
                None
            } else {
                Some(Box::new(self.parse_expression_internal()?))
            };
            self.expect(Token::RightBracket)?;
            ty = TypeName::Array(ArrayType {
                base: Box::new(ty),
                size,
                span: self.span_from(start),
            });
        }
        Ok(ty)
    }

    /// 基本型名を解析
    ///
    /// `allow_payable` が真なら `address payable` を1つの型として読む。
    pub(super) fn parse_elementary_type_name(
        &mut self,
        allow_payable: bool,
    ) -> ParseResult<ElementaryTypeName> {
        let start = self.current_span();
        let word = match self.current_token() {
            Some(Token::ElementaryType(word)) => word.clone(),
            _ => return Err(self.unexpected("elementary type name")),
        };
        let kind = ElementaryType::from_keyword(&word)
            .ok_or_else(|| self.invalid(format!("unknown elementary type '{}'", word), start))?;
        self.advance();

        let kind = if kind == ElementaryType::Address && allow_payable && self.match_identifier("payable") {
            ElementaryType::AddressPayable
        } else {
            kind
        };

        Ok(ElementaryTypeName {
            kind,
            span: self.span_from(start),
        })
    }

    /// `a.b.c` 形式の識別子パスを解析
    pub(super) fn parse_identifier_path(&mut self) -> ParseResult<IdentifierPath> {
        let first = self.expect_identifier()?;
        let start = first.span;
        let mut segments = vec![first];
        while self.check(&Token::Dot) && matches!(self.peek(1), Some(Token::Identifier(_))) {
            self.advance();
            segments.push(self.expect_identifier()?);
        }
        Ok(IdentifierPath {
            segments,
            span: self.span_from(start),
        })
    }

    /// `mapping(K => V)` を解析
    fn parse_mapping_type(&mut self) -> ParseResult<MappingType> {
        let start = self.expect(Token::Mapping)?;
        self.expect(Token::LeftParen)?;

        // キーは基本型かユーザー定義型のみ
        let key = match self.current_token() {
            Some(Token::ElementaryType(_)) => TypeName::Elementary(self.parse_elementary_type_name(false)?),
            Some(Token::Identifier(_)) => TypeName::UserDefined(self.parse_identifier_path()?),
            _ => {
                return Err(self.invalid(
                    "mapping key must be an elementary or user-defined type",
                    self.current_span(),
                ))
            }
        };

        self.expect(Token::FatArrow)?;
        let value = self.parse_type_name_internal()?;
        self.expect(Token::RightParen)?;

        Ok(MappingType {
            key: Box::new(key),
            value: Box::new(value),
            span: self.span_from(start),
        })
    }

    /// `function (params) internal|external pure|view|payable returns (params)` を解析
    fn parse_function_type(&mut self) -> ParseResult<FunctionType> {
        let start = self.expect(Token::Function)?;
        let parameters = self.parse_parameter_list()?;

        // 状態変数の可視性と混同しないよう internal/external のみ受け付ける
        let mut attributes = Vec::new();
        loop {
            let span = self.current_span();
            let attribute = match self.current_token().and_then(|t| t.identifier()) {
                Some(word @ ("internal" | "external")) => FunctionAttribute::Visibility {
                    visibility: Visibility::from_keyword(word).unwrap_or(Visibility::Internal),
                    span,
                },
                Some(word) => match StateMutability::from_keyword(word) {
                    Some(mutability) => FunctionAttribute::Mutability { mutability, span },
                    None => break,
                },
                None => break,
            };
            self.advance();
            attributes.push(attribute);
        }

        let returns = if self.match_token(&Token::Returns) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };

        Ok(FunctionType {
            parameters,
            attributes,
            returns,
            span: self.span_from(start),
        })
    }

    /// `(T a, T memory b, T)` を解析
    pub(super) fn parse_parameter_list(&mut self) -> ParseResult<Vec<Parameter>> {
        self.expect(Token::LeftParen)?;
        let mut parameters = Vec::new();
        if self.match_token(&Token::RightParen) {
            return Ok(parameters);
        }
        loop {
            parameters.push(self.parse_parameter()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(parameters)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let start = self.current_span();
        let type_name = self.parse_type_name_internal()?;
        let location = self.parse_storage_location();
        let name = match self.current_token() {
            Some(Token::Identifier(_)) => Some(self.expect_identifier()?),
            _ => None,
        };
        Ok(Parameter {
            type_name,
            location,
            name,
            span: self.span_from(start),
        })
    }

    /// `memory` / `storage` / `calldata` があれば消費する
    pub(super) fn parse_storage_location(&mut self) -> Option<StorageLocation> {
        let location = self
            .current_token()
            .and_then(|t| t.identifier())
            .and_then(StorageLocation::from_keyword)?;
        self.advance();
        Some(location)
    }
}
