//! pragma / import / using ディレクティブの解析

use std::ops::Range;

use crate::ast::*;
use crate::lexer::Token;

use super::version::parse_version_requirement;
use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// `pragma name value;`
    ///
    /// 値はトークンではなくソースの生テキストとして切り出す。
    /// `solidity` の場合のみバージョン要求として解析する。
    pub(super) fn parse_pragma_directive(&mut self) -> ParseResult<PragmaDirective> {
        let start = self.expect(Token::Pragma)?;
        let name = self.expect_identifier()?;

        while let Some(token) = self.current_token() {
            let ends_value = matches!(
                token,
                Token::Semicolon
                    | Token::Pragma
                    | Token::Import
                    | Token::Abstract
                    | Token::Contract
                    | Token::Interface
                    | Token::Library
            );
            if ends_value {
                break;
            }
            self.advance();
        }

        let value_end = if self.check(&Token::Semicolon) {
            self.current_span().start
        } else {
            self.previous_span().end
        };
        let source = self.source;
        let raw = source.get(name.span.end..value_end).unwrap_or("");
        self.expect(Token::Semicolon)?;

        let origin = name.span.after();
        let leading = raw.len() - raw.trim_start().len();
        let trailing = raw.trim_end().len().max(leading);
        let value_span = sub_span(origin, raw, leading..trailing);

        let raw_value = || PragmaValue::Raw {
            text: raw.trim().to_string(),
            span: value_span,
        };
        // 解析できないバージョン要求はエラーを記録し、生テキストのまま残す
        let value = if name.name != "solidity" {
            raw_value()
        } else if leading == trailing {
            let error = self.invalid("expected version requirement", value_span);
            self.errors.push(error);
            raw_value()
        } else {
            match parse_version_requirement(raw) {
                Ok(alternatives) => PragmaValue::Version(VersionRequirement {
                    alternatives: alternatives
                        .into_iter()
                        .map(|constraints| {
                            constraints
                                .into_iter()
                                .map(|constraint| VersionConstraint {
                                    span: sub_span(origin, raw, constraint.range.clone()),
                                    operator: constraint.operator,
                                    version: constraint.version,
                                })
                                .collect()
                        })
                        .collect(),
                    span: value_span,
                }),
                Err(message) => {
                    let error = self.invalid(message, value_span);
                    self.errors.push(error);
                    raw_value()
                }
            }
        };

        Ok(PragmaDirective {
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// import ディレクティブ
    ///
    /// - `import "path";` / `import "path" as X;`
    /// - `import * as X from "path";`
    /// - `import {a, b as c} from "path";`
    /// - `import X as Y from "path";`
    pub(super) fn parse_import_directive(&mut self) -> ParseResult<ImportDirective> {
        let start = self.expect(Token::Import)?;

        let (path, alias, clause) = match self.current_token() {
            Some(Token::String(_)) => {
                let path = self.parse_import_path()?;
                let alias = self.parse_import_alias()?;
                (path, alias, None)
            }
            Some(Token::Star) => {
                let clause_start = self.expect(Token::Star)?;
                self.expect_keyword("as")?;
                let alias = self.expect_identifier()?;
                let clause = ImportClause::Single {
                    symbol: ImportSymbol::Wildcard(clause_start),
                    alias: Some(alias),
                    span: self.span_from(clause_start),
                };
                self.expect_keyword("from")?;
                (self.parse_import_path()?, None, Some(clause))
            }
            Some(Token::LeftBrace) => {
                let clause_start = self.expect(Token::LeftBrace)?;
                let mut symbols = Vec::new();
                loop {
                    let name = self.expect_identifier()?;
                    let symbol_start = name.span;
                    let alias = self.parse_import_alias()?;
                    symbols.push(ImportAlias {
                        name,
                        alias,
                        span: self.span_from(symbol_start),
                    });
                    if !self.match_token(&Token::Comma) {
                        break;
                    }
                }
                self.expect(Token::RightBrace)?;
                let clause = ImportClause::Multiple {
                    symbols,
                    span: self.span_from(clause_start),
                };
                self.expect_keyword("from")?;
                (self.parse_import_path()?, None, Some(clause))
            }
            Some(Token::Identifier(_)) => {
                let symbol = self.expect_identifier()?;
                let clause_start = symbol.span;
                let alias = self.parse_import_alias()?;
                let clause = ImportClause::Single {
                    symbol: ImportSymbol::Name(symbol),
                    alias,
                    span: self.span_from(clause_start),
                };
                self.expect_keyword("from")?;
                (self.parse_import_path()?, None, Some(clause))
            }
            _ => return Err(self.unexpected("import path or import clause")),
        };

        self.expect(Token::Semicolon)?;
        Ok(ImportDirective {
            path,
            alias,
            clause,
            span: self.span_from(start),
        })
    }

    fn parse_import_path(&mut self) -> ParseResult<ImportPath> {
        let (value, span) = self.expect_string()?;
        Ok(ImportPath { value, span })
    }

    /// `as X` があれば解析
    fn parse_import_alias(&mut self) -> ParseResult<Option<Identifier>> {
        if self.match_identifier("as") {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// `using Lib for *;` / `using Lib for Type;`
    pub(super) fn parse_using_directive(&mut self) -> ParseResult<UsingDirective> {
        let start = self.expect(Token::Using)?;
        let library = self.parse_identifier_path()?;
        self.expect(Token::For)?;

        let target = if self.check(&Token::Star) {
            let span = self.current_span();
            self.advance();
            UsingTarget::Wildcard(span)
        } else {
            UsingTarget::Type(self.parse_type_name_internal()?)
        };

        self.expect(Token::Semicolon)?;
        Ok(UsingDirective {
            library,
            target,
            span: self.span_from(start),
        })
    }
}

/// `raw` の先頭が `origin` にあるとき、`raw` 内の範囲に対応するスパン
fn sub_span(origin: Span, raw: &str, range: Range<usize>) -> Span {
    let mut start_position = origin.start_position;
    start_position.advance_str(raw.get(..range.start).unwrap_or(""));
    let mut end_position = start_position;
    end_position.advance_str(raw.get(range.clone()).unwrap_or(""));

    Span::with_positions(
        origin.start + range.start,
        origin.start + range.end,
        start_position,
        end_position,
    )
}
