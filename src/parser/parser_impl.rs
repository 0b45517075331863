//! メインパーサー構造とユーティリティ

use crate::ast::*;
use crate::error::{LexerError, ParserError, SolidityError};
use crate::lexer::{Lexer, Token, TokenWithPosition};

use super::{ParseError, ParseResult};

/// 式・文・型名の再帰の深さの上限
pub const RECURSION_LIMIT: usize = 128;

/// Solidityパーサー
pub struct Parser<'a> {
    pub(super) source: &'a str,
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) current: usize,
    pub(super) eof: Span,
    /// 回復済みの構文エラー
    pub(super) errors: Vec<ParserError>,
    pub(super) lex_errors: Vec<LexerError>,
    /// `try` の式位置では `{` を本体ブロックとして扱う
    pub(super) restrict_struct_literal: bool,
    /// 現在の再帰の深さ
    pub(super) depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let tokenized = Lexer::new(source).tokenize();
        Self {
            source,
            tokens: tokenized.tokens,
            current: 0,
            eof: tokenized.eof,
            errors: Vec::new(),
            lex_errors: tokenized.errors,
            restrict_struct_literal: false,
            depth: 0,
        }
    }

    /// ソースファイル全体を解析（失敗しない）
    pub fn parse(&mut self) -> SourceFile {
        self.parse_source_file()
    }

    /// 単一の式を解析（入力全体が1つの式である必要がある）
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression_internal()?;
        self.expect_end()?;
        Ok(expr)
    }

    /// 単一の文を解析
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let stmt = self.parse_statement_internal()?;
        self.expect_end()?;
        Ok(stmt)
    }

    /// 単一の型名を解析
    pub fn parse_type_name(&mut self) -> ParseResult<TypeName> {
        let ty = self.parse_type_name_internal()?;
        self.expect_end()?;
        Ok(ty)
    }

    /// 字句エラーと構文エラーを位置順にまとめて返す
    pub fn errors(&self) -> Vec<SolidityError> {
        let mut all: Vec<SolidityError> = self
            .lex_errors
            .iter()
            .cloned()
            .map(SolidityError::Lexer)
            .chain(self.errors.iter().cloned().map(SolidityError::Parser))
            .collect();
        all.sort_by_key(|e| e.span().map(|s| s.start).unwrap_or(0));
        all
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 現在のトークンを位置情報付きで取得
    pub(super) fn current_token_with_pos(&self) -> Option<&TokenWithPosition> {
        self.tokens.get(self.current)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    /// 現在のスパンを取得（終端では入力末尾）
    pub(super) fn current_span(&self) -> Span {
        self.current_token_with_pos()
            .map(|t| t.ast_span())
            .unwrap_or(self.eof)
    }

    /// 直前に消費したトークンのスパン
    pub(super) fn previous_span(&self) -> Span {
        if self.current == 0 {
            return Span::with_positions(0, 0, Position::default(), Position::default());
        }
        self.tokens
            .get(self.current - 1)
            .map(|t| t.ast_span())
            .unwrap_or(self.eof)
    }

    /// 開始スパンから直前のトークンまでのスパンを作成
    pub(super) fn span_from(&self, start: Span) -> Span {
        let previous = self.previous_span();
        if previous.end < start.start {
            Span::with_positions(start.start, start.start, start.start_position, start.start_position)
        } else {
            start.to(previous)
        }
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// 現在のトークンが指定の識別子（文脈依存キーワード）か
    pub(super) fn check_identifier(&self, word: &str) -> bool {
        self.current_token().is_some_and(|t| t.is_identifier(word))
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 指定の識別子にマッチしたら進む
    pub(super) fn match_identifier(&mut self, word: &str) -> bool {
        if self.check_identifier(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 複数のトークンタイプのいずれかにマッチしたら進む
    pub(super) fn match_tokens(&mut self, token_types: &[Token]) -> Option<Token> {
        for token_type in token_types {
            if self.check(token_type) {
                let token = self.current_token()?.clone();
                self.advance();
                return Some(token);
            }
        }
        None
    }

    /// 特定のトークンを期待し、そのスパンを返す
    ///
    /// 閉じ記号と `;` の欠落は `MissingToken` として直前トークンの直後を指す。
    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<Span> {
        if self.check(&token_type) {
            let span = self.current_span();
            self.advance();
            return Ok(span);
        }

        let closing = matches!(
            token_type,
            Token::Semicolon | Token::RightParen | Token::RightBracket | Token::RightBrace
        );
        if closing {
            Err(ParserError::MissingToken {
                token: format!("'{}'", token_type),
                span: self.previous_span().after(),
            })
        } else {
            Err(self.unexpected(&format!("'{}'", token_type)))
        }
    }

    /// 文脈依存キーワードを期待
    pub(super) fn expect_keyword(&mut self, word: &str) -> ParseResult<Span> {
        if self.check_identifier(word) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&format!("'{}'", word)))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        match self.current_token() {
            Some(Token::Identifier(name)) => {
                let identifier = Identifier::new(name.clone(), self.current_span());
                self.advance();
                Ok(identifier)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// 文字列リテラルを期待
    pub(super) fn expect_string(&mut self) -> ParseResult<(String, Span)> {
        match self.current_token() {
            Some(Token::String(bytes)) => {
                let value = String::from_utf8_lossy(bytes).into_owned();
                let span = self.current_span();
                self.advance();
                Ok((value, span))
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    /// 入力の終端を期待（断片解析用）
    fn expect_end(&self) -> ParseResult<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    /// 予期しないトークン（終端なら予期しないEOF）のエラーを作成
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        match self.current_token() {
            Some(token) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
                span: self.current_span(),
            },
            None => ParserError::UnexpectedEof {
                expected: expected.to_string(),
                span: self.eof,
            },
        }
    }

    /// 不正な構文エラーを作成
    pub(super) fn invalid(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParserError::InvalidSyntax {
            message: message.into(),
            span,
        }
    }

    /// 再帰の深さを数えながら `f` を実行する
    ///
    /// 上限を超えた入力はスタックを使い切る前に構文エラーとして返す。
    pub(super) fn with_recursion_limit<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.depth += 1;
        let result = if self.depth > RECURSION_LIMIT {
            log::debug!("recursion limit reached at {}", self.current_span().start_position);
            Err(self.invalid("nesting too deep", self.current_span()))
        } else {
            f(self)
        };
        self.depth -= 1;
        result
    }

    // ==================== プローブとエラー回復 ====================

    /// プローブ用の巻き戻し位置
    pub(super) fn checkpoint(&self) -> (usize, usize) {
        (self.current, self.errors.len())
    }

    pub(super) fn rewind(&mut self, checkpoint: (usize, usize)) {
        log::trace!(
            "rewinding from token {} to {}",
            self.current,
            checkpoint.0
        );
        self.current = checkpoint.0;
        self.errors.truncate(checkpoint.1);
    }

    /// 2つの解釈がどちらも失敗し、先まで読めた側を採るときのエラー
    ///
    /// `;` などの欠落はそのまま返し、次行を保つ回復が効くようにする。
    pub(super) fn ambiguity_fallback(
        &mut self,
        interpretation: &str,
        error: ParseError,
        reach: (usize, usize),
    ) -> ParseError {
        log::trace!("falling back to the {} reading", interpretation);
        self.rewind(reach);
        match error {
            ParserError::MissingToken { .. } => error,
            _ => ParserError::AmbiguityFallback {
                interpretation: interpretation.to_string(),
                message: error.summary(),
                span: error.span(),
            },
        }
    }

    /// 構文エラーから回復し、スキップした範囲のエラーノードを返す
    ///
    /// `;` の欠落で次のトークンが次行にある場合と、`;` や `}` の直後で
    /// 失敗した場合はスキップせず、次の兄弟をそのまま解析できるようにする。
    pub(super) fn recover(&mut self, error: ParseError, start_index: usize) -> ErrorNode {
        let start_span = self
            .tokens
            .get(start_index)
            .map(|t| t.ast_span())
            .unwrap_or(self.eof);

        let progressed = self.current > start_index;
        let keep_next_line = matches!(&error, ParserError::MissingToken { token, .. } if token == "';'")
            && progressed
            && self.next_token_on_new_line();
        // 構文単位を閉じきった後に検出したエラーは、その場が同期点になる
        let at_boundary = progressed
            && matches!(
                self.tokens.get(self.current - 1).map(|t| &t.token),
                Some(Token::Semicolon) | Some(Token::RightBrace)
            );

        if !keep_next_line && !at_boundary {
            self.synchronize();
        }
        if self.current == start_index && !self.is_at_end() {
            // 必ず1トークンは進める
            self.advance();
        }

        let span = self.span_from(start_span);
        log::debug!(
            "recovered from syntax error at {}: {} (skipped {}..{})",
            error.span().start_position,
            error,
            span.start,
            span.end
        );
        let message = error.summary();
        self.errors.push(error);
        ErrorNode { message, span }
    }

    /// 次の同期点（深さ0の `;` の後、深さ0の `}` の前、釣り合った `{...}` の後）まで読み飛ばす
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.current_token() {
            match token {
                Token::LeftParen | Token::LeftBracket | Token::LeftBrace => {
                    depth += 1;
                    self.advance();
                }
                Token::RightParen | Token::RightBracket => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                Token::RightBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                Token::Semicolon => {
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                }
                _ => self.advance(),
            }
        }
    }

    /// 現在のトークンが直前のトークンより後の行で始まるか
    fn next_token_on_new_line(&self) -> bool {
        match (self.current_token_with_pos(), self.current.checked_sub(1)) {
            (Some(next), Some(prev_index)) => self
                .tokens
                .get(prev_index)
                .is_some_and(|prev| next.start.line > prev.end.line),
            (None, _) => true,
            _ => false,
        }
    }

    /// 閉じ括弧がないまま終端に達したときのエラーノード
    ///
    /// 位置は最後のトークンの直後（末尾のコメントや空白は含めない）。
    pub(super) fn missing_closing_brace(&mut self) -> ErrorNode {
        let span = self.previous_span().after();
        let error = ParserError::MissingToken {
            token: "'}'".to_string(),
            span,
        };
        log::debug!("unclosed block at end of input ({})", span.start_position);
        let message = error.summary();
        self.errors.push(error);
        ErrorNode { message, span }
    }
}
