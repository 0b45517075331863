//! レキサーのメイン実装

use logos::{Lexer as LogosLexer, Logos};

use super::token::{LexErrorKind, Token};
use crate::ast::{Position, Span};
use crate::error::LexerError;

/// 位置情報付きトークン
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub span: logos::Span,
    pub start: Position,
    pub end: Position,
}

impl TokenWithPosition {
    /// AST用のスパン（行・列つき）
    pub fn ast_span(&self) -> Span {
        Span::with_positions(self.span.start, self.span.end, self.start, self.end)
    }
}

/// トークン列と字句エラーのまとめ
#[derive(Debug, Clone)]
pub struct Tokenized {
    pub tokens: Vec<TokenWithPosition>,
    pub errors: Vec<LexerError>,
    /// 入力末尾の幅ゼロのスパン
    pub eof: Span,
}

/// Solidityのレキサー
///
/// 字句エラーでは停止せず、`Token::Error` を流して続行する。
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    offset: usize,
    position: Position,
    errors: Vec<LexerError>,
}

impl<'a> Lexer<'a> {
    /// 新しいレキサーを作成
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            offset: 0,
            position: Position::default(),
            errors: Vec::new(),
        }
    }

    /// 次のトークンを取得
    pub fn next_token(&mut self) -> Option<TokenWithPosition> {
        let result = self.inner.next()?;
        let span = self.inner.span();
        let start = self.advance_to(span.start);
        let end = self.advance_to(span.end);

        let token = match result {
            Ok(token) => token,
            Err(kind) => {
                let error = self.make_error(kind, Span::with_positions(span.start, span.end, start, end));
                log::debug!("lexer error: {}", error);
                self.errors.push(error);
                Token::Error
            }
        };

        Some(TokenWithPosition {
            token,
            span,
            start,
            end,
        })
    }

    /// 残りを全てトークン化
    pub fn tokenize(mut self) -> Tokenized {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        let len = self.inner.source().len();
        let end = self.advance_to(len);
        Tokenized {
            tokens,
            errors: self.errors,
            eof: Span::with_positions(len, len, end, end),
        }
    }

    /// これまでに記録した字句エラー
    pub fn errors(&self) -> &[LexerError] {
        &self.errors
    }

    /// 指定オフセットまで行・列を進める（オフセットは単調増加）
    fn advance_to(&mut self, offset: usize) -> Position {
        if offset > self.offset {
            let source = self.inner.source();
            if let Some(text) = source.get(self.offset..offset) {
                self.position.advance_str(text);
            }
            self.offset = offset;
        }
        self.position
    }

    fn make_error(&self, kind: LexErrorKind, span: Span) -> LexerError {
        match kind {
            LexErrorKind::InvalidCharacter => LexerError::InvalidCharacter {
                character: self.inner.slice().to_string(),
                span,
            },
            LexErrorKind::UnterminatedString => LexerError::UnterminatedString { span },
            LexErrorKind::UnterminatedComment => LexerError::UnterminatedComment { span },
            LexErrorKind::InvalidEscape(sequence) => LexerError::InvalidEscape { sequence, span },
            LexErrorKind::InvalidHexString(message) => {
                LexerError::InvalidHexString { message, span }
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// ソースコードをトークン化
pub fn tokenize(input: &str) -> Tokenized {
    Lexer::new(input).tokenize()
}

/// デバッグ用：トークンストリームを文字列として出力
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:?} @ {:?} ({})", t.token, t.span, t.start))
        .collect::<Vec<_>>()
        .join("\n")
}
