//! 統一的なエラーハンドリングモジュール
//!
//! 字句解析・構文解析で発生するエラー型と、codespan-reportingによる
//! 診断メッセージへの変換を提供します。
//! 構文解析は失敗で中断しないため、これらのエラーは解析結果と一緒に返されます。

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Solidityパーサーの統一エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolidityError {
    /// レキサーエラー
    #[error("字句解析エラー: {0}")]
    Lexer(#[from] LexerError),

    /// パーサーエラー
    #[error("構文解析エラー: {0}")]
    Parser(#[from] ParserError),

    /// 入力がUTF-8として解釈できない
    #[error("不正なエンコーディング: {0}")]
    Encoding(String),
}

impl SolidityError {
    /// エラー位置（エンコーディングエラーは位置を持たない）
    pub fn span(&self) -> Option<Span> {
        match self {
            SolidityError::Lexer(e) => Some(e.span()),
            SolidityError::Parser(e) => Some(e.span()),
            SolidityError::Encoding(_) => None,
        }
    }
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("不正な文字: '{character}'")]
    InvalidCharacter { character: String, span: Span },

    #[error("未終了の文字列リテラル")]
    UnterminatedString { span: Span },

    #[error("未終了のブロックコメント")]
    UnterminatedComment { span: Span },

    #[error("不正なエスケープシーケンス: '{sequence}'")]
    InvalidEscape { sequence: String, span: Span },

    #[error("不正なhex文字列: {message}")]
    InvalidHexString { message: String, span: Span },
}

impl LexerError {
    pub fn span(&self) -> Span {
        match self {
            LexerError::InvalidCharacter { span, .. }
            | LexerError::UnterminatedString { span }
            | LexerError::UnterminatedComment { span }
            | LexerError::InvalidEscape { span, .. }
            | LexerError::InvalidHexString { span, .. } => *span,
        }
    }
}

/// パーサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("予期しないトークン: {expected}を期待しましたが、{found}が見つかりました")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("予期しない入力の終了: {expected}を期待していました")]
    UnexpectedEof { expected: String, span: Span },

    #[error("{token}がありません")]
    MissingToken { token: String, span: Span },

    #[error("不正な構文: {message}")]
    InvalidSyntax { message: String, span: Span },

    /// 曖昧な位置でどの解釈も完走しなかった（最も先まで進んだ解釈を報告する）
    #[error("曖昧な構文: {interpretation}として解析できませんでした: {message}")]
    AmbiguityFallback {
        interpretation: String,
        message: String,
        span: Span,
    },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::MissingToken { span, .. }
            | ParserError::InvalidSyntax { span, .. }
            | ParserError::AmbiguityFallback { span, .. } => *span,
        }
    }

    /// 英語の短い説明（エラーノードのメッセージに使う）
    pub fn summary(&self) -> String {
        match self {
            ParserError::UnexpectedToken {
                expected, found, ..
            } => format!("expected {}, found {}", expected, found),
            ParserError::UnexpectedEof { expected, .. } => {
                format!("unexpected end of input, expected {}", expected)
            }
            ParserError::MissingToken { token, .. } => format!("missing {}", token),
            ParserError::InvalidSyntax { message, .. } => message.clone(),
            ParserError::AmbiguityFallback {
                interpretation,
                message,
                ..
            } => format!("could not parse as {}: {}", interpretation, message),
        }
    }
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: SolidityError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: SolidityError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            SolidityError::Lexer(e) => {
                let label = match e {
                    LexerError::InvalidCharacter { .. } => "ここに不正な文字があります",
                    LexerError::UnterminatedString { .. } => "文字列が閉じられていません",
                    LexerError::UnterminatedComment { .. } => "コメントが閉じられていません",
                    LexerError::InvalidEscape { .. } => "このエスケープは解釈できません",
                    LexerError::InvalidHexString { .. } => "16進数字のみ使用できます",
                };
                (
                    e.to_string(),
                    vec![self.primary_label(e.span()).with_message(label)],
                )
            }
            SolidityError::Parser(e) => {
                let label = match e {
                    ParserError::MissingToken { token, .. } => format!("ここに{}が必要です", token),
                    ParserError::AmbiguityFallback { .. } => "この位置の解釈が確定しません".to_string(),
                    _ => e.summary(),
                };
                (
                    e.to_string(),
                    vec![self.primary_label(e.span()).with_message(label)],
                )
            }
            SolidityError::Encoding(message) => (format!("不正なエンコーディング: {}", message), vec![]),
        };

        Diagnostic::error()
            .with_message(message)
            .with_labels(labels)
    }

    fn primary_label(&self, span: Span) -> Label<usize> {
        Label::primary(self.file_id, span.start..span.end)
    }
}

/// Result型のエイリアス
pub type SolidityResult<T> = Result<T, SolidityError>;
