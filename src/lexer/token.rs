//! トークン定義
//!
//! `memory` や `payable` などの文脈依存キーワードはここでは予約せず、
//! 通常の識別子として字句化する。意味づけは構文解析側の各生成規則で行う。

use logos::{FilterResult, Logos};
use std::fmt;

use super::literal_parser::{scan_block_comment, scan_hex_string, scan_string};

/// 字句解析エラーの種類（位置はレキサー側で付与する）
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexErrorKind {
    #[default]
    InvalidCharacter,
    UnterminatedString,
    UnterminatedComment,
    InvalidEscape(String),
    InvalidHexString(String),
}

/// Solidityのトークン型
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f\u{FEFF}\u{2060}\u{200B}\u{00A0}]+")] // 空白文字（BOM・ゼロ幅文字を含む）
#[logos(skip r"//[^\n]*")] // 行コメント
pub enum Token {
    // キーワード
    #[token("pragma")]
    Pragma,
    #[token("import")]
    Import,
    #[token("contract")]
    Contract,
    #[token("interface")]
    Interface,
    #[token("library")]
    Library,
    #[token("abstract")]
    Abstract,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("event")]
    Event,
    #[token("function")]
    Function,
    #[token("modifier")]
    Modifier,
    #[token("constructor")]
    Constructor,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("returns")]
    Returns,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("emit")]
    Emit,
    #[token("new")]
    New,
    #[token("delete")]
    Delete,
    #[token("mapping")]
    Mapping,
    #[token("is")]
    Is,
    #[token("using")]
    Using,
    #[token("assembly")]
    Assembly,
    #[token("throw")]
    Throw,

    // 真偽値リテラル
    #[token("true")]
    True,
    #[token("false")]
    False,

    // 基本型名（識別子より優先）
    #[token("address", |lex| lex.slice().to_owned())]
    #[token("bool", |lex| lex.slice().to_owned())]
    #[token("string", |lex| lex.slice().to_owned())]
    #[token("var", |lex| lex.slice().to_owned())]
    #[token("byte", |lex| lex.slice().to_owned())]
    #[regex(
        r"u?int(8|16|24|32|40|48|56|64|72|80|88|96|104|112|120|128|136|144|152|160|168|176|184|192|200|208|216|224|232|240|248|256)?",
        |lex| lex.slice().to_owned(),
        priority = 10
    )]
    #[regex(r"bytes([1-9]|[12][0-9]|3[0-2])?", |lex| lex.slice().to_owned(), priority = 10)]
    #[regex(r"u?fixed([0-9]+x[0-9]+)?", |lex| lex.slice().to_owned(), priority = 10)]
    ElementaryType(String),

    // 識別子（文脈依存キーワードを含む）
    #[regex(r"[a-zA-Z$_][a-zA-Z0-9$_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // 数値リテラル（字面のまま保持、単位は別トークン）
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE]-?[0-9][0-9_]*)?", |lex| lex.slice().to_owned())]
    #[regex(r"\.[0-9][0-9_]*([eE]-?[0-9][0-9_]*)?", |lex| lex.slice().to_owned())]
    DecimalNumber(String),

    #[regex(r"0[xX][0-9a-fA-F_]+", |lex| lex.slice().to_owned())]
    HexNumber(String),

    // 文字列リテラル（値はエスケープ解除済みのバイト列）
    #[token("\"", |lex| lex_string(lex, '"'))]
    #[token("'", |lex| lex_string(lex, '\''))]
    String(Vec<u8>),

    #[token("hex\"", |lex| lex_hex_string(lex, '"'))]
    #[token("hex'", |lex| lex_hex_string(lex, '\''))]
    HexString(String),

    #[token("unicode\"", |lex| lex_string(lex, '"'))]
    #[token("unicode'", |lex| lex_string(lex, '\''))]
    UnicodeString(Vec<u8>),

    // 演算子
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    StarStar,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Or,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token(">>>")]
    GtGtGt,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("|=")]
    OrAssign,
    #[token("&=")]
    AndAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    LtLtAssign,
    #[token(">>=")]
    GtGtAssign,
    #[token(">>>=")]
    GtGtGtAssign,
    #[token("=>")]
    FatArrow,
    #[token("?")]
    Question,

    // デリミタ
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // ブロックコメント（ネストしない）
    #[token("/*", lex_block_comment)]
    _BlockComment,

    // エラートークン（字句エラー位置に挿入される）
    Error,
}

fn lex_string(lex: &mut logos::Lexer<Token>, quote: char) -> Result<Vec<u8>, LexErrorKind> {
    let (consumed, result) = scan_string(lex.remainder(), quote);
    lex.bump(consumed);
    result
}

fn lex_hex_string(lex: &mut logos::Lexer<Token>, quote: char) -> Result<String, LexErrorKind> {
    let (consumed, result) = scan_hex_string(lex.remainder(), quote);
    lex.bump(consumed);
    result
}

fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    match scan_block_comment(lex.remainder()) {
        Some(consumed) => {
            lex.bump(consumed);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

impl Token {
    /// エラーメッセージ用の説明
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::ElementaryType(name) => format!("type '{}'", name),
            Token::DecimalNumber(_) | Token::HexNumber(_) => "number literal".to_string(),
            Token::String(_) | Token::UnicodeString(_) => "string literal".to_string(),
            Token::HexString(_) => "hex string literal".to_string(),
            Token::Error => "invalid token".to_string(),
            other => format!("'{}'", other),
        }
    }

    /// 識別子としての文字列（文脈依存キーワードの判定に使う）
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_identifier(&self, word: &str) -> bool {
        self.identifier() == Some(word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Pragma => "pragma",
            Token::Import => "import",
            Token::Contract => "contract",
            Token::Interface => "interface",
            Token::Library => "library",
            Token::Abstract => "abstract",
            Token::Struct => "struct",
            Token::Enum => "enum",
            Token::Event => "event",
            Token::Function => "function",
            Token::Modifier => "modifier",
            Token::Constructor => "constructor",
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::While => "while",
            Token::Do => "do",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Return => "return",
            Token::Returns => "returns",
            Token::Try => "try",
            Token::Catch => "catch",
            Token::Emit => "emit",
            Token::New => "new",
            Token::Delete => "delete",
            Token::Mapping => "mapping",
            Token::Is => "is",
            Token::Using => "using",
            Token::Assembly => "assembly",
            Token::Throw => "throw",
            Token::True => "true",
            Token::False => "false",
            Token::ElementaryType(s)
            | Token::Identifier(s)
            | Token::DecimalNumber(s)
            | Token::HexNumber(s) => return write!(f, "{}", s),
            Token::String(bytes) => return write!(f, "\"{}\"", String::from_utf8_lossy(bytes)),
            Token::HexString(s) => return write!(f, "hex\"{}\"", s),
            Token::UnicodeString(bytes) => {
                return write!(f, "unicode\"{}\"", String::from_utf8_lossy(bytes))
            }
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::StarStar => "**",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::LtEq => "<=",
            Token::GtEq => ">=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Bang => "!",
            Token::Ampersand => "&",
            Token::Or => "|",
            Token::Caret => "^",
            Token::Tilde => "~",
            Token::LtLt => "<<",
            Token::GtGt => ">>",
            Token::GtGtGt => ">>>",
            Token::Assign => "=",
            Token::PlusAssign => "+=",
            Token::MinusAssign => "-=",
            Token::StarAssign => "*=",
            Token::SlashAssign => "/=",
            Token::PercentAssign => "%=",
            Token::OrAssign => "|=",
            Token::AndAssign => "&=",
            Token::CaretAssign => "^=",
            Token::LtLtAssign => "<<=",
            Token::GtGtAssign => ">>=",
            Token::GtGtGtAssign => ">>>=",
            Token::FatArrow => "=>",
            Token::Question => "?",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Dot => ".",
            Token::_BlockComment => "comment",
            Token::Error => "error",
        };
        f.write_str(text)
    }
}
