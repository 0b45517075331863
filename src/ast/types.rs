//! 型名の定義

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Expression, FunctionAttribute, IdentifierPath, Parameter, Span};

/// 型名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeName {
    Elementary(ElementaryTypeName),
    UserDefined(IdentifierPath),
    Mapping(MappingType),
    Array(ArrayType),
    Function(FunctionType),
}

impl TypeName {
    pub fn span(&self) -> Span {
        match self {
            TypeName::Elementary(ty) => ty.span,
            TypeName::UserDefined(path) => path.span,
            TypeName::Mapping(ty) => ty.span,
            TypeName::Array(ty) => ty.span,
            TypeName::Function(ty) => ty.span,
        }
    }
}

/// 基本型と位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementaryTypeName {
    pub kind: ElementaryType,
    pub span: Span,
}

/// 基本型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementaryType {
    Address,
    AddressPayable,
    Bool,
    String,
    /// 0.4系の型推論用 `var`
    Var,
    /// `byte`（`bytes1` の別名）
    Byte,
    /// 動的長 `bytes`
    Bytes,
    /// `bytes1`〜`bytes32`
    FixedBytes(u8),
    Int(u16),
    Uint(u16),
    /// `fixedMxN`（精度省略時は `None`）
    Fixed(Option<(u16, u16)>),
    Ufixed(Option<(u16, u16)>),
}

impl ElementaryType {
    /// 基本型キーワードを解釈する
    ///
    /// 範囲外のビット幅（`uint7` など）は `None`。fixedの精度は構文上は検証しない。
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "address" => return Some(ElementaryType::Address),
            "bool" => return Some(ElementaryType::Bool),
            "string" => return Some(ElementaryType::String),
            "var" => return Some(ElementaryType::Var),
            "byte" => return Some(ElementaryType::Byte),
            "bytes" => return Some(ElementaryType::Bytes),
            "int" => return Some(ElementaryType::Int(256)),
            "uint" => return Some(ElementaryType::Uint(256)),
            "fixed" => return Some(ElementaryType::Fixed(None)),
            "ufixed" => return Some(ElementaryType::Ufixed(None)),
            _ => {}
        }

        if let Some(rest) = word.strip_prefix("bytes") {
            let size = parse_plain_number(rest)?;
            return (1..=32)
                .contains(&size)
                .then_some(ElementaryType::FixedBytes(size as u8));
        }
        if let Some(rest) = word.strip_prefix("uint") {
            return parse_bits(rest).map(ElementaryType::Uint);
        }
        if let Some(rest) = word.strip_prefix("int") {
            return parse_bits(rest).map(ElementaryType::Int);
        }
        if let Some(rest) = word.strip_prefix("ufixed") {
            return parse_precision(rest).map(|p| ElementaryType::Ufixed(Some(p)));
        }
        if let Some(rest) = word.strip_prefix("fixed") {
            return parse_precision(rest).map(|p| ElementaryType::Fixed(Some(p)));
        }
        None
    }
}

fn parse_plain_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) || text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

fn parse_bits(text: &str) -> Option<u16> {
    let bits = parse_plain_number(text)?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits as u16)
}

fn parse_precision(text: &str) -> Option<(u16, u16)> {
    let (total, decimals) = text.split_once('x')?;
    if total.is_empty() || decimals.is_empty() {
        return None;
    }
    if !total.bytes().chain(decimals.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((total.parse().ok()?, decimals.parse().ok()?))
}

impl fmt::Display for ElementaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementaryType::Address => write!(f, "address"),
            ElementaryType::AddressPayable => write!(f, "address payable"),
            ElementaryType::Bool => write!(f, "bool"),
            ElementaryType::String => write!(f, "string"),
            ElementaryType::Var => write!(f, "var"),
            ElementaryType::Byte => write!(f, "byte"),
            ElementaryType::Bytes => write!(f, "bytes"),
            ElementaryType::FixedBytes(size) => write!(f, "bytes{}", size),
            ElementaryType::Int(bits) => write!(f, "int{}", bits),
            ElementaryType::Uint(bits) => write!(f, "uint{}", bits),
            ElementaryType::Fixed(None) => write!(f, "fixed"),
            ElementaryType::Fixed(Some((m, n))) => write!(f, "fixed{}x{}", m, n),
            ElementaryType::Ufixed(None) => write!(f, "ufixed"),
            ElementaryType::Ufixed(Some((m, n))) => write!(f, "ufixed{}x{}", m, n),
        }
    }
}

/// `mapping(K => V)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingType {
    /// 基本型またはユーザー定義型のみ
    pub key: Box<TypeName>,
    pub value: Box<TypeName>,
    pub span: Span,
}

/// `T[]` / `T[N]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    pub base: Box<TypeName>,
    pub size: Option<Box<Expression>>,
    pub span: Span,
}

/// `function (params) attrs returns (params)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub parameters: Vec<Parameter>,
    /// 可視性と状態可変性のみ
    pub attributes: Vec<FunctionAttribute>,
    pub returns: Vec<Parameter>,
    pub span: Span,
}

/// データ保存場所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageLocation {
    Memory,
    Storage,
    Calldata,
}

impl StorageLocation {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "memory" => Some(StorageLocation::Memory),
            "storage" => Some(StorageLocation::Storage),
            "calldata" => Some(StorageLocation::Calldata),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageLocation::Memory => "memory",
            StorageLocation::Storage => "storage",
            StorageLocation::Calldata => "calldata",
        }
    }
}
