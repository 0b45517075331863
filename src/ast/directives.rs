//! ディレクティブ（pragma / import / using）の定義

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Identifier, IdentifierPath, Span, TypeName};

/// pragmaディレクティブ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PragmaDirective {
    pub name: Identifier,
    pub value: PragmaValue,
    pub span: Span,
}

/// pragmaの値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PragmaValue {
    /// `pragma solidity ...;` のバージョン要求
    Version(VersionRequirement),
    /// その他のpragma（`experimental ABIEncoderV2` など）の生テキスト
    Raw { text: String, span: Span },
}

/// `||` で区切られた選択肢ごとの制約リスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRequirement {
    pub alternatives: Vec<Vec<VersionConstraint>>,
    pub span: Span,
}

impl VersionRequirement {
    /// 全制約をフラットに列挙
    pub fn constraints(&self) -> impl Iterator<Item = &VersionConstraint> {
        self.alternatives.iter().flatten()
    }
}

/// (比較演算子?, バージョン) の組
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConstraint {
    pub operator: Option<VersionOperator>,
    pub version: String,
    pub span: Span,
}

/// バージョン比較演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionOperator {
    Caret,
    Tilde,
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl VersionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOperator::Caret => "^",
            VersionOperator::Tilde => "~",
            VersionOperator::Eq => "=",
            VersionOperator::Gt => ">",
            VersionOperator::Ge => ">=",
            VersionOperator::Lt => "<",
            VersionOperator::Le => "<=",
        }
    }
}

impl fmt::Display for VersionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// importディレクティブ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDirective {
    pub path: ImportPath,
    /// `import "a.sol" as A;` の別名
    pub alias: Option<Identifier>,
    pub clause: Option<ImportClause>,
    pub span: Span,
}

/// インポート元のパス文字列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPath {
    pub value: String,
    pub span: Span,
}

/// `from` の前に置かれるインポート句
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportClause {
    /// `* as X` または `X as Y`
    Single {
        symbol: ImportSymbol,
        alias: Option<Identifier>,
        span: Span,
    },
    /// `{a, b as c}`
    Multiple { symbols: Vec<ImportAlias>, span: Span },
}

impl ImportClause {
    pub fn span(&self) -> Span {
        match self {
            ImportClause::Single { span, .. } | ImportClause::Multiple { span, .. } => *span,
        }
    }
}

/// 単一インポートの対象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportSymbol {
    Wildcard(Span),
    Name(Identifier),
}

/// `{...}` 内の1要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportAlias {
    pub name: Identifier,
    pub alias: Option<Identifier>,
    pub span: Span,
}

/// usingディレクティブ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingDirective {
    pub library: IdentifierPath,
    pub target: UsingTarget,
    pub span: Span,
}

/// `for` の後ろ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UsingTarget {
    Wildcard(Span),
    Type(TypeName),
}
