//! 式の定義

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ElementaryTypeName, Identifier, Span, TypeName};

/// 式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    Ternary(TernaryExpression),
    Assignment(AssignmentExpression),
    Call(CallExpression),
    Member(MemberExpression),
    Index(IndexExpression),
    Slice(SliceExpression),
    Tuple(TupleExpression),
    InlineArray(InlineArrayExpression),
    Struct(StructExpression),
    New(NewExpression),
    TypeCast(TypeCastExpression),
    /// 式位置に現れた基本型（`abi.decode(data, (uint, bool))` など）
    ElementaryType(ElementaryTypeName),
    MetaType(MetaTypeExpression),
    PayableConversion(PayableConversionExpression),
    Parenthesized(ParenthesizedExpression),
    Literal(Literal),
    Identifier(Identifier),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Binary(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Update(e) => e.span,
            Expression::Ternary(e) => e.span,
            Expression::Assignment(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Index(e) => e.span,
            Expression::Slice(e) => e.span,
            Expression::Tuple(e) => e.span,
            Expression::InlineArray(e) => e.span,
            Expression::Struct(e) => e.span,
            Expression::New(e) => e.span,
            Expression::TypeCast(e) => e.span,
            Expression::ElementaryType(e) => e.span,
            Expression::MetaType(e) => e.span,
            Expression::PayableConversion(e) => e.span,
            Expression::Parenthesized(e) => e.span,
            Expression::Literal(e) => e.span(),
            Expression::Identifier(e) => e.span,
        }
    }

    /// 代入の左辺として許される形か
    ///
    /// メンバーアクセス・タプル・添字アクセス・識別子、およびそれらの括弧付き形。
    pub fn is_assignable(&self) -> bool {
        match self {
            Expression::Member(_)
            | Expression::Tuple(_)
            | Expression::Index(_)
            | Expression::Identifier(_) => true,
            Expression::Parenthesized(inner) => inner.expression.is_assignable(),
            _ => false,
        }
    }
}

/// 二項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Sar,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Shl => "<<",
            BinaryOperator::Shr => ">>",
            BinaryOperator::Sar => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 前置単項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    BitNot,
    Neg,
    Plus,
    Delete,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::BitNot => "~",
            UnaryOperator::Neg => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// `++` / `--`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// 代入演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Assign,
    OrAssign,
    XorAssign,
    AndAssign,
    ShlAssign,
    ShrAssign,
    SarAssign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::OrAssign => "|=",
            AssignmentOperator::XorAssign => "^=",
            AssignmentOperator::AndAssign => "&=",
            AssignmentOperator::ShlAssign => "<<=",
            AssignmentOperator::ShrAssign => ">>=",
            AssignmentOperator::SarAssign => ">>>=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::ModAssign => "%=",
        }
    }
}

/// 二項演算式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

/// 前置単項演算式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// インクリメント・デクリメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub is_prefix: bool,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// 三項演算式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryExpression {
    pub condition: Box<Expression>,
    pub if_true: Box<Expression>,
    pub if_false: Box<Expression>,
    pub span: Span,
}

/// 代入式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpression {
    pub left: Box<Expression>,
    pub operator: AssignmentOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

/// 呼び出し引数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallArguments {
    /// `f(a, b)`
    Positional { arguments: Vec<Expression>, span: Span },
    /// `f({a: 1, b: 2})`
    Named { arguments: Vec<NamedArgument>, span: Span },
}

impl CallArguments {
    pub fn span(&self) -> Span {
        match self {
            CallArguments::Positional { span, .. } | CallArguments::Named { span, .. } => *span,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CallArguments::Positional { arguments, .. } => arguments.len(),
            CallArguments::Named { arguments, .. } => arguments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `name: value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// 関数呼び出し
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: CallArguments,
    pub span: Span,
}

/// `a.b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub member: Identifier,
    pub span: Span,
}

/// `a[i]` / `T[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpression {
    pub base: Box<Expression>,
    pub index: Option<Box<Expression>>,
    pub span: Span,
}

/// `a[from:to]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceExpression {
    pub base: Box<Expression>,
    pub from: Option<Box<Expression>>,
    pub to: Option<Box<Expression>>,
    pub span: Span,
}

/// `(a, , b)`（空要素は `None`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleExpression {
    pub elements: Vec<Option<Expression>>,
    pub span: Span,
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineArrayExpression {
    pub elements: Vec<Expression>,
    pub span: Span,
}

/// `Type{field: value}`（呼び出しオプション `f{value: 1}` も同形）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructExpression {
    pub type_expression: Box<Expression>,
    pub fields: Vec<NamedArgument>,
    pub span: Span,
}

/// `new T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpression {
    pub type_name: TypeName,
    pub span: Span,
}

/// `uint256(x)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCastExpression {
    pub type_name: ElementaryTypeName,
    pub argument: Box<Expression>,
    pub span: Span,
}

/// `type(C)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaTypeExpression {
    pub type_name: TypeName,
    pub span: Span,
}

/// `payable(x)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayableConversionExpression {
    pub arguments: CallArguments,
    pub span: Span,
}

/// `(expr)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesizedExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}

/// リテラル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(StringLiteral),
    HexString(StringLiteral),
    UnicodeString(StringLiteral),
    Number(NumberLiteral),
    Boolean(BooleanLiteral),
}

impl Literal {
    pub fn span(&self) -> Span {
        match self {
            Literal::String(lit) | Literal::HexString(lit) | Literal::UnicodeString(lit) => {
                lit.span
            }
            Literal::Number(lit) => lit.span,
            Literal::Boolean(lit) => lit.span,
        }
    }
}

/// 文字列系リテラル
///
/// 隣接するリテラル（`"a" "b"`）は1つに連結し、各断片の位置を `parts` に残す。
/// hex文字列の `value` は区切りの `_` を除いた16進数字列。
/// `bytes` はリテラルが表す正確なバイト列で、`\xff` のようなUTF-8でない値も保つ。
/// その場合の `value` は表示用で、不正な部分は置換文字になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
    pub bytes: Vec<u8>,
    pub parts: Vec<Span>,
    pub span: Span,
}

/// 数値の表記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberKind {
    Decimal,
    Hex,
}

/// 数値リテラルの単位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberUnit {
    Wei,
    Gwei,
    Szabo,
    Finney,
    Ether,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Years,
}

impl NumberUnit {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "wei" => Some(NumberUnit::Wei),
            "gwei" => Some(NumberUnit::Gwei),
            "szabo" => Some(NumberUnit::Szabo),
            "finney" => Some(NumberUnit::Finney),
            "ether" => Some(NumberUnit::Ether),
            "seconds" => Some(NumberUnit::Seconds),
            "minutes" => Some(NumberUnit::Minutes),
            "hours" => Some(NumberUnit::Hours),
            "days" => Some(NumberUnit::Days),
            "weeks" => Some(NumberUnit::Weeks),
            "years" => Some(NumberUnit::Years),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberUnit::Wei => "wei",
            NumberUnit::Gwei => "gwei",
            NumberUnit::Szabo => "szabo",
            NumberUnit::Finney => "finney",
            NumberUnit::Ether => "ether",
            NumberUnit::Seconds => "seconds",
            NumberUnit::Minutes => "minutes",
            NumberUnit::Hours => "hours",
            NumberUnit::Days => "days",
            NumberUnit::Weeks => "weeks",
            NumberUnit::Years => "years",
        }
    }
}

/// 数値リテラル（値は字面のまま保持）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLiteral {
    pub value: String,
    pub kind: NumberKind,
    pub unit: Option<NumberUnit>,
    pub span: Span,
}

/// 真偽値リテラル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}
