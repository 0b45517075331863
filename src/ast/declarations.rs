//! 宣言の定義

use serde::{Deserialize, Serialize};

use super::{
    Block, CallArguments, ErrorNode, Expression, Identifier, IdentifierPath, Span,
    StorageLocation, TypeName, UsingDirective,
};

/// コントラクトの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    Contract,
    Interface,
    Library,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Contract => "contract",
            ContractKind::Interface => "interface",
            ContractKind::Library => "library",
        }
    }
}

/// contract / interface / library 宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDeclaration {
    pub kind: ContractKind,
    pub is_abstract: bool,
    pub name: Identifier,
    pub inheritance: Vec<InheritanceSpecifier>,
    /// メンバーは宣言順のまま保持する（順序制約は課さない）
    pub members: Vec<ContractMember>,
    pub span: Span,
}

impl ContractDeclaration {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.members.iter().filter_map(|member| match member {
            ContractMember::Function(function) => Some(function),
            _ => None,
        })
    }

    pub fn state_variables(&self) -> impl Iterator<Item = &StateVariableDeclaration> {
        self.members.iter().filter_map(|member| match member {
            ContractMember::StateVariable(variable) => Some(variable),
            _ => None,
        })
    }
}

/// 継承指定 `is A(1, 2)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceSpecifier {
    pub ancestor: IdentifierPath,
    pub arguments: Option<CallArguments>,
    pub span: Span,
}

/// コントラクト本体のメンバー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContractMember {
    Function(FunctionDefinition),
    Modifier(ModifierDefinition),
    Constructor(ConstructorDefinition),
    FallbackReceive(FallbackReceiveDefinition),
    StateVariable(StateVariableDeclaration),
    Struct(StructDeclaration),
    Enum(EnumDeclaration),
    Event(EventDefinition),
    Using(UsingDirective),
    Error(ErrorNode),
}

impl ContractMember {
    pub fn span(&self) -> Span {
        match self {
            ContractMember::Function(node) => node.span,
            ContractMember::Modifier(node) => node.span,
            ContractMember::Constructor(node) => node.span,
            ContractMember::FallbackReceive(node) => node.span,
            ContractMember::StateVariable(node) => node.span,
            ContractMember::Struct(node) => node.span,
            ContractMember::Enum(node) => node.span,
            ContractMember::Event(node) => node.span,
            ContractMember::Using(node) => node.span,
            ContractMember::Error(node) => node.span,
        }
    }

    pub(crate) fn collect_errors<'a>(&'a self, errors: &mut Vec<&'a ErrorNode>) {
        let body = match self {
            ContractMember::Error(node) => {
                errors.push(node);
                return;
            }
            ContractMember::Function(node) => node.body.as_ref(),
            ContractMember::Modifier(node) => node.body.as_ref(),
            ContractMember::Constructor(node) => node.body.as_ref(),
            ContractMember::FallbackReceive(node) => node.body.as_ref(),
            _ => None,
        };
        if let Some(body) = body {
            body.collect_errors(errors);
        }
    }
}

/// 可視性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "internal" => Some(Visibility::Internal),
            "external" => Some(Visibility::External),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::External => "external",
        }
    }
}

/// 状態可変性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateMutability {
    Pure,
    View,
    Payable,
    /// 0.4系の `constant`（`view` 相当）
    Constant,
}

impl StateMutability {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "pure" => Some(StateMutability::Pure),
            "view" => Some(StateMutability::View),
            "payable" => Some(StateMutability::Payable),
            "constant" => Some(StateMutability::Constant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::Payable => "payable",
            StateMutability::Constant => "constant",
        }
    }
}

/// 関数系宣言の属性（記述順に保持）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunctionAttribute {
    Visibility { visibility: Visibility, span: Span },
    Mutability { mutability: StateMutability, span: Span },
    Virtual { span: Span },
    Override(OverrideSpecifier),
    Modifier(ModifierInvocation),
}

impl FunctionAttribute {
    pub fn span(&self) -> Span {
        match self {
            FunctionAttribute::Visibility { span, .. }
            | FunctionAttribute::Mutability { span, .. }
            | FunctionAttribute::Virtual { span } => *span,
            FunctionAttribute::Override(specifier) => specifier.span,
            FunctionAttribute::Modifier(invocation) => invocation.span,
        }
    }
}

/// 属性リストへの共通アクセサ
pub trait HasAttributes {
    fn attributes(&self) -> &[FunctionAttribute];

    fn visibility(&self) -> Option<Visibility> {
        self.attributes().iter().find_map(|attr| match attr {
            FunctionAttribute::Visibility { visibility, .. } => Some(*visibility),
            _ => None,
        })
    }

    fn mutability(&self) -> Option<StateMutability> {
        self.attributes().iter().find_map(|attr| match attr {
            FunctionAttribute::Mutability { mutability, .. } => Some(*mutability),
            _ => None,
        })
    }

    fn is_virtual(&self) -> bool {
        self.attributes()
            .iter()
            .any(|attr| matches!(attr, FunctionAttribute::Virtual { .. }))
    }

    fn override_specifier(&self) -> Option<&OverrideSpecifier> {
        self.attributes().iter().find_map(|attr| match attr {
            FunctionAttribute::Override(specifier) => Some(specifier),
            _ => None,
        })
    }

    fn modifiers(&self) -> Vec<&ModifierInvocation> {
        self.attributes()
            .iter()
            .filter_map(|attr| match attr {
                FunctionAttribute::Modifier(invocation) => Some(invocation),
                _ => None,
            })
            .collect()
    }
}

/// `override` / `override(A, B)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideSpecifier {
    pub overrides: Vec<IdentifierPath>,
    pub span: Span,
}

/// モディファイア呼び出し（または基底コンストラクタ呼び出し）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierInvocation {
    pub path: IdentifierPath,
    pub arguments: Option<CallArguments>,
    pub span: Span,
}

/// 関数・イベント以外で使うパラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub type_name: TypeName,
    pub location: Option<StorageLocation>,
    pub name: Option<Identifier>,
    pub span: Span,
}

/// 関数定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub attributes: Vec<FunctionAttribute>,
    pub returns: Vec<Parameter>,
    /// 抽象宣言・インターフェースでは `None`
    pub body: Option<Block>,
    pub span: Span,
}

impl HasAttributes for FunctionDefinition {
    fn attributes(&self) -> &[FunctionAttribute] {
        &self.attributes
    }
}

/// モディファイア定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub attributes: Vec<FunctionAttribute>,
    pub body: Option<Block>,
    pub span: Span,
}

impl HasAttributes for ModifierDefinition {
    fn attributes(&self) -> &[FunctionAttribute] {
        &self.attributes
    }
}

/// コンストラクタ定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDefinition {
    pub parameters: Vec<Parameter>,
    pub attributes: Vec<FunctionAttribute>,
    pub body: Option<Block>,
    pub span: Span,
}

impl HasAttributes for ConstructorDefinition {
    fn attributes(&self) -> &[FunctionAttribute] {
        &self.attributes
    }
}

/// fallback / receive の別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackKind {
    Fallback,
    Receive,
}

impl FallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackKind::Fallback => "fallback",
            FallbackKind::Receive => "receive",
        }
    }
}

/// `fallback() ...` / `receive() ...` / 0.4系の無名 `function () ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackReceiveDefinition {
    pub kind: FallbackKind,
    pub parameters: Vec<Parameter>,
    pub attributes: Vec<FunctionAttribute>,
    pub body: Option<Block>,
    pub span: Span,
}

impl HasAttributes for FallbackReceiveDefinition {
    fn attributes(&self) -> &[FunctionAttribute] {
        &self.attributes
    }
}

/// 状態変数の属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateVariableAttribute {
    Visibility { visibility: Visibility, span: Span },
    Constant { span: Span },
    Immutable { span: Span },
    Override(OverrideSpecifier),
}

impl StateVariableAttribute {
    pub fn span(&self) -> Span {
        match self {
            StateVariableAttribute::Visibility { span, .. }
            | StateVariableAttribute::Constant { span }
            | StateVariableAttribute::Immutable { span } => *span,
            StateVariableAttribute::Override(specifier) => specifier.span,
        }
    }
}

/// 状態変数宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVariableDeclaration {
    pub type_name: TypeName,
    pub attributes: Vec<StateVariableAttribute>,
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

impl StateVariableDeclaration {
    pub fn visibility(&self) -> Option<Visibility> {
        self.attributes.iter().find_map(|attr| match attr {
            StateVariableAttribute::Visibility { visibility, .. } => Some(*visibility),
            _ => None,
        })
    }

    pub fn is_constant(&self) -> bool {
        self.attributes
            .iter()
            .any(|attr| matches!(attr, StateVariableAttribute::Constant { .. }))
    }

    pub fn is_immutable(&self) -> bool {
        self.attributes
            .iter()
            .any(|attr| matches!(attr, StateVariableAttribute::Immutable { .. }))
    }
}

/// ファイルレベルの定数 `uint constant X = 1;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantVariableDeclaration {
    pub type_name: TypeName,
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// 構造体宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDeclaration {
    pub name: Identifier,
    /// 1つ以上
    pub members: Vec<StructMember>,
    pub span: Span,
}

/// 構造体メンバー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructMember {
    pub type_name: TypeName,
    pub name: Identifier,
    pub span: Span,
}

/// 列挙型宣言（値の重複は構文上許容する）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDeclaration {
    pub name: Identifier,
    pub values: Vec<Identifier>,
    pub span: Span,
}

/// イベント定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub name: Identifier,
    pub parameters: Vec<EventParameter>,
    pub is_anonymous: bool,
    pub span: Span,
}

/// イベントパラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParameter {
    pub type_name: TypeName,
    pub is_indexed: bool,
    pub name: Option<Identifier>,
    pub span: Span,
}
