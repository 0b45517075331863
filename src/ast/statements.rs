//! 文の定義

use serde::{Deserialize, Serialize};

use super::{
    CallArguments, ErrorNode, Expression, Identifier, IdentifierPath, Parameter, Span,
    StorageLocation, TypeName,
};

/// ブロック
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub(crate) fn collect_errors<'a>(&'a self, errors: &mut Vec<&'a ErrorNode>) {
        for statement in &self.statements {
            statement.collect_errors(errors);
        }
    }
}

/// 文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Block(Block),
    Expression(ExpressionStatement),
    VariableDeclaration(VariableDeclarationStatement),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    Continue(Span),
    Break(Span),
    Return(ReturnStatement),
    Emit(EmitStatement),
    Try(TryStatement),
    Assembly(AssemblyStatement),
    /// 0.4系の `throw;`
    Throw(Span),
    Error(ErrorNode),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(node) => node.span,
            Statement::Expression(node) => node.span,
            Statement::VariableDeclaration(node) => node.span,
            Statement::If(node) => node.span,
            Statement::For(node) => node.span,
            Statement::While(node) => node.span,
            Statement::DoWhile(node) => node.span,
            Statement::Continue(span) | Statement::Break(span) | Statement::Throw(span) => *span,
            Statement::Return(node) => node.span,
            Statement::Emit(node) => node.span,
            Statement::Try(node) => node.span,
            Statement::Assembly(node) => node.span,
            Statement::Error(node) => node.span,
        }
    }

    pub(crate) fn collect_errors<'a>(&'a self, errors: &mut Vec<&'a ErrorNode>) {
        match self {
            Statement::Error(node) => errors.push(node),
            Statement::Block(block) => block.collect_errors(errors),
            Statement::If(node) => {
                node.then_branch.collect_errors(errors);
                if let Some(else_branch) = &node.else_branch {
                    else_branch.collect_errors(errors);
                }
            }
            Statement::For(node) => {
                if let Some(init) = &node.init {
                    init.collect_errors(errors);
                }
                node.body.collect_errors(errors);
            }
            Statement::While(node) => node.body.collect_errors(errors),
            Statement::DoWhile(node) => node.body.collect_errors(errors),
            Statement::Try(node) => {
                node.body.collect_errors(errors);
                for clause in &node.catch_clauses {
                    clause.body.collect_errors(errors);
                }
            }
            _ => {}
        }
    }
}

/// 式文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// 変数宣言文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarationStatement {
    pub declaration: VariableDeclarationKind,
    /// タプル形式では必須
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// 単一宣言かタプル分解か
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableDeclarationKind {
    Single(VariableDeclaration),
    /// `(uint a, , bool c) = ...`
    Tuple { elements: Vec<Option<VariableDeclaration>>, span: Span },
    /// 0.4系の `var (a, , c) = ...`
    VarTuple { names: Vec<Option<Identifier>>, span: Span },
}

/// 型・保存場所・名前
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub type_name: TypeName,
    pub location: Option<StorageLocation>,
    pub name: Identifier,
    pub span: Span,
}

/// if文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

/// for文（3つの節はいずれも省略可能）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

/// while文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

/// do-while文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub condition: Expression,
    pub span: Span,
}

/// return文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// emit文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitStatement {
    pub event: IdentifierPath,
    pub arguments: CallArguments,
    pub span: Span,
}

/// try文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStatement {
    pub expression: Expression,
    pub returns: Vec<Parameter>,
    pub body: Block,
    /// 1つ以上
    pub catch_clauses: Vec<CatchClause>,
    pub span: Span,
}

/// catch節
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub error: Option<Identifier>,
    pub parameters: Option<Vec<Parameter>>,
    pub body: Block,
    pub span: Span,
}

/// インラインアセンブリ（中身は解析しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStatement {
    /// `assembly "evmasm" { ... }` の方言指定
    pub dialect: Option<String>,
    /// `{` から対応する `}` まで
    pub body: Span,
    pub span: Span,
}
