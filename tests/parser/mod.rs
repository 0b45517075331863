//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use solparse::ast::*;
use solparse::tree::ToSyntaxNode;
use solparse::{ParseOutput, Parser};

/// ソースコードを解析するヘルパー関数
pub fn parse_source(source: &str) -> ParseOutput {
    solparse::parse(source)
}

/// エラーなしで解析できることを確認するヘルパー関数
pub fn assert_parse_success(source: &str) -> SourceFile {
    let output = parse_source(source);
    assert!(
        output.errors.is_empty(),
        "Parsing should succeed, got errors: {:#?}",
        output.errors
    );
    output.source_file
}

/// 構文エラーが報告されることを確認するヘルパー関数
pub fn assert_parse_errors(source: &str) -> ParseOutput {
    let output = parse_source(source);
    assert!(output.has_errors(), "Parsing should report errors");
    output
}

/// 最初のコントラクトを取り出す
pub fn first_contract(file: &SourceFile) -> &ContractDeclaration {
    file.contracts().next().expect("Expected a contract")
}

/// 関数本体の文を解析する（`contract C { function f() public { ... } }` に包む）
pub fn parse_body(body: &str) -> Vec<Statement> {
    let source = format!("contract C {{ function f() public {{ {} }} }}", body);
    let file = assert_parse_success(&source);
    function_statements(&file)
}

/// 最初の関数本体の文
pub fn function_statements(file: &SourceFile) -> Vec<Statement> {
    let contract = first_contract(file);
    let function = contract.functions().next().expect("Expected a function");
    function
        .body
        .as_ref()
        .expect("Expected a function body")
        .statements
        .clone()
}

/// 単一の式を解析する
pub fn parse_expr(source: &str) -> Expression {
    Parser::new(source)
        .parse_expression()
        .expect("Expression should parse")
}

/// 単一の式を解析してS式にする
pub fn expr_sexp(source: &str) -> String {
    parse_expr(source).to_syntax_node().to_sexp()
}

/// 単一の文を解析する
pub fn parse_stmt(source: &str) -> Statement {
    Parser::new(source)
        .parse_statement()
        .expect("Statement should parse")
}

/// 単一の型名を解析する
pub fn parse_type(source: &str) -> TypeName {
    Parser::new(source)
        .parse_type_name()
        .expect("Type name should parse")
}

// サブモジュールの宣言
#[cfg(test)]
mod contract_test;
#[cfg(test)]
mod expression_test;
#[cfg(test)]
mod literal_test;
#[cfg(test)]
mod recovery_test;
#[cfg(test)]
mod statement_test;
#[cfg(test)]
mod type_test;
