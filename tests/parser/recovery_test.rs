//! エラー回復のパーサーテスト
//!
//! 構文エラーがあっても木は常に返り、エラーノードの兄弟は通常どおり解析される。

use super::*;
use pretty_assertions::assert_eq;
use solparse::error::{ParserError, SolidityError};
use solparse::parser::RECURSION_LIMIT;

fn parser_errors(output: &ParseOutput) -> Vec<&ParserError> {
    output
        .errors
        .iter()
        .filter_map(|error| match error {
            SolidityError::Parser(e) => Some(e),
            _ => None,
        })
        .collect()
}

#[test]
fn test_missing_semicolon_keeps_next_statement() {
    // `;` の欠落は1つのエラーになり、次行の文は兄弟として解析される
    let source = "contract C {\n  function f() public {\n    uint x = 1\n    uint y = 2;\n  }\n}";
    let output = assert_parse_errors(source);
    let statements = function_statements(&output.source_file);

    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        parser_errors(&output)[0],
        ParserError::MissingToken { token, .. } if token == "';'"
    ));
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[0], Statement::Error(_)));

    let Statement::VariableDeclaration(second) = &statements[1] else {
        panic!("Expected the next declaration, got {:?}", statements[1]);
    };
    let VariableDeclarationKind::Single(declaration) = &second.declaration else {
        panic!("Expected a single declaration");
    };
    assert_eq!(declaration.name.name, "y");
}

#[test]
fn test_missing_semicolon_position() {
    // エラー位置は直前のトークンの直後
    let source = "contract C { function f() public {\n x = 1\n y = 2; } }";
    let output = assert_parse_errors(source);
    let span = output.errors[0].span().expect("Expected a span");

    assert_eq!(span.start, source.find("1\n").map(|i| i + 1).unwrap_or_default());
    assert_eq!(span.start_position.line, 2);
}

#[test]
fn test_bad_statement_is_skipped_to_semicolon() {
    // 壊れた文は `;` まで読み飛ばし、後続の文を解析する
    let output = assert_parse_errors(
        "contract C { function f() public { x = = 1; y = 2; } }",
    );
    let statements = function_statements(&output.source_file);

    assert_eq!(output.errors.len(), 1);
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[0], Statement::Error(_)));
    assert!(matches!(statements[1], Statement::Expression(_)));
}

#[test]
fn test_bad_member_is_skipped() {
    // 壊れたメンバーの後も他のメンバーは解析される
    let output = assert_parse_errors(
        r#"
        contract C {
            uint x
            = = ;
            function ok() public {}
            event E(uint);
        }
        "#,
    );
    let contract = first_contract(&output.source_file);

    assert!(contract.functions().any(|f| f.name.name == "ok"));
    assert!(contract.members.iter().any(|m| matches!(m, ContractMember::Event(_))));
}

#[test]
fn test_garbage_between_contracts() {
    // トップレベルの不正なトークン列
    let output = assert_parse_errors("contract A {} ) ) ; contract B {}");
    let names: Vec<_> = output.source_file.contracts().map(|c| c.name.name.as_str()).collect();

    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(output.source_file.error_nodes().len(), 1);
}

#[test]
fn test_missing_closing_brace_at_eof() {
    // 閉じ括弧のないまま入力が終わっても木は返る
    let source = "contract C {\n  function f() public {\n    x = 1;\n";
    let output = assert_parse_errors(source);
    let contract = first_contract(&output.source_file);

    assert_eq!(contract.name.name, "C");
    assert!(contract.functions().next().is_some());
    assert!(!output.source_file.error_nodes().is_empty());
    assert!(contract.span.end <= source.len());
}

#[test]
fn test_lexer_errors_are_reported_with_tree() {
    // 字句エラーも木と一緒に報告される
    let output = assert_parse_errors("contract C { uint x = 1 # 2; }");

    assert!(output
        .errors
        .iter()
        .any(|e| matches!(e, SolidityError::Lexer(_))));
    assert_eq!(output.source_file.contracts().count(), 1);
}

#[test]
fn test_errors_are_sorted_by_position() {
    // エラーは位置順に並ぶ
    let output = assert_parse_errors(
        "contract C { function f() public { a = ; b = ; } }",
    );
    let starts: Vec<_> = output.errors.iter().filter_map(|e| e.span()).map(|s| s.start).collect();

    assert_eq!(starts.len(), 2);
    assert!(starts[0] < starts[1]);
}

#[test]
fn test_empty_source() {
    // 空の入力は空のソースファイル
    let output = parse_source("");
    assert!(!output.has_errors());
    assert!(output.source_file.items.is_empty());
}

#[test]
fn test_comment_only_source() {
    // コメントのみの入力
    let output = parse_source("// SPDX-License-Identifier: MIT\n/* nothing */");
    assert!(!output.has_errors());
    assert!(output.source_file.items.is_empty());
}

#[test]
fn test_parse_bytes_rejects_invalid_utf8() {
    // UTF-8として不正なバイト列はエンコーディングエラー
    let result = solparse::parse_bytes(&[0x63, 0xff, 0xfe]);
    assert!(matches!(result, Err(SolidityError::Encoding(_))));

    let output = solparse::parse_bytes(b"contract C {}").expect("valid UTF-8");
    assert!(!output.has_errors());
}

#[test]
fn test_declaration_reading_wins_when_it_reaches_further() {
    // 宣言として読んだ方が先まで進めば、その解釈でのエラーになる
    let output = assert_parse_errors("contract C { function f() public { a[1] memory = 3; } }");
    let errors = parser_errors(&output);

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ParserError::AmbiguityFallback { interpretation, .. } if interpretation == "variable declaration"
    ));

    let statements = function_statements(&output.source_file);
    let Statement::Error(node) = &statements[0] else {
        panic!("Expected an error node, got {:?}", statements[0]);
    };
    assert!(node.message.starts_with("could not parse as variable declaration"));
}

#[test]
fn test_state_variable_reading_wins_over_legacy_fallback() {
    // `function (` で始まるメンバーは、状態変数として読んだ方が先まで進めばその解釈でのエラーになる
    let output = assert_parse_errors("contract C { function (uint) external f = ; uint y; }");
    let errors = parser_errors(&output);

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ParserError::AmbiguityFallback { interpretation, .. } if interpretation == "state variable"
    ));

    let contract = first_contract(&output.source_file);
    let ContractMember::Error(node) = &contract.members[0] else {
        panic!("Expected an error node, got {:?}", contract.members[0]);
    };
    assert!(node.message.starts_with("could not parse as state variable"));
    assert_eq!(contract.state_variables().count(), 1);
}

#[test]
fn test_deep_nesting_becomes_error_node() {
    // 上限を超える入れ子はスタックを使い切らずにエラーノードになる
    let result = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let depth = RECURSION_LIMIT * 2;
            let expression = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
            let source = format!(
                "contract C {{ function f() public {{ x = {}; y = 2; }} }}",
                expression
            );
            parse_source(&source)
        })
        .expect("failed to spawn thread")
        .join()
        .expect("thread panicked");

    let errors = parser_errors(&result);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ParserError::InvalidSyntax { message, .. } if message == "nesting too deep"
    ));

    let statements = function_statements(&result.source_file);
    assert!(matches!(statements[0], Statement::Error(_)));
    assert!(matches!(statements[1], Statement::Expression(_)));
}

#[test]
fn test_deep_else_if_chain_and_blocks() {
    // `else if` の連鎖や入れ子のブロックも上限で止まる
    let result = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let depth = RECURSION_LIMIT * 2;
            let chain = "if (a) x = 1; else ".repeat(depth);
            let blocks = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
            let chain_source =
                format!("contract C {{ function f() public {{ {}x = 2; }} }}", chain);
            let block_source = format!("contract C {{ function f() public {} }}", blocks);
            (parse_source(&chain_source), parse_source(&block_source))
        })
        .expect("failed to spawn thread")
        .join()
        .expect("thread panicked");

    for output in [&result.0, &result.1] {
        assert!(parser_errors(output).iter().any(|e| matches!(
            e,
            ParserError::InvalidSyntax { message, .. } if message == "nesting too deep"
        )));
        assert_eq!(output.source_file.contracts().count(), 1);
    }
}

#[test]
fn test_nesting_below_limit_parses() {
    // 上限未満の入れ子は通常どおり解析できる
    let result = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let depth = RECURSION_LIMIT / 2;
            let expression = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
            Parser::new(&expression).parse_expression().is_ok()
        })
        .expect("failed to spawn thread")
        .join()
        .expect("thread panicked");

    assert!(result);
}
