//! 文のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

fn declaration(statement: &Statement) -> &VariableDeclarationStatement {
    match statement {
        Statement::VariableDeclaration(declaration) => declaration,
        other => panic!("Expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_variable_declarations() {
    // 単一の変数宣言（保存場所つきを含む）
    let statements = parse_body(
        r#"
        uint x = 1;
        uint256[] memory values = new uint256[](3);
        Info storage info = infos[id];
        mapping(address => uint) storage balances = accounts;
        bool flag;
        "#,
    );

    assert_eq!(statements.len(), 5);
    let VariableDeclarationKind::Single(values) = &declaration(&statements[1]).declaration else {
        panic!("Expected a single declaration");
    };
    assert_eq!(values.name.name, "values");
    assert_eq!(values.location, Some(StorageLocation::Memory));
    assert!(matches!(values.type_name, TypeName::Array(_)));

    let VariableDeclarationKind::Single(info) = &declaration(&statements[2]).declaration else {
        panic!("Expected a single declaration");
    };
    assert!(matches!(info.type_name, TypeName::UserDefined(_)));
    assert_eq!(info.location, Some(StorageLocation::Storage));

    assert!(matches!(
        &declaration(&statements[3]).declaration,
        VariableDeclarationKind::Single(VariableDeclaration {
            type_name: TypeName::Mapping(_),
            ..
        })
    ));
    assert!(declaration(&statements[4]).initializer.is_none());
}

#[test]
fn test_tuple_declaration() {
    // タプル形式の宣言（空要素あり）
    let statements = parse_body("(uint a, , bool c) = f();");
    let VariableDeclarationKind::Tuple { elements, .. } = &declaration(&statements[0]).declaration else {
        panic!("Expected a tuple declaration");
    };

    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].as_ref().map(|d| d.name.name.as_str()), Some("a"));
    assert!(elements[1].is_none());
    assert_eq!(elements[2].as_ref().map(|d| d.name.name.as_str()), Some("c"));
}

#[test]
fn test_tuple_declaration_requires_initializer() {
    // 初期化子のないタプル宣言はエラー
    assert_parse_errors("contract C { function f() public { (uint a, uint b); } }");
}

#[test]
fn test_legacy_var_tuple() {
    // 0.4系の `var (a, , b) = ...;`
    let statements = parse_body("var (a, , b) = f();");
    let VariableDeclarationKind::VarTuple { names, .. } = &declaration(&statements[0]).declaration else {
        panic!("Expected a var tuple");
    };

    assert_eq!(names.len(), 3);
    assert!(names[1].is_none());
    assert_eq!(names[2].as_ref().map(|n| n.name.as_str()), Some("b"));
}

#[test]
fn test_expression_statements_that_look_like_declarations() {
    // 宣言の頭部が成立しない文は式文として読む
    let statements = parse_body(
        r#"
        a[i] = 1;
        x.y = 2;
        (a, b) = (b, a);
        f(x);
        _;
        "#,
    );

    assert_eq!(statements.len(), 5);
    assert!(statements.iter().all(|s| matches!(s, Statement::Expression(_))));
}

#[test]
fn test_if_else_binds_to_nearest_if() {
    // else は最も近い if に付く
    let statement = parse_stmt("if (a) if (b) x = 1; else x = 2;");
    let Statement::If(outer) = statement else {
        panic!("Expected an if statement");
    };

    assert!(outer.else_branch.is_none());
    let Statement::If(inner) = outer.then_branch.as_ref() else {
        panic!("Expected a nested if statement");
    };
    assert!(inner.else_branch.is_some());
}

#[test]
fn test_for_statement() {
    // for文の3つの節
    let Statement::For(full) = parse_stmt("for (uint i = 0; i < n; i++) { total += i; }") else {
        panic!("Expected a for statement");
    };
    assert!(matches!(full.init.as_deref(), Some(Statement::VariableDeclaration(_))));
    assert!(full.condition.is_some());
    assert!(matches!(full.update, Some(Expression::Update(_))));

    let Statement::For(empty) = parse_stmt("for (;;) break;") else {
        panic!("Expected a for statement");
    };
    assert!(empty.init.is_none());
    assert!(empty.condition.is_none());
    assert!(empty.update.is_none());
    assert!(matches!(*empty.body, Statement::Break(_)));
}

#[test]
fn test_for_with_expression_init() {
    // 式文の初期化節
    let Statement::For(stmt) = parse_stmt("for (i = 0; i < 10; ++i) {}") else {
        panic!("Expected a for statement");
    };
    assert!(matches!(stmt.init.as_deref(), Some(Statement::Expression(_))));
}

#[test]
fn test_while_and_do_while() {
    // while と do-while
    let statements = parse_body("while (i < 10) i++; do { i--; } while (i > 0);");

    assert!(matches!(statements[0], Statement::While(_)));
    let Statement::DoWhile(do_while) = &statements[1] else {
        panic!("Expected a do-while statement");
    };
    assert!(matches!(*do_while.body, Statement::Block(_)));
    assert!(matches!(do_while.condition, Expression::Binary(_)));
}

#[test]
fn test_jump_statements() {
    // continue / break / return / throw
    let statements = parse_body("continue; break; return; return a + b; throw;");

    assert!(matches!(statements[0], Statement::Continue(_)));
    assert!(matches!(statements[1], Statement::Break(_)));
    assert!(matches!(&statements[2], Statement::Return(ret) if ret.value.is_none()));
    assert!(matches!(&statements[3], Statement::Return(ret) if ret.value.is_some()));
    assert!(matches!(statements[4], Statement::Throw(_)));
}

#[test]
fn test_emit_statement() {
    // emit文
    let statements = parse_body("emit Transfer(msg.sender, to, amount);");
    let Statement::Emit(emit) = &statements[0] else {
        panic!("Expected an emit statement");
    };

    assert_eq!(emit.event.to_string(), "Transfer");
    assert_eq!(emit.arguments.len(), 3);
}

#[test]
fn test_try_with_two_catch_clauses() {
    // try文と2つのcatch節
    let statements = parse_body(
        r#"
        try token.transfer(to, amount) returns (bool ok) {
            success = ok;
        } catch Error(string memory reason) {
            emit Failed(reason);
        } catch (bytes memory data) {
            emit Raw(data);
        }
        "#,
    );
    let Statement::Try(try_statement) = &statements[0] else {
        panic!("Expected a try statement");
    };

    assert!(matches!(try_statement.expression, Expression::Call(_)));
    assert_eq!(try_statement.returns.len(), 1);
    assert_eq!(try_statement.body.statements.len(), 1);
    assert_eq!(try_statement.catch_clauses.len(), 2);

    let first = &try_statement.catch_clauses[0];
    assert_eq!(first.error.as_ref().map(|e| e.name.as_str()), Some("Error"));
    assert_eq!(first.parameters.as_ref().map(Vec::len), Some(1));

    let second = &try_statement.catch_clauses[1];
    assert!(second.error.is_none());
    assert_eq!(second.parameters.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_try_with_call_options() {
    // try の式位置でも呼び出しオプション `{value: ...}` は構造体リテラルとして読む
    let statements = parse_body("try pool.deposit{value: msg.value}(amount) { } catch { }");
    let Statement::Try(try_statement) = &statements[0] else {
        panic!("Expected a try statement");
    };

    let Expression::Call(call) = &try_statement.expression else {
        panic!("Expected a call expression");
    };
    assert!(matches!(*call.callee, Expression::Struct(_)));
    assert!(try_statement.body.statements.is_empty());
    assert!(try_statement.catch_clauses[0].parameters.is_none());
}

#[test]
fn test_try_without_catch_is_error() {
    // catch節のない try はエラー
    assert_parse_errors("contract C { function f() public { try g() { } } }");
}

#[test]
fn test_assembly_block_is_opaque() {
    // アセンブリブロックの中身は解析しない
    let source = r#"assembly { let x := add(1, 2) if x { sstore(0, x) } }"#;
    let Statement::Assembly(assembly) = parse_stmt(source) else {
        panic!("Expected an assembly statement");
    };

    assert!(assembly.dialect.is_none());
    assert_eq!(
        assembly.body.text(source),
        "{ let x := add(1, 2) if x { sstore(0, x) } }"
    );
    assert_eq!(assembly.span.text(source), source);
}

#[test]
fn test_assembly_dialect() {
    // `assembly "evmasm" { }`
    let Statement::Assembly(assembly) = parse_stmt(r#"assembly "evmasm" { }"#) else {
        panic!("Expected an assembly statement");
    };
    assert_eq!(assembly.dialect.as_deref(), Some("evmasm"));
}

#[test]
fn test_nested_blocks() {
    // ネストしたブロック
    let statements = parse_body("{ { x = 1; } }");
    let Statement::Block(outer) = &statements[0] else {
        panic!("Expected a block");
    };
    assert!(matches!(outer.statements[0], Statement::Block(_)));
}
