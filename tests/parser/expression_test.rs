//! 式のパーサーテスト
//!
//! 演算子の優先順位と結合性は、生成される木のS式で確認する。

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("a + b * c", r#"(binary_expression "+" left: (identifier "a") right: (binary_expression "*" left: (identifier "b") right: (identifier "c")))"#; "multiplication binds tighter")]
#[test_case("a - b - c", r#"(binary_expression "-" left: (binary_expression "-" left: (identifier "a") right: (identifier "b")) right: (identifier "c"))"#; "subtraction is left associative")]
#[test_case("a ** b ** c", r#"(binary_expression "**" left: (identifier "a") right: (binary_expression "**" left: (identifier "b") right: (identifier "c")))"#; "exponent is right associative")]
#[test_case("a = b = c", r#"(assignment_expression "=" left: (identifier "a") right: (assignment_expression "=" left: (identifier "b") right: (identifier "c")))"#; "assignment is right associative")]
#[test_case("a || b && c", r#"(binary_expression "||" left: (identifier "a") right: (binary_expression "&&" left: (identifier "b") right: (identifier "c")))"#; "and binds tighter than or")]
#[test_case("a == b < c", r#"(binary_expression "==" left: (identifier "a") right: (binary_expression "<" left: (identifier "b") right: (identifier "c")))"#; "relational binds tighter than equality")]
#[test_case("a | b ^ c & d", r#"(binary_expression "|" left: (identifier "a") right: (binary_expression "^" left: (identifier "b") right: (binary_expression "&" left: (identifier "c") right: (identifier "d"))))"#; "bitwise precedence")]
#[test_case("a << 1 + b", r#"(binary_expression "<<" left: (identifier "a") right: (binary_expression "+" left: (number_literal "1") right: (identifier "b")))"#; "additive binds tighter than shift")]
#[test_case("-a ** 2", r#"(binary_expression "**" left: (unary_expression "-" operand: (identifier "a")) right: (number_literal "2"))"#; "unary binds tighter than exponent")]
#[test_case("!a && b", r#"(binary_expression "&&" left: (unary_expression "!" operand: (identifier "a")) right: (identifier "b"))"#; "logical not")]
#[test_case("x += y * 2", r#"(assignment_expression "+=" left: (identifier "x") right: (binary_expression "*" left: (identifier "y") right: (number_literal "2")))"#; "compound assignment")]
fn test_operator_precedence(source: &str, expected: &str) {
    // 優先順位と結合性
    assert_eq!(expr_sexp(source), expected);
}

#[test]
fn test_ternary_nests_to_the_right() {
    // `a ? b : c ? d : e` は偽分岐側に入れ子になる
    assert_eq!(
        expr_sexp("a ? b : c ? d : e"),
        r#"(ternary_expression condition: (identifier "a") consequence: (identifier "b") alternative: (ternary_expression condition: (identifier "c") consequence: (identifier "d") alternative: (identifier "e")))"#
    );
}

#[test]
fn test_ternary_lower_than_or() {
    // 三項演算子は `||` より弱い
    let Expression::Ternary(ternary) = parse_expr("a || b ? 1 : 2") else {
        panic!("Expected a ternary expression");
    };
    assert!(matches!(*ternary.condition, Expression::Binary(_)));
}

#[test]
fn test_postfix_chain() {
    // `a.b(c)[d]` は左から右に連鎖する
    assert_eq!(
        expr_sexp("a.b(c)[d]"),
        r#"(array_access base: (call_expression function: (member_expression object: (identifier "a") property: (identifier "b")) arguments: (call_arguments arguments: (identifier "c"))) index: (identifier "d"))"#
    );
}

#[test]
fn test_update_expressions() {
    // 前置と後置のインクリメント
    let Expression::Update(postfix) = parse_expr("i++") else {
        panic!("Expected an update expression");
    };
    assert!(!postfix.is_prefix);
    assert_eq!(postfix.operator, UpdateOperator::Increment);

    let Expression::Update(prefix) = parse_expr("--i") else {
        panic!("Expected an update expression");
    };
    assert!(prefix.is_prefix);
    assert_eq!(prefix.operator, UpdateOperator::Decrement);
}

#[test]
fn test_delete_expression() {
    // delete は前置単項演算子
    let Expression::Unary(unary) = parse_expr("delete balances[owner]") else {
        panic!("Expected a unary expression");
    };
    assert_eq!(unary.operator, UnaryOperator::Delete);
    assert!(matches!(*unary.operand, Expression::Index(_)));
}

#[test]
fn test_named_call_arguments() {
    // 名前付き引数の呼び出し
    let Expression::Call(call) = parse_expr("f({a: 1, b: 2})") else {
        panic!("Expected a call expression");
    };
    let CallArguments::Named { arguments, .. } = &call.arguments else {
        panic!("Expected named arguments");
    };
    let names: Vec<_> = arguments.iter().map(|a| a.name.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_call_options() {
    // `addr.call{value: 1 ether, gas: 5000}("")`
    let Expression::Call(call) = parse_expr(r#"addr.call{value: 1 ether, gas: 5000}("")"#) else {
        panic!("Expected a call expression");
    };
    let Expression::Struct(options) = call.callee.as_ref() else {
        panic!("Expected call options");
    };
    assert_eq!(options.fields.len(), 2);
    assert!(matches!(*options.type_expression, Expression::Member(_)));
}

#[test]
fn test_index_and_slice() {
    // 添字アクセスとスライス
    assert!(matches!(parse_expr("a[1]"), Expression::Index(ref e) if e.index.is_some()));

    let Expression::Slice(slice) = parse_expr("data[4:]") else {
        panic!("Expected a slice");
    };
    assert!(slice.from.is_some());
    assert!(slice.to.is_none());

    let Expression::Slice(slice) = parse_expr("data[:4]") else {
        panic!("Expected a slice");
    };
    assert!(slice.from.is_none());
    assert!(slice.to.is_some());
}

#[test]
fn test_tuple_and_parenthesized() {
    // 括弧式とタプル（空要素を含む）
    assert!(matches!(parse_expr("(a)"), Expression::Parenthesized(_)));

    let Expression::Tuple(tuple) = parse_expr("(a, , b)") else {
        panic!("Expected a tuple");
    };
    assert_eq!(tuple.elements.len(), 3);
    assert!(tuple.elements[1].is_none());

    let Expression::Tuple(empty) = parse_expr("()") else {
        panic!("Expected an empty tuple");
    };
    assert!(empty.elements.is_empty());
}

#[test]
fn test_inline_array() {
    // インライン配列
    let Expression::InlineArray(array) = parse_expr("[1, 2, 3]") else {
        panic!("Expected an inline array");
    };
    assert_eq!(array.elements.len(), 3);
}

#[test]
fn test_new_expression() {
    // new による生成
    let Expression::Call(call) = parse_expr("new Token(100)") else {
        panic!("Expected a call expression");
    };
    assert!(matches!(*call.callee, Expression::New(_)));

    let Expression::Call(call) = parse_expr("new uint[](n)") else {
        panic!("Expected a call expression");
    };
    let Expression::New(new) = call.callee.as_ref() else {
        panic!("Expected a new expression");
    };
    assert!(matches!(new.type_name, TypeName::Array(_)));
}

#[test]
fn test_type_conversions() {
    // 基本型への変換、payable変換、type()
    let Expression::TypeCast(cast) = parse_expr("uint256(x)") else {
        panic!("Expected a type cast");
    };
    assert_eq!(cast.type_name.kind, ElementaryType::Uint(256));

    assert!(matches!(parse_expr("payable(owner)"), Expression::PayableConversion(_)));
    assert!(matches!(parse_expr("address(this)"), Expression::TypeCast(_)));

    let Expression::Member(member) = parse_expr("type(IERC20).interfaceId") else {
        panic!("Expected a member expression");
    };
    assert!(matches!(*member.object, Expression::MetaType(_)));
}

#[test]
fn test_elementary_types_as_expressions() {
    // `abi.decode(data, (uint, bool))` の型タプル
    let Expression::Call(call) = parse_expr("abi.decode(data, (uint, bool))") else {
        panic!("Expected a call expression");
    };
    let CallArguments::Positional { arguments, .. } = &call.arguments else {
        panic!("Expected positional arguments");
    };
    let Expression::Tuple(types) = &arguments[1] else {
        panic!("Expected a tuple of types");
    };
    assert!(matches!(types.elements[0], Some(Expression::ElementaryType(_))));
}

#[test]
fn test_invalid_assignment_target() {
    // 代入できない左辺はエラー
    assert!(Parser::new("1 = a").parse_expression().is_err());
    assert!(Parser::new("f() = a").parse_expression().is_err());
}

#[test]
fn test_expression_spans() {
    // 二項式のスパンは左端から右端まで
    let source = "a  +  b * c";
    let expr = parse_expr(source);
    assert_eq!(expr.span().text(source), source);

    let Expression::Binary(binary) = expr else {
        panic!("Expected a binary expression");
    };
    assert_eq!(binary.right.span().text(source), "b * c");
}
