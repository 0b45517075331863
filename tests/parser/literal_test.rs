//! リテラルのパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

fn literal(source: &str) -> Literal {
    match parse_expr(source) {
        Expression::Literal(literal) => literal,
        other => panic!("Expected a literal, got {:?}", other),
    }
}

fn number(source: &str) -> NumberLiteral {
    match literal(source) {
        Literal::Number(number) => number,
        other => panic!("Expected a number literal, got {:?}", other),
    }
}

#[test]
fn test_number_with_ether_unit() {
    // `1 ether`
    let source = "1 ether";
    let lit = number(source);

    assert_eq!(lit.value, "1");
    assert_eq!(lit.kind, NumberKind::Decimal);
    assert_eq!(lit.unit, Some(NumberUnit::Ether));
    assert_eq!(lit.span.text(source), "1 ether");
}

#[test]
fn test_hex_number_with_gwei_unit() {
    // `0x1_f gwei`
    let lit = number("0x1_f gwei");

    assert_eq!(lit.value, "0x1_f");
    assert_eq!(lit.kind, NumberKind::Hex);
    assert_eq!(lit.unit, Some(NumberUnit::Gwei));
}

#[test]
fn test_time_units() {
    // 時間の単位
    assert_eq!(number("2 days").unit, Some(NumberUnit::Days));
    assert_eq!(number("30 minutes").unit, Some(NumberUnit::Minutes));
    assert_eq!(number("1 years").unit, Some(NumberUnit::Years));
}

#[test]
fn test_number_without_unit() {
    // 単位なし、指数・小数
    assert_eq!(number("1e18").unit, None);
    assert_eq!(number("2.5").value, "2.5");
}

#[test]
fn test_unit_word_after_non_number_is_identifier() {
    // 数値以外の後ろの単位名は通常の識別子
    let Expression::Binary(binary) = parse_expr("x * ether") else {
        panic!("Expected a binary expression");
    };
    assert!(matches!(*binary.right, Expression::Identifier(ref id) if id.name == "ether"));
}

#[test]
fn test_boolean_literals() {
    // true / false
    assert!(matches!(literal("true"), Literal::Boolean(BooleanLiteral { value: true, .. })));
    assert!(matches!(literal("false"), Literal::Boolean(BooleanLiteral { value: false, .. })));
}

#[test]
fn test_adjacent_strings_are_concatenated() {
    // 隣接する文字列リテラルは1つに連結される
    let source = r#""abc" 'def'"#;
    let Literal::String(string) = literal(source) else {
        panic!("Expected a string literal");
    };

    assert_eq!(string.value, "abcdef");
    assert_eq!(string.parts.len(), 2);
    assert_eq!(string.span.text(source), source);
}

#[test]
fn test_hex_string_literal() {
    // hex文字列
    let Literal::HexString(hex) = literal(r#"hex"DEAD_beef""#) else {
        panic!("Expected a hex string literal");
    };
    assert_eq!(hex.value, "DEADbeef");
}

#[test]
fn test_unicode_string_literal() {
    // unicode文字列
    let Literal::UnicodeString(string) = literal(r#"unicode"Hello 😃""#) else {
        panic!("Expected a unicode string literal");
    };
    assert_eq!(string.value, "Hello 😃");
}

#[test]
fn test_string_escapes() {
    // エスケープは解除済みの値になる
    let Literal::String(string) = literal(r#""tab\thereA""#) else {
        panic!("Expected a string literal");
    };
    assert_eq!(string.value, "tab\thereA");
}

#[test]
fn test_high_byte_escapes_keep_exact_bytes() {
    // `\xff` は1バイトのまま `bytes` に残る
    let Literal::String(string) = literal(r#""a\xff" "\101""#) else {
        panic!("Expected a string literal");
    };
    assert_eq!(string.bytes, vec![b'a', 0xff, b'A']);
    assert_eq!(string.value, "a\u{FFFD}A");
}

#[test]
fn test_hex_string_bytes() {
    // hex文字列の `bytes` は数字列を復号したもの
    let Literal::HexString(hex) = literal(r#"hex"00ff" hex"10""#) else {
        panic!("Expected a hex string literal");
    };
    assert_eq!(hex.value, "00ff10");
    assert_eq!(hex.bytes, vec![0x00, 0xff, 0x10]);
}
