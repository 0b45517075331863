//! 型名のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn elementary(ty: &TypeName) -> ElementaryType {
    match ty {
        TypeName::Elementary(name) => name.kind,
        other => panic!("Expected an elementary type, got {:?}", other),
    }
}

#[test_case("uint", ElementaryType::Uint(256); "uint defaults to 256 bits")]
#[test_case("int", ElementaryType::Int(256); "int defaults to 256 bits")]
#[test_case("uint8", ElementaryType::Uint(8); "uint8")]
#[test_case("int128", ElementaryType::Int(128); "int128")]
#[test_case("bytes", ElementaryType::Bytes; "dynamic bytes")]
#[test_case("bytes4", ElementaryType::FixedBytes(4); "fixed bytes")]
#[test_case("byte", ElementaryType::Byte; "legacy byte")]
#[test_case("address", ElementaryType::Address; "address")]
#[test_case("address payable", ElementaryType::AddressPayable; "address payable")]
#[test_case("bool", ElementaryType::Bool; "bool")]
#[test_case("string", ElementaryType::String; "string")]
#[test_case("fixed", ElementaryType::Fixed(None); "fixed")]
#[test_case("ufixed128x18", ElementaryType::Ufixed(Some((128, 18))); "ufixed with precision")]
fn test_elementary_types(source: &str, expected: ElementaryType) {
    // 基本型名の解釈
    assert_eq!(elementary(&parse_type(source)), expected);
}

#[test]
fn test_simple_mapping() {
    // mapping(K => V)
    let TypeName::Mapping(mapping) = parse_type("mapping(address => uint256)") else {
        panic!("Expected a mapping type");
    };
    assert_eq!(elementary(&mapping.key), ElementaryType::Address);
    assert_eq!(elementary(&mapping.value), ElementaryType::Uint(256));
}

#[test]
fn test_nested_mapping() {
    // 値側にネストしたmapping
    let TypeName::Mapping(outer) = parse_type("mapping(address => mapping(address => uint))") else {
        panic!("Expected a mapping type");
    };
    let TypeName::Mapping(inner) = outer.value.as_ref() else {
        panic!("Expected a nested mapping type");
    };
    assert_eq!(elementary(&inner.key), ElementaryType::Address);
    assert_eq!(elementary(&inner.value), ElementaryType::Uint(256));
}

#[test]
fn test_mapping_with_user_defined_key() {
    // ユーザー定義型のキー
    let TypeName::Mapping(mapping) = parse_type("mapping(Token => Info[])") else {
        panic!("Expected a mapping type");
    };
    assert!(matches!(mapping.key.as_ref(), TypeName::UserDefined(path) if path.to_string() == "Token"));
    assert!(matches!(mapping.value.as_ref(), TypeName::Array(_)));
}

#[test]
fn test_mapping_key_must_not_be_mapping() {
    // mappingや配列はキーにできない
    assert!(Parser::new("mapping(mapping(uint => uint) => uint)").parse_type_name().is_err());
    assert!(Parser::new("mapping(uint[] => uint)").parse_type_name().is_err());
}

#[test]
fn test_array_types_nest_left_to_right() {
    // `uint[2][]` は「uint[2] の動的配列」
    let TypeName::Array(outer) = parse_type("uint[2][]") else {
        panic!("Expected an array type");
    };
    assert!(outer.size.is_none());

    let TypeName::Array(inner) = outer.base.as_ref() else {
        panic!("Expected a nested array type");
    };
    assert!(inner.size.is_some());
    assert_eq!(elementary(&inner.base), ElementaryType::Uint(256));
}

#[test]
fn test_array_size_expression() {
    // 配列長は式
    let TypeName::Array(array) = parse_type("bytes32[N * 2]") else {
        panic!("Expected an array type");
    };
    assert!(matches!(array.size.as_deref(), Some(Expression::Binary(_))));
}

#[test]
fn test_user_defined_path() {
    // 修飾されたユーザー定義型
    let TypeName::UserDefined(path) = parse_type("Lib.Struct") else {
        panic!("Expected a user-defined type");
    };
    assert_eq!(path.segments.len(), 2);
    assert_eq!(path.to_string(), "Lib.Struct");
}

#[test]
fn test_function_type() {
    // 関数型
    let TypeName::Function(function) =
        parse_type("function (uint, address) external view returns (bool)")
    else {
        panic!("Expected a function type");
    };
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.attributes.len(), 2);
    assert_eq!(function.returns.len(), 1);
}

#[test]
fn test_type_span() {
    // 型名のスパン
    let source = "mapping(address => uint)[]";
    assert_eq!(parse_type(source).span().text(source), source);
}
