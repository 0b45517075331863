//! コントラクト宣言とメンバーのパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_contract() {
    // 最小限のコントラクト
    let source = "contract C {}";
    let file = assert_parse_success(source);
    let contract = first_contract(&file);

    assert_eq!(contract.kind, ContractKind::Contract);
    assert_eq!(contract.name.name, "C");
    assert!(!contract.is_abstract);
    assert!(contract.members.is_empty());
    assert_eq!(contract.span.text(source), source);
}

#[test]
fn test_contract_kinds() {
    // interface / library / abstract contract
    let file = assert_parse_success(
        r#"
        interface IERC20 { function totalSupply() external view returns (uint256); }
        library SafeMath { }
        abstract contract Base { function f() public virtual; }
        "#,
    );
    let contracts: Vec<_> = file.contracts().collect();

    assert_eq!(contracts.len(), 3);
    assert_eq!(contracts[0].kind, ContractKind::Interface);
    assert_eq!(contracts[1].kind, ContractKind::Library);
    assert_eq!(contracts[2].kind, ContractKind::Contract);
    assert!(contracts[2].is_abstract);
}

#[test]
fn test_inheritance_with_arguments() {
    // `contract C is A(1, 2), B`
    let file = assert_parse_success("contract C is A(1, 2), B {}");
    let contract = first_contract(&file);

    assert_eq!(contract.inheritance.len(), 2);
    assert_eq!(contract.inheritance[0].ancestor.to_string(), "A");
    assert_eq!(
        contract.inheritance[0].arguments.as_ref().map(CallArguments::len),
        Some(2)
    );
    assert_eq!(contract.inheritance[1].ancestor.to_string(), "B");
    assert!(contract.inheritance[1].arguments.is_none());
}

#[test]
fn test_inheritance_qualified_path() {
    // 修飾名の継承
    let file = assert_parse_success("contract C is Lib.Base {}");
    assert_eq!(first_contract(&file).inheritance[0].ancestor.to_string(), "Lib.Base");
}

#[test]
fn test_abstract_interface_is_rejected() {
    // abstract は contract にのみ付けられる
    let output = assert_parse_errors("abstract interface I {}");
    assert_eq!(output.source_file.contracts().count(), 0);
}

#[test]
fn test_library_cannot_inherit() {
    // library は継承できない
    assert_parse_errors("library L is A {}");
}

#[test]
fn test_state_variables() {
    // 状態変数の属性と初期化子
    let file = assert_parse_success(
        r#"
        contract Token {
            uint256 public totalSupply;
            mapping(address => uint256) private balances;
            address payable owner;
            uint constant DECIMALS = 18;
            address immutable deployer = msg.sender;
            string public override name = "Token";
        }
        "#,
    );
    let variables: Vec<_> = first_contract(&file).state_variables().collect();

    assert_eq!(variables.len(), 6);
    assert_eq!(variables[0].name.name, "totalSupply");
    assert_eq!(variables[0].visibility(), Some(Visibility::Public));
    assert!(matches!(variables[1].type_name, TypeName::Mapping(_)));
    assert_eq!(variables[1].visibility(), Some(Visibility::Private));
    assert!(matches!(
        variables[2].type_name,
        TypeName::Elementary(ElementaryTypeName {
            kind: ElementaryType::AddressPayable,
            ..
        })
    ));
    assert!(variables[3].is_constant());
    assert!(variables[3].initializer.is_some());
    assert!(variables[4].is_immutable());
    assert_eq!(variables[5].attributes.len(), 2);
    assert!(matches!(variables[5].attributes[1], StateVariableAttribute::Override(_)));
}

#[test]
fn test_user_defined_state_variable() {
    // ユーザー定義型の状態変数
    let file = assert_parse_success("contract C { IERC20 public token; Lib.Info info; }");
    let variables: Vec<_> = first_contract(&file).state_variables().collect();

    assert!(matches!(&variables[0].type_name, TypeName::UserDefined(path) if path.to_string() == "IERC20"));
    assert!(matches!(&variables[1].type_name, TypeName::UserDefined(path) if path.to_string() == "Lib.Info"));
}

#[test]
fn test_function_type_state_variable() {
    // 関数型の状態変数は `function (` で始まる
    let file = assert_parse_success(
        "contract C { function (uint) external returns (bool) callback; }",
    );
    let contract = first_contract(&file);
    let ContractMember::StateVariable(variable) = &contract.members[0] else {
        panic!("Expected a state variable, got {:?}", contract.members[0]);
    };

    assert_eq!(variable.name.name, "callback");
    let TypeName::Function(function_type) = &variable.type_name else {
        panic!("Expected a function type");
    };
    assert_eq!(function_type.parameters.len(), 1);
    assert_eq!(function_type.returns.len(), 1);
}

#[test]
fn test_legacy_unnamed_fallback() {
    // 0.4系の無名fallback関数
    let file = assert_parse_success("contract C { function () external payable { } }");
    let contract = first_contract(&file);
    let ContractMember::FallbackReceive(fallback) = &contract.members[0] else {
        panic!("Expected a fallback function, got {:?}", contract.members[0]);
    };

    assert_eq!(fallback.kind, FallbackKind::Fallback);
    assert_eq!(fallback.mutability(), Some(StateMutability::Payable));
    assert!(fallback.body.is_some());
}

#[test]
fn test_struct_declaration() {
    // 構造体とメンバー
    let file = assert_parse_success(
        "contract C { struct Voter { uint weight; bool voted; address delegate; } }",
    );
    let ContractMember::Struct(declaration) = &first_contract(&file).members[0] else {
        panic!("Expected a struct");
    };

    assert_eq!(declaration.name.name, "Voter");
    let names: Vec<_> = declaration.members.iter().map(|m| m.name.name.as_str()).collect();
    assert_eq!(names, vec!["weight", "voted", "delegate"]);
}

#[test]
fn test_empty_struct_is_rejected() {
    // メンバーのない構造体はエラーだが、宣言は残り、後続のメンバーも解析される
    let output = assert_parse_errors("contract C { struct Empty {} uint x; }");
    let contract = first_contract(&output.source_file);

    assert_eq!(output.errors.len(), 1);
    let ContractMember::Struct(declaration) = &contract.members[0] else {
        panic!("Expected the struct to be kept, got {:?}", contract.members[0]);
    };
    assert_eq!(declaration.name.name, "Empty");
    assert!(declaration.members.is_empty());
    assert_eq!(contract.state_variables().count(), 1);
}

#[test]
fn test_enum_declaration() {
    // 列挙型（末尾カンマと空の列挙を許容）
    let file = assert_parse_success(
        "contract C { enum State { Created, Locked, Inactive, } enum Empty {} }",
    );
    let contract = first_contract(&file);
    let ContractMember::Enum(state) = &contract.members[0] else {
        panic!("Expected an enum");
    };
    let ContractMember::Enum(empty) = &contract.members[1] else {
        panic!("Expected an enum");
    };

    assert_eq!(state.values.len(), 3);
    assert_eq!(state.values[2].name, "Inactive");
    assert!(empty.values.is_empty());
}

#[test]
fn test_event_definition() {
    // イベントの indexed と anonymous
    let file = assert_parse_success(
        r#"
        contract C {
            event Transfer(address indexed from, address indexed to, uint256 value);
            event Ping(uint) anonymous;
        }
        "#,
    );
    let contract = first_contract(&file);
    let ContractMember::Event(transfer) = &contract.members[0] else {
        panic!("Expected an event");
    };
    let ContractMember::Event(ping) = &contract.members[1] else {
        panic!("Expected an event");
    };

    assert_eq!(transfer.parameters.len(), 3);
    assert!(transfer.parameters[0].is_indexed);
    assert!(!transfer.parameters[2].is_indexed);
    assert_eq!(transfer.parameters[2].name.as_ref().map(|n| n.name.as_str()), Some("value"));
    assert!(!transfer.is_anonymous);
    assert!(ping.is_anonymous);
    assert!(ping.parameters[0].name.is_none());
}

#[test]
fn test_file_level_declarations() {
    // ファイルレベルの構造体・列挙型・関数・定数
    let file = assert_parse_success(
        r#"
        struct Point { uint x; uint y; }
        enum Color { Red, Green }
        function helper(uint a) pure returns (uint) { return a; }
        uint constant MAX = 100;
        "#,
    );

    assert_eq!(file.items.len(), 4);
    assert!(matches!(file.items[0], SourceUnit::Struct(_)));
    assert!(matches!(file.items[1], SourceUnit::Enum(_)));
    assert!(matches!(file.items[2], SourceUnit::Function(_)));
    match &file.items[3] {
        SourceUnit::Constant(constant) => assert_eq!(constant.name.name, "MAX"),
        other => panic!("Expected a constant, got {:?}", other),
    }
}

#[test]
fn test_members_keep_declaration_order() {
    // メンバーは宣言順のまま保持される
    let file = assert_parse_success(
        r#"
        contract C {
            function f() public {}
            uint x;
            event E();
            modifier m { _; }
            constructor() public {}
        }
        "#,
    );
    let contract = first_contract(&file);

    assert!(matches!(contract.members[0], ContractMember::Function(_)));
    assert!(matches!(contract.members[1], ContractMember::StateVariable(_)));
    assert!(matches!(contract.members[2], ContractMember::Event(_)));
    assert!(matches!(contract.members[3], ContractMember::Modifier(_)));
    assert!(matches!(contract.members[4], ContractMember::Constructor(_)));
}
