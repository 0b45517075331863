//! 型付きASTから汎用構文木への変換
//!
//! 各フィールドはソース上の出現順に追加する。

use crate::ast::*;

use super::{SyntaxNode, ToSyntaxNode};

// ==================== ソースファイルとディレクティブ ====================

impl ToSyntaxNode for SourceFile {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("source_file", self.span).children("items", &self.items)
    }
}

impl ToSyntaxNode for SourceUnit {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            SourceUnit::Pragma(node) => node.to_syntax_node(),
            SourceUnit::Import(node) => node.to_syntax_node(),
            SourceUnit::Contract(node) => node.to_syntax_node(),
            SourceUnit::Struct(node) => node.to_syntax_node(),
            SourceUnit::Enum(node) => node.to_syntax_node(),
            SourceUnit::Function(node) => node.to_syntax_node(),
            SourceUnit::Constant(node) => node.to_syntax_node(),
            SourceUnit::Error(node) => node.to_syntax_node(),
        }
    }
}

impl ToSyntaxNode for ErrorNode {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::leaf("error", self.span, self.message.clone())
    }
}

impl ToSyntaxNode for Identifier {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::leaf("identifier", self.span, self.name.clone())
    }
}

impl ToSyntaxNode for IdentifierPath {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("identifier_path", self.span)
            .with_value(self.to_string())
            .children("segments", &self.segments)
    }
}

impl ToSyntaxNode for PragmaDirective {
    fn to_syntax_node(&self) -> SyntaxNode {
        let value = match &self.value {
            PragmaValue::Version(requirement) => requirement.to_syntax_node(),
            PragmaValue::Raw { text, span } => SyntaxNode::leaf("pragma_value", *span, text.clone()),
        };
        SyntaxNode::new("pragma_directive", self.span)
            .child("name", &self.name)
            .push("value", value)
    }
}

impl ToSyntaxNode for VersionRequirement {
    fn to_syntax_node(&self) -> SyntaxNode {
        let mut node = SyntaxNode::new("version_requirement", self.span);
        for constraints in &self.alternatives {
            let (Some(first), Some(last)) = (constraints.first(), constraints.last()) else {
                continue;
            };
            let alternative = SyntaxNode::new("version_alternative", first.span.to(last.span))
                .children("constraints", constraints);
            node = node.push("alternatives", alternative);
        }
        node
    }
}

impl ToSyntaxNode for VersionConstraint {
    fn to_syntax_node(&self) -> SyntaxNode {
        let operator = self.operator.map(|op| op.as_str()).unwrap_or("");
        SyntaxNode::leaf(
            "version_constraint",
            self.span,
            format!("{}{}", operator, self.version),
        )
    }
}

impl ToSyntaxNode for ImportDirective {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("import_directive", self.span)
            .optional("clause", self.clause.as_ref())
            .push(
                "path",
                SyntaxNode::leaf("string_literal", self.path.span, self.path.value.clone()),
            )
            .optional("alias", self.alias.as_ref())
    }
}

impl ToSyntaxNode for ImportClause {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            ImportClause::Single { symbol, alias, span } => {
                let symbol = match symbol {
                    ImportSymbol::Wildcard(span) => SyntaxNode::leaf("wildcard", *span, "*"),
                    ImportSymbol::Name(name) => name.to_syntax_node(),
                };
                SyntaxNode::new("single_import", *span)
                    .push("symbol", symbol)
                    .optional("alias", alias.as_ref())
            }
            ImportClause::Multiple { symbols, span } => {
                SyntaxNode::new("multiple_import", *span).children("symbols", symbols)
            }
        }
    }
}

impl ToSyntaxNode for ImportAlias {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("import_alias", self.span)
            .child("name", &self.name)
            .optional("alias", self.alias.as_ref())
    }
}

impl ToSyntaxNode for UsingDirective {
    fn to_syntax_node(&self) -> SyntaxNode {
        let target = match &self.target {
            UsingTarget::Wildcard(span) => SyntaxNode::leaf("wildcard", *span, "*"),
            UsingTarget::Type(type_name) => type_name.to_syntax_node(),
        };
        SyntaxNode::new("using_directive", self.span)
            .child("library", &self.library)
            .push("target", target)
    }
}

// ==================== 宣言 ====================

impl ToSyntaxNode for ContractDeclaration {
    fn to_syntax_node(&self) -> SyntaxNode {
        let keyword = if self.is_abstract {
            format!("abstract {}", self.kind.as_str())
        } else {
            self.kind.as_str().to_string()
        };
        SyntaxNode::new("contract_declaration", self.span)
            .with_value(keyword)
            .child("name", &self.name)
            .children("inheritance", &self.inheritance)
            .children("members", &self.members)
    }
}

impl ToSyntaxNode for InheritanceSpecifier {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("inheritance_specifier", self.span)
            .child("ancestor", &self.ancestor)
            .optional("arguments", self.arguments.as_ref())
    }
}

impl ToSyntaxNode for ContractMember {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            ContractMember::Function(node) => node.to_syntax_node(),
            ContractMember::Modifier(node) => node.to_syntax_node(),
            ContractMember::Constructor(node) => node.to_syntax_node(),
            ContractMember::FallbackReceive(node) => node.to_syntax_node(),
            ContractMember::StateVariable(node) => node.to_syntax_node(),
            ContractMember::Struct(node) => node.to_syntax_node(),
            ContractMember::Enum(node) => node.to_syntax_node(),
            ContractMember::Event(node) => node.to_syntax_node(),
            ContractMember::Using(node) => node.to_syntax_node(),
            ContractMember::Error(node) => node.to_syntax_node(),
        }
    }
}

impl ToSyntaxNode for FunctionAttribute {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            FunctionAttribute::Visibility { visibility, span } => {
                SyntaxNode::leaf("visibility", *span, visibility.as_str())
            }
            FunctionAttribute::Mutability { mutability, span } => {
                SyntaxNode::leaf("state_mutability", *span, mutability.as_str())
            }
            FunctionAttribute::Virtual { span } => SyntaxNode::leaf("virtual", *span, "virtual"),
            FunctionAttribute::Override(specifier) => specifier.to_syntax_node(),
            FunctionAttribute::Modifier(invocation) => invocation.to_syntax_node(),
        }
    }
}

impl ToSyntaxNode for OverrideSpecifier {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("override_specifier", self.span).children("overrides", &self.overrides)
    }
}

impl ToSyntaxNode for ModifierInvocation {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("modifier_invocation", self.span)
            .child("path", &self.path)
            .optional("arguments", self.arguments.as_ref())
    }
}

impl ToSyntaxNode for Parameter {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("parameter", self.span)
            .with_optional_value(self.location.map(|l| l.as_str()))
            .child("type", &self.type_name)
            .optional("name", self.name.as_ref())
    }
}

impl ToSyntaxNode for FunctionDefinition {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("function_definition", self.span)
            .child("name", &self.name)
            .children("parameters", &self.parameters)
            .children("attributes", &self.attributes)
            .children("returns", &self.returns)
            .optional("body", self.body.as_ref())
    }
}

impl ToSyntaxNode for ModifierDefinition {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("modifier_definition", self.span)
            .child("name", &self.name)
            .children("parameters", &self.parameters)
            .children("attributes", &self.attributes)
            .optional("body", self.body.as_ref())
    }
}

impl ToSyntaxNode for ConstructorDefinition {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("constructor_definition", self.span)
            .children("parameters", &self.parameters)
            .children("attributes", &self.attributes)
            .optional("body", self.body.as_ref())
    }
}

impl ToSyntaxNode for FallbackReceiveDefinition {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("fallback_receive_definition", self.span)
            .with_value(self.kind.as_str())
            .children("parameters", &self.parameters)
            .children("attributes", &self.attributes)
            .optional("body", self.body.as_ref())
    }
}

impl ToSyntaxNode for StateVariableAttribute {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            StateVariableAttribute::Visibility { visibility, span } => {
                SyntaxNode::leaf("visibility", *span, visibility.as_str())
            }
            StateVariableAttribute::Constant { span } => SyntaxNode::leaf("constant", *span, "constant"),
            StateVariableAttribute::Immutable { span } => {
                SyntaxNode::leaf("immutable", *span, "immutable")
            }
            StateVariableAttribute::Override(specifier) => specifier.to_syntax_node(),
        }
    }
}

impl ToSyntaxNode for StateVariableDeclaration {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("state_variable_declaration", self.span)
            .child("type", &self.type_name)
            .children("attributes", &self.attributes)
            .child("name", &self.name)
            .optional("value", self.initializer.as_ref())
    }
}

impl ToSyntaxNode for ConstantVariableDeclaration {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("constant_variable_declaration", self.span)
            .child("type", &self.type_name)
            .child("name", &self.name)
            .child("value", &self.value)
    }
}

impl ToSyntaxNode for StructDeclaration {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("struct_declaration", self.span)
            .child("name", &self.name)
            .children("members", &self.members)
    }
}

impl ToSyntaxNode for StructMember {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("struct_member", self.span)
            .child("type", &self.type_name)
            .child("name", &self.name)
    }
}

impl ToSyntaxNode for EnumDeclaration {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("enum_declaration", self.span)
            .child("name", &self.name)
            .children("values", &self.values)
    }
}

impl ToSyntaxNode for EventDefinition {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("event_definition", self.span)
            .with_optional_value(self.is_anonymous.then_some("anonymous"))
            .child("name", &self.name)
            .children("parameters", &self.parameters)
    }
}

impl ToSyntaxNode for EventParameter {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("event_parameter", self.span)
            .with_optional_value(self.is_indexed.then_some("indexed"))
            .child("type", &self.type_name)
            .optional("name", self.name.as_ref())
    }
}

// ==================== 型名 ====================

impl ToSyntaxNode for TypeName {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            TypeName::Elementary(ty) => ty.to_syntax_node(),
            TypeName::UserDefined(path) => {
                SyntaxNode::new("user_defined_type", path.span).child("path", path)
            }
            TypeName::Mapping(ty) => SyntaxNode::new("mapping_type", ty.span)
                .child("key", &ty.key)
                .child("value", &ty.value),
            TypeName::Array(ty) => SyntaxNode::new("array_type", ty.span)
                .child("base", &ty.base)
                .optional("size", ty.size.as_ref()),
            TypeName::Function(ty) => SyntaxNode::new("function_type", ty.span)
                .children("parameters", &ty.parameters)
                .children("attributes", &ty.attributes)
                .children("returns", &ty.returns),
        }
    }
}

impl ToSyntaxNode for ElementaryTypeName {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::leaf("primitive_type", self.span, self.kind.to_string())
    }
}

// ==================== 文 ====================

impl ToSyntaxNode for Block {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("block", self.span).children("statements", &self.statements)
    }
}

impl ToSyntaxNode for Statement {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            Statement::Block(block) => block.to_syntax_node(),
            Statement::Expression(node) => {
                SyntaxNode::new("expression_statement", node.span).child("expression", &node.expression)
            }
            Statement::VariableDeclaration(node) => node.to_syntax_node(),
            Statement::If(node) => SyntaxNode::new("if_statement", node.span)
                .child("condition", &node.condition)
                .child("then", &node.then_branch)
                .optional("else", node.else_branch.as_ref()),
            Statement::For(node) => SyntaxNode::new("for_statement", node.span)
                .optional("init", node.init.as_ref())
                .optional("condition", node.condition.as_ref())
                .optional("update", node.update.as_ref())
                .child("body", &node.body),
            Statement::While(node) => SyntaxNode::new("while_statement", node.span)
                .child("condition", &node.condition)
                .child("body", &node.body),
            Statement::DoWhile(node) => SyntaxNode::new("do_while_statement", node.span)
                .child("body", &node.body)
                .child("condition", &node.condition),
            Statement::Continue(span) => SyntaxNode::new("continue_statement", *span),
            Statement::Break(span) => SyntaxNode::new("break_statement", *span),
            Statement::Throw(span) => SyntaxNode::new("throw_statement", *span),
            Statement::Return(node) => {
                SyntaxNode::new("return_statement", node.span).optional("value", node.value.as_ref())
            }
            Statement::Emit(node) => SyntaxNode::new("emit_statement", node.span)
                .child("event", &node.event)
                .child("arguments", &node.arguments),
            Statement::Try(node) => node.to_syntax_node(),
            Statement::Assembly(node) => SyntaxNode::new("assembly_statement", node.span)
                .with_optional_value(node.dialect.as_deref())
                .push("body", SyntaxNode::new("assembly_block", node.body)),
            Statement::Error(node) => node.to_syntax_node(),
        }
    }
}

impl ToSyntaxNode for VariableDeclarationStatement {
    fn to_syntax_node(&self) -> SyntaxNode {
        let declaration = match &self.declaration {
            VariableDeclarationKind::Single(declaration) => declaration.to_syntax_node(),
            VariableDeclarationKind::Tuple { elements, span } => {
                SyntaxNode::new("variable_declaration_tuple", *span)
                    .slots("elements", elements)
            }
            VariableDeclarationKind::VarTuple { names, span } => {
                SyntaxNode::new("variable_declaration_tuple", *span)
                    .with_value("var")
                    .slots("elements", names)
            }
        };
        SyntaxNode::new("variable_declaration_statement", self.span)
            .push("declaration", declaration)
            .optional("value", self.initializer.as_ref())
    }
}

impl ToSyntaxNode for VariableDeclaration {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("variable_declaration", self.span)
            .with_optional_value(self.location.map(|l| l.as_str()))
            .child("type", &self.type_name)
            .child("name", &self.name)
    }
}

impl ToSyntaxNode for TryStatement {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("try_statement", self.span)
            .child("expression", &self.expression)
            .children("returns", &self.returns)
            .child("body", &self.body)
            .children("catch_clauses", &self.catch_clauses)
    }
}

impl ToSyntaxNode for CatchClause {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("catch_clause", self.span)
            .optional("error", self.error.as_ref())
            .children("parameters", self.parameters.iter().flatten())
            .child("body", &self.body)
    }
}

// ==================== 式 ====================

impl ToSyntaxNode for Expression {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            Expression::Binary(node) => SyntaxNode::new("binary_expression", node.span)
                .with_value(node.operator.as_str())
                .child("left", &node.left)
                .child("right", &node.right),
            Expression::Unary(node) => SyntaxNode::new("unary_expression", node.span)
                .with_value(node.operator.as_str())
                .child("operand", &node.operand),
            Expression::Update(node) => {
                let fixity = if node.is_prefix { "prefix" } else { "postfix" };
                SyntaxNode::new("update_expression", node.span)
                    .with_value(format!("{} {}", fixity, node.operator.as_str()))
                    .child("operand", &node.operand)
            }
            Expression::Ternary(node) => SyntaxNode::new("ternary_expression", node.span)
                .child("condition", &node.condition)
                .child("consequence", &node.if_true)
                .child("alternative", &node.if_false),
            Expression::Assignment(node) => SyntaxNode::new("assignment_expression", node.span)
                .with_value(node.operator.as_str())
                .child("left", &node.left)
                .child("right", &node.right),
            Expression::Call(node) => SyntaxNode::new("call_expression", node.span)
                .child("function", &node.callee)
                .child("arguments", &node.arguments),
            Expression::Member(node) => SyntaxNode::new("member_expression", node.span)
                .child("object", &node.object)
                .child("property", &node.member),
            Expression::Index(node) => SyntaxNode::new("array_access", node.span)
                .child("base", &node.base)
                .optional("index", node.index.as_ref()),
            Expression::Slice(node) => SyntaxNode::new("slice_access", node.span)
                .child("base", &node.base)
                .optional("from", node.from.as_ref())
                .optional("to", node.to.as_ref()),
            Expression::Tuple(node) => SyntaxNode::new("tuple_expression", node.span)
                .slots("elements", &node.elements),
            Expression::InlineArray(node) => {
                SyntaxNode::new("inline_array_expression", node.span).children("elements", &node.elements)
            }
            Expression::Struct(node) => SyntaxNode::new("struct_expression", node.span)
                .child("type", &node.type_expression)
                .children("fields", &node.fields),
            Expression::New(node) => {
                SyntaxNode::new("new_expression", node.span).child("type", &node.type_name)
            }
            Expression::TypeCast(node) => SyntaxNode::new("type_cast_expression", node.span)
                .child("type", &node.type_name)
                .child("argument", &node.argument),
            Expression::ElementaryType(type_name) => type_name.to_syntax_node(),
            Expression::MetaType(node) => {
                SyntaxNode::new("meta_type_expression", node.span).child("type", &node.type_name)
            }
            Expression::PayableConversion(node) => {
                SyntaxNode::new("payable_conversion_expression", node.span)
                    .child("arguments", &node.arguments)
            }
            Expression::Parenthesized(node) => {
                SyntaxNode::new("parenthesized_expression", node.span)
                    .child("expression", &node.expression)
            }
            Expression::Literal(literal) => literal.to_syntax_node(),
            Expression::Identifier(identifier) => identifier.to_syntax_node(),
        }
    }
}

impl ToSyntaxNode for CallArguments {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            CallArguments::Positional { arguments, span } => {
                SyntaxNode::new("call_arguments", *span).children("arguments", arguments)
            }
            CallArguments::Named { arguments, span } => {
                SyntaxNode::new("named_arguments", *span).children("arguments", arguments)
            }
        }
    }
}

impl ToSyntaxNode for NamedArgument {
    fn to_syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new("named_argument", self.span)
            .child("name", &self.name)
            .child("value", &self.value)
    }
}

impl ToSyntaxNode for Literal {
    fn to_syntax_node(&self) -> SyntaxNode {
        match self {
            Literal::String(lit) => SyntaxNode::leaf("string_literal", lit.span, lit.value.clone()),
            Literal::HexString(lit) => {
                SyntaxNode::leaf("hex_string_literal", lit.span, lit.value.clone())
            }
            Literal::UnicodeString(lit) => {
                SyntaxNode::leaf("unicode_string_literal", lit.span, lit.value.clone())
            }
            Literal::Number(lit) => {
                let text = match lit.unit {
                    Some(unit) => format!("{} {}", lit.value, unit.as_str()),
                    None => lit.value.clone(),
                };
                SyntaxNode::leaf("number_literal", lit.span, text)
            }
            Literal::Boolean(lit) => {
                SyntaxNode::leaf("boolean_literal", lit.span, lit.value.to_string())
            }
        }
    }
}
