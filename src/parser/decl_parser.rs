//! 宣言（コントラクト、関数、状態変数、構造体、列挙型、イベント）の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// ソースファイル全体を解析
    ///
    /// トップレベル項目ごとにエラーから回復するため、常に木を返す。
    pub(super) fn parse_source_file(&mut self) -> SourceFile {
        let mut items = Vec::new();

        while !self.is_at_end() {
            let start_index = self.current;
            let item = match self.parse_source_unit() {
                Ok(item) => item,
                Err(error) => SourceUnit::Error(self.recover(error, start_index)),
            };
            items.push(item);
        }

        SourceFile {
            items,
            span: Span::with_positions(0, self.source.len(), Position::default(), self.eof.end_position),
        }
    }

    /// トップレベル項目を解析
    fn parse_source_unit(&mut self) -> ParseResult<SourceUnit> {
        match self.current_token() {
            Some(Token::Pragma) => Ok(SourceUnit::Pragma(self.parse_pragma_directive()?)),
            Some(Token::Import) => Ok(SourceUnit::Import(self.parse_import_directive()?)),
            Some(Token::Abstract) | Some(Token::Contract) | Some(Token::Interface) | Some(Token::Library) => {
                Ok(SourceUnit::Contract(self.parse_contract_declaration()?))
            }
            Some(Token::Struct) => Ok(SourceUnit::Struct(self.parse_struct_declaration()?)),
            Some(Token::Enum) => Ok(SourceUnit::Enum(self.parse_enum_declaration()?)),
            Some(Token::Function) => Ok(SourceUnit::Function(self.parse_function_definition()?)),
            Some(Token::ElementaryType(_)) | Some(Token::Identifier(_)) | Some(Token::Mapping) => {
                Ok(SourceUnit::Constant(self.parse_constant_variable_declaration()?))
            }
            _ => Err(self.unexpected("pragma, import or declaration")),
        }
    }

    /// contract / interface / library 宣言を解析
    fn parse_contract_declaration(&mut self) -> ParseResult<ContractDeclaration> {
        let start = self.current_span();
        let is_abstract = self.match_token(&Token::Abstract);

        let kind = match self.current_token() {
            Some(Token::Contract) => ContractKind::Contract,
            Some(Token::Interface) => ContractKind::Interface,
            Some(Token::Library) => ContractKind::Library,
            _ => return Err(self.unexpected("'contract'")),
        };
        if is_abstract && kind != ContractKind::Contract {
            return Err(self.invalid(
                format!("{} cannot be abstract", kind.as_str()),
                self.current_span(),
            ));
        }
        self.advance();

        let name = self.expect_identifier()?;

        let mut inheritance = Vec::new();
        if self.check(&Token::Is) {
            if kind == ContractKind::Library {
                return Err(self.invalid("library cannot inherit", self.current_span()));
            }
            self.advance();
            loop {
                inheritance.push(self.parse_inheritance_specifier()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }

        self.expect(Token::LeftBrace)?;
        let mut members = Vec::new();
        loop {
            if self.is_at_end() {
                members.push(ContractMember::Error(self.missing_closing_brace()));
                return Ok(ContractDeclaration {
                    kind,
                    is_abstract,
                    name,
                    inheritance,
                    members,
                    span: self.span_from(start),
                });
            }
            if self.check(&Token::RightBrace) {
                break;
            }
            let start_index = self.current;
            let member = match self.parse_contract_member() {
                Ok(member) => member,
                Err(error) => ContractMember::Error(self.recover(error, start_index)),
            };
            members.push(member);
        }
        self.expect(Token::RightBrace)?;

        Ok(ContractDeclaration {
            kind,
            is_abstract,
            name,
            inheritance,
            members,
            span: self.span_from(start),
        })
    }

    /// `A` / `A(1, 2)`
    fn parse_inheritance_specifier(&mut self) -> ParseResult<InheritanceSpecifier> {
        let ancestor = self.parse_identifier_path()?;
        let start = ancestor.span;
        let arguments = if self.check(&Token::LeftParen) {
            Some(self.parse_call_arguments()?)
        } else {
            None
        };
        Ok(InheritanceSpecifier {
            ancestor,
            arguments,
            span: self.span_from(start),
        })
    }

    /// コントラクト本体のメンバーを解析（順序は問わない）
    fn parse_contract_member(&mut self) -> ParseResult<ContractMember> {
        match self.current_token() {
            Some(Token::Function) if matches!(self.peek(1), Some(Token::LeftParen)) => {
                self.parse_function_type_variable_or_fallback()
            }
            Some(Token::Function) => Ok(ContractMember::Function(self.parse_function_definition()?)),
            Some(Token::Modifier) => Ok(ContractMember::Modifier(self.parse_modifier_definition()?)),
            Some(Token::Constructor) => Ok(ContractMember::Constructor(self.parse_constructor_definition()?)),
            Some(Token::Event) => Ok(ContractMember::Event(self.parse_event_definition()?)),
            Some(Token::Struct) => Ok(ContractMember::Struct(self.parse_struct_declaration()?)),
            Some(Token::Enum) => Ok(ContractMember::Enum(self.parse_enum_declaration()?)),
            Some(Token::Using) => Ok(ContractMember::Using(self.parse_using_directive()?)),
            Some(Token::Identifier(word))
                if (word == "fallback" || word == "receive")
                    && matches!(self.peek(1), Some(Token::LeftParen)) =>
            {
                Ok(ContractMember::FallbackReceive(self.parse_fallback_receive_definition()?))
            }
            Some(Token::ElementaryType(_)) | Some(Token::Identifier(_)) | Some(Token::Mapping) => {
                Ok(ContractMember::StateVariable(self.parse_state_variable_declaration()?))
            }
            _ => Err(self.unexpected("contract member")),
        }
    }

    /// `function (` で始まるメンバー
    ///
    /// 関数型の状態変数（`function () external f;`）を先に試し、
    /// 成立しなければ0.4系の無名fallbackとして読む。
    fn parse_function_type_variable_or_fallback(&mut self) -> ParseResult<ContractMember> {
        let checkpoint = self.checkpoint();
        let variable_error = match self.parse_state_variable_declaration() {
            Ok(variable) => return Ok(ContractMember::StateVariable(variable)),
            Err(error) => error,
        };
        let variable_reach = self.checkpoint();

        self.rewind(checkpoint);
        match self.parse_legacy_fallback() {
            Ok(fallback) => Ok(ContractMember::FallbackReceive(fallback)),
            Err(fallback_error) if variable_reach.0 > self.current => {
                log::trace!("fallback reading stopped earlier: {}", fallback_error);
                Err(self.ambiguity_fallback("state variable", variable_error, variable_reach))
            }
            Err(fallback_error) => Err(fallback_error),
        }
    }

    /// 関数定義を解析（本体がなければ `;`）
    pub(super) fn parse_function_definition(&mut self) -> ParseResult<FunctionDefinition> {
        let start = self.expect(Token::Function)?;
        let name = self.expect_identifier()?;
        let parameters = self.parse_parameter_list()?;
        let attributes = self.parse_function_attributes()?;
        let returns = if self.match_token(&Token::Returns) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_function_body()?;

        Ok(FunctionDefinition {
            name,
            parameters,
            attributes,
            returns,
            body,
            span: self.span_from(start),
        })
    }

    /// `modifier onlyOwner { _; }`（パラメータリストは省略可）
    fn parse_modifier_definition(&mut self) -> ParseResult<ModifierDefinition> {
        let start = self.expect(Token::Modifier)?;
        let name = self.expect_identifier()?;
        let parameters = if self.check(&Token::LeftParen) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };
        let attributes = self.parse_function_attributes()?;
        let body = self.parse_function_body()?;

        Ok(ModifierDefinition {
            name,
            parameters,
            attributes,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_constructor_definition(&mut self) -> ParseResult<ConstructorDefinition> {
        let start = self.expect(Token::Constructor)?;
        let parameters = self.parse_parameter_list()?;
        let attributes = self.parse_function_attributes()?;
        let body = self.parse_function_body()?;

        Ok(ConstructorDefinition {
            parameters,
            attributes,
            body,
            span: self.span_from(start),
        })
    }

    /// `fallback(...)` / `receive(...)`
    fn parse_fallback_receive_definition(&mut self) -> ParseResult<FallbackReceiveDefinition> {
        let start = self.current_span();
        let kind = if self.match_identifier("receive") {
            FallbackKind::Receive
        } else {
            self.expect_keyword("fallback")?;
            FallbackKind::Fallback
        };
        let parameters = self.parse_parameter_list()?;
        let attributes = self.parse_function_attributes()?;
        let body = self.parse_function_body()?;

        Ok(FallbackReceiveDefinition {
            kind,
            parameters,
            attributes,
            body,
            span: self.span_from(start),
        })
    }

    /// 0.4系の無名fallback `function () external payable { }`
    fn parse_legacy_fallback(&mut self) -> ParseResult<FallbackReceiveDefinition> {
        let start = self.expect(Token::Function)?;
        let parameters = self.parse_parameter_list()?;
        let attributes = self.parse_function_attributes()?;
        let body = self.parse_function_body()?;

        Ok(FallbackReceiveDefinition {
            kind: FallbackKind::Fallback,
            parameters,
            attributes,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_function_body(&mut self) -> ParseResult<Option<Block>> {
        if self.match_token(&Token::Semicolon) {
            Ok(None)
        } else {
            Ok(Some(self.parse_block()?))
        }
    }

    /// 可視性・可変性・virtual・override・モディファイア呼び出しを任意の順で解析
    fn parse_function_attributes(&mut self) -> ParseResult<Vec<FunctionAttribute>> {
        let mut attributes = Vec::new();

        while let Some(word) = self.current_token().and_then(|t| t.identifier()) {
            let span = self.current_span();
            if let Some(visibility) = Visibility::from_keyword(word) {
                self.advance();
                attributes.push(FunctionAttribute::Visibility { visibility, span });
            } else if let Some(mutability) = StateMutability::from_keyword(word) {
                self.advance();
                attributes.push(FunctionAttribute::Mutability { mutability, span });
            } else if word == "virtual" {
                self.advance();
                attributes.push(FunctionAttribute::Virtual { span });
            } else if word == "override" {
                attributes.push(FunctionAttribute::Override(self.parse_override_specifier()?));
            } else {
                attributes.push(FunctionAttribute::Modifier(self.parse_modifier_invocation()?));
            }
        }

        Ok(attributes)
    }

    /// `override` / `override(A, B.C)`
    fn parse_override_specifier(&mut self) -> ParseResult<OverrideSpecifier> {
        let start = self.expect_keyword("override")?;
        let mut overrides = Vec::new();
        if self.match_token(&Token::LeftParen) {
            loop {
                overrides.push(self.parse_identifier_path()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
            self.expect(Token::RightParen)?;
        }
        Ok(OverrideSpecifier {
            overrides,
            span: self.span_from(start),
        })
    }

    fn parse_modifier_invocation(&mut self) -> ParseResult<ModifierInvocation> {
        let path = self.parse_identifier_path()?;
        let start = path.span;
        let arguments = if self.check(&Token::LeftParen) {
            Some(self.parse_call_arguments()?)
        } else {
            None
        };
        Ok(ModifierInvocation {
            path,
            arguments,
            span: self.span_from(start),
        })
    }

    /// 状態変数宣言を解析（属性は任意の順）
    fn parse_state_variable_declaration(&mut self) -> ParseResult<StateVariableDeclaration> {
        let start = self.current_span();
        let type_name = self.parse_type_name_internal()?;

        let mut attributes = Vec::new();
        while let Some(word) = self.current_token().and_then(|t| t.identifier()) {
            let span = self.current_span();
            let attribute = if let Some(visibility) = Visibility::from_keyword(word) {
                StateVariableAttribute::Visibility { visibility, span }
            } else if word == "constant" {
                StateVariableAttribute::Constant { span }
            } else if word == "immutable" {
                StateVariableAttribute::Immutable { span }
            } else if word == "override" {
                attributes.push(StateVariableAttribute::Override(self.parse_override_specifier()?));
                continue;
            } else {
                break;
            };
            self.advance();
            attributes.push(attribute);
        }

        let name = self.expect_identifier()?;
        let initializer = if self.match_token(&Token::Assign) {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;

        Ok(StateVariableDeclaration {
            type_name,
            attributes,
            name,
            initializer,
            span: self.span_from(start),
        })
    }

    /// ファイルレベル定数 `uint constant X = 1;`
    fn parse_constant_variable_declaration(&mut self) -> ParseResult<ConstantVariableDeclaration> {
        let start = self.current_span();
        let type_name = self.parse_type_name_internal()?;
        self.expect_keyword("constant")?;
        let name = self.expect_identifier()?;
        self.expect(Token::Assign)?;
        let value = self.parse_expression_internal()?;
        self.expect(Token::Semicolon)?;

        Ok(ConstantVariableDeclaration {
            type_name,
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// 構造体宣言（メンバーは1つ以上）
    fn parse_struct_declaration(&mut self) -> ParseResult<StructDeclaration> {
        let start = self.expect(Token::Struct)?;
        let name = self.expect_identifier()?;
        self.expect(Token::LeftBrace)?;

        let mut members = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let member_start = self.current_span();
            let type_name = self.parse_type_name_internal()?;
            let member_name = self.expect_identifier()?;
            self.expect(Token::Semicolon)?;
            members.push(StructMember {
                type_name,
                name: member_name,
                span: self.span_from(member_start),
            });
        }

        self.expect(Token::RightBrace)?;
        if members.is_empty() {
            // 宣言は残し、エラーだけを記録する
            let error = self.invalid("struct must have at least one member", self.span_from(start));
            self.errors.push(error);
        }

        Ok(StructDeclaration {
            name,
            members,
            span: self.span_from(start),
        })
    }

    /// 列挙型宣言（値は0個以上、末尾カンマ可、重複は許容）
    fn parse_enum_declaration(&mut self) -> ParseResult<EnumDeclaration> {
        let start = self.expect(Token::Enum)?;
        let name = self.expect_identifier()?;
        self.expect(Token::LeftBrace)?;

        let mut values = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            values.push(self.expect_identifier()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightBrace)?;

        Ok(EnumDeclaration {
            name,
            values,
            span: self.span_from(start),
        })
    }

    /// `event Transfer(address indexed from, uint value) anonymous;`
    fn parse_event_definition(&mut self) -> ParseResult<EventDefinition> {
        let start = self.expect(Token::Event)?;
        let name = self.expect_identifier()?;

        self.expect(Token::LeftParen)?;
        let mut parameters = Vec::new();
        if !self.check(&Token::RightParen) {
            loop {
                parameters.push(self.parse_event_parameter()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RightParen)?;

        let is_anonymous = self.match_identifier("anonymous");
        self.expect(Token::Semicolon)?;

        Ok(EventDefinition {
            name,
            parameters,
            is_anonymous,
            span: self.span_from(start),
        })
    }

    fn parse_event_parameter(&mut self) -> ParseResult<EventParameter> {
        let start = self.current_span();
        let type_name = self.parse_type_name_internal()?;
        let is_indexed = self.match_identifier("indexed");
        let name = match self.current_token() {
            Some(Token::Identifier(_)) => Some(self.expect_identifier()?),
            _ => None,
        };
        Ok(EventParameter {
            type_name,
            is_indexed,
            name,
            span: self.span_from(start),
        })
    }
}
