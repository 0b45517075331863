//! 文の解析

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 文を解析（内部実装）
    pub(super) fn parse_statement_internal(&mut self) -> ParseResult<Statement> {
        self.with_recursion_limit(|p| p.parse_statement_kind())
    }

    fn parse_statement_kind(&mut self) -> ParseResult<Statement> {
        match self.current_token() {
            Some(Token::LeftBrace) => Ok(Statement::Block(self.parse_block()?)),
            Some(Token::If) => Ok(Statement::If(self.parse_if_statement()?)),
            Some(Token::For) => Ok(Statement::For(self.parse_for_statement()?)),
            Some(Token::While) => Ok(Statement::While(self.parse_while_statement()?)),
            Some(Token::Do) => Ok(Statement::DoWhile(self.parse_do_while_statement()?)),
            Some(Token::Continue) => Ok(Statement::Continue(self.parse_keyword_statement(Token::Continue)?)),
            Some(Token::Break) => Ok(Statement::Break(self.parse_keyword_statement(Token::Break)?)),
            Some(Token::Throw) => Ok(Statement::Throw(self.parse_keyword_statement(Token::Throw)?)),
            Some(Token::Return) => Ok(Statement::Return(self.parse_return_statement()?)),
            Some(Token::Emit) => Ok(Statement::Emit(self.parse_emit_statement()?)),
            Some(Token::Try) => Ok(Statement::Try(self.parse_try_statement()?)),
            Some(Token::Assembly) => Ok(Statement::Assembly(self.parse_assembly_statement()?)),
            _ => self.parse_simple_statement(),
        }
    }

    /// ブロックを解析
    ///
    /// 文ごとにエラーから回復する。閉じ括弧がないまま終端に達した場合も
    /// ブロック自体は返し、末尾にエラーノードを置く。
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.expect(Token::LeftBrace)?;
        let mut statements = Vec::new();

        loop {
            if self.is_at_end() {
                statements.push(Statement::Error(self.missing_closing_brace()));
                return Ok(Block {
                    statements,
                    span: self.span_from(start),
                });
            }
            if self.check(&Token::RightBrace) {
                break;
            }
            statements.push(self.parse_statement_with_recovery());
        }

        self.expect(Token::RightBrace)?;
        Ok(Block {
            statements,
            span: self.span_from(start),
        })
    }

    fn parse_statement_with_recovery(&mut self) -> Statement {
        let start_index = self.current;
        match self.parse_statement_internal() {
            Ok(statement) => statement,
            Err(error) => Statement::Error(self.recover(error, start_index)),
        }
    }

    /// 変数宣言文か式文を解析
    ///
    /// 宣言の頭部（型・保存場所・名前、またはタプル形式）を試し、
    /// 成立しなければ巻き戻して式文として読む。
    fn parse_simple_statement(&mut self) -> ParseResult<Statement> {
        if self.is_var_keyword() && matches!(self.peek(1), Some(Token::LeftParen)) {
            return Ok(Statement::VariableDeclaration(self.parse_var_tuple_declaration()?));
        }

        let may_declare = matches!(
            self.current_token(),
            Some(Token::LeftParen)
                | Some(Token::ElementaryType(_))
                | Some(Token::Identifier(_))
                | Some(Token::Mapping)
                | Some(Token::Function)
        );
        if !may_declare {
            return Ok(Statement::Expression(self.parse_expression_statement()?));
        }

        let start = self.current_span();
        let checkpoint = self.checkpoint();
        let declaration_error = match self.parse_declaration_head() {
            Ok(declaration) => {
                return Ok(Statement::VariableDeclaration(
                    self.finish_variable_declaration(declaration, start)?,
                ))
            }
            Err(error) => error,
        };
        let declaration_reach = self.checkpoint();

        self.rewind(checkpoint);
        match self.parse_expression_statement() {
            Ok(statement) => Ok(Statement::Expression(statement)),
            Err(expression_error) if declaration_reach.0 > self.current => {
                log::trace!("expression reading stopped earlier: {}", expression_error);
                Err(self.ambiguity_fallback("variable declaration", declaration_error, declaration_reach))
            }
            Err(expression_error) => Err(expression_error),
        }
    }

    fn is_var_keyword(&self) -> bool {
        matches!(self.current_token(), Some(Token::ElementaryType(word)) if word == "var")
    }

    /// 宣言の頭部を解析: `T loc? name` または `(T a, , T b)`
    fn parse_declaration_head(&mut self) -> ParseResult<VariableDeclarationKind> {
        if !self.check(&Token::LeftParen) {
            return Ok(VariableDeclarationKind::Single(self.parse_variable_declaration()?));
        }

        let start = self.expect(Token::LeftParen)?;
        let mut elements = Vec::new();
        loop {
            if self.check(&Token::Comma) || self.check(&Token::RightParen) {
                elements.push(None);
            } else {
                elements.push(Some(self.parse_variable_declaration()?));
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;

        let span = self.span_from(start);
        if elements.iter().all(Option::is_none) {
            return Err(self.invalid("tuple declaration without variables", span));
        }
        Ok(VariableDeclarationKind::Tuple { elements, span })
    }

    /// `T loc? name`
    fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let start = self.current_span();
        let type_name = self.parse_type_name_internal()?;
        let location = self.parse_storage_location();
        let name = self.expect_identifier()?;
        Ok(VariableDeclaration {
            type_name,
            location,
            name,
            span: self.span_from(start),
        })
    }

    /// 頭部の後の `= expr` と `;`
    fn finish_variable_declaration(
        &mut self,
        declaration: VariableDeclarationKind,
        start: Span,
    ) -> ParseResult<VariableDeclarationStatement> {
        let initializer = if self.match_token(&Token::Assign) {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };

        if initializer.is_none() && !matches!(declaration, VariableDeclarationKind::Single(_)) {
            return Err(self.invalid(
                "tuple variable declaration requires an initializer",
                self.span_from(start),
            ));
        }

        self.expect(Token::Semicolon)?;
        Ok(VariableDeclarationStatement {
            declaration,
            initializer,
            span: self.span_from(start),
        })
    }

    /// 0.4系の `var (a, , b) = expr;`
    fn parse_var_tuple_declaration(&mut self) -> ParseResult<VariableDeclarationStatement> {
        let start = self.current_span();
        self.advance();
        self.expect(Token::LeftParen)?;

        let mut names = Vec::new();
        loop {
            match self.current_token() {
                Some(Token::Identifier(_)) => names.push(Some(self.expect_identifier()?)),
                Some(Token::Comma) | Some(Token::RightParen) => names.push(None),
                _ => return Err(self.unexpected("identifier")),
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;

        self.finish_variable_declaration(
            VariableDeclarationKind::VarTuple {
                names,
                span: self.span_from(start),
            },
            start,
        )
    }

    fn parse_expression_statement(&mut self) -> ParseResult<ExpressionStatement> {
        let expression = self.parse_expression_internal()?;
        let start = expression.span();
        self.expect(Token::Semicolon)?;
        Ok(ExpressionStatement {
            expression,
            span: self.span_from(start),
        })
    }

    /// `continue;` / `break;` / `throw;`
    fn parse_keyword_statement(&mut self, keyword: Token) -> ParseResult<Span> {
        let start = self.expect(keyword)?;
        self.expect(Token::Semicolon)?;
        Ok(self.span_from(start))
    }

    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let start = self.expect(Token::Return)?;
        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression_internal()?)
        };
        self.expect(Token::Semicolon)?;
        Ok(ReturnStatement {
            value,
            span: self.span_from(start),
        })
    }

    /// `if (cond) stmt else stmt`（else は最も近い if に付く）
    fn parse_if_statement(&mut self) -> ParseResult<IfStatement> {
        let start = self.expect(Token::If)?;
        let condition = self.parse_parenthesized_condition()?;
        let then_branch = Box::new(self.parse_statement_internal()?);
        let else_branch = if self.match_token(&Token::Else) {
            Some(Box::new(self.parse_statement_internal()?))
        } else {
            None
        };
        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    fn parse_for_statement(&mut self) -> ParseResult<ForStatement> {
        let start = self.expect(Token::For)?;
        self.expect(Token::LeftParen)?;

        let init = if self.match_token(&Token::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };

        let condition = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expression_internal()?)
        };
        self.expect(Token::Semicolon)?;

        let update = if self.check(&Token::RightParen) {
            None
        } else {
            Some(self.parse_expression_internal()?)
        };
        self.expect(Token::RightParen)?;

        let body = Box::new(self.parse_statement_internal()?);
        Ok(ForStatement {
            init,
            condition,
            update,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_while_statement(&mut self) -> ParseResult<WhileStatement> {
        let start = self.expect(Token::While)?;
        let condition = self.parse_parenthesized_condition()?;
        let body = Box::new(self.parse_statement_internal()?);
        Ok(WhileStatement {
            condition,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<DoWhileStatement> {
        let start = self.expect(Token::Do)?;
        let body = Box::new(self.parse_statement_internal()?);
        self.expect(Token::While)?;
        let condition = self.parse_parenthesized_condition()?;
        self.expect(Token::Semicolon)?;
        Ok(DoWhileStatement {
            body,
            condition,
            span: self.span_from(start),
        })
    }

    fn parse_parenthesized_condition(&mut self) -> ParseResult<Expression> {
        self.expect(Token::LeftParen)?;
        let condition = self.parse_expression_internal()?;
        self.expect(Token::RightParen)?;
        Ok(condition)
    }

    /// `emit Event(args);`
    fn parse_emit_statement(&mut self) -> ParseResult<EmitStatement> {
        let start = self.expect(Token::Emit)?;
        let event = self.parse_identifier_path()?;
        let arguments = self.parse_call_arguments()?;
        self.expect(Token::Semicolon)?;
        Ok(EmitStatement {
            event,
            arguments,
            span: self.span_from(start),
        })
    }

    /// `try expr returns (...) { } catch ... { }`
    ///
    /// 式位置では `{` を本体ブロックとして読む（呼び出しオプションは除く）。
    fn parse_try_statement(&mut self) -> ParseResult<TryStatement> {
        let start = self.expect(Token::Try)?;
        let expression = self.without_struct_literals(|p| p.parse_expression_internal())?;

        let returns = if self.match_token(&Token::Returns) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };

        let body = self.parse_block()?;

        let mut catch_clauses = Vec::new();
        while self.check(&Token::Catch) {
            catch_clauses.push(self.parse_catch_clause()?);
        }
        if catch_clauses.is_empty() {
            return Err(self.invalid(
                "try statement requires at least one catch clause",
                self.span_from(start),
            ));
        }

        Ok(TryStatement {
            expression,
            returns,
            body,
            catch_clauses,
            span: self.span_from(start),
        })
    }

    /// `catch Error(string memory reason) { }` / `catch (bytes memory data) { }` / `catch { }`
    fn parse_catch_clause(&mut self) -> ParseResult<CatchClause> {
        let start = self.expect(Token::Catch)?;
        let error = match self.current_token() {
            Some(Token::Identifier(_)) => Some(self.expect_identifier()?),
            _ => None,
        };
        let parameters = if self.check(&Token::LeftParen) {
            Some(self.parse_parameter_list()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Ok(CatchClause {
            error,
            parameters,
            body,
            span: self.span_from(start),
        })
    }

    /// インラインアセンブリ: 中身は解析せず、波括弧の深さだけ追う
    fn parse_assembly_statement(&mut self) -> ParseResult<AssemblyStatement> {
        let start = self.expect(Token::Assembly)?;
        let dialect = match self.current_token() {
            Some(Token::String(_)) => Some(self.expect_string()?.0),
            _ => None,
        };

        let body_start = self.expect(Token::LeftBrace)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current_token() {
                Some(Token::LeftBrace) => depth += 1,
                Some(Token::RightBrace) => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(ParserError::MissingToken {
                        token: "'}'".to_string(),
                        span: self.eof,
                    })
                }
            }
            self.advance();
        }

        Ok(AssemblyStatement {
            dialect,
            body: self.span_from(body_start),
            span: self.span_from(start),
        })
    }
}
