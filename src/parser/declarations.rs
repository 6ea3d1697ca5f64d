//! Declaration parsing implementation
//!
//! This module translates typed declaration lists. Every identifier is
//! entered into the symbol table as soon as it is read, before any
//! initializer is parsed, so redeclaration is reported at the second
//! declaration.
//!
//! # Grammar
//!
//! ```text
//! declarations     ::= declaration declarations | ε
//! declaration      ::= type identifiers ";"
//! type             ::= "int" | "float" | "boolean"
//! identifiers      ::= id optional_decl more_identifiers
//! more_identifiers ::= "," id optional_decl more_identifiers | ε
//! optional_decl    ::= "=" expression      (push id; <expr>; store)
//!                    | "[" int_literal "]" (array id type size)
//!                    | ε
//! ```
//!
//! The `*_more` tails are written as loops; the emitted code is the same as
//! for the right-recursive form.

use crate::codegen::instruction::{Instruction, Operand};
use crate::codegen::symbols::{DataType, PrimitiveKind};
use crate::errors::CompileError;
use crate::parser::lexer::{Scanner, Token, TokenKind};
use crate::parser::parse::Parser;
use tracing::debug;

impl<S: Scanner> Parser<'_, S> {
    /// True when the lookahead starts a declaration (FIRST(type)).
    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.current.kind(),
            TokenKind::Int | TokenKind::Float | TokenKind::Boolean
        )
    }

    pub(crate) fn parse_declarations(&mut self) -> Result<(), CompileError> {
        while self.is_type_keyword() {
            self.parse_declaration()?;
        }
        Ok(())
    }

    /// declaration ::= type identifiers ";"
    pub(crate) fn parse_declaration(&mut self) -> Result<(), CompileError> {
        let kind = self.parse_type()?;

        self.parse_declared_identifier(kind)?;
        while self.check(TokenKind::Comma) {
            self.match_token(TokenKind::Comma)?;
            self.parse_declared_identifier(kind)?;
        }

        self.match_token(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_type(&mut self) -> Result<PrimitiveKind, CompileError> {
        let token_kind = self.current.kind();
        let kind = match token_kind {
            TokenKind::Int => PrimitiveKind::Int,
            TokenKind::Float => PrimitiveKind::Float,
            TokenKind::Boolean => PrimitiveKind::Boolean,
            _ => return Err(self.syntax_error("type")),
        };
        self.match_token(token_kind)?;
        Ok(kind)
    }

    /// id optional_decl
    fn parse_declared_identifier(&mut self, kind: PrimitiveKind) -> Result<(), CompileError> {
        let (name, line) = self.expect_identifier()?;

        if self.check(TokenKind::LBracket) {
            let size = self.parse_array_size()?;
            self.declare(&name, DataType::Array { element: kind, size }, line)?;
            self.emit(Instruction::Array {
                name,
                element: kind,
                size,
            });
            return Ok(());
        }

        self.declare(&name, DataType::Primitive(kind), line)?;

        if self.check(TokenKind::Eq) {
            self.match_token(TokenKind::Eq)?;
            self.emit(Instruction::Push(Operand::Name(name)));
            self.parse_logic_expression()?;
            self.emit(Instruction::Store);
        }

        Ok(())
    }

    /// "[" int_literal "]"; the size must be a positive integer literal.
    fn parse_array_size(&mut self) -> Result<usize, CompileError> {
        self.match_token(TokenKind::LBracket)?;

        let line = self.current_line();
        let literal = self.match_token(TokenKind::IntLiteral)?;
        let size = match literal.token {
            Token::IntLiteral(n) if n > 0 => usize::try_from(n).ok(),
            _ => None,
        };
        let Some(size) = size else {
            return Err(CompileError::Syntax {
                line,
                expected: "positive array size".to_string(),
                found: literal.token.to_string(),
            });
        };

        self.match_token(TokenKind::RBracket)?;
        Ok(size)
    }

    fn declare(&mut self, name: &str, data_type: DataType, line: usize) -> Result<(), CompileError> {
        self.symbols
            .declare(name, data_type)
            .map_err(|err| CompileError::AlreadyDeclared {
                line,
                name: err.name,
            })?;
        debug!(name, data_type = %data_type, line, "declared identifier");
        Ok(())
    }
}
