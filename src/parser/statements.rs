//! Statement parsing implementation
//!
//! This module handles the program rule and every instruction form,
//! generating jump code with freshly synthesized labels as it goes:
//!
//! - Declarations: `int x = 1, v[4];`
//! - Assignment: `x = e;`, `v[i] = e;`
//! - Control flow: `if`, `if-else`, `while`, `do-while`
//! - Output: `print (e);`
//! - Blocks: `{ ... }` (no code of their own)
//!
//! # Grammar
//!
//! ```text
//! program      ::= "void" "main" "{" declarations instructions "}"
//! instructions ::= instruction instructions | ε
//! instruction  ::= declaration | id optional_array "=" expr ";"
//!                | "if" "(" expr ")" instruction ["else" instruction]
//!                | "while" "(" expr ")" instruction
//!                | "do" instruction "while" "(" expr ")" ";"
//!                | "print" "(" expr ")" ";"
//!                | "{" instructions "}"
//! ```
//!
//! Conditions follow the "non-zero is true" convention and are consumed by
//! `gofalse`. Labels are emitted where control reaches them, in source order.

use crate::codegen::instruction::{Instruction, Operand};
use crate::errors::CompileError;
use crate::parser::lexer::{Scanner, TokenKind};
use crate::parser::parse::Parser;

impl<S: Scanner> Parser<'_, S> {
    /// Parse the whole compile unit
    pub fn parse_program(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::Void)?;
        self.match_token(TokenKind::Main)?;
        self.match_token(TokenKind::LBrace)?;

        self.parse_declarations()?;
        self.parse_instructions()?;

        self.match_token(TokenKind::RBrace)?;
        self.match_token(TokenKind::Eof)?;

        if self.emit_halt {
            self.emit(Instruction::Halt);
        }
        Ok(())
    }

    /// FIRST(instruction)
    fn starts_instruction(&self) -> bool {
        self.is_type_keyword()
            || matches!(
                self.current.kind(),
                TokenKind::Ident
                    | TokenKind::Print
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::Do
                    | TokenKind::LBrace
            )
    }

    pub(crate) fn parse_instructions(&mut self) -> Result<(), CompileError> {
        while self.starts_instruction() {
            self.parse_instruction()?;
        }
        Ok(())
    }

    /// Parse a single instruction, dispatching on the lookahead
    pub(crate) fn parse_instruction(&mut self) -> Result<(), CompileError> {
        self.nested(Self::parse_single_instruction)
    }

    fn parse_single_instruction(&mut self) -> Result<(), CompileError> {
        match self.current.kind() {
            TokenKind::Int | TokenKind::Float | TokenKind::Boolean => self.parse_declaration(),
            TokenKind::Ident => {
                self.parse_assignment()?;
                self.match_token(TokenKind::Semicolon)?;
                Ok(())
            }
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::LBrace => self.parse_block(),
            _ => Err(self.syntax_error("instruction")),
        }
    }

    /// id optional_array "=" expr; the store target address is computed
    /// before the value, and no `load` is emitted for it.
    fn parse_assignment(&mut self) -> Result<(), CompileError> {
        let (name, line) = self.expect_identifier()?;
        self.lookup_declared(&name, line)?;

        self.emit(Instruction::Push(Operand::Name(name)));
        self.parse_optional_array()?;

        self.match_token(TokenKind::Eq)?;
        self.parse_logic_expression()?;
        self.emit(Instruction::Store);
        Ok(())
    }

    fn parse_print(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::Print)?;
        self.match_token(TokenKind::LParen)?;
        self.parse_logic_expression()?;
        self.match_token(TokenKind::RParen)?;
        self.match_token(TokenKind::Semicolon)?;

        self.emit(Instruction::Print);
        Ok(())
    }

    fn parse_condition(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::LParen)?;
        self.parse_logic_expression()?;
        self.match_token(TokenKind::RParen)?;
        Ok(())
    }

    /// if (c) S            =>  c; gofalse E; S; E:
    /// if (c) S1 else S2   =>  c; gofalse F; S1; goto E; F: S2; E:
    fn parse_if(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::If)?;
        self.parse_condition()?;

        let false_label = self.new_label();
        self.emit(Instruction::GoFalse(false_label.clone()));

        self.parse_instruction()?;

        // the lookahead after the then-branch decides whether an else follows
        if !self.check(TokenKind::Else) {
            self.emit(Instruction::Label(false_label));
            return Ok(());
        }

        let end_label = self.new_label();
        self.emit(Instruction::Goto(end_label.clone()));
        self.emit(Instruction::Label(false_label));

        self.match_token(TokenKind::Else)?;
        self.parse_instruction()?;

        self.emit(Instruction::Label(end_label));
        Ok(())
    }

    /// T: c; gofalse E; S; goto T; E:
    fn parse_while(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::While)?;

        let test_label = self.new_label();
        self.emit(Instruction::Label(test_label.clone()));

        self.parse_condition()?;

        let end_label = self.new_label();
        self.emit(Instruction::GoFalse(end_label.clone()));

        self.parse_instruction()?;

        self.emit(Instruction::Goto(test_label));
        self.emit(Instruction::Label(end_label));
        Ok(())
    }

    /// T: S; c; gofalse E; goto T; E:
    fn parse_do_while(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::Do)?;

        let top_label = self.new_label();
        self.emit(Instruction::Label(top_label.clone()));

        self.parse_instruction()?;

        self.match_token(TokenKind::While)?;
        self.parse_condition()?;
        self.match_token(TokenKind::Semicolon)?;

        let end_label = self.new_label();
        self.emit(Instruction::GoFalse(end_label.clone()));
        self.emit(Instruction::Goto(top_label));
        self.emit(Instruction::Label(end_label));
        Ok(())
    }

    fn parse_block(&mut self) -> Result<(), CompileError> {
        self.match_token(TokenKind::LBrace)?;
        self.parse_instructions()?;
        self.match_token(TokenKind::RBrace)?;
        Ok(())
    }
}
