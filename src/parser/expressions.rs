//! Expression parsing implementation
//!
//! This module translates expressions into postfix stack code. Each
//! precedence tier is written as `tier ::= next more_tier` with the
//! left-recursive academic rule turned right-recursive, and the operator is
//! emitted after its right operand. For `a - b + c` that yields
//! `push a; push b; -; push c; +`, i.e. left-associative evaluation.
//!
//! # Precedence (lowest to highest)
//!
//! ```text
//! logic_expression ::= logic_term ("||" logic_term)*
//! logic_term       ::= relational ("&&" relational)*
//! relational       ::= expression [relop expression]     (non-chaining)
//! expression       ::= term (("+" | "-") term)*
//! term             ::= unary (("*" | "/" | "%") unary)*
//! unary            ::= "!" unary | factor
//! factor           ::= "(" logic_expression ")" | int | real
//!                    | "true" | "false" | id optional_array
//! optional_array   ::= "[" expression "]" | ε
//! ```

use crate::codegen::instruction::{BinOp, Instruction, Operand};
use crate::errors::CompileError;
use crate::parser::lexer::{Scanner, Token, TokenKind};
use crate::parser::parse::Parser;

impl<S: Scanner> Parser<'_, S> {
    /// Parse a full expression (top-level entry point)
    pub(crate) fn parse_logic_expression(&mut self) -> Result<(), CompileError> {
        self.nested(Self::parse_logic_or)
    }

    fn parse_logic_or(&mut self) -> Result<(), CompileError> {
        self.parse_logic_term()?;

        while self.check(TokenKind::OrOr) {
            self.match_token(TokenKind::OrOr)?;
            self.parse_logic_term()?;
            self.emit(Instruction::Binary(BinOp::Or));
        }

        Ok(())
    }

    fn parse_logic_term(&mut self) -> Result<(), CompileError> {
        self.parse_relational()?;

        while self.check(TokenKind::AndAnd) {
            self.match_token(TokenKind::AndAnd)?;
            self.parse_relational()?;
            self.emit(Instruction::Binary(BinOp::And));
        }

        Ok(())
    }

    /// At most one relational operator; `a < b < c` leaves the second `<`
    /// for the caller, which rejects it.
    fn parse_relational(&mut self) -> Result<(), CompileError> {
        self.parse_expression()?;

        let kind = self.current.kind();
        let op = match kind {
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            _ => return Ok(()),
        };

        self.match_token(kind)?;
        self.parse_expression()?;
        self.emit(Instruction::Binary(op));
        Ok(())
    }

    /// Additive tier
    pub(crate) fn parse_expression(&mut self) -> Result<(), CompileError> {
        self.parse_term()?;

        loop {
            let kind = self.current.kind();
            let op = match kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };

            self.match_token(kind)?;
            self.parse_term()?;
            self.emit(Instruction::Binary(op));
        }

        Ok(())
    }

    /// Multiplicative tier
    fn parse_term(&mut self) -> Result<(), CompileError> {
        self.parse_unary()?;

        loop {
            let kind = self.current.kind();
            let op = match kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };

            self.match_token(kind)?;
            self.parse_unary()?;
            self.emit(Instruction::Binary(op));
        }

        Ok(())
    }

    fn parse_unary(&mut self) -> Result<(), CompileError> {
        if self.check(TokenKind::Bang) {
            self.match_token(TokenKind::Bang)?;
            self.nested(Self::parse_unary)?;
            self.emit(Instruction::Not);
            return Ok(());
        }

        self.parse_factor()
    }

    fn parse_factor(&mut self) -> Result<(), CompileError> {
        match self.current.token.clone() {
            Token::LParen => {
                self.match_token(TokenKind::LParen)?;
                self.parse_logic_expression()?;
                self.match_token(TokenKind::RParen)?;
            }
            Token::IntLiteral(n) => {
                self.match_token(TokenKind::IntLiteral)?;
                self.emit(Instruction::Push(Operand::Int(n)));
            }
            Token::RealLiteral(x) => {
                self.match_token(TokenKind::RealLiteral)?;
                self.emit(Instruction::Push(Operand::Real(x)));
            }
            Token::True => {
                self.match_token(TokenKind::True)?;
                self.emit(Instruction::Push(Operand::Int(1)));
            }
            Token::False => {
                self.match_token(TokenKind::False)?;
                self.emit(Instruction::Push(Operand::Int(0)));
            }
            Token::Ident(_) => {
                let (name, line) = self.expect_identifier()?;
                self.lookup_declared(&name, line)?;
                self.emit(Instruction::Push(Operand::Name(name)));
                self.parse_optional_array()?;
                self.emit(Instruction::Load);
            }
            _ => {
                return Err(self.syntax_error("'(', literal or identifier"));
            }
        }

        Ok(())
    }

    /// Index suffix: adds the index value to the base address already on
    /// the stack. No bounds check.
    pub(crate) fn parse_optional_array(&mut self) -> Result<(), CompileError> {
        if self.check(TokenKind::LBracket) {
            self.match_token(TokenKind::LBracket)?;
            self.parse_expression()?;
            self.match_token(TokenKind::RBracket)?;
            self.emit(Instruction::Binary(BinOp::Add));
        }
        Ok(())
    }
}
