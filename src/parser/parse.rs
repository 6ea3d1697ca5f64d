//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the one-token lookahead cursor, the `match_token` primitive, and the
//! emission helpers shared by the grammar facets.
//!
//! # Parser Architecture
//!
//! The parser is a predictive LL(1) recursive descent translator that emits
//! stack machine code while it recognises the input; there is no syntax tree.
//! - This module: Parser struct, cursor, helper methods
//! - `declarations`: typed declaration lists, initializers, arrays
//! - `expressions`: logical, relational, and arithmetic tiers
//! - `statements`: program rule, control flow, assignment, print
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::codegen::instruction::{Instruction, InstructionList, Label, LabelAllocator};
use crate::codegen::symbols::{DataType, SymbolTable};
use crate::errors::CompileError;
use crate::parser::lexer::{Scanner, SpannedToken, Token, TokenKind};
use tracing::trace;

/// Deepest nesting of parenthesised expressions, `!` chains, and
/// instructions accepted before the compile is abandoned.
pub const MAX_NESTING: usize = 64;

/// Single-pass translator from tokens to stack machine code
pub struct Parser<'l, S: Scanner> {
    scanner: S,
    /// Lookahead token; replaced only by `match_token`
    pub(crate) current: SpannedToken,
    pub(crate) symbols: SymbolTable,
    pub(crate) code: InstructionList,
    labels: &'l mut LabelAllocator,
    pub(crate) emit_halt: bool,
    depth: usize,
}

impl<'l, S: Scanner> Parser<'l, S> {
    /// Prime the cursor with the first token of `scanner`.
    pub fn new(
        mut scanner: S,
        labels: &'l mut LabelAllocator,
        emit_halt: bool,
    ) -> Result<Self, CompileError> {
        let current = scanner.next_token()?;
        Ok(Self {
            scanner,
            current,
            symbols: SymbolTable::new(),
            code: InstructionList::new(),
            labels,
            emit_halt,
            depth: 0,
        })
    }

    /// Hand back the generated code and the symbols it declared.
    pub fn finish(self) -> (InstructionList, SymbolTable) {
        (self.code, self.symbols)
    }

    // ===== Cursor =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    /// Consume the lookahead if it is of `kind`, otherwise fail with a
    /// syntax error naming the expected token.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<SpannedToken, CompileError> {
        if !self.check(kind) {
            return Err(self.syntax_error(kind.describe()));
        }
        let next = self.scanner.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn current_line(&self) -> usize {
        if self.check(TokenKind::Eof) {
            self.scanner.line()
        } else {
            self.current.location.line
        }
    }

    /// Run `rule` one nesting level deeper, failing once the depth passes
    /// [`MAX_NESTING`].
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, CompileError>,
    ) -> Result<T, CompileError> {
        if self.depth >= MAX_NESTING {
            return Err(CompileError::NestingTooDeep {
                line: self.current_line(),
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn syntax_error(&self, expected: &str) -> CompileError {
        CompileError::Syntax {
            line: self.current_line(),
            expected: expected.to_string(),
            found: self.current.token.to_string(),
        }
    }

    /// Match an identifier, returning its name and line.
    pub(crate) fn expect_identifier(&mut self) -> Result<(String, usize), CompileError> {
        let spanned = self.match_token(TokenKind::Ident)?;
        match spanned.token {
            Token::Ident(name) => Ok((name, spanned.location.line)),
            other => Err(CompileError::Syntax {
                line: spanned.location.line,
                expected: TokenKind::Ident.describe().to_string(),
                found: other.to_string(),
            }),
        }
    }

    /// Resolve a use of `name`, which must already be declared.
    pub(crate) fn lookup_declared(&self, name: &str, line: usize) -> Result<DataType, CompileError> {
        self.symbols
            .lookup(name)
            .copied()
            .ok_or_else(|| CompileError::NotDeclared {
                line,
                name: name.to_string(),
            })
    }

    // ===== Emission =====

    pub(crate) fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }

    pub(crate) fn new_label(&mut self) -> Label {
        let label = self.labels.fresh();
        trace!(label = %label, "allocated label");
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{Lexer, SourceLocation, TokenBuffer};

    fn spanned(token: Token, line: usize) -> SpannedToken {
        SpannedToken::new(token, SourceLocation::new(line, 1))
    }

    #[test]
    fn test_match_token_advances() {
        let mut labels = LabelAllocator::new("", 0);
        let mut parser = Parser::new(Lexer::new("void main"), &mut labels, true).unwrap();

        let void = parser.match_token(TokenKind::Void).unwrap();
        assert_eq!(void.token, Token::Void);
        assert!(parser.check(TokenKind::Main));
        parser.match_token(TokenKind::Main).unwrap();
        assert!(parser.check(TokenKind::Eof));
    }

    #[test]
    fn test_match_token_reports_expected_and_line() {
        let mut labels = LabelAllocator::new("", 0);
        let mut parser = Parser::new(Lexer::new("\n\n}"), &mut labels, true).unwrap();

        let err = parser.match_token(TokenKind::Semicolon).unwrap_err();
        assert_eq!(
            err,
            CompileError::Syntax {
                line: 3,
                expected: "';'".to_string(),
                found: "'}'".to_string(),
            }
        );
        // a failed match does not move the cursor
        assert!(parser.check(TokenKind::RBrace));
    }

    #[test]
    fn test_parser_accepts_any_scanner() {
        let tokens = vec![spanned(Token::Ident("n".to_string()), 5)];
        let mut labels = LabelAllocator::new("", 0);
        let mut parser = Parser::new(TokenBuffer::new(tokens), &mut labels, true).unwrap();

        assert_eq!(parser.expect_identifier().unwrap(), ("n".to_string(), 5));
        assert!(parser.check(TokenKind::Eof));
    }

    #[test]
    fn test_labels_come_from_shared_allocator() {
        let mut labels = LabelAllocator::new("L", 3);
        {
            let mut parser = Parser::new(Lexer::new(""), &mut labels, true).unwrap();
            assert_eq!(parser.new_label().as_str(), "L3");
            assert_eq!(parser.new_label().as_str(), "L4");
        }
        assert_eq!(labels.next_number(), 5);
    }

    #[test]
    fn test_nesting_limit() {
        let mut labels = LabelAllocator::new("", 0);
        let mut parser = Parser::new(Lexer::new("\n x"), &mut labels, true).unwrap();

        fn descend<S: Scanner>(parser: &mut Parser<'_, S>, levels: usize) -> Result<(), CompileError> {
            if levels == 0 {
                return Ok(());
            }
            parser.nested(|p| descend(p, levels - 1))
        }

        assert!(descend(&mut parser, MAX_NESTING).is_ok());
        assert_eq!(
            descend(&mut parser, MAX_NESTING + 1),
            Err(CompileError::NestingTooDeep {
                line: 2,
                limit: MAX_NESTING
            })
        );
        // the depth unwinds after a failure
        assert!(descend(&mut parser, MAX_NESTING).is_ok());
    }

    #[test]
    fn test_eof_errors_use_scanner_line() {
        let mut labels = LabelAllocator::new("", 0);
        let mut parser = Parser::new(Lexer::new("x\n\n"), &mut labels, true).unwrap();
        parser.match_token(TokenKind::Ident).unwrap();

        let err = parser.match_token(TokenKind::Semicolon).unwrap_err();
        assert_eq!(err.line(), 3);
    }
}
