//! Compile error types
//!
//! This module defines [`CompileError`], the single failure type returned by
//! every stage of the compiler. All errors are fatal: the first one aborts
//! the compile and any instructions generated so far are discarded.

use thiserror::Error;

/// Errors that can occur while scanning or translating a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The current token does not fit the grammar at a `match` point
    #[error("Error at line {line}: {expected} expected, found {found}")]
    Syntax {
        line: usize,
        expected: String,
        found: String,
    },

    /// An identifier was declared a second time
    #[error("Error at line {line}: identifier '{name}' is already declared")]
    AlreadyDeclared { line: usize, name: String },

    /// An identifier was read, written, or indexed before its declaration
    #[error("Error at line {line}: identifier '{name}' is not declared")]
    NotDeclared { line: usize, name: String },

    /// The scanner could not form a token
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexical {
        line: usize,
        column: usize,
        message: String,
    },

    /// Expressions or instructions nested past the parser's limit
    #[error("Error at line {line}: nesting deeper than {limit} levels")]
    NestingTooDeep { line: usize, limit: usize },
}

impl CompileError {
    /// Source line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            CompileError::Syntax { line, .. }
            | CompileError::AlreadyDeclared { line, .. }
            | CompileError::NotDeclared { line, .. }
            | CompileError::Lexical { line, .. }
            | CompileError::NestingTooDeep { line, .. } => *line,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Syntax { .. })
    }

    /// True for declaration-before-use and no-redeclaration violations.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            CompileError::AlreadyDeclared { .. } | CompileError::NotDeclared { .. }
        )
    }
}
