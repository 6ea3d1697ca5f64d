//! Source program parser and code generator
//!
//! This module turns source text directly into stack machine code:
//! - [`lexer`]: Tokenization (source text → tokens) behind the [`lexer::Scanner`] trait
//! - [`parse`]: The [`parse::Parser`] cursor and `match_token` primitive
//! - `declarations`, `expressions`, `statements`: the grammar facets, each
//!   an `impl Parser` block
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `boolean`, fixed-size arrays of those
//! - Statements: declarations, assignment, `if`/`else`, `while`, `do-while`,
//!   `print`, blocks
//! - Expressions: arithmetic, relational (non-chaining), logical
//!
//! # Parser Implementation
//!
//! Hand-written predictive LL(1) recursive descent with one token of
//! lookahead and no backtracking. Code is emitted during recognition.

mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
