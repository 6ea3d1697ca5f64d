//! # Introduction
//!
//! `smc` compiles a small imperative language into text instructions for a
//! stack-based virtual machine. Translation is a single predictive
//! recursive-descent pass: declarations are checked, expressions are turned
//! into postfix code, and control flow is lowered to synthesized labels while
//! the source is being read.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser/Generator → InstructionList → (external executor)
//! ```
//!
//! 1. [`parser`] — scanner, one-token cursor, and the grammar facets.
//! 2. [`codegen`] — instruction set, labels, symbol table, and the
//!    [`Compiler`] facade.
//! 3. [`config`] — [`CompileOptions`] for label naming and numbering.
//! 4. [`errors`] — [`CompileError`], the single failure type.
//!
//! ## Source language
//!
//! ```text
//! void main {
//!     int n = 5, f = 1;
//!     while (n > 1) { f = f * n; n = n - 1; }
//!     print(f);
//! }
//! ```
//!
//! Types: `int`, `float`, `boolean`, fixed-size arrays (`int v[10];`).
//! Control flow: `if/else`, `while`, `do-while`, blocks. Output: `print`.

pub mod codegen;
pub mod config;
pub mod errors;
pub mod parser;

pub use codegen::compiler::{CompiledUnit, Compiler};
pub use codegen::instruction::{Instruction, InstructionList};
pub use config::{CompileOptions, LabelNumbering};
pub use errors::CompileError;

/// Compile `source` with default options.
pub fn compile(source: &str) -> Result<InstructionList, CompileError> {
    Compiler::default().compile(source)
}
