//! Code generation state
//!
//! - [`instruction`]: the stack machine instruction set and label allocator
//! - [`symbols`]: declared names and their types
//! - [`compiler`]: the [`compiler::Compiler`] entry point tying the parser,
//!   options, and label numbering together

pub mod compiler;
pub mod instruction;
pub mod symbols;
