//! Compiler entry point
//!
//! A [`Compiler`] owns the [`CompileOptions`] and, when labels are numbered
//! continuously, the label counter carried from one compile to the next.
//! Each compile gets a fresh symbol table and instruction list.

use crate::codegen::instruction::{InstructionList, LabelAllocator};
use crate::codegen::symbols::SymbolTable;
use crate::config::{CompileOptions, LabelNumbering};
use crate::errors::CompileError;
use crate::parser::lexer::{Lexer, Scanner};
use crate::parser::parse::Parser;
use tracing::debug;

/// Everything a successful compile produces
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub instructions: InstructionList,
    pub symbols: SymbolTable,
}

#[derive(Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
    next_label: usize,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            next_label: 0,
        }
    }

    /// Translate `source` into its instruction list.
    pub fn compile(&mut self, source: &str) -> Result<InstructionList, CompileError> {
        self.compile_unit(source).map(|unit| unit.instructions)
    }

    /// Like [`compile`](Self::compile), also returning the symbol table.
    pub fn compile_unit(&mut self, source: &str) -> Result<CompiledUnit, CompileError> {
        self.compile_tokens(Lexer::new(source))
    }

    /// Compile from any token source.
    pub fn compile_tokens<S: Scanner>(&mut self, scanner: S) -> Result<CompiledUnit, CompileError> {
        let start = match self.options.label_numbering {
            LabelNumbering::PerCompile => 0,
            LabelNumbering::Continuous => self.next_label,
        };
        let mut labels = LabelAllocator::new(self.options.label_prefix.clone(), start);

        let result = Parser::new(scanner, &mut labels, self.options.emit_halt).and_then(|mut parser| {
            parser.parse_program()?;
            Ok(parser.finish())
        });

        if self.options.label_numbering == LabelNumbering::Continuous {
            self.next_label = labels.next_number();
        }

        let (instructions, symbols) = result?;
        debug!(
            instructions = instructions.len(),
            symbols = symbols.len(),
            labels = labels.next_number() - start,
            "compile finished"
        );
        Ok(CompiledUnit {
            instructions,
            symbols,
        })
    }
}
