//! Compiler configuration
//!
//! [`CompileOptions`] controls the few knobs of code generation that are not
//! dictated by the grammar: how synthesized labels are named and numbered,
//! and whether the program is terminated with `halt`.

/// How a [`Compiler`](crate::codegen::compiler::Compiler) numbers labels
/// across successive compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelNumbering {
    /// Every compile starts counting from zero.
    #[default]
    PerCompile,
    /// The compiler instance keeps counting, so labels stay unique across
    /// every program it produces.
    Continuous,
}

/// Options for a compiler instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Text placed before each label number (`L` gives `L0`, `L1`, ...)
    pub label_prefix: String,
    pub label_numbering: LabelNumbering,
    /// Append `halt` after the program body
    pub emit_halt: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            label_prefix: String::new(),
            label_numbering: LabelNumbering::PerCompile,
            emit_halt: true,
        }
    }
}

impl CompileOptions {
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    pub fn with_label_numbering(mut self, numbering: LabelNumbering) -> Self {
        self.label_numbering = numbering;
        self
    }

    pub fn without_halt(mut self) -> Self {
        self.emit_halt = false;
        self
    }
}
