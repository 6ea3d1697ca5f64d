//! Stack machine instructions
//!
//! The generator appends [`Instruction`]s to an [`InstructionList`] in the
//! exact order the executor must run them. Each instruction renders as one
//! line of the textual machine format:
//!
//! ```text
//! push <literal-or-name>   load   store   print   halt
//! + - * / %   && || !   < <= > >= == !=
//! array <name> <type> <size>
//! label <id>:   goto label <id>   gofalse label <id>
//! ```
//!
//! Labels carry no address; the executor resolves them by name.

use crate::codegen::symbols::PrimitiveKind;
use std::fmt;
use std::io;

/// Binary operators, rendered as their source symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Operand of a `push`
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Real(f64),
    /// Variable reference; the executor pushes its base address
    Name(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(n) => write!(f, "{}", n),
            // Debug keeps the fractional part on whole numbers (2.0, not 2)
            Operand::Real(x) => write!(f, "{:?}", x),
            Operand::Name(name) => f.write_str(name),
        }
    }
}

/// Synthesized jump target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out fresh labels from a monotonically increasing counter.
#[derive(Debug, Clone)]
pub struct LabelAllocator {
    prefix: String,
    next: usize,
}

impl LabelAllocator {
    pub fn new(prefix: impl Into<String>, start: usize) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }

    pub fn fresh(&mut self) -> Label {
        let label = Label(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        label
    }

    /// Number the next allocated label will get.
    pub fn next_number(&self) -> usize {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Push(Operand),
    Load,
    Store,
    Binary(BinOp),
    Not,
    Print,
    Array {
        name: String,
        element: PrimitiveKind,
        size: usize,
    },
    Label(Label),
    Goto(Label),
    GoFalse(Label),
    Halt,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(operand) => write!(f, "push {}", operand),
            Instruction::Load => f.write_str("load"),
            Instruction::Store => f.write_str("store"),
            Instruction::Binary(op) => f.write_str(op.symbol()),
            Instruction::Not => f.write_str("!"),
            Instruction::Print => f.write_str("print"),
            Instruction::Array {
                name,
                element,
                size,
            } => write!(f, "array {} {} {}", name, element, size),
            Instruction::Label(label) => write!(f, "label {}:", label),
            Instruction::Goto(label) => write!(f, "goto label {}", label),
            Instruction::GoFalse(label) => write!(f, "gofalse label {}", label),
            Instruction::Halt => f.write_str("halt"),
        }
    }
}

/// Append-only program produced by one compile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionList {
    instructions: Vec<Instruction>,
}

impl InstructionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Rendered text of every instruction, in order.
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(|i| i.to_string()).collect()
    }

    /// Write one instruction per line, each newline-terminated.
    pub fn write_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        for instruction in self {
            writeln!(out, "{}", instruction)?;
        }
        Ok(())
    }
}

impl fmt::Display for InstructionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in self {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a InstructionList {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_text() {
        let mut labels = LabelAllocator::new("", 0);
        let l0 = labels.fresh();
        let l1 = labels.fresh();

        let cases = vec![
            (Instruction::Push(Operand::Int(9)), "push 9"),
            (Instruction::Push(Operand::Real(2.0)), "push 2.0"),
            (Instruction::Push(Operand::Real(0.25)), "push 0.25"),
            (Instruction::Push(Operand::Name("a".into())), "push a"),
            (Instruction::Binary(BinOp::Le), "<="),
            (Instruction::Binary(BinOp::Or), "||"),
            (Instruction::Not, "!"),
            (
                Instruction::Array {
                    name: "v".into(),
                    element: PrimitiveKind::Boolean,
                    size: 8,
                },
                "array v boolean 8",
            ),
            (Instruction::Label(l0.clone()), "label 0:"),
            (Instruction::Goto(l0), "goto label 0"),
            (Instruction::GoFalse(l1), "gofalse label 1"),
            (Instruction::Halt, "halt"),
        ];

        for (instruction, text) in cases {
            assert_eq!(instruction.to_string(), text);
        }
    }

    #[test]
    fn test_label_allocator_prefix_and_start() {
        let mut labels = LabelAllocator::new("L", 7);
        assert_eq!(labels.fresh().as_str(), "L7");
        assert_eq!(labels.fresh().as_str(), "L8");
        assert_eq!(labels.next_number(), 9);
    }

    #[test]
    fn test_list_output_is_newline_terminated() {
        let mut list = InstructionList::new();
        list.push(Instruction::Push(Operand::Int(1)));
        list.push(Instruction::Print);

        let mut buf = Vec::new();
        list.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "push 1\nprint\n");
        assert_eq!(list.to_string(), "push 1\nprint\n");
        assert_eq!(list.lines(), vec!["push 1", "print"]);
    }
}
