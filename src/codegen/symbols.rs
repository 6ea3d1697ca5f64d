//! Symbol table
//!
//! Maps each declared identifier to its [`DataType`]. A name is inserted at
//! most once per compile unit; the table is populated while declarations are
//! translated and only consulted afterwards.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Scalar kinds a variable or array element can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    Float,
    Boolean,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type attached to a declared name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Primitive(PrimitiveKind),
    Array { element: PrimitiveKind, size: usize },
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Primitive(kind) => write!(f, "{}", kind),
            DataType::Array { element, size } => write!(f, "array({}, {})", element, size),
        }
    }
}

/// Returned by [`SymbolTable::declare`] when the name already exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identifier '{name}' is already declared")]
pub struct AlreadyDeclared {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, DataType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`, failing if it was declared before with any type.
    pub fn declare(&mut self, name: &str, data_type: DataType) -> Result<(), AlreadyDeclared> {
        if self.symbols.contains_key(name) {
            return Err(AlreadyDeclared {
                name: name.to_string(),
            });
        }
        self.symbols.insert(name.to_string(), data_type);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&DataType> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<(&str, &DataType)> {
        let mut entries: Vec<_> = self
            .symbols
            .iter()
            .map(|(name, ty)| (name.as_str(), ty))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, ty) in self.entries() {
            writeln!(f, "<'{}', {}>", name, ty)?;
        }
        Ok(())
    }
}
