use smol_str::SmolStr;
use std::{collections::BTreeMap, fmt};

/// Type inferred for a variable or expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Text,
    /// Expression without a value, like a statement
    /// or an empty block.
    Unknown,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueType::Number => write!(f, "number"),
            ValueType::Text => write!(f, "text"),
            ValueType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Mapping of variable names to the type of their most recent assignment.
///
/// Variables are dynamically typed per assignment, so binding a
/// name again replaces its type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeEnv {
    symbols: BTreeMap<SmolStr, ValueType>,
}

impl TypeEnv {
    #[inline]
    pub fn bind(&mut self, name: impl Into<SmolStr>, ty: ValueType) {
        self.symbols.insert(name.into(), ty);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<ValueType> {
        self.symbols.get(name).copied()
    }

    /// Type of the variable, or [`ValueType::Unknown`] if
    /// it was never assigned.
    #[inline]
    pub fn type_of(&self, name: &str) -> ValueType {
        self.get(name).unwrap_or(ValueType::Unknown)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueType)> {
        self.symbols.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}
