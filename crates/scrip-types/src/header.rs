use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookup key for a function: its name plus the number of arguments.
///
/// Two functions may share a name at different arities; the header keeps
/// them distinct in the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionHeader {
    pub name: String,
    pub arity: usize,
}

impl FunctionHeader {
    /// Create a new header.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for FunctionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Standard-library version.
///
/// Selects the cost table used for native calls; the evaluator does not
/// otherwise branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StdlibVersion {
    V1,
    V2,
    V3,
}

impl StdlibVersion {
    /// Number of known versions.
    pub const COUNT: usize = 3;

    /// The most recent version.
    pub const LATEST: Self = Self::V3;

    /// Zero-based index into per-version tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StdlibVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "V1"),
            Self::V2 => write!(f, "V2"),
            Self::V3 => write!(f, "V3"),
        }
    }
}
