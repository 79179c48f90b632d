//! Source locations carried by syntax tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in the source text the external parser read.
///
/// Both fields are 1-based; `0` means the parser did not report a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "line {}, column {}", self.line, self.column)
        } else {
            write!(f, "<unknown location>")
        }
    }
}
