use std::fmt;

use serde::Serialize;

/// A non-fatal diagnostic collected during a build.
///
/// Warnings never abort the build; they are accumulated, sorted by line,
/// and returned alongside the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Warning {
    /// A list literal with more than one element; only the first decides
    /// the element type.
    MultElemList { line: u32, source: String },
    /// A list element spec carried an optional mark, which has no meaning
    /// inside a list.
    OptListElem { line: u32, source: String },
    /// A list element spec carried a default value, which has no meaning
    /// inside a list.
    DefaultListElem { line: u32, source: String },
}

impl Warning {
    pub fn line(&self) -> u32 {
        match self {
            Warning::MultElemList { line, .. }
            | Warning::OptListElem { line, .. }
            | Warning::DefaultListElem { line, .. } => *line,
        }
    }

    /// The offending source fragment.
    pub fn source(&self) -> &str {
        match self {
            Warning::MultElemList { source, .. }
            | Warning::OptListElem { source, .. }
            | Warning::DefaultListElem { source, .. } => source,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Warning::MultElemList { .. } => {
                "list has more than one element; only the first is used to derive the type"
            }
            Warning::OptListElem { .. } => "optional mark in list element is ignored",
            Warning::DefaultListElem { .. } => "default value in list element is ignored",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line(), self.message(), self.source())
    }
}
