use std::fmt;

use serde::Serialize;

/// A parse error with the line it occurred on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: u32) -> Self {
        Self { kind, line }
    }
}

/// The specific kind of parse error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseErrorKind {
    /// A character that cannot start or continue the current construct.
    UnexpectedCharacter(char),
    /// A string literal was not closed before end of line or input.
    UnterminatedString,
    /// An object was not closed before end of input.
    UnclosedObject,
    /// A list was not closed before end of input.
    UnclosedList,
    /// A key was expected but not found.
    ExpectedKey,
    /// A value was expected but not found.
    ExpectedValue,
    /// An invalid escape sequence in a quoted string.
    InvalidEscape(char),
    /// Quoted key segments may not contain dots.
    QuotedKeyWithDot(String),
    /// Substitutions (`${...}`) are not supported in templates.
    Substitution,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character: {c:?}"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnclosedObject => write!(f, "unclosed object: missing '}}'"),
            Self::UnclosedList => write!(f, "unclosed list: missing ']'"),
            Self::ExpectedKey => write!(f, "expected a key"),
            Self::ExpectedValue => write!(f, "expected a value"),
            Self::InvalidEscape(c) => write!(f, "invalid escape sequence: \\{c}"),
            Self::QuotedKeyWithDot(k) => {
                write!(f, "quoted keys containing '.' are not supported: {k:?}")
            }
            Self::Substitution => write!(f, "substitutions (`${{...}}`) are not supported"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}
