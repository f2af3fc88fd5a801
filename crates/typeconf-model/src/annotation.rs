//! `@define` and `@optional` annotations carried by key comments.
//!
//! Annotations live in the comment lines preceding a key (or trailing
//! its opening brace). The full grammar:
//!
//! ```text
//! @optional
//! @define
//! @define abstract
//! @define extends <Identifier>
//! @define enum
//! ```
//!
//! Anything else starting with `@define` is an error, as is more than
//! one `@define` line on a single key.

use crate::error::BuildError;

/// The directive form of a `@define` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefineCase {
    /// Bare `@define`: a reusable named type.
    Plain,
    /// `@define abstract`: a parent type, never instantiated at the root.
    Abstract,
    /// `@define extends P`: a named type inheriting the members of `P`.
    Extends(String),
    /// `@define enum`: an enumeration of the listed values.
    Enum,
}

impl DefineCase {
    /// Whether this directive marks a parent (abstract) definition.
    pub fn is_parent(&self) -> bool {
        matches!(self, DefineCase::Abstract)
    }
}

/// Extract the `@define` directive from a key's comment lines, if any.
pub fn define_from_comments(
    comments: &[String],
    key: &str,
    line: u32,
) -> Result<Option<DefineCase>, BuildError> {
    let mut found = None;
    for comment in comments {
        let trimmed = comment.trim();
        let Some(rest) = trimmed.strip_prefix("@define") else {
            continue;
        };
        if found.is_some() {
            return Err(BuildError::MultipleDefines {
                key: key.to_string(),
                line,
            });
        }
        found = Some(parse_define(trimmed, rest, key, line)?);
    }
    Ok(found)
}

fn parse_define(
    whole: &str,
    rest: &str,
    key: &str,
    line: u32,
) -> Result<DefineCase, BuildError> {
    if rest.is_empty() {
        return Ok(DefineCase::Plain);
    }
    let malformed = || BuildError::MalformedDefine {
        key: key.to_string(),
        annotation: whole.to_string(),
        line,
    };
    // The directive word must be separated from `@define` by whitespace.
    if !rest.starts_with(char::is_whitespace) {
        return Err(malformed());
    }
    let words: Vec<&str> = rest.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(DefineCase::Plain),
        ["abstract"] => Ok(DefineCase::Abstract),
        ["enum"] => Ok(DefineCase::Enum),
        ["extends", parent] => Ok(DefineCase::Extends(parent.to_string())),
        _ => Err(malformed()),
    }
}

/// Whether any comment line marks the key `@optional`.
pub fn optional_from_comments(comments: &[String]) -> bool {
    comments.iter().any(|c| c.trim().starts_with("@optional"))
}
