//! The inline type-spec DSL carried by leaf string values.
//!
//! A leaf like `"int | 8080"` or `"duration : seconds | 5 s"` describes a
//! typed field rather than a concrete value. The grammar is:
//!
//! ```text
//! spec      := typePart [ "|" default ]
//! typePart  := baseSpec [ "?" ]
//! baseSpec  := type [ ":" qualifier ]
//! type      := string | boolean | int | long | double | duration | size
//! ```
//!
//! Bare duration (`10ms`) and size (`4KiB`) literals are also accepted
//! and take precedence over the generic grammar. A value that matches
//! neither is not a spec; the caller falls back to treating it as a
//! plain string default.

use crate::ir::{BasicType, TimeUnit};

/// The parsed form of a type-spec string.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub ty: BasicType,
    pub optional: bool,
    pub default: Option<String>,
}

/// Parse a leaf value string as a type spec. `None` means the string is
/// not a spec at all.
pub fn parse_spec(value: &str) -> Option<ValueSpec> {
    // Bare literals first: they look nothing like the generic grammar.
    if is_duration_literal(value) {
        return Some(ValueSpec {
            ty: BasicType::Duration(TimeUnit::Millis),
            optional: true,
            default: Some(value.to_string()),
        });
    }
    if is_size_literal(value) {
        return Some(ValueSpec {
            ty: BasicType::Size,
            optional: true,
            default: Some(value.to_string()),
        });
    }

    let (type_part, default) = match value.split_once('|') {
        Some((t, d)) => (t.trim(), Some(d.trim().to_string())),
        None => (value.trim(), None),
    };
    let has_default = default.is_some();

    let mut base = type_part.to_lowercase();
    let optional = if base.ends_with('?') {
        base.pop();
        let trimmed = base.trim_end().len();
        base.truncate(trimmed);
        true
    } else {
        has_default
    };

    let (ty_name, qualifier) = match base.split_once(':') {
        Some((t, q)) => (t.trim(), Some(q.trim())),
        None => (base.as_str(), None),
    };

    let mut ty = atomic_type(ty_name)?;
    if let (BasicType::Duration(_), Some(q)) = (ty, qualifier) {
        ty = BasicType::Duration(TimeUnit::from_name(q)?);
    }

    Some(ValueSpec {
        ty,
        optional,
        default,
    })
}

fn atomic_type(name: &str) -> Option<BasicType> {
    match name {
        "string" => Some(BasicType::String),
        "boolean" => Some(BasicType::Boolean),
        "int" => Some(BasicType::Integer),
        "long" => Some(BasicType::Long),
        "double" => Some(BasicType::Double),
        "duration" => Some(BasicType::Duration(TimeUnit::Millis)),
        "size" => Some(BasicType::Size),
        _ => None,
    }
}

// ── Bare literals ──────────────────────────────────────────────────────

/// Length of the leading decimal number (`12`, `1.5`), or `None`.
fn number_prefix_len(text: &str) -> Option<usize> {
    let mut len = 0;
    let mut digits = 0;
    let mut seen_dot = false;
    for c in text.chars() {
        match c {
            '0'..='9' => {
                digits += 1;
                len += 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                len += 1;
            }
            _ => break,
        }
    }
    if digits == 0 {
        None
    } else {
        Some(len)
    }
}

/// Whether the string is a HOCON duration literal: a number followed by a
/// time unit (`10ms`, `1.5 hours`).
pub fn is_duration_literal(value: &str) -> bool {
    let t = value.trim();
    let Some(n) = number_prefix_len(t) else {
        return false;
    };
    let unit = t[n..].trim_start();
    !unit.is_empty() && TimeUnit::from_name(unit).is_some()
}

/// Whether the string is a HOCON size-in-bytes literal: a number followed
/// by a byte unit (`4KiB`, `512 bytes`).
pub fn is_size_literal(value: &str) -> bool {
    let t = value.trim();
    let Some(n) = number_prefix_len(t) else {
        return false;
    };
    let unit = t[n..].trim_start();
    !unit.is_empty() && is_size_unit(unit)
}

fn is_size_unit(unit: &str) -> bool {
    matches!(
        unit,
        "B" | "b"
            | "byte"
            | "bytes"
            | "kB"
            | "kilobyte"
            | "kilobytes"
            | "K"
            | "k"
            | "Ki"
            | "KiB"
            | "kibibyte"
            | "kibibytes"
            | "MB"
            | "megabyte"
            | "megabytes"
            | "M"
            | "Mi"
            | "MiB"
            | "mebibyte"
            | "mebibytes"
            | "GB"
            | "gigabyte"
            | "gigabytes"
            | "G"
            | "g"
            | "Gi"
            | "GiB"
            | "gibibyte"
            | "gibibytes"
            | "TB"
            | "terabyte"
            | "terabytes"
            | "T"
            | "t"
            | "Ti"
            | "TiB"
            | "tebibyte"
            | "tebibytes"
            | "PB"
            | "petabyte"
            | "petabytes"
            | "P"
            | "p"
            | "Pi"
            | "PiB"
            | "pebibyte"
            | "pebibytes"
    )
}
