//! Member-name and default-value adjustment.

/// Adjust a raw key segment into the member name recorded in the model.
///
/// Segments containing `$` are kept verbatim; otherwise a leading and/or
/// trailing `"` (left over from quoted keys) is stripped.
pub fn adjust_name(name: &str) -> String {
    if name.contains('$') {
        return name.to_string();
    }
    let s = name.strip_prefix('"').unwrap_or(name);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.to_string()
}

/// Escape a leaf value string so it can be embedded as a literal by
/// downstream emitters: backslashes and double quotes are backslash-escaped.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}
