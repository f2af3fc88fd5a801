//! Dotted-key path utilities.
//!
//! A key is a sequence of dot-separated segments; the empty string is the
//! root. Quoted segments never contain dots (the frontend rejects them),
//! so splitting on the last `.` is always segment-accurate.

/// The root key: the empty path.
pub const ROOT: &str = "";

/// Everything before the last `.`, or the root if the path has no dot.
pub fn parent(path: &str) -> &str {
    match path.rfind('.') {
        Some(i) => &path[..i],
        None => ROOT,
    }
}

/// The last segment of the path, or the whole path if it has no dot.
pub fn simple(path: &str) -> &str {
    match path.rfind('.') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Whether the path is the root (empty) key.
pub fn is_root(path: &str) -> bool {
    path.is_empty()
}

/// Join a parent path and a child segment with a dot.
///
/// Joining onto the root yields the segment unchanged.
pub fn join(parent: &str, child: &str) -> String {
    if is_root(parent) {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}
