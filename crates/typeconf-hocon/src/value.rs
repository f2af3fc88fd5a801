//! The parsed config tree: values, origins, and the object container.
//!
//! This is the interface the model builder consumes: every value knows its
//! kind, its line, and the comment lines that preceded it. Objects keep
//! their fields in insertion order and expose the flat `path -> value`
//! entry set the structural pass folds back into a tree.

use serde::Serialize;

use typeconf_common::key;

/// Where a value came from: 1-based line number and the comment lines
/// preceding the entry (delimiter stripped, text otherwise verbatim).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Origin {
    pub line: u32,
    pub comments: Vec<String>,
}

impl Origin {
    pub fn new(line: u32) -> Self {
        Self {
            line,
            comments: Vec::new(),
        }
    }

    pub fn with_comments(line: u32, comments: Vec<String>) -> Self {
        Self { line, comments }
    }
}

/// The kind of a parsed value.
///
/// Numbers keep their raw decimal text; the model builder decides the
/// numeric width from the text, not from a pre-chosen machine type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueKind {
    Str(String),
    Bool(bool),
    Number(String),
    List(Vec<ConfigValue>),
    Object(ConfigObject),
    Null,
}

/// A parsed value together with its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigValue {
    pub kind: ValueKind,
    pub origin: Origin,
}

impl ConfigValue {
    pub fn new(kind: ValueKind, origin: Origin) -> Self {
        Self { kind, origin }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, ValueKind::Object(_))
    }

    pub fn as_object(&self) -> Option<&ConfigObject> {
        match &self.kind {
            ValueKind::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The native value as a string, the way a config library's
    /// `unwrapped().toString` would print it.
    pub fn unwrapped(&self) -> String {
        match &self.kind {
            ValueKind::Str(s) => s.clone(),
            ValueKind::Bool(b) => b.to_string(),
            ValueKind::Number(raw) => raw.clone(),
            ValueKind::Null => "null".to_string(),
            ValueKind::List(_) | ValueKind::Object(_) => self.render_compact(),
        }
    }

    /// Concise single-line rendering, used in warning messages:
    /// `[int,string]`, `{a=1,b=2}`.
    pub fn render_compact(&self) -> String {
        match &self.kind {
            ValueKind::Str(s) => s.clone(),
            ValueKind::Bool(b) => b.to_string(),
            ValueKind::Number(raw) => raw.clone(),
            ValueKind::Null => "null".to_string(),
            ValueKind::List(elems) => {
                let inner: Vec<String> = elems.iter().map(|e| e.render_compact()).collect();
                format!("[{}]", inner.join(","))
            }
            ValueKind::Object(o) => {
                let inner: Vec<String> = o
                    .iter()
                    .map(|(name, v)| format!("{}={}", name, v.render_compact()))
                    .collect();
                format!("{{{}}}", inner.join(","))
            }
        }
    }
}

/// An object node: insertion-ordered named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ConfigObject {
    fields: Vec<(String, ConfigValue)>,
}

impl ConfigObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Direct child by simple name.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Value at a dotted path.
    pub fn get_value(&self, path: &str) -> Option<&ConfigValue> {
        let mut obj = self;
        let mut rest = path;
        loop {
            match rest.split_once('.') {
                Some((head, tail)) => {
                    obj = obj.get(head)?.as_object()?;
                    rest = tail;
                }
                None => return obj.get(rest),
            }
        }
    }

    /// Object at a dotted path.
    pub fn get_object(&self, path: &str) -> Option<&ConfigObject> {
        self.get_value(path)?.as_object()
    }

    /// The flat leaf entry set: `(dotted path, value)` pairs in depth-first
    /// field order. Empty objects contribute nothing.
    pub fn entry_set(&self) -> Vec<(String, &ConfigValue)> {
        let mut entries = Vec::new();
        self.collect_entries(key::ROOT, &mut entries);
        entries
    }

    fn collect_entries<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a ConfigValue)>) {
        for (name, value) in &self.fields {
            let path = key::join(prefix, name);
            match &value.kind {
                ValueKind::Object(o) => o.collect_entries(&path, out),
                _ => out.push((path, value)),
            }
        }
    }

    /// Insert a value at a key path, creating intermediate objects as
    /// needed. Duplicate keys follow HOCON semantics: last wins, except
    /// that two objects merge field-by-field (keeping the first
    /// occurrence's position and origin).
    pub fn insert(&mut self, path: &[String], value: ConfigValue, line: u32) {
        debug_assert!(!path.is_empty(), "insert path must have at least one segment");
        // Nest the value in wrapper objects from the tail so the whole
        // path reduces to a single top-level put with merge semantics.
        let mut v = value;
        for seg in path[1..].iter().rev() {
            let mut wrapper = ConfigObject::new();
            wrapper.fields.push((seg.clone(), v));
            v = ConfigValue::new(ValueKind::Object(wrapper), Origin::new(line));
        }
        self.put(path[0].clone(), v);
    }

    fn put(&mut self, name: String, value: ConfigValue) {
        match self.fields.iter().position(|(n, _)| *n == name) {
            Some(i) => {
                let old = self.fields[i].1.clone();
                self.fields[i].1 = merge_values(old, value);
            }
            None => self.fields.push((name, value)),
        }
    }
}

/// Merge a later value over an earlier one: objects merge recursively,
/// anything else is replaced by the newcomer.
fn merge_values(old: ConfigValue, new: ConfigValue) -> ConfigValue {
    match (old.kind, new.kind) {
        (ValueKind::Object(mut a), ValueKind::Object(b)) => {
            for (name, v) in b.fields {
                a.put(name, v);
            }
            ConfigValue {
                kind: ValueKind::Object(a),
                origin: old.origin,
            }
        }
        (_, kind) => ConfigValue {
            kind,
            origin: new.origin,
        },
    }
}
