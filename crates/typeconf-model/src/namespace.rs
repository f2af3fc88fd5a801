//! Lexically scoped registry of `@define`d named types.
//!
//! The namespace is a scope stack: each object under construction pushes
//! a scope, registers the defines among its members, and pops it when the
//! object is done. Lookup searches from the innermost scope outward, so
//! a define is visible to later siblings and to everything nested below
//! it, but not outside its object.

use rustc_hash::FxHashMap;

use crate::ir::{ObjectType, Type};

/// A registered define: the resolved type and whether it was declared
/// abstract (a parent).
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub ty: Type,
    pub is_parent: bool,
}

/// The scope stack. Index 0 is the root scope, created once per build.
pub struct Namespace {
    scopes: Vec<FxHashMap<String, Define>>,
}

impl Namespace {
    /// A fresh namespace with one empty root scope.
    pub fn new() -> Self {
        Namespace {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Push a child scope for a nested object.
    pub fn enter_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics if only the root scope remains.
    pub fn exit_scope(&mut self) {
        assert!(self.scopes.len() > 1, "cannot pop the root scope");
        self.scopes.pop();
    }

    /// Register a define in the current scope.
    pub fn add_define(&mut self, name: String, ty: Type, is_parent: bool) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name, Define { ty, is_parent });
    }

    /// Full lookup, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Define> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// The type registered under `name`, if any.
    pub fn resolve_define(&self, name: &str) -> Option<&Type> {
        self.lookup(name).map(|d| &d.ty)
    }

    /// The member view of an abstract define, or `None` when `name` is
    /// unknown or not a parent.
    pub fn get_abstract_define(&self, name: &str) -> Option<&ObjectType> {
        match self.lookup(name) {
            Some(Define {
                ty: Type::AbstractObject(members),
                is_parent: true,
            }) => Some(members),
            _ => None,
        }
    }

    /// Whether `name` resolves to an abstract (parent) define.
    pub fn is_abstract_class_define(&self, name: &str) -> bool {
        self.get_abstract_define(name).is_some()
    }

    /// Number of scopes on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}
