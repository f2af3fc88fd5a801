//! Structural pass: from flat entry paths to a nested tree.
//!
//! The frontend's entry set is flat (`srv.net.port -> value`). This pass
//! folds it back into a tree of named nodes, creating intermediate nodes
//! on demand. Only names and containment survive here; types are
//! assigned later by the model builder.

use rustc_hash::FxHashMap;

use typeconf_common::key;
use typeconf_hocon::ConfigObject;

use crate::annotation::DefineCase;

/// A node in the struct tree: a name, its children, and (after the
/// annotation pass) the `@define` directive attached to it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct StructNode {
    pub name: String,
    pub members: Vec<StructNode>,
    pub define_case: Option<DefineCase>,
}

impl StructNode {
    fn new(name: String) -> Self {
        StructNode {
            name,
            members: Vec::new(),
            define_case: None,
        }
    }

    /// A leaf is a node with no members: exactly one per entry path.
    pub fn is_leaf(&self) -> bool {
        self.members.is_empty()
    }
}

/// Fold the config's entry set into struct nodes and return the root's
/// immediate children, in entry order.
pub fn member_structs(conf: &ConfigObject) -> Vec<StructNode> {
    // Flat node arena plus a path index; the root lives at slot 0.
    // Child links are arena indices, materialized into a tree at the end.
    let mut arena: Vec<(String, Vec<usize>)> = vec![(String::new(), Vec::new())];
    let mut by_path: FxHashMap<String, usize> = FxHashMap::default();
    by_path.insert(key::ROOT.to_string(), 0);

    for (path, _) in conf.entry_set() {
        ensure(&mut arena, &mut by_path, &path);
    }

    let root_children = arena[0].1.clone();
    root_children
        .into_iter()
        .map(|idx| materialize(&arena, idx))
        .collect()
}

/// Get or create the node for `path`, wiring it under its parent
/// (created recursively as needed).
fn ensure(
    arena: &mut Vec<(String, Vec<usize>)>,
    by_path: &mut FxHashMap<String, usize>,
    path: &str,
) -> usize {
    if let Some(&idx) = by_path.get(path) {
        return idx;
    }
    let idx = arena.len();
    arena.push((key::simple(path).to_string(), Vec::new()));
    by_path.insert(path.to_string(), idx);

    let parent_idx = ensure(arena, by_path, key::parent(path));
    arena[parent_idx].1.push(idx);
    idx
}

fn materialize(arena: &[(String, Vec<usize>)], idx: usize) -> StructNode {
    let (name, children) = &arena[idx];
    let mut node = StructNode::new(name.clone());
    node.members = children.iter().map(|&c| materialize(arena, c)).collect();
    node
}
