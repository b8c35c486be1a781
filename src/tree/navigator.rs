use std::collections::BTreeSet;

use crate::tree::node::{Addressable, Node};
use crate::tree::path::TreePath;
use crate::tree::resolve::resolve;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Interactive navigation state over one editable tree.
///
/// The state deliberately outlives the tree's shape: after an edit removes
/// or reorders nodes, `selected` and `expanded` may hold paths that no
/// longer resolve. Nothing is pruned eagerly; a stale selection simply
/// reads as "nothing selected" on the next [`TreeState::selected_node`]
/// call, and stale expansion entries are inert.
pub struct TreeState {
    root_key: String,
    selected: Option<TreePath>,
    expanded: BTreeSet<TreePath>,
}

impl TreeState {
    /// Fresh state anchored at a root key (e.g. `constraint`).
    pub fn new(root_key: impl Into<String>) -> Self {
        Self {
            root_key: root_key.into(),
            selected: None,
            expanded: BTreeSet::new(),
        }
    }

    /// Root key selections and expansions are anchored at.
    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// Unconditionally replace the selection.
    pub fn select(&mut self, path: TreePath) {
        self.selected = Some(path);
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Currently selected path, resolvable or not.
    pub fn selected_path(&self) -> Option<&TreePath> {
        self.selected.as_ref()
    }

    /// Flip `path`'s membership in the expanded set.
    pub fn toggle_expand(&mut self, path: TreePath) {
        if !self.expanded.remove(&path) {
            self.expanded.insert(path);
        }
    }

    /// Ensure `path` is expanded.
    pub fn expand(&mut self, path: TreePath) {
        self.expanded.insert(path);
    }

    /// True when `path` is in the expanded set.
    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expanded.contains(path)
    }

    /// Expanded paths, in path order.
    pub fn expanded_paths(&self) -> impl Iterator<Item = &TreePath> {
        self.expanded.iter()
    }

    /// Resolve the selection against `root`.
    ///
    /// `None` when nothing is selected or when the selected path no longer
    /// resolves; an unresolved selection downgrades silently instead of
    /// erroring.
    pub fn selected_node<'a, R: Addressable>(&self, root: &'a R) -> Option<Node<'a>> {
        let path = self.selected.as_ref()?;
        resolve(root, &self.root_key, path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/navigator.rs"]
mod tests;
