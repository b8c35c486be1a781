use crate::foundation::error::{ModelError, ModelResult};
use crate::tree::node::{Addressable, Node, NodeValue};
use crate::tree::path::TreePath;

/// Resolve `path` against `root`, anchored at `root_key`.
///
/// Returns `None` on a root-key mismatch or when any segment fails to
/// project. Both are expected outcomes during interactive editing (a
/// selection can outlive the node it pointed at) and must not fail loudly.
#[tracing::instrument(level = "trace", skip(root))]
pub fn resolve<'a, R: Addressable>(
    root: &'a R,
    root_key: &str,
    path: &TreePath,
) -> Option<Node<'a>> {
    if path.root_key() != root_key {
        return None;
    }
    let mut node = root.as_node();
    for seg in path.segments() {
        node = node.project(seg)?;
    }
    Some(node)
}

/// Produce a new root identical to `root` except that the node at `path` is
/// replaced by `value`.
///
/// Every ancestor along the path is rebuilt; all other branches are shared
/// with `root`, which stays valid and independently usable. Fails with
/// [`ModelError::PathNotFound`] when `path` does not resolve in `root` or
/// does not address a slot `value` can occupy.
///
/// For any resolvable node path `p`: `resolve(&replace(root, k, p, v)?, k,
/// p)` yields `v`, and every path outside the subtree rooted at `p` resolves
/// to the same node as in `root`.
#[tracing::instrument(level = "debug", skip(root, value))]
pub fn replace<R: Addressable>(
    root: &R,
    root_key: &str,
    path: &TreePath,
    value: &NodeValue,
) -> ModelResult<R> {
    if path.root_key() != root_key {
        return Err(ModelError::path_not_found(format!(
            "path '{path}' is not anchored at root key '{root_key}'"
        )));
    }
    if resolve(root, root_key, path).is_none() {
        return Err(ModelError::path_not_found(path.to_string()));
    }
    root.with_replaced(path.segments(), value)
        .map_err(|err| match err {
            ModelError::PathNotFound(msg) => {
                ModelError::path_not_found(format!("{path}: {msg}"))
            }
            other => other,
        })
}

#[cfg(test)]
#[path = "../../tests/unit/tree/resolve.rs"]
mod tests;
