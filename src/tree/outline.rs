use std::collections::BTreeSet;

use crate::expr::model::{Expression, IndexTerm};
use crate::render::text::{
    render_binding, render_comparison, render_constraint, render_expression, render_index_term,
    render_objective,
};
use crate::tree::navigator::TreeState;
use crate::tree::node::Node;
use crate::tree::path::TreePath;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One row of a flattened tree, ready for a tree-view consumer to render.
pub struct OutlineRow {
    /// Path addressing the row's node.
    pub path: TreePath,
    /// Canonical rendering of the node.
    pub label: String,
    /// Depth below the outline root.
    pub level: usize,
    /// True when the node has addressable children.
    pub has_children: bool,
}

/// Flatten the tree under `node` into depth-first rows anchored at `base`.
pub fn build_outline(node: Node<'_>, base: &TreePath) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    push_rows(node, base.clone(), 0, &mut rows);
    rows
}

fn push_rows(node: Node<'_>, path: TreePath, level: usize, rows: &mut Vec<OutlineRow>) {
    let children = child_nodes(node, &path);
    rows.push(OutlineRow {
        path,
        label: label(node),
        level,
        has_children: !children.is_empty(),
    });
    for (child_path, child) in children {
        push_rows(child, child_path, level + 1, rows);
    }
}

/// Addressable children of `node`, paired with their paths below `base`.
///
/// Binding lists are not rows: bindings are edited through the quantifier
/// editor, not the tree view. The `indices` array wrapper contributes no row
/// of its own; term rows sit directly below their reference node, two path
/// steps down.
fn child_nodes<'a>(node: Node<'a>, base: &TreePath) -> Vec<(TreePath, Node<'a>)> {
    match node {
        Node::Expr(expr) => match expr {
            Expression::Number { .. } | Expression::String { .. } | Expression::Index { .. } => {
                Vec::new()
            }
            Expression::Var { indices, .. } | Expression::Param { indices, .. } => indices
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(i, term)| {
                    (
                        base.clone().field("indices").index(i),
                        Node::Term(term),
                    )
                })
                .collect(),
            Expression::Binary { left, right, .. } => vec![
                (base.clone().field("left"), Node::Expr(left)),
                (base.clone().field("right"), Node::Expr(right)),
            ],
            Expression::Unary { operand, .. } => {
                vec![(base.clone().field("operand"), Node::Expr(operand))]
            }
            Expression::Aggregate {
                body, condition, ..
            } => {
                let mut children = Vec::new();
                if let Some(c) = condition {
                    children.push((base.clone().field("condition"), Node::Cmp(c)));
                }
                children.push((base.clone().field("body"), Node::Expr(body)));
                children
            }
            Expression::Comparison(cmp) => vec![
                (base.clone().field("left"), Node::Expr(&cmp.left)),
                (base.clone().field("right"), Node::Expr(&cmp.right)),
            ],
        },
        Node::Cmp(cmp) => vec![
            (base.clone().field("left"), Node::Expr(&cmp.left)),
            (base.clone().field("right"), Node::Expr(&cmp.right)),
        ],
        Node::Term(term) => match term {
            IndexTerm::Number { .. } | IndexTerm::Index { .. } => Vec::new(),
            IndexTerm::Unary { operand, .. } => {
                vec![(base.clone().field("operand"), Node::Term(operand))]
            }
            IndexTerm::Binary { left, right, .. } => vec![
                (base.clone().field("left"), Node::Term(left)),
                (base.clone().field("right"), Node::Term(right)),
            ],
        },
        Node::Binding(_) => Vec::new(),
        Node::Quantifier(block) => block
            .condition
            .as_ref()
            .map(|c| (base.clone().field("condition"), Node::Cmp(c)))
            .into_iter()
            .collect(),
        Node::Constraint(c) => {
            let mut children = vec![(base.clone().field("body"), Node::Cmp(&c.body))];
            if let Some(q) = &c.quantifiers {
                children.push((base.clone().field("quantifiers"), Node::Quantifier(q)));
            }
            children
        }
        Node::Objective(o) => vec![(base.clone().field("expr"), Node::Expr(&o.expr))],
        Node::Terms(_) | Node::Bindings(_) => Vec::new(),
    }
}

fn label(node: Node<'_>) -> String {
    match node {
        Node::Expr(e) => render_expression(e),
        Node::Term(t) => render_index_term(t),
        Node::Cmp(c) => render_comparison(c),
        Node::Binding(b) => render_binding(b),
        Node::Quantifier(q) => {
            let bindings = q
                .bindings
                .iter()
                .map(render_binding)
                .collect::<Vec<_>>()
                .join(", ");
            match &q.condition {
                Some(c) => format!("∀ {bindings} | {}", render_comparison(c)),
                None => format!("∀ {bindings}"),
            }
        }
        Node::Constraint(c) => render_constraint(c),
        Node::Objective(o) => render_objective(o),
        Node::Terms(_) | Node::Bindings(_) => String::new(),
    }
}

/// Filter `rows` down to the visible ones under the expansion state.
///
/// A row is visible only when every strict path-ancestor that is itself a
/// row is expanded. Ancestor prefixes that are not rows (container
/// segments like the `indices` wrapper) are skipped when testing
/// expansion.
pub fn visible_rows<'a>(rows: &'a [OutlineRow], state: &TreeState) -> Vec<&'a OutlineRow> {
    let row_paths: BTreeSet<&TreePath> = rows.iter().map(|r| &r.path).collect();
    rows.iter()
        .filter(|row| {
            let mut ancestor = row.path.parent();
            while let Some(p) = ancestor {
                if row_paths.contains(&p) && !state.is_expanded(&p) {
                    return false;
                }
                ancestor = p.parent();
            }
            true
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/tree/outline.rs"]
mod tests;
