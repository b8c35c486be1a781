use super::*;

use crate::expr::model::{Comparison, ComparisonOp, IndexBinding};
use crate::model::components::ConstraintDef;

fn body() -> Comparison {
    Comparison::new(
        ComparisonOp::Le,
        Expression::var_indexed("inventory", vec![IndexTerm::index_ref("t")]).unwrap(),
        Expression::param("capacity").unwrap(),
    )
}

fn body_path() -> TreePath {
    TreePath::root("constraint").field("body")
}

#[test]
fn outline_flattens_depth_first_with_labels() {
    let cmp = body();
    let rows = build_outline(Node::Cmp(&cmp), &body_path());

    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].path, body_path());
    assert_eq!(rows[0].label, "(inventory[t] <= capacity)");
    assert_eq!(rows[0].level, 0);
    assert!(rows[0].has_children);

    assert_eq!(rows[1].path, body_path().field("left"));
    assert_eq!(rows[1].label, "inventory[t]");
    assert!(rows[1].has_children);

    // Subscript terms hang directly off the reference row; the `indices`
    // wrapper contributes path steps but no row of its own.
    assert_eq!(rows[2].path, body_path().field("left").field("indices").index(0));
    assert_eq!(rows[2].label, "t");
    assert_eq!(rows[2].level, 2);
    assert!(!rows[2].has_children);

    assert_eq!(rows[3].path, body_path().field("right"));
    assert_eq!(rows[3].label, "capacity");
    assert_eq!(rows[3].level, 1);
    assert!(!rows[3].has_children);
}

#[test]
fn visibility_requires_every_row_ancestor_expanded() {
    let cmp = body();
    let rows = build_outline(Node::Cmp(&cmp), &body_path());
    let mut state = TreeState::new("constraint");

    // Nothing expanded: only the outline root shows.
    let visible = visible_rows(&rows, &state);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].path, body_path());

    state.expand(body_path());
    let visible = visible_rows(&rows, &state);
    assert_eq!(visible.len(), 3);
    assert!(visible.iter().all(|r| r.path != rows[2].path));

    // Expanding the reference row reveals its terms; the `indices` waypoint
    // between them is skipped when testing expansion.
    state.expand(body_path().field("left"));
    let visible = visible_rows(&rows, &state);
    assert_eq!(visible.len(), 4);
}

#[test]
fn aggregate_condition_rows_precede_the_body() {
    let aggregate = Expression::aggregate(
        crate::AggregateOp::Sum,
        vec![IndexBinding::new("i", "Products")],
        Expression::var_indexed("qty", vec![IndexTerm::index_ref("i")]).unwrap(),
        Some(Comparison::new(
            ComparisonOp::Ne,
            Expression::index_ref("i"),
            Expression::number(1.0),
        )),
    )
    .unwrap();

    let base = TreePath::root("objective").field("expr");
    let rows = build_outline(Node::Expr(&aggregate), &base);
    let condition_pos = rows
        .iter()
        .position(|r| r.path == base.clone().field("condition"))
        .unwrap();
    let body_pos = rows
        .iter()
        .position(|r| r.path == base.clone().field("body"))
        .unwrap();
    assert!(condition_pos < body_pos);
}

#[test]
fn constraint_outline_includes_the_quantifier_row() {
    let constraint = ConstraintDef::quantified(
        "cap",
        vec![IndexBinding::new("t", "Periods")],
        Some(Comparison::new(
            ComparisonOp::Ne,
            Expression::index_ref("t"),
            Expression::number(1.0),
        )),
        body(),
    )
    .unwrap();

    let base = TreePath::root("constraint");
    let rows = build_outline(Node::Constraint(&constraint), &base);

    let quantifier_row = rows
        .iter()
        .find(|r| r.path == base.clone().field("quantifiers"))
        .unwrap();
    assert_eq!(quantifier_row.label, "∀ t ∈ Periods | (t != 1)");
    assert!(quantifier_row.has_children);

    // The condition is addressable below the quantifier row.
    assert!(
        rows.iter().any(|r| {
            r.path == base.clone().field("quantifiers").field("condition")
        })
    );
}
