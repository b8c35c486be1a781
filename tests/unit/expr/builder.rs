use super::*;

const ALL_NODE_KINDS: [NodeKind; 9] = [
    NodeKind::Number,
    NodeKind::String,
    NodeKind::Index,
    NodeKind::Var,
    NodeKind::Param,
    NodeKind::Binary,
    NodeKind::Unary,
    NodeKind::Comparison,
    NodeKind::Aggregate,
];

const ALL_TERM_KINDS: [TermKind; 4] = [
    TermKind::Number,
    TermKind::Index,
    TermKind::Unary,
    TermKind::Binary,
];

#[test]
fn every_default_node_satisfies_the_invariants() {
    for kind in ALL_NODE_KINDS {
        let node = Expression::default_of(kind);
        node.validate()
            .unwrap_or_else(|e| panic!("default for {kind:?} is invalid: {e}"));
        assert_eq!(node.kind(), kind);
    }
}

#[test]
fn every_default_term_satisfies_the_invariants() {
    for kind in ALL_TERM_KINDS {
        IndexTerm::default_of(kind).validate().unwrap();
    }
}

#[test]
fn default_comparison_is_zero_equals_zero() {
    let Expression::Comparison(cmp) = Expression::default_of(NodeKind::Comparison) else {
        panic!("expected a comparison");
    };
    assert_eq!(cmp.op, ComparisonOp::Eq);
    assert_eq!(*cmp.left, Expression::Number { value: 0.0 });
    assert_eq!(*cmp.right, Expression::Number { value: 0.0 });
}

#[test]
fn default_binary_is_zero_plus_zero() {
    let Expression::Binary { op, left, right } = Expression::default_of(NodeKind::Binary) else {
        panic!("expected a binary node");
    };
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(*left, Expression::Number { value: 0.0 });
    assert_eq!(*right, Expression::Number { value: 0.0 });
}

#[test]
fn default_aggregate_carries_one_binding() {
    let Expression::Aggregate {
        op,
        bindings,
        condition,
        ..
    } = Expression::default_of(NodeKind::Aggregate)
    else {
        panic!("expected an aggregate");
    };
    assert_eq!(op, AggregateOp::Sum);
    assert_eq!(bindings.len(), 1);
    assert!(condition.is_none());
}

#[test]
fn default_references_have_no_subscript_list() {
    for kind in [NodeKind::Var, NodeKind::Param] {
        let (Expression::Var { indices, .. } | Expression::Param { indices, .. }) =
            Expression::default_of(kind)
        else {
            panic!("expected a reference");
        };
        assert!(indices.is_none());
    }
}

#[test]
fn references_require_a_name() {
    assert!(matches!(
        Expression::var(""),
        Err(ModelError::Validation(_))
    ));
    assert!(matches!(
        Expression::param("   "),
        Err(ModelError::Validation(_))
    ));
    assert!(Expression::var("x").is_ok());
}

#[test]
fn indexed_references_require_at_least_one_term() {
    assert!(matches!(
        Expression::var_indexed("x", vec![]),
        Err(ModelError::Validation(_))
    ));
    let expr = Expression::var_indexed("x", vec![IndexTerm::index_ref("i")]).unwrap();
    assert!(expr.validate().is_ok());
}

#[test]
fn aggregate_constructor_rejects_bad_binding_lists() {
    let body = Expression::number(0.0);
    assert!(matches!(
        Expression::aggregate(AggregateOp::Sum, vec![], body.clone(), None),
        Err(ModelError::InvalidBinding(_))
    ));
    assert!(matches!(
        Expression::aggregate(
            AggregateOp::Sum,
            vec![
                IndexBinding::new("i", "Products"),
                IndexBinding::new("i", "Periods"),
            ],
            body.clone(),
            None,
        ),
        Err(ModelError::InvalidBinding(_))
    ));
    // Programmatic construction has no blank-binding grace period.
    assert!(matches!(
        Expression::aggregate(
            AggregateOp::Sum,
            vec![IndexBinding::new("i", "")],
            body,
            None,
        ),
        Err(ModelError::InvalidBinding(_))
    ));
}

#[test]
fn sum_shorthand_builds_a_sum_aggregate() {
    let expr = Expression::sum(
        vec![IndexBinding::new("i", "Products")],
        Expression::var_indexed("qty", vec![IndexTerm::index_ref("i")]).unwrap(),
    )
    .unwrap();
    let Expression::Aggregate { op, bindings, .. } = &expr else {
        panic!("expected an aggregate");
    };
    assert_eq!(*op, AggregateOp::Sum);
    assert_eq!(bindings.len(), 1);
    assert!(expr.validate().is_ok());
}

#[test]
fn term_sugar_matches_hand_built_nodes() {
    assert_eq!(
        IndexTerm::binary(
            IndexBinaryOp::Sub,
            IndexTerm::index_ref("t"),
            IndexTerm::number(1.0),
        ),
        IndexTerm::Binary {
            op: IndexBinaryOp::Sub,
            left: Arc::new(IndexTerm::Index {
                name: "t".to_string()
            }),
            right: Arc::new(IndexTerm::Number { value: 1.0 }),
        }
    );
    assert_eq!(
        IndexTerm::neg(IndexTerm::index_ref("t")),
        IndexTerm::Unary {
            op: IndexUnaryOp::Neg,
            operand: Arc::new(IndexTerm::Index {
                name: "t".to_string()
            }),
        }
    );
}
