use super::*;

fn inventory_at(term: IndexTerm) -> Expression {
    Expression::Var {
        name: "inventory".to_string(),
        indices: Some(vec![term]),
    }
}

#[test]
fn validate_rejects_aggregate_without_bindings() {
    let expr = Expression::Aggregate {
        op: AggregateOp::Sum,
        bindings: vec![],
        body: Arc::new(Expression::Number { value: 0.0 }),
        condition: None,
    };
    assert!(matches!(
        expr.validate(),
        Err(ModelError::InvalidBinding(_))
    ));
}

#[test]
fn validate_rejects_duplicate_index_symbols() {
    let expr = Expression::Aggregate {
        op: AggregateOp::Sum,
        bindings: vec![
            IndexBinding::new("i", "Products"),
            IndexBinding::new("i", "Periods"),
        ],
        body: Arc::new(Expression::Number { value: 0.0 }),
        condition: None,
    };
    assert!(matches!(
        expr.validate(),
        Err(ModelError::InvalidBinding(_))
    ));
}

#[test]
fn validate_tolerates_blank_symbols_mid_edit() {
    // Two blank bindings are not "duplicates": the user has not named them yet.
    assert!(
        IndexBinding::validate_list(&[IndexBinding::new("", ""), IndexBinding::new("", "")])
            .is_ok()
    );
}

#[test]
fn ensure_complete_list_rejects_blanks() {
    assert!(matches!(
        IndexBinding::ensure_complete_list(&[IndexBinding::new("", "Products")]),
        Err(ModelError::InvalidBinding(_))
    ));
    assert!(matches!(
        IndexBinding::ensure_complete_list(&[IndexBinding::new("i", "")]),
        Err(ModelError::InvalidBinding(_))
    ));
}

#[test]
fn validate_rejects_present_but_empty_subscript_list() {
    let expr = Expression::Var {
        name: "x".to_string(),
        indices: Some(vec![]),
    };
    assert!(matches!(expr.validate(), Err(ModelError::Validation(_))));
}

#[test]
fn validate_rejects_non_finite_literals() {
    let expr = Expression::Number {
        value: f64::INFINITY,
    };
    assert!(expr.validate().is_err());
    let term = IndexTerm::Number { value: f64::NAN };
    assert!(term.validate().is_err());
}

#[test]
fn validate_recurses_into_conditions() {
    let expr = Expression::Aggregate {
        op: AggregateOp::Min,
        bindings: vec![IndexBinding::new("i", "Products")],
        body: Arc::new(Expression::Number { value: 1.0 }),
        condition: Some(Comparison::new(
            ComparisonOp::Ne,
            Expression::Number { value: f64::NAN },
            Expression::Number { value: 0.0 },
        )),
    };
    assert!(expr.validate().is_err());
}

#[test]
fn expression_wire_tags() {
    let expr = inventory_at(IndexTerm::Index {
        name: "t".to_string(),
    });
    let json = serde_json::to_value(&expr).unwrap();
    assert_eq!(json["type"], "var");
    assert_eq!(json["name"], "inventory");
    assert_eq!(json["indices"][0]["type"], "index");

    let scalar = Expression::Var {
        name: "x".to_string(),
        indices: None,
    };
    let json = serde_json::to_value(&scalar).unwrap();
    assert!(json.get("indices").is_none());
}

#[test]
fn operators_serialize_as_symbols() {
    assert_eq!(serde_json::to_value(BinaryOp::Add).unwrap(), "+");
    assert_eq!(serde_json::to_value(UnaryOp::Sqrt).unwrap(), "sqrt");
    assert_eq!(serde_json::to_value(ComparisonOp::Le).unwrap(), "<=");
    assert_eq!(serde_json::to_value(AggregateOp::Sum).unwrap(), "sum");
    assert_eq!(serde_json::to_value(IndexBinaryOp::Sub).unwrap(), "-");
}

#[test]
fn index_term_wire_tags() {
    let term = IndexTerm::Binary {
        op: IndexBinaryOp::Sub,
        left: Arc::new(IndexTerm::Index {
            name: "t".to_string(),
        }),
        right: Arc::new(IndexTerm::Number { value: 1.0 }),
    };
    let json = serde_json::to_value(&term).unwrap();
    assert_eq!(json["type"], "index_binary");
    assert_eq!(json["op"], "-");

    let back: IndexTerm = serde_json::from_value(json).unwrap();
    assert_eq!(back, term);
}

#[test]
fn expression_wire_roundtrip() {
    let expr = Expression::Aggregate {
        op: AggregateOp::Sum,
        bindings: vec![IndexBinding::new("i", "Products")],
        body: Arc::new(Expression::Binary {
            op: BinaryOp::Mul,
            left: Arc::new(inventory_at(IndexTerm::Index {
                name: "i".to_string(),
            })),
            right: Arc::new(Expression::Param {
                name: "cost".to_string(),
                indices: None,
            }),
        }),
        condition: None,
    };
    let json = serde_json::to_string(&expr).unwrap();
    let back: Expression = serde_json::from_str(&json).unwrap();
    assert_eq!(back, expr);
}

#[test]
fn comparison_tolerates_stored_type_key() {
    // Older persisted data tags comparisons even at typed positions.
    let json = r#"{
        "type": "comparison",
        "op": "<=",
        "left": { "type": "var", "name": "x" },
        "right": { "type": "number", "value": 10 }
    }"#;
    let cmp: Comparison = serde_json::from_str(json).unwrap();
    assert_eq!(cmp.op, ComparisonOp::Le);
    assert!(cmp.validate().is_ok());
}

#[test]
fn comparison_in_expression_position_is_tagged() {
    let expr = Expression::Comparison(Comparison::new(
        ComparisonOp::Eq,
        Expression::Number { value: 0.0 },
        Expression::Number { value: 0.0 },
    ));
    let json = serde_json::to_value(&expr).unwrap();
    assert_eq!(json["type"], "comparison");
    let back: Expression = serde_json::from_value(json).unwrap();
    assert_eq!(back, expr);
}
