use super::*;

use crate::expr::model::ComparisonOp;

fn body() -> Comparison {
    Comparison::new(
        ComparisonOp::Le,
        Expression::var_indexed("inventory", vec![crate::IndexTerm::index_ref("t")]).unwrap(),
        Expression::param("capacity").unwrap(),
    )
}

#[test]
fn scalar_constraint_presents_empty_bindings() {
    let c = ConstraintDef::scalar("cap", body());
    assert!(c.quantifiers.is_none());
    assert!(c.bindings().is_empty());
    assert!(c.condition().is_none());
    assert!(c.validate().is_ok());
}

#[test]
fn quantified_constraint_exposes_its_bindings() {
    let c = ConstraintDef::quantified(
        "cap",
        vec![IndexBinding::new("t", "Periods")],
        None,
        body(),
    )
    .unwrap();
    assert_eq!(c.bindings().len(), 1);
    assert_eq!(c.bindings()[0].index, "t");
    assert!(c.validate().is_ok());
}

#[test]
fn quantified_rejects_duplicate_symbols() {
    let result = ConstraintDef::quantified(
        "cap",
        vec![
            IndexBinding::new("t", "Periods"),
            IndexBinding::new("t", "Products"),
        ],
        None,
        body(),
    );
    assert!(matches!(result, Err(ModelError::InvalidBinding(_))));
}

#[test]
fn component_names_must_be_non_empty() {
    assert!(ConstraintDef::scalar("", body()).validate().is_err());
    assert!(
        SetDef {
            name: "  ".to_string(),
            elements: vec![],
        }
        .validate()
        .is_err()
    );
    assert!(
        ObjectiveDef {
            name: String::new(),
            expr: Expression::number(0.0),
            sense: ObjectiveSense::Minimize,
        }
        .validate()
        .is_err()
    );
}

#[test]
fn variable_bounds_must_be_ordered_and_finite() {
    let mut v = VariableDef {
        name: "x".to_string(),
        domain: VarDomain::NonNegativeReals,
        lower_bound: Some(10.0),
        upper_bound: Some(1.0),
        indices: vec![],
    };
    assert!(v.validate().is_err());

    v.upper_bound = Some(20.0);
    assert!(v.validate().is_ok());

    v.lower_bound = Some(f64::NEG_INFINITY);
    assert!(v.validate().is_err());
}

#[test]
fn variable_bounds_use_camel_case_on_the_wire() {
    let v = VariableDef {
        name: "x".to_string(),
        domain: VarDomain::Binary,
        lower_bound: Some(0.0),
        upper_bound: None,
        indices: vec!["Products".to_string()],
    };
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["lowerBound"], 0.0);
    assert!(json.get("upperBound").is_none());
    assert_eq!(json["domain"], "Binary");

    let back: VariableDef = serde_json::from_value(json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn parameter_table_arity_matches_declared_indices() {
    let p = ParamDef {
        name: "cost".to_string(),
        indices: vec!["Products".to_string(), "Periods".to_string()],
        values: ParamValues::Table(vec![ParamEntry {
            index: vec![SetElement::Text("chairs".to_string())],
            value: 15.0,
        }]),
    };
    assert!(matches!(p.validate(), Err(ModelError::Validation(_))));
}

#[test]
fn parameter_values_must_be_finite() {
    let scalar = ParamDef {
        name: "capacity".to_string(),
        indices: vec![],
        values: ParamValues::Scalar(f64::INFINITY),
    };
    assert!(scalar.validate().is_err());
}

#[test]
fn set_elements_deserialize_untagged() {
    let s: SetDef = serde_json::from_str(
        r#"{ "name": "Periods", "elements": [1, 2, "slack"] }"#,
    )
    .unwrap();
    assert_eq!(s.elements.len(), 3);
    assert_eq!(s.elements[0], SetElement::Number(1.0));
    assert_eq!(s.elements[2], SetElement::Text("slack".to_string()));
    assert!(s.validate().is_ok());
}

#[test]
fn objective_sense_defaults_to_minimize() {
    let o: ObjectiveDef = serde_json::from_str(
        r#"{ "name": "total", "expr": { "type": "number", "value": 0 } }"#,
    )
    .unwrap();
    assert_eq!(o.sense, ObjectiveSense::Minimize);
    assert_eq!(
        serde_json::to_value(ObjectiveSense::Maximize).unwrap(),
        "maximize"
    );
}

#[test]
fn model_validate_walks_every_component() {
    let mut model = ModelDef::default();
    assert!(model.is_empty());
    assert!(model.validate().is_ok());

    model.variables.push(VariableDef {
        name: "x".to_string(),
        domain: VarDomain::Reals,
        lower_bound: Some(5.0),
        upper_bound: Some(1.0),
        indices: vec![],
    });
    assert!(!model.is_empty());
    assert!(model.validate().is_err());
}
