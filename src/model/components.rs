use std::fmt;

use crate::expr::model::{Comparison, Expression, IndexBinding};
use crate::foundation::error::{ModelError, ModelResult};
use crate::model::quantifier::QuantifierBlock;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// A member of an index set: a label or a number.
pub enum SetElement {
    /// Numeric element (e.g. a period `3`).
    Number(f64),
    /// Textual element (e.g. `"plant_A"`).
    Text(String),
}

impl fmt::Display for SetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An index set: named collection of elements other components range over.
pub struct SetDef {
    /// Set name (e.g. `Products`).
    pub name: String,
    /// Ordered elements.
    pub elements: Vec<SetElement>,
}

impl SetDef {
    /// Validate name and element values.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("set name must be non-empty"));
        }
        for e in &self.elements {
            if let SetElement::Number(v) = e
                && !v.is_finite()
            {
                return Err(ModelError::validation(format!(
                    "set '{}' contains a non-finite element",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One row of an indexed parameter table.
pub struct ParamEntry {
    /// Index tuple, one element per declared index set.
    pub index: Vec<SetElement>,
    /// Value at that tuple.
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Parameter data: a single scalar or a table over the index tuples.
pub enum ParamValues {
    /// Scalar (unindexed) value.
    Scalar(f64),
    /// Indexed table.
    Table(Vec<ParamEntry>),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Known data consumed by constraints and objectives.
pub struct ParamDef {
    /// Parameter name (e.g. `cost`).
    pub name: String,
    /// Names of the sets indexing this parameter; empty for scalars.
    #[serde(default)]
    pub indices: Vec<String>,
    /// Scalar value or indexed table.
    pub values: ParamValues,
}

impl ParamDef {
    /// Validate name, value finiteness, and table arity against the declared
    /// index sets.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("parameter name must be non-empty"));
        }
        match &self.values {
            ParamValues::Scalar(v) => {
                if !v.is_finite() {
                    return Err(ModelError::validation(format!(
                        "parameter '{}' value must be finite",
                        self.name
                    )));
                }
            }
            ParamValues::Table(entries) => {
                for entry in entries {
                    if entry.index.len() != self.indices.len() {
                        return Err(ModelError::validation(format!(
                            "parameter '{}' entry has {} index elements, expected {}",
                            self.name,
                            entry.index.len(),
                            self.indices.len()
                        )));
                    }
                    if !entry.value.is_finite() {
                        return Err(ModelError::validation(format!(
                            "parameter '{}' value must be finite",
                            self.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Domain of a decision variable.
pub enum VarDomain {
    /// 0/1 decisions.
    Binary,
    /// Integers `>= 0`.
    NonNegativeIntegers,
    /// Reals `>= 0`.
    NonNegativeReals,
    /// Unrestricted reals.
    Reals,
    /// Unrestricted integers.
    Integers,
}

impl VarDomain {
    /// Domain name as displayed to users and stored on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::NonNegativeIntegers => "NonNegativeIntegers",
            Self::NonNegativeReals => "NonNegativeReals",
            Self::Reals => "Reals",
            Self::Integers => "Integers",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A decision variable: what the solver collaborator solves for.
pub struct VariableDef {
    /// Variable name (e.g. `x`).
    pub name: String,
    /// Variable domain.
    pub domain: VarDomain,
    /// Optional lower bound.
    #[serde(rename = "lowerBound", default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    /// Optional upper bound.
    #[serde(rename = "upperBound", default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    /// Names of the sets indexing this variable; empty for scalars.
    #[serde(default)]
    pub indices: Vec<String>,
}

impl VariableDef {
    /// Validate name and bound ordering.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("variable name must be non-empty"));
        }
        for bound in [self.lower_bound, self.upper_bound].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ModelError::validation(format!(
                    "variable '{}' bounds must be finite when set",
                    self.name
                )));
            }
        }
        if let (Some(lo), Some(hi)) = (self.lower_bound, self.upper_bound)
            && lo > hi
        {
            return Err(ModelError::validation(format!(
                "variable '{}' lower bound exceeds upper bound",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A constraint: a comparison, optionally quantified over index bindings.
///
/// An absent quantifier block is the canonical encoding of a scalar
/// (unindexed) constraint; [`ConstraintDef::bindings`] presents the
/// possibly-empty view.
pub struct ConstraintDef {
    /// Constraint name (e.g. `capacity_limit`).
    pub name: String,
    /// Optional quantifier block (bindings + optional condition).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantifiers: Option<QuantifierBlock>,
    /// Quantified comparison.
    pub body: Comparison,
}

impl ConstraintDef {
    /// Unindexed constraint.
    pub fn scalar(name: impl Into<String>, body: Comparison) -> Self {
        Self {
            name: name.into(),
            quantifiers: None,
            body,
        }
    }

    /// Indexed constraint quantified over a validated binding list.
    pub fn quantified(
        name: impl Into<String>,
        bindings: Vec<IndexBinding>,
        condition: Option<Comparison>,
        body: Comparison,
    ) -> ModelResult<Self> {
        Ok(Self {
            name: name.into(),
            quantifiers: Some(QuantifierBlock::new(bindings, condition)?),
            body,
        })
    }

    /// Bindings the body ranges over; empty for a scalar constraint.
    pub fn bindings(&self) -> &[IndexBinding] {
        self.quantifiers
            .as_ref()
            .map(|q| q.bindings.as_slice())
            .unwrap_or_default()
    }

    /// Filter condition over the binding tuple, when present.
    pub fn condition(&self) -> Option<&Comparison> {
        self.quantifiers.as_ref().and_then(|q| q.condition.as_ref())
    }

    /// Validate name, quantifier block, and body.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("constraint name must be non-empty"));
        }
        if let Some(q) = &self.quantifiers {
            q.validate()?;
        }
        self.body.validate()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Optimization direction of an objective.
pub enum ObjectiveSense {
    /// Find the smallest value.
    #[default]
    Minimize,
    /// Find the largest value.
    Maximize,
}

impl ObjectiveSense {
    /// Keyword used by the serializer (`minimize` / `maximize`).
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The objective function to optimize.
pub struct ObjectiveDef {
    /// Objective name (e.g. `total_cost`).
    pub name: String,
    /// Expression to optimize.
    pub expr: Expression,
    /// Direction.
    #[serde(default)]
    pub sense: ObjectiveSense,
}

impl ObjectiveDef {
    /// Validate name and expression.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("objective name must be non-empty"));
        }
        self.expr.validate()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete model: every component the rendering and persistence
/// collaborators exchange.
pub struct ModelDef {
    /// Index sets.
    #[serde(default)]
    pub sets: Vec<SetDef>,
    /// Parameters.
    #[serde(default)]
    pub parameters: Vec<ParamDef>,
    /// Decision variables.
    #[serde(default)]
    pub variables: Vec<VariableDef>,
    /// Constraints.
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
    /// Objective, once defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<ObjectiveDef>,
}

impl ModelDef {
    /// True when no component has been defined yet.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
            && self.parameters.is_empty()
            && self.variables.is_empty()
            && self.constraints.is_empty()
            && self.objective.is_none()
    }

    /// Validate every component.
    pub fn validate(&self) -> ModelResult<()> {
        for s in &self.sets {
            s.validate()?;
        }
        for p in &self.parameters {
            p.validate()?;
        }
        for v in &self.variables {
            v.validate()?;
        }
        for c in &self.constraints {
            c.validate()?;
        }
        if let Some(o) = &self.objective {
            o.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/components.rs"]
mod tests;
