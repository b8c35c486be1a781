use std::sync::Arc;

use crate::expr::model::{
    AggregateOp, BinaryOp, Comparison, ComparisonOp, Expression, IndexBinaryOp, IndexBinding,
    IndexTerm, IndexUnaryOp, UnaryOp,
};
use crate::foundation::error::{ModelError, ModelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Discriminant of an [`Expression`] variant, used to request a default node
/// of that kind ("add a comparison node" style editing and tool calls).
pub enum NodeKind {
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Index variable reference.
    Index,
    /// Variable reference.
    Var,
    /// Parameter reference.
    Param,
    /// Binary operation.
    Binary,
    /// Unary operation.
    Unary,
    /// Comparison.
    Comparison,
    /// Aggregation.
    Aggregate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Discriminant of an [`IndexTerm`] variant.
pub enum TermKind {
    /// Numeric literal offset.
    Number,
    /// Index variable reference.
    Index,
    /// Negated term.
    Unary,
    /// Linear combination.
    Binary,
}

impl Default for Expression {
    /// Zero literal, the neutral placeholder every other default builds on.
    fn default() -> Self {
        Self::Number { value: 0.0 }
    }
}

impl Default for Comparison {
    /// `(0 = 0)`: structurally valid and immediately editable.
    fn default() -> Self {
        Self::new(ComparisonOp::Eq, Expression::default(), Expression::default())
    }
}

impl Expression {
    /// Minimal, structurally valid default node of the requested kind.
    ///
    /// The returned node satisfies every tree invariant (the aggregate
    /// default carries one binding, reference defaults carry no subscript
    /// list), so it can be inserted into a tree without further validation.
    /// Names default to empty and are filled in by subsequent edits.
    pub fn default_of(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Number => Self::default(),
            NodeKind::String => Self::String {
                value: String::new(),
            },
            NodeKind::Index => Self::Index {
                name: String::new(),
            },
            NodeKind::Var => Self::Var {
                name: String::new(),
                indices: None,
            },
            NodeKind::Param => Self::Param {
                name: String::new(),
                indices: None,
            },
            NodeKind::Binary => Self::Binary {
                op: BinaryOp::Add,
                left: Arc::new(Self::default()),
                right: Arc::new(Self::default()),
            },
            NodeKind::Unary => Self::Unary {
                op: UnaryOp::Neg,
                operand: Arc::new(Self::default()),
            },
            NodeKind::Comparison => Self::Comparison(Comparison::default()),
            NodeKind::Aggregate => Self::Aggregate {
                op: AggregateOp::Sum,
                bindings: vec![IndexBinding::new("i", "Set")],
                body: Arc::new(Self::default_of(NodeKind::Var)),
                condition: None,
            },
        }
    }

    /// Kind discriminant of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Number { .. } => NodeKind::Number,
            Self::String { .. } => NodeKind::String,
            Self::Index { .. } => NodeKind::Index,
            Self::Var { .. } => NodeKind::Var,
            Self::Param { .. } => NodeKind::Param,
            Self::Binary { .. } => NodeKind::Binary,
            Self::Unary { .. } => NodeKind::Unary,
            Self::Comparison(_) => NodeKind::Comparison,
            Self::Aggregate { .. } => NodeKind::Aggregate,
        }
    }

    /// Numeric literal.
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    /// String literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    /// Index variable reference.
    pub fn index_ref(name: impl Into<String>) -> Self {
        Self::Index { name: name.into() }
    }

    /// Scalar variable reference. Fails on an empty name.
    pub fn var(name: impl Into<String>) -> ModelResult<Self> {
        let name = name.into();
        ensure_named("variable", &name)?;
        Ok(Self::Var {
            name,
            indices: None,
        })
    }

    /// Subscripted variable reference. Fails on an empty name or an empty
    /// subscript list.
    pub fn var_indexed(name: impl Into<String>, indices: Vec<IndexTerm>) -> ModelResult<Self> {
        let name = name.into();
        ensure_named("variable", &name)?;
        ensure_subscripted(&name, &indices)?;
        Ok(Self::Var {
            name,
            indices: Some(indices),
        })
    }

    /// Scalar parameter reference. Fails on an empty name.
    pub fn param(name: impl Into<String>) -> ModelResult<Self> {
        let name = name.into();
        ensure_named("parameter", &name)?;
        Ok(Self::Param {
            name,
            indices: None,
        })
    }

    /// Subscripted parameter reference. Fails on an empty name or an empty
    /// subscript list.
    pub fn param_indexed(name: impl Into<String>, indices: Vec<IndexTerm>) -> ModelResult<Self> {
        let name = name.into();
        ensure_named("parameter", &name)?;
        ensure_subscripted(&name, &indices)?;
        Ok(Self::Param {
            name,
            indices: Some(indices),
        })
    }

    /// Binary operation.
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }

    /// Unary operation.
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary {
            op,
            operand: Arc::new(operand),
        }
    }

    /// Comparison in expression position.
    pub fn comparison(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        Self::Comparison(Comparison::new(op, left, right))
    }

    /// Aggregation over a binding list.
    ///
    /// Fails with [`ModelError::InvalidBinding`] when the list is empty, a
    /// symbol repeats, or a binding is incompletely named; programmatic
    /// construction has no excuse for blanks.
    pub fn aggregate(
        op: AggregateOp,
        bindings: Vec<IndexBinding>,
        body: Expression,
        condition: Option<Comparison>,
    ) -> ModelResult<Self> {
        IndexBinding::ensure_complete_list(&bindings)?;
        Ok(Self::Aggregate {
            op,
            bindings,
            body: Arc::new(body),
            condition,
        })
    }

    /// Summation shorthand for the most common aggregate.
    pub fn sum(bindings: Vec<IndexBinding>, body: Expression) -> ModelResult<Self> {
        Self::aggregate(AggregateOp::Sum, bindings, body, None)
    }
}

impl IndexTerm {
    /// Minimal, structurally valid default term of the requested kind.
    pub fn default_of(kind: TermKind) -> Self {
        match kind {
            TermKind::Number => Self::Number { value: 0.0 },
            TermKind::Index => Self::Index {
                name: String::new(),
            },
            TermKind::Unary => Self::Unary {
                op: IndexUnaryOp::Neg,
                operand: Arc::new(Self::Number { value: 0.0 }),
            },
            TermKind::Binary => Self::Binary {
                op: IndexBinaryOp::Add,
                left: Arc::new(Self::Number { value: 0.0 }),
                right: Arc::new(Self::Number { value: 0.0 }),
            },
        }
    }

    /// Numeric literal offset.
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    /// Index variable reference.
    pub fn index_ref(name: impl Into<String>) -> Self {
        Self::Index { name: name.into() }
    }

    /// Negated term.
    pub fn neg(operand: IndexTerm) -> Self {
        Self::Unary {
            op: IndexUnaryOp::Neg,
            operand: Arc::new(operand),
        }
    }

    /// Linear combination of two terms.
    pub fn binary(op: IndexBinaryOp, left: IndexTerm, right: IndexTerm) -> Self {
        Self::Binary {
            op,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }
}

fn ensure_named(what: &str, name: &str) -> ModelResult<()> {
    if name.trim().is_empty() {
        return Err(ModelError::validation(format!(
            "{what} reference requires a non-empty name"
        )));
    }
    Ok(())
}

fn ensure_subscripted(name: &str, indices: &[IndexTerm]) -> ModelResult<()> {
    if indices.is_empty() {
        return Err(ModelError::validation(format!(
            "subscripted reference '{name}' requires at least one index term"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/expr/builder.rs"]
mod tests;
