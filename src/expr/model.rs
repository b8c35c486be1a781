use std::sync::Arc;

use crate::foundation::error::{ModelError, ModelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Binary arithmetic operators on full expressions.
pub enum BinaryOp {
    /// Addition (`+`).
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`).
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (`*`).
    #[serde(rename = "*")]
    Mul,
    /// Division (`/`).
    #[serde(rename = "/")]
    Div,
    /// Exponentiation (`^`).
    #[serde(rename = "^")]
    Pow,
}

impl BinaryOp {
    /// Canonical operator symbol used by the serializer and the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Unary operators and elementary functions on full expressions.
pub enum UnaryOp {
    /// Arithmetic negation.
    #[serde(rename = "-")]
    Neg,
    /// Absolute value.
    #[serde(rename = "abs")]
    Abs,
    /// Sine.
    #[serde(rename = "sin")]
    Sin,
    /// Cosine.
    #[serde(rename = "cos")]
    Cos,
    /// Tangent.
    #[serde(rename = "tan")]
    Tan,
    /// Natural exponential.
    #[serde(rename = "exp")]
    Exp,
    /// Natural logarithm.
    #[serde(rename = "log")]
    Log,
    /// Square root.
    #[serde(rename = "sqrt")]
    Sqrt,
}

impl UnaryOp {
    /// Canonical operator symbol used by the serializer and the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Abs => "abs",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Comparison operators.
pub enum ComparisonOp {
    /// Equality (`=`).
    #[serde(rename = "=")]
    Eq,
    /// Inequality (`!=`).
    #[serde(rename = "!=")]
    Ne,
    /// Strictly less (`<`).
    #[serde(rename = "<")]
    Lt,
    /// Less or equal (`<=`).
    #[serde(rename = "<=")]
    Le,
    /// Strictly greater (`>`).
    #[serde(rename = ">")]
    Gt,
    /// Greater or equal (`>=`).
    #[serde(rename = ">=")]
    Ge,
}

impl ComparisonOp {
    /// Canonical operator symbol used by the serializer and the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Aggregation operators over an indexed family of expression instances.
///
/// `prod` is deliberately absent: products of variables leave the linear
/// fragment this crate models.
pub enum AggregateOp {
    /// Summation.
    Sum,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
}

impl AggregateOp {
    /// Canonical operator keyword used by the serializer and the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Unary operators allowed inside subscripts.
pub enum IndexUnaryOp {
    /// Arithmetic negation.
    #[serde(rename = "-")]
    Neg,
}

impl IndexUnaryOp {
    /// Canonical operator symbol used by the serializer and the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Binary operators allowed inside subscripts.
///
/// Subscript arithmetic is linear offsets only (`x[t - 1]`); multiplication
/// is not representable at this level. This is a grammar restriction, not an
/// oversight.
pub enum IndexBinaryOp {
    /// Addition (`+`).
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`).
    #[serde(rename = "-")]
    Sub,
}

impl IndexBinaryOp {
    /// Canonical operator symbol used by the serializer and the wire format.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Restricted arithmetic term used only inside `Var`/`Param` subscripts.
pub enum IndexTerm {
    /// Numeric literal offset.
    Number {
        /// Literal value.
        value: f64,
    },
    /// Reference to a bound index variable.
    Index {
        /// Index variable symbol.
        name: String,
    },
    /// Negated term.
    #[serde(rename = "index_unary")]
    Unary {
        /// Operator (negation only).
        op: IndexUnaryOp,
        /// Negated operand.
        operand: Arc<IndexTerm>,
    },
    /// Linear combination of two terms.
    #[serde(rename = "index_binary")]
    Binary {
        /// Operator (`+` or `-`).
        op: IndexBinaryOp,
        /// Left operand.
        left: Arc<IndexTerm>,
        /// Right operand.
        right: Arc<IndexTerm>,
    },
}

impl IndexTerm {
    /// Validate the term recursively.
    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Self::Number { value } => {
                if !value.is_finite() {
                    return Err(ModelError::validation("index literal must be finite"));
                }
                Ok(())
            }
            Self::Index { .. } => Ok(()),
            Self::Unary { operand, .. } => operand.validate(),
            Self::Binary { left, right, .. } => {
                left.validate()?;
                right.validate()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Pairing of an index-variable symbol with the set it ranges over.
///
/// Not itself an expression; aggregates and constraint quantifier blocks hold
/// ordered sequences of bindings.
pub struct IndexBinding {
    /// Index variable symbol (e.g. `i`).
    pub index: String,
    /// Name of the set the index ranges over (e.g. `Products`).
    pub over: String,
}

impl IndexBinding {
    /// Binding from symbol and set name. Names may be empty while a binding
    /// is still being filled in by an editor.
    pub fn new(index: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            over: over.into(),
        }
    }

    /// Validate a binding list: at least one binding, and no two bindings
    /// sharing a (non-empty) index symbol at the same level.
    ///
    /// Empty symbols are tolerated here: interactive editing appends blank
    /// bindings before the user names them. [`crate::QuantifierBlock::new`]
    /// and [`Expression::aggregate`](crate::Expression::aggregate) are the
    /// strict entry points for programmatic construction.
    pub fn validate_list(bindings: &[IndexBinding]) -> ModelResult<()> {
        if bindings.is_empty() {
            return Err(ModelError::invalid_binding(
                "at least one index binding is required",
            ));
        }
        for (i, b) in bindings.iter().enumerate() {
            if b.index.is_empty() {
                continue;
            }
            if bindings[..i].iter().any(|prev| prev.index == b.index) {
                return Err(ModelError::invalid_binding(format!(
                    "duplicate index symbol '{}'",
                    b.index
                )));
            }
        }
        Ok(())
    }

    /// Strict variant of [`IndexBinding::validate_list`] for programmatic
    /// construction: additionally requires every symbol and set name to be
    /// non-empty.
    pub fn ensure_complete_list(bindings: &[IndexBinding]) -> ModelResult<()> {
        Self::validate_list(bindings)?;
        for b in bindings {
            if b.index.is_empty() {
                return Err(ModelError::invalid_binding(
                    "binding index symbol must be non-empty",
                ));
            }
            if b.over.is_empty() {
                return Err(ModelError::invalid_binding(format!(
                    "binding '{}' must name the set it ranges over",
                    b.index
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A comparison between two expressions.
///
/// The same shape serves as a top-level constraint body and as the filter
/// condition of an aggregate or quantifier block; in condition position it is
/// semantically scoped to the bindings it filters. At those typed positions
/// the comparison serializes as its bare fields (the position fixes the
/// variant); a stored `"type": "comparison"` key from older data is accepted
/// and ignored on input.
pub struct Comparison {
    /// Comparison operator.
    pub op: ComparisonOp,
    /// Left-hand side.
    pub left: Arc<Expression>,
    /// Right-hand side.
    pub right: Arc<Expression>,
}

impl Comparison {
    /// Comparison from operator and operands.
    pub fn new(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        Self {
            op,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }

    /// Validate both sides recursively.
    pub fn validate(&self) -> ModelResult<()> {
        self.left.validate()?;
        self.right.validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A node of the full arithmetic/logical expression tree.
///
/// The enum is closed: every consumer (builder, path resolver, serializer)
/// matches exhaustively, so adding a variant forces each of them to be
/// updated before the crate compiles again.
///
/// Child nodes are `Arc`-shared. Trees are acyclic by construction (no
/// builder operation creates a back-reference) and edits never mutate in
/// place: [`crate::replace`] rebuilds the spine above the edited node and
/// shares everything else with the previous root.
pub enum Expression {
    /// Numeric literal.
    Number {
        /// Literal value.
        value: f64,
    },
    /// String literal (set element labels in conditions).
    String {
        /// Literal value.
        value: String,
    },
    /// Reference to a bound index variable.
    Index {
        /// Index variable symbol.
        name: String,
    },
    /// Reference to a decision variable, optionally subscripted.
    Var {
        /// Variable name.
        name: String,
        /// Subscript terms; `None` for a scalar reference, otherwise
        /// non-empty.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        indices: Option<Vec<IndexTerm>>,
    },
    /// Reference to a parameter, optionally subscripted.
    Param {
        /// Parameter name.
        name: String,
        /// Subscript terms; `None` for a scalar reference, otherwise
        /// non-empty.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        indices: Option<Vec<IndexTerm>>,
    },
    /// Binary arithmetic operation.
    Binary {
        /// Operator kind.
        op: BinaryOp,
        /// Left operand.
        left: Arc<Expression>,
        /// Right operand.
        right: Arc<Expression>,
    },
    /// Unary operation or elementary function application.
    Unary {
        /// Operator kind.
        op: UnaryOp,
        /// Operand.
        operand: Arc<Expression>,
    },
    /// Aggregation (`sum`/`min`/`max`) over one or more index bindings,
    /// optionally filtered by a condition scoped to those bindings.
    Aggregate {
        /// Aggregation operator.
        op: AggregateOp,
        /// Index bindings; at least one, unique symbols.
        bindings: Vec<IndexBinding>,
        /// Aggregated body.
        body: Arc<Expression>,
        /// Optional filter over the binding tuple.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<Comparison>,
    },
    /// Comparison embedded in expression position.
    Comparison(Comparison),
}

impl Expression {
    /// Validate the structural invariants of the tree rooted here.
    ///
    /// Checks cardinality rules the type system cannot express: subscript
    /// lists present but empty, aggregates without bindings or with
    /// duplicated index symbols, non-finite literals. Node names may be
    /// empty (an expression under interactive construction); component-level
    /// validation is stricter.
    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Self::Number { value } => {
                if !value.is_finite() {
                    return Err(ModelError::validation("number literal must be finite"));
                }
                Ok(())
            }
            Self::String { .. } | Self::Index { .. } => Ok(()),
            Self::Var { name, indices } | Self::Param { name, indices } => {
                if let Some(terms) = indices {
                    if terms.is_empty() {
                        return Err(ModelError::validation(format!(
                            "subscript list of '{name}' must be non-empty when present"
                        )));
                    }
                    for term in terms {
                        term.validate()?;
                    }
                }
                Ok(())
            }
            Self::Binary { left, right, .. } => {
                left.validate()?;
                right.validate()
            }
            Self::Unary { operand, .. } => operand.validate(),
            Self::Aggregate {
                bindings,
                body,
                condition,
                ..
            } => {
                IndexBinding::validate_list(bindings)?;
                body.validate()?;
                if let Some(c) = condition {
                    c.validate()?;
                }
                Ok(())
            }
            Self::Comparison(c) => c.validate(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expr/model.rs"]
mod tests;
