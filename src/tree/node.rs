use std::sync::Arc;

use crate::expr::model::{Comparison, Expression, IndexBinding, IndexTerm};
use crate::foundation::error::{ModelError, ModelResult};
use crate::model::components::{ConstraintDef, ObjectiveDef};
use crate::model::quantifier::QuantifierBlock;
use crate::tree::path::Segment;

#[derive(Clone, Copy, Debug)]
/// Borrowed view of one addressable node inside a tree.
///
/// The container variants (`Terms`, `Bindings`) exist so paths can step
/// through array wrappers like `indices.0`; they are traversal waypoints,
/// not replaceable nodes.
pub enum Node<'a> {
    /// An expression node.
    Expr(&'a Expression),
    /// A subscript term.
    Term(&'a IndexTerm),
    /// A comparison (constraint body, condition, or embedded).
    Cmp(&'a Comparison),
    /// One index binding.
    Binding(&'a IndexBinding),
    /// A quantifier block.
    Quantifier(&'a QuantifierBlock),
    /// A whole constraint (root object).
    Constraint(&'a ConstraintDef),
    /// A whole objective (root object).
    Objective(&'a ObjectiveDef),
    /// Subscript list wrapper.
    Terms(&'a [IndexTerm]),
    /// Binding list wrapper.
    Bindings(&'a [IndexBinding]),
}

#[derive(Clone, Debug, PartialEq)]
/// Owned node accepted by [`crate::replace`] as the new value for a slot.
pub enum NodeValue {
    /// An expression node.
    Expr(Expression),
    /// A subscript term.
    Term(IndexTerm),
    /// A comparison.
    Cmp(Comparison),
    /// One index binding.
    Binding(IndexBinding),
    /// A quantifier block.
    Quantifier(QuantifierBlock),
    /// A whole constraint.
    Constraint(ConstraintDef),
    /// A whole objective.
    Objective(ObjectiveDef),
}

impl<'a> Node<'a> {
    /// Project one navigation step, `None` when no such child exists.
    pub fn project(self, seg: &Segment) -> Option<Node<'a>> {
        match self {
            Node::Expr(expr) => match expr {
                Expression::Number { .. }
                | Expression::String { .. }
                | Expression::Index { .. } => None,
                Expression::Var { indices, .. } | Expression::Param { indices, .. } => {
                    if seg.is_field("indices") {
                        indices.as_deref().map(Node::Terms)
                    } else {
                        None
                    }
                }
                Expression::Binary { left, right, .. } => {
                    if seg.is_field("left") {
                        Some(Node::Expr(left))
                    } else if seg.is_field("right") {
                        Some(Node::Expr(right))
                    } else {
                        None
                    }
                }
                Expression::Unary { operand, .. } => {
                    if seg.is_field("operand") {
                        Some(Node::Expr(operand))
                    } else {
                        None
                    }
                }
                Expression::Aggregate {
                    bindings,
                    body,
                    condition,
                    ..
                } => {
                    if seg.is_field("bindings") {
                        Some(Node::Bindings(bindings))
                    } else if seg.is_field("body") {
                        Some(Node::Expr(body))
                    } else if seg.is_field("condition") {
                        condition.as_ref().map(Node::Cmp)
                    } else {
                        None
                    }
                }
                Expression::Comparison(cmp) => Node::Cmp(cmp).project(seg),
            },
            Node::Cmp(cmp) => {
                if seg.is_field("left") {
                    Some(Node::Expr(&cmp.left))
                } else if seg.is_field("right") {
                    Some(Node::Expr(&cmp.right))
                } else {
                    None
                }
            }
            Node::Term(term) => match term {
                IndexTerm::Number { .. } | IndexTerm::Index { .. } => None,
                IndexTerm::Unary { operand, .. } => {
                    if seg.is_field("operand") {
                        Some(Node::Term(operand))
                    } else {
                        None
                    }
                }
                IndexTerm::Binary { left, right, .. } => {
                    if seg.is_field("left") {
                        Some(Node::Term(left))
                    } else if seg.is_field("right") {
                        Some(Node::Term(right))
                    } else {
                        None
                    }
                }
            },
            Node::Binding(_) => None,
            Node::Quantifier(block) => {
                if seg.is_field("bindings") {
                    Some(Node::Bindings(&block.bindings))
                } else if seg.is_field("condition") {
                    block.condition.as_ref().map(Node::Cmp)
                } else {
                    None
                }
            }
            Node::Constraint(c) => {
                if seg.is_field("quantifiers") {
                    c.quantifiers.as_ref().map(Node::Quantifier)
                } else if seg.is_field("body") {
                    Some(Node::Cmp(&c.body))
                } else {
                    None
                }
            }
            Node::Objective(o) => {
                if seg.is_field("expr") {
                    Some(Node::Expr(&o.expr))
                } else {
                    None
                }
            }
            Node::Terms(terms) => match seg {
                Segment::Index(i) => terms.get(*i).map(Node::Term),
                Segment::Field(_) => None,
            },
            Node::Bindings(bindings) => match seg {
                Segment::Index(i) => bindings.get(*i).map(Node::Binding),
                Segment::Field(_) => None,
            },
        }
    }

    /// Owned copy of the addressed node; `None` for container waypoints.
    pub fn to_value(self) -> Option<NodeValue> {
        match self {
            Node::Expr(e) => Some(NodeValue::Expr(e.clone())),
            Node::Term(t) => Some(NodeValue::Term(t.clone())),
            Node::Cmp(c) => Some(NodeValue::Cmp(c.clone())),
            Node::Binding(b) => Some(NodeValue::Binding(b.clone())),
            Node::Quantifier(q) => Some(NodeValue::Quantifier(q.clone())),
            Node::Constraint(c) => Some(NodeValue::Constraint(c.clone())),
            Node::Objective(o) => Some(NodeValue::Objective(o.clone())),
            Node::Terms(_) | Node::Bindings(_) => None,
        }
    }

    /// The expression behind this view, when it is one.
    pub fn as_expr(self) -> Option<&'a Expression> {
        match self {
            Node::Expr(e) => Some(e),
            _ => None,
        }
    }

    /// The comparison behind this view, when it is one.
    pub fn as_comparison(self) -> Option<&'a Comparison> {
        match self {
            Node::Cmp(c) => Some(c),
            _ => None,
        }
    }
}

/// A tree type that can serve as the root of path resolution and
/// copy-on-write replacement.
pub trait Addressable: Sized {
    /// View of the root as a node.
    fn as_node(&self) -> Node<'_>;

    /// Copy of `self` with the node at `segments` replaced by `value`.
    ///
    /// Rebuilds only the spine above the replaced node; untouched children
    /// are `Arc`-shared with `self`, so the previous root remains valid and
    /// independently usable.
    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self>;
}

fn slot_mismatch(expected: &str) -> ModelError {
    ModelError::path_not_found(format!("replacement value does not fit a {expected} slot"))
}

fn no_child(seg: &Segment) -> ModelError {
    ModelError::path_not_found(format!("no child at segment '{seg}'"))
}

fn container_target(seg: &Segment) -> ModelError {
    ModelError::path_not_found(format!("segment '{seg}' addresses a container, not a node"))
}

/// Rebuild a subscript list with the term at `rest`'s leading index replaced.
fn replaced_terms(
    terms: &[IndexTerm],
    seg: &Segment,
    rest: &[Segment],
    value: &NodeValue,
) -> ModelResult<Vec<IndexTerm>> {
    let Some((idx_seg, below)) = rest.split_first() else {
        return Err(container_target(seg));
    };
    let Segment::Index(i) = idx_seg else {
        return Err(no_child(idx_seg));
    };
    let Some(term) = terms.get(*i) else {
        return Err(no_child(idx_seg));
    };
    let mut out = terms.to_vec();
    out[*i] = term.with_replaced(below, value)?;
    Ok(out)
}

/// Rebuild a binding list with the binding at `rest`'s leading index
/// replaced. Bindings are leaves: nothing resolves below one.
fn replaced_bindings(
    bindings: &[IndexBinding],
    seg: &Segment,
    rest: &[Segment],
    value: &NodeValue,
) -> ModelResult<Vec<IndexBinding>> {
    let Some((idx_seg, below)) = rest.split_first() else {
        return Err(container_target(seg));
    };
    let Segment::Index(i) = idx_seg else {
        return Err(no_child(idx_seg));
    };
    if bindings.get(*i).is_none() {
        return Err(no_child(idx_seg));
    }
    if !below.is_empty() {
        return Err(no_child(&below[0]));
    }
    let NodeValue::Binding(b) = value else {
        return Err(slot_mismatch("binding"));
    };
    let mut out = bindings.to_vec();
    out[*i] = b.clone();
    Ok(out)
}

impl Addressable for Expression {
    fn as_node(&self) -> Node<'_> {
        Node::Expr(self)
    }

    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self> {
        let Some((seg, rest)) = segments.split_first() else {
            return match value {
                NodeValue::Expr(e) => Ok(e.clone()),
                NodeValue::Cmp(c) => Ok(Expression::Comparison(c.clone())),
                _ => Err(slot_mismatch("expression")),
            };
        };
        match self {
            Expression::Number { .. } | Expression::String { .. } | Expression::Index { .. } => {
                Err(no_child(seg))
            }
            Expression::Var { name, indices } => {
                let (Some(terms), true) = (indices.as_deref(), seg.is_field("indices")) else {
                    return Err(no_child(seg));
                };
                Ok(Expression::Var {
                    name: name.clone(),
                    indices: Some(replaced_terms(terms, seg, rest, value)?),
                })
            }
            Expression::Param { name, indices } => {
                let (Some(terms), true) = (indices.as_deref(), seg.is_field("indices")) else {
                    return Err(no_child(seg));
                };
                Ok(Expression::Param {
                    name: name.clone(),
                    indices: Some(replaced_terms(terms, seg, rest, value)?),
                })
            }
            Expression::Binary { op, left, right } => {
                if seg.is_field("left") {
                    Ok(Expression::Binary {
                        op: *op,
                        left: Arc::new(left.with_replaced(rest, value)?),
                        right: Arc::clone(right),
                    })
                } else if seg.is_field("right") {
                    Ok(Expression::Binary {
                        op: *op,
                        left: Arc::clone(left),
                        right: Arc::new(right.with_replaced(rest, value)?),
                    })
                } else {
                    Err(no_child(seg))
                }
            }
            Expression::Unary { op, operand } => {
                if seg.is_field("operand") {
                    Ok(Expression::Unary {
                        op: *op,
                        operand: Arc::new(operand.with_replaced(rest, value)?),
                    })
                } else {
                    Err(no_child(seg))
                }
            }
            Expression::Aggregate {
                op,
                bindings,
                body,
                condition,
            } => {
                if seg.is_field("bindings") {
                    Ok(Expression::Aggregate {
                        op: *op,
                        bindings: replaced_bindings(bindings, seg, rest, value)?,
                        body: Arc::clone(body),
                        condition: condition.clone(),
                    })
                } else if seg.is_field("body") {
                    Ok(Expression::Aggregate {
                        op: *op,
                        bindings: bindings.clone(),
                        body: Arc::new(body.with_replaced(rest, value)?),
                        condition: condition.clone(),
                    })
                } else if seg.is_field("condition") {
                    let Some(c) = condition else {
                        return Err(no_child(seg));
                    };
                    Ok(Expression::Aggregate {
                        op: *op,
                        bindings: bindings.clone(),
                        body: Arc::clone(body),
                        condition: Some(c.with_replaced(rest, value)?),
                    })
                } else {
                    Err(no_child(seg))
                }
            }
            Expression::Comparison(cmp) => {
                Ok(Expression::Comparison(cmp.with_replaced(segments, value)?))
            }
        }
    }
}

impl Addressable for Comparison {
    fn as_node(&self) -> Node<'_> {
        Node::Cmp(self)
    }

    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self> {
        let Some((seg, rest)) = segments.split_first() else {
            return match value {
                NodeValue::Cmp(c) => Ok(c.clone()),
                NodeValue::Expr(Expression::Comparison(c)) => Ok(c.clone()),
                _ => Err(slot_mismatch("comparison")),
            };
        };
        if seg.is_field("left") {
            Ok(Self {
                op: self.op,
                left: Arc::new(self.left.with_replaced(rest, value)?),
                right: Arc::clone(&self.right),
            })
        } else if seg.is_field("right") {
            Ok(Self {
                op: self.op,
                left: Arc::clone(&self.left),
                right: Arc::new(self.right.with_replaced(rest, value)?),
            })
        } else {
            Err(no_child(seg))
        }
    }
}

impl Addressable for IndexTerm {
    fn as_node(&self) -> Node<'_> {
        Node::Term(self)
    }

    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self> {
        let Some((seg, rest)) = segments.split_first() else {
            return match value {
                NodeValue::Term(t) => Ok(t.clone()),
                _ => Err(slot_mismatch("index term")),
            };
        };
        match self {
            IndexTerm::Number { .. } | IndexTerm::Index { .. } => Err(no_child(seg)),
            IndexTerm::Unary { op, operand } => {
                if seg.is_field("operand") {
                    Ok(IndexTerm::Unary {
                        op: *op,
                        operand: Arc::new(operand.with_replaced(rest, value)?),
                    })
                } else {
                    Err(no_child(seg))
                }
            }
            IndexTerm::Binary { op, left, right } => {
                if seg.is_field("left") {
                    Ok(IndexTerm::Binary {
                        op: *op,
                        left: Arc::new(left.with_replaced(rest, value)?),
                        right: Arc::clone(right),
                    })
                } else if seg.is_field("right") {
                    Ok(IndexTerm::Binary {
                        op: *op,
                        left: Arc::clone(left),
                        right: Arc::new(right.with_replaced(rest, value)?),
                    })
                } else {
                    Err(no_child(seg))
                }
            }
        }
    }
}

impl Addressable for QuantifierBlock {
    fn as_node(&self) -> Node<'_> {
        Node::Quantifier(self)
    }

    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self> {
        let Some((seg, rest)) = segments.split_first() else {
            return match value {
                NodeValue::Quantifier(q) => Ok(q.clone()),
                _ => Err(slot_mismatch("quantifier block")),
            };
        };
        if seg.is_field("bindings") {
            Ok(Self {
                bindings: replaced_bindings(&self.bindings, seg, rest, value)?,
                condition: self.condition.clone(),
            })
        } else if seg.is_field("condition") {
            let Some(c) = &self.condition else {
                return Err(no_child(seg));
            };
            Ok(Self {
                bindings: self.bindings.clone(),
                condition: Some(c.with_replaced(rest, value)?),
            })
        } else {
            Err(no_child(seg))
        }
    }
}

impl Addressable for ConstraintDef {
    fn as_node(&self) -> Node<'_> {
        Node::Constraint(self)
    }

    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self> {
        let Some((seg, rest)) = segments.split_first() else {
            return match value {
                NodeValue::Constraint(c) => Ok(c.clone()),
                _ => Err(slot_mismatch("constraint")),
            };
        };
        if seg.is_field("quantifiers") {
            let Some(block) = &self.quantifiers else {
                return Err(no_child(seg));
            };
            Ok(Self {
                quantifiers: Some(block.with_replaced(rest, value)?),
                ..self.clone()
            })
        } else if seg.is_field("body") {
            Ok(Self {
                body: self.body.with_replaced(rest, value)?,
                ..self.clone()
            })
        } else {
            Err(no_child(seg))
        }
    }
}

impl Addressable for ObjectiveDef {
    fn as_node(&self) -> Node<'_> {
        Node::Objective(self)
    }

    fn with_replaced(&self, segments: &[Segment], value: &NodeValue) -> ModelResult<Self> {
        let Some((seg, rest)) = segments.split_first() else {
            return match value {
                NodeValue::Objective(o) => Ok(o.clone()),
                _ => Err(slot_mismatch("objective")),
            };
        };
        if seg.is_field("expr") {
            Ok(Self {
                expr: self.expr.with_replaced(rest, value)?,
                ..self.clone()
            })
        } else {
            Err(no_child(seg))
        }
    }
}
