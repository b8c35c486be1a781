//! Linform is a model-building engine for Mixed-Integer Linear Programming.
//!
//! Model components (sets, parameters, variables, constraints, objectives)
//! are assembled as typed expression trees rather than free text, edited
//! node-by-node through tree paths, and rendered back into canonical
//! mathematical notation.
//!
//! # Pipeline overview
//!
//! 1. **Build**: node defaults and validating constructors produce trees that
//!    satisfy every grammar invariant (`Expression::default_of`,
//!    `Expression::aggregate`, `QuantifierBlock::new`).
//! 2. **Address**: a typed path cursor ([`TreePath`]) identifies any sub-node;
//!    the dot string form exists only at the UI boundary.
//! 3. **Edit**: [`replace`] produces a fresh root with one node swapped out;
//!    untouched branches are shared, so previous roots stay valid.
//! 4. **Navigate**: [`TreeState`] carries selection/expansion over a tree that
//!    changes shape between edits; stale paths read as "nothing selected".
//! 5. **Render**: deterministic serializers turn trees and whole models into
//!    mathematical notation for display and prompt embedding.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Closed grammar**: every consumer matches exhaustively over the node
//!   enums; a new variant cannot be half-supported.
//! - **Copy-on-write**: no operation mutates a tree in place; each edit is a
//!   new root sharing unaffected structure with the old one.
//! - **Pure core**: every public operation is synchronous, total, and bounded
//!   by tree depth.
//!
//! Persistence, authentication, the chat/agent loop, and presentational
//! widgets are collaborators: they exchange the serde wire format and the
//! rendered text, and call the operations re-exported here.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod expr;
mod foundation;
mod model;
mod render;
mod tree;

pub use expr::builder::{NodeKind, TermKind};
pub use expr::model::{
    AggregateOp, BinaryOp, Comparison, ComparisonOp, Expression, IndexBinaryOp, IndexBinding,
    IndexTerm, IndexUnaryOp, UnaryOp,
};
pub use foundation::error::{ModelError, ModelResult};
pub use model::components::{
    ConstraintDef, ModelDef, ObjectiveDef, ObjectiveSense, ParamDef, ParamEntry, ParamValues,
    SetDef, SetElement, VarDomain, VariableDef,
};
pub use model::quantifier::{BindingField, QuantifierBlock};
pub use render::prompt::model_context;
pub use render::text::{
    render_binding, render_comparison, render_constraint, render_expression, render_index_term,
    render_model, render_objective, render_parameter, render_quantifiers, render_set,
    render_variable,
};
pub use tree::navigator::TreeState;
pub use tree::node::{Addressable, Node, NodeValue};
pub use tree::outline::{OutlineRow, build_outline, visible_rows};
pub use tree::path::{Segment, TreePath};
pub use tree::resolve::{replace, resolve};
