//! Canonical mathematical-notation rendering.
//!
//! Every renderer is a pure recursive function over the node model: the same
//! tree always produces the same text and nothing is mutated. Rendering never
//! fails, since the enums are closed and there is no "unknown node" case to
//! degrade to. Output is deliberately fully parenthesized; unambiguous wins
//! over terse both on screen and inside an AI prompt.

use crate::expr::model::{Comparison, Expression, IndexBinding, IndexTerm};
use crate::model::components::{
    ConstraintDef, ModelDef, ObjectiveDef, ParamDef, ParamEntry, ParamValues, SetDef, SetElement,
    VariableDef,
};
use crate::model::quantifier::QuantifierBlock;

/// Render a subscript term (restricted grammar: negation prefixed, linear
/// combinations parenthesized).
pub fn render_index_term(term: &IndexTerm) -> String {
    match term {
        IndexTerm::Number { value } => value.to_string(),
        IndexTerm::Index { name } => name.clone(),
        IndexTerm::Unary { op, operand } => {
            format!("{}{}", op.symbol(), render_index_term(operand))
        }
        IndexTerm::Binary { op, left, right } => format!(
            "({} {} {})",
            render_index_term(left),
            op.symbol(),
            render_index_term(right)
        ),
    }
}

/// Render an expression tree.
pub fn render_expression(expr: &Expression) -> String {
    match expr {
        Expression::Number { value } => value.to_string(),
        Expression::String { value } => format!("\"{value}\""),
        Expression::Index { name } => name.clone(),
        Expression::Var { name, indices } | Expression::Param { name, indices } => {
            match indices.as_deref() {
                Some(terms) if !terms.is_empty() => {
                    let subscript = terms
                        .iter()
                        .map(render_index_term)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{name}[{subscript}]")
                }
                _ => name.clone(),
            }
        }
        Expression::Binary { op, left, right } => format!(
            "({} {} {})",
            render_expression(left),
            op.symbol(),
            render_expression(right)
        ),
        Expression::Unary { op, operand } => {
            format!("{}({})", op.symbol(), render_expression(operand))
        }
        Expression::Aggregate {
            op,
            bindings,
            body,
            condition,
        } => {
            let bindings = bindings
                .iter()
                .map(render_binding)
                .collect::<Vec<_>>()
                .join(", ");
            let body = render_expression(body);
            match condition {
                Some(c) => format!(
                    "{}_{{{bindings}}} {body} | {}",
                    op.symbol(),
                    render_comparison(c)
                ),
                None => format!("{}_{{{bindings}}} {body}", op.symbol()),
            }
        }
        Expression::Comparison(cmp) => render_comparison(cmp),
    }
}

/// Render a comparison, fully parenthesized like binary arithmetic.
pub fn render_comparison(cmp: &Comparison) -> String {
    format!(
        "({} {} {})",
        render_expression(&cmp.left),
        cmp.op.symbol(),
        render_expression(&cmp.right)
    )
}

/// Render one index binding as `i ∈ Products`.
pub fn render_binding(binding: &IndexBinding) -> String {
    format!("{} ∈ {}", binding.index, binding.over)
}

/// Render a constraint: its body, then `, ∀ …` over the bindings, then
/// `| condition` when a filter is present. The body renders the same with
/// or without bindings.
pub fn render_constraint(constraint: &ConstraintDef) -> String {
    let mut out = render_comparison(&constraint.body);
    if let Some(block) = &constraint.quantifiers {
        out.push_str(&render_quantifiers(block));
    }
    out
}

/// Render the quantifier tail of a constraint (`, ∀ i ∈ S | (i != j)`).
pub fn render_quantifiers(block: &QuantifierBlock) -> String {
    if block.bindings.is_empty() {
        return String::new();
    }
    let bindings = block
        .bindings
        .iter()
        .map(render_binding)
        .collect::<Vec<_>>()
        .join(", ");
    match &block.condition {
        Some(c) => format!(", ∀ {bindings} | {}", render_comparison(c)),
        None => format!(", ∀ {bindings}"),
    }
}

/// Render an objective as `minimize expr` / `maximize expr`.
pub fn render_objective(objective: &ObjectiveDef) -> String {
    format!(
        "{} {}",
        objective.sense.keyword(),
        render_expression(&objective.expr)
    )
}

/// Render a set definition, eliding long element lists.
pub fn render_set(set: &SetDef) -> String {
    let elements = &set.elements;
    let listed = if elements.len() <= 5 {
        format!("{{{}}}", join_elements(elements))
    } else {
        format!(
            "{{{}, ..., {}}} ({} elements)",
            join_elements(&elements[..3]),
            elements[elements.len() - 1],
            elements.len()
        )
    };
    format!("{} = {listed}", set.name)
}

/// Render a parameter definition, eliding long value tables.
pub fn render_parameter(param: &ParamDef) -> String {
    let index_str = if param.indices.is_empty() {
        String::new()
    } else {
        format!("[{}]", param.indices.join(", "))
    };
    match &param.values {
        ParamValues::Scalar(v) => format!("{}{index_str} = {v}", param.name),
        ParamValues::Table(entries) => {
            let entry_str = |e: &ParamEntry| {
                format!("{}[{}] = {}", param.name, join_elements(&e.index), e.value)
            };
            if entries.len() <= 3 {
                entries.iter().map(entry_str).collect::<Vec<_>>().join(", ")
            } else {
                format!(
                    "{}, ... ({} values total)",
                    entries[..2].iter().map(entry_str).collect::<Vec<_>>().join(", "),
                    entries.len()
                )
            }
        }
    }
}

/// Render a variable declaration with its domain and optional bounds.
pub fn render_variable(variable: &VariableDef) -> String {
    let index_str = if variable.indices.is_empty() {
        String::new()
    } else {
        format!("[{}]", variable.indices.join(", "))
    };
    let mut out = format!(
        "{}{index_str} ∈ {}",
        variable.name,
        variable.domain.label()
    );
    if variable.lower_bound.is_some() || variable.upper_bound.is_some() {
        let lower = variable
            .lower_bound
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-∞".to_string());
        let upper = variable
            .upper_bound
            .map(|v| v.to_string())
            .unwrap_or_else(|| "∞".to_string());
        out.push_str(&format!(" ∈ [{lower}, {upper}]"));
    }
    out
}

/// Render a whole model as a sectioned text block.
///
/// The block doubles as display output and as the model state embedded into
/// AI prompts, so the layout is stable: one section per component kind, two
/// spaces of indentation per entry, a blank line between sections.
pub fn render_model(model: &ModelDef) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !model.sets.is_empty() {
        sections.push("Sets:".to_string());
        sections.extend(model.sets.iter().map(|s| format!("  {}", render_set(s))));
        sections.push(String::new());
    }

    if !model.parameters.is_empty() {
        sections.push("Parameters:".to_string());
        sections.extend(
            model
                .parameters
                .iter()
                .map(|p| format!("  {}", render_parameter(p))),
        );
        sections.push(String::new());
    }

    if !model.variables.is_empty() {
        sections.push("Variables:".to_string());
        sections.extend(
            model
                .variables
                .iter()
                .map(|v| format!("  {}", render_variable(v))),
        );
        sections.push(String::new());
    }

    if !model.constraints.is_empty() {
        sections.push("Constraints:".to_string());
        sections.extend(
            model
                .constraints
                .iter()
                .map(|c| format!("  {}: {}", c.name, render_constraint(c))),
        );
        sections.push(String::new());
    }

    if let Some(objective) = &model.objective {
        sections.push("Objective:".to_string());
        sections.push(format!("  {}", render_objective(objective)));
    }

    sections.join("\n")
}

fn join_elements(elements: &[SetElement]) -> String {
    elements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
