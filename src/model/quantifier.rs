use crate::expr::model::{Comparison, IndexBinding};
use crate::foundation::error::{ModelError, ModelResult};
use crate::model::components::ConstraintDef;
use crate::tree::navigator::TreeState;
use crate::tree::path::TreePath;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Quantifier block attached to a constraint: the index bindings its body
/// ranges over, plus an optional condition filtering the binding tuple.
///
/// A block always carries at least one binding; "no bindings" is encoded as
/// an absent block on the constraint. Removing the last binding therefore
/// discards the whole block, condition included: a condition has nothing to
/// quantify over without bindings.
pub struct QuantifierBlock {
    /// Index bindings, in iteration order.
    pub bindings: Vec<IndexBinding>,
    /// Optional filter over the full binding tuple (e.g. `i != j`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Comparison>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which half of a binding an edit targets.
pub enum BindingField {
    /// The index variable symbol.
    Index,
    /// The set name the index ranges over.
    Over,
}

impl QuantifierBlock {
    /// Block from a validated binding list.
    ///
    /// Fails with [`ModelError::InvalidBinding`] when the list is empty, a
    /// symbol repeats, or a binding is incompletely named.
    pub fn new(bindings: Vec<IndexBinding>, condition: Option<Comparison>) -> ModelResult<Self> {
        IndexBinding::ensure_complete_list(&bindings)?;
        Ok(Self {
            bindings,
            condition,
        })
    }

    /// Validate bindings and condition.
    pub fn validate(&self) -> ModelResult<()> {
        IndexBinding::validate_list(&self.bindings)?;
        if let Some(c) = &self.condition {
            c.validate()?;
        }
        Ok(())
    }

    /// Append a blank binding, creating the block when absent.
    pub fn with_added_binding(block: Option<&Self>) -> Self {
        match block {
            None => Self {
                bindings: vec![IndexBinding::new("", "")],
                condition: None,
            },
            Some(existing) => {
                let mut bindings = existing.bindings.clone();
                bindings.push(IndexBinding::new("", ""));
                Self {
                    bindings,
                    condition: existing.condition.clone(),
                }
            }
        }
    }

    /// Replace one field of binding `i`. An out-of-range `i` is a caller
    /// error, not an expected editing outcome.
    pub fn with_updated_binding(
        &self,
        i: usize,
        field: BindingField,
        value: &str,
    ) -> ModelResult<Self> {
        if i >= self.bindings.len() {
            return Err(ModelError::validation(format!(
                "binding index {i} out of range ({} bindings)",
                self.bindings.len()
            )));
        }
        let mut bindings = self.bindings.clone();
        match field {
            BindingField::Index => bindings[i].index = value.to_string(),
            BindingField::Over => bindings[i].over = value.to_string(),
        }
        Ok(Self {
            bindings,
            condition: self.condition.clone(),
        })
    }

    /// Remove binding `i`. Removing the last binding yields `None`: the
    /// block and any condition are discarded together.
    pub fn with_removed_binding(&self, i: usize) -> ModelResult<Option<Self>> {
        if i >= self.bindings.len() {
            return Err(ModelError::validation(format!(
                "binding index {i} out of range ({} bindings)",
                self.bindings.len()
            )));
        }
        let mut bindings = self.bindings.clone();
        bindings.remove(i);
        if bindings.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            bindings,
            condition: self.condition.clone(),
        }))
    }
}

impl ConstraintDef {
    /// Copy with a blank binding appended, creating the quantifier block
    /// when the constraint was scalar.
    pub fn with_binding_added(&self) -> Self {
        Self {
            quantifiers: Some(QuantifierBlock::with_added_binding(
                self.quantifiers.as_ref(),
            )),
            ..self.clone()
        }
    }

    /// Copy with one field of binding `i` replaced.
    pub fn with_binding_updated(
        &self,
        i: usize,
        field: BindingField,
        value: &str,
    ) -> ModelResult<Self> {
        let Some(block) = &self.quantifiers else {
            return Err(ModelError::validation(
                "constraint has no quantifier block to update",
            ));
        };
        Ok(Self {
            quantifiers: Some(block.with_updated_binding(i, field, value)?),
            ..self.clone()
        })
    }

    /// Copy with binding `i` removed; the whole block (condition included)
    /// goes when the last binding does.
    pub fn with_binding_removed(&self, i: usize) -> ModelResult<Self> {
        let Some(block) = &self.quantifiers else {
            return Err(ModelError::validation(
                "constraint has no quantifier block to update",
            ));
        };
        Ok(Self {
            quantifiers: block.with_removed_binding(i)?,
            ..self.clone()
        })
    }

    /// Copy with a default `(0 = 0)` condition attached to the quantifier
    /// block, auto-selected and auto-expanded in `nav` so it is immediately
    /// editable.
    ///
    /// A no-op when the constraint has no binding block (nothing to quantify
    /// a condition over) or when a condition already exists.
    pub fn with_condition_added(&self, nav: &mut TreeState) -> Self {
        let Some(block) = &self.quantifiers else {
            return self.clone();
        };
        if block.condition.is_some() {
            return self.clone();
        }
        let condition_path = TreePath::root(nav.root_key())
            .field("quantifiers")
            .field("condition");
        nav.select(condition_path.clone());
        nav.expand(condition_path);
        Self {
            quantifiers: Some(QuantifierBlock {
                bindings: block.bindings.clone(),
                condition: Some(Comparison::default()),
            }),
            ..self.clone()
        }
    }

    /// Copy with the quantifier condition detached; bindings stay.
    pub fn with_condition_removed(&self) -> Self {
        match &self.quantifiers {
            Some(block) if block.condition.is_some() => Self {
                quantifiers: Some(QuantifierBlock {
                    bindings: block.bindings.clone(),
                    condition: None,
                }),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/quantifier.rs"]
mod tests;
