use crate::model::components::ModelDef;
use crate::render::text::render_model;

/// Render the live model state as the text block embedded verbatim into the
/// AI collaborator's system prompt.
///
/// The chat loop itself lives outside this crate; it concatenates this block
/// with its own instructions. An empty model is stated explicitly so the
/// language model is never left guessing whether components exist.
#[tracing::instrument(level = "debug", skip(model))]
pub fn model_context(model: &ModelDef) -> String {
    let state = if model.is_empty() {
        "The model is currently empty.".to_string()
    } else {
        render_model(model)
    };
    format!(
        "Here is the current state of the optimization model you are working with:\n\n{state}\n"
    )
}
