/// Convenience result type used across linform.
pub type ModelResult<T> = Result<T, ModelError>;

/// Top-level error taxonomy used by the model-building APIs.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// Invalid user-provided or component data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Empty or duplicate-index binding list on an aggregate or quantifier.
    #[error("invalid binding: {0}")]
    InvalidBinding(String),

    /// A replace target path that does not resolve in the given root.
    ///
    /// Lookups use `Option` instead; a missing node is an expected outcome
    /// during interactive editing and only `replace` treats it as an error.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// Errors when encoding or decoding the wire format.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModelError {
    /// Build a [`ModelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ModelError::InvalidBinding`] value.
    pub fn invalid_binding(msg: impl Into<String>) -> Self {
        Self::InvalidBinding(msg.into())
    }

    /// Build a [`ModelError::PathNotFound`] value.
    pub fn path_not_found(msg: impl Into<String>) -> Self {
        Self::PathNotFound(msg.into())
    }

    /// Build a [`ModelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
