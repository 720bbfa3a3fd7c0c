/// Convenience result type used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy. Every variant aborts the run; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration, composition data, or a broken scene invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Caption markup that cannot be parsed.
    #[error("markup error: {0}")]
    Markup(String),

    /// A layout rule that references something that does not exist.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while recording or sampling animations.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating timeline state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors while rasterizing or encoding frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Markup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Build a [`ReelError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`ReelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
