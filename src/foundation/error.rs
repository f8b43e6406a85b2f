/// Convenience result type used across habit-screen.
pub type HabitResult<T> = Result<T, HabitError>;

/// Top-level error taxonomy used by the renderer, the output manager and the habit book.
#[derive(thiserror::Error, Debug)]
pub enum HabitError {
    /// Invalid user-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or compositing the card.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while persisting or publishing a rendered file.
    #[error("output error: {0}")]
    Output(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HabitError {
    /// Build a [`HabitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HabitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HabitError::Output`] value.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Build a [`HabitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
