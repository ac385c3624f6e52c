/// Convenience result type used across public APIs.
pub type GlassResult<T> = Result<T, GlassError>;

/// Top-level error type for the edges of the engine.
///
/// The per-frame core (registry, packer, pixel pipeline) never fails: bad inputs degrade to the
/// identity effect. Errors only surface while loading scenes, reading or writing images and
/// sizing output buffers.
#[derive(thiserror::Error, Debug)]
pub enum GlassError {
    /// Input failed semantic or structural validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rendering could not be carried out with the given buffers or settings.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Scene (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem or image codec failure.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlassError {
    /// Build a [`GlassError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlassError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`GlassError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`GlassError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
