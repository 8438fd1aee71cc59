pub type EspressoResult<T> = Result<T, EspressoError>;

/// Error taxonomy shared by the whole crate.
///
/// Engine-level degenerate inputs (zero-frame animations, zero-width reveal windows) are clamped
/// and never surface here.
#[derive(thiserror::Error, Debug)]
pub enum EspressoError {
    /// Invalid input: malformed document, unknown identifier, out-of-range frame.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced local resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborator (sink, writer, thread pool) failed; carries its diagnostic text.
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EspressoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
