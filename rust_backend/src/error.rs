//! Error types for skill evaluation.

/// Result type for skill evaluation operations
pub type SkillResult<T> = Result<T, SkillError>;

/// Error type for skill evaluation operations
///
/// Every variant is terminal for the computation that raised it; no partial
/// report is ever produced alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkillError {
    /// Malformed geometric or temporal input (out-of-range coordinates,
    /// negative duration or radius, non-finite values, bad options).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Skill calculation requested on predictions that are not fully tested
    /// or lack an asserted probability.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A resample whose expected hit rate is zero, so its information ratio
    /// is undefined.
    #[error("Degenerate input in sample {sample}: {reason}")]
    DegenerateInput { sample: usize, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SkillError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SkillError::InvalidInput(message.into())
    }
}
