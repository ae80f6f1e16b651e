//! Error types for semantle.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SemantleError>;

#[derive(Debug, Error)]
pub enum SemantleError {
    /// Word absent from the vector store.
    #[error("not found: {0}")]
    NotFound(String),

    /// The queried puzzle day has no materialized nearest table yet.
    #[error("puzzle {0} is not active")]
    PuzzleNotActive(usize),

    /// Guess absent from both the nearest table and the vector store.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// Building a day's nearest table failed; nothing was published.
    #[error("activation of puzzle {index} failed: {reason}")]
    ActivationFailure { index: usize, reason: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SemantleError {
    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::PuzzleNotActive(_) => "puzzle_not_active",
            Self::UnknownWord(_) => "unknown_word",
            Self::ActivationFailure { .. } => "activation_failure",
            Self::InvalidRecord(_) => "invalid_record",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
        }
    }

    /// Lookup-style failures the caller is expected to branch on.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::PuzzleNotActive(_)
                | Self::UnknownWord(_)
                | Self::ActivationFailure { .. }
                | Self::InvalidRecord(_)
        )
    }
}
