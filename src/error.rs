// Error taxonomy shared by the filter core and the backend collaborators.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Network or backend failure while talking to a collaborator.
    #[error("fetch failed: {0}")]
    FetchFailure(String),

    /// A date string that is not a valid `DD-MM-YYYY` (or `YYYY-MM-DD` for form input).
    #[error("invalid date format: '{0}'")]
    InvalidDateFormat(String),

    /// A proposal was submitted with required fields left empty.
    #[error("missing required fields: {}", missing.join(", "))]
    ValidationFailure { missing: Vec<&'static str> },

    #[error("not found: {0}")]
    NotFound(String),

    /// The operation needs a signed-in user.
    #[error("sign in required")]
    Unauthenticated,

    /// Local persistence (files, locks, serialization) failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for EventError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(format!("{:#}", e))
    }
}

pub type EventResult<T> = Result<T, EventError>;
