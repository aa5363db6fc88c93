use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ScreeningError {
    /// Empty/invalid query. Rejected before any I/O; the only error
    /// kind that ever reaches the caller.
    #[error("Invalid screening input: {0}")]
    Validation(String),

    /// Record store unavailable or timed out. Recovered locally by
    /// continuing on a partial candidate set with a degraded flag.
    #[error("Candidate retrieval failed: {0}")]
    Retrieval(String),

    /// Malformed candidate record. The record is skipped and the
    /// batch continues.
    #[error("Candidate scoring failed: {0}")]
    Scoring(String),

    /// Embedding or explanation provider failure. Swallowed; the
    /// feature is disabled for the request.
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScreeningError>;
