use reqwest::StatusCode;

use crate::models::call::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Backend returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid day mapping: {0}")]
    Mapping(#[from] MappingError),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token unavailable: {0}")]
    Token(String),

    #[error("{0}")]
    Tracker(String),
}

impl ConsoleError {
    /// True for errors raised by the transport or by a non-2xx response.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ConsoleError::Network(_)
                | ConsoleError::Unauthorized(_)
                | ConsoleError::NotFound(_)
                | ConsoleError::Http { .. }
        )
    }
}

/// A day number or day key outside the fixed seven-day table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("day index {0} is outside 0..=6")]
    IndexOutOfRange(i64),

    #[error("unknown day key '{0}'")]
    UnknownKey(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
