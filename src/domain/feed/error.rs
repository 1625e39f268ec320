use crate::error::AppError;
use std::fmt;

/// Why one address could not contribute entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("unparsable document")]
    Unparsable,
}

/// A [`FetchError`] keyed by the address it happened on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub address: String,
    pub error: FetchError,
}

impl FetchFailure {
    pub fn new(address: impl Into<String>, error: FetchError) -> Self {
        Self {
            address: address.into(),
            error,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeedServiceError {
    #[error("failed to compose feed: {0}")]
    Compose(String),
}

impl From<FeedServiceError> for AppError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::Compose(msg) => AppError::Internal(msg),
        }
    }
}
