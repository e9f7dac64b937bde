//! Recommendation fetch errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Transport failure, non-success status, or a body that is not JSON.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    /// JSON that does not match the backend contract.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::FetchFailed(e.to_string())
    }
}
