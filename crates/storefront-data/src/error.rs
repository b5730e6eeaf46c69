//! Errors talking to the storefront backend.

use storefront_core::CommerceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body was not what we expected.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    Timeout,

    /// A request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    EncodeError(String),
}

impl FetchError {
    /// Status code of an HTTP error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the request itself (4xx), as opposed to
    /// failing to handle it.
    pub fn is_rejection(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::EncodeError(e.to_string())
    }
}

/// 4xx responses carry the backend's reason and surface as validation
/// errors; everything else is an API failure.
impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } if (400..500).contains(&status) => {
                CommerceError::Validation(format!("rejected by server ({}): {}", status, message))
            }
            other => CommerceError::Api(other.to_string()),
        }
    }
}
