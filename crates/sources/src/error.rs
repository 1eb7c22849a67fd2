//! Error types for remote data sources.
//!
//! Zero matches is never an error: sources return `Ok(vec![])` for that.
//! Every variant here means the source could not answer at all.

use data_loader::MediaType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level failure (DNS, connection refused, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// No response within the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Remote answered with a non-success status
    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded into the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Genre name could not be mapped to a remote genre id
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    /// The source does not serve this media type
    #[error("{provider} does not serve {media}")]
    Unsupported { provider: String, media: MediaType },
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout
        } else if e.is_decode() {
            SourceError::MalformedPayload(e.to_string())
        } else {
            SourceError::Http(e)
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SourceError>;
