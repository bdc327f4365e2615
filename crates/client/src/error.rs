//! Errors surfaced by the API client.
//!
//! Every variant is fatal for the call that produced it. The only condition
//! the client recovers from on its own is throttling (HTTP 429), which is
//! retried until [`RetriesExhausted`] is raised.
//!
//!  [`RetriesExhausted`]: ClientError::RetriesExhausted
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("{endpoint}: unexpected status {status}")]
    Status { status: StatusCode, endpoint: String },
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("malformed Content-Range header: {0}")]
    MalformedContentRange(String),
    #[error("{endpoint}: still throttled after {attempts} attempts")]
    RetriesExhausted { endpoint: String, attempts: u32 },
    #[error("expected exactly one record for {lookup}, found {found}")]
    NotUnique { lookup: String, found: usize },
    #[error("credentials rejected")]
    Unauthorized,
    #[error("authentication response does not contain a token")]
    MissingToken,
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
}
