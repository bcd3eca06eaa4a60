//! Error and result types.
//!
//! `FetchError` is the single failure kind of the data source. Its variants
//! only exist for logging; the view shows [`FetchError::USER_MESSAGE`] for
//! all of them.

use thiserror::Error;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Failure to obtain a usable record set from the data source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The body was not a JSON array of user records.
    #[error("invalid JSON payload: {0}")]
    Decode(String),
    /// The body decoded but broke a record-set invariant.
    #[error("invalid record set: {0}")]
    Invalid(String),
}

impl FetchError {
    /// The message shown to the user for every variant.
    pub const USER_MESSAGE: &'static str = "Failed to fetch users";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
