//! Reqwest-backed user source.
//!
//! Owns transport details only: the GET request, timeout, status mapping and
//! JSON decoding into `UserRecord`s.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use super::{UserSource, validate_records};
use crate::error::{FetchError, FetchResult};
use crate::model::UserRecord;

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("userdata-tui/", env!("CARGO_PKG_VERSION"));

pub struct HttpUserSource {
    client: Client,
    url: String,
}

impl HttpUserSource {
    /// Build a source for `url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> FetchResult<Vec<UserRecord>> {
        tracing::info!(url = %self.url, "fetching users");
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes()?;
        parse_users(&body)
    }
}

fn parse_users(body: &[u8]) -> FetchResult<Vec<UserRecord>> {
    let users: Vec<UserRecord> = serde_json::from_slice(body)?;
    validate_records(&users)?;
    Ok(users)
}
