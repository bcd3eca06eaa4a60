//! User records as served by the data source.
//!
//! Only the fields the table shows are kept; anything else in the payload
//! (`email`, `phone`, `geo`, ...) is ignored while decoding.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub city: String,
    pub zipcode: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
}

/// One row of the users table. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub address: Address,
    pub company: Company,
}

impl UserRecord {
    /// Build a record with empty display-only fields.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            username: String::new(),
            address: Address { city: String::new(), zipcode: String::new() },
            company: Company { name: String::new(), catch_phrase: String::new() },
        }
    }
}
