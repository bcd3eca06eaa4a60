//! Data source layer: where the record set comes from.
//!
//! `UserSource` is the seam between the view and the network. The HTTP
//! implementation lives in `http`; `fetcher` runs a source off the UI thread
//! and hands outcomes back tagged with the ticket they were started for.

mod fetcher;
mod http;

pub use fetcher::{FetchOutcome, Fetcher};
pub use http::{DEFAULT_TIMEOUT, DEFAULT_USERS_URL, HttpUserSource};

use std::collections::HashSet;

use crate::error::{FetchError, FetchResult};
use crate::model::UserRecord;

/// Anything that can produce a full record set in one call.
pub trait UserSource: Send + Sync {
    fn fetch_users(&self) -> FetchResult<Vec<UserRecord>>;
}

/// Check the record-set invariants: positive, unique ids and non-empty names.
pub fn validate_records(records: &[UserRecord]) -> FetchResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for u in records {
        if u.id == 0 {
            return Err(FetchError::Invalid("record with id 0".to_string()));
        }
        if !seen.insert(u.id) {
            return Err(FetchError::Invalid(format!("duplicate id {}", u.id)));
        }
        if u.name.is_empty() {
            return Err(FetchError::Invalid(format!("record {} has an empty name", u.id)));
        }
    }
    Ok(())
}

/// In-memory source that always returns the same outcome.
#[derive(Clone, Debug)]
pub struct StaticUserSource {
    outcome: FetchResult<Vec<UserRecord>>,
}

impl StaticUserSource {
    pub fn ok(records: Vec<UserRecord>) -> Self {
        Self { outcome: Ok(records) }
    }

    pub fn failing(err: FetchError) -> Self {
        Self { outcome: Err(err) }
    }
}

impl UserSource for StaticUserSource {
    fn fetch_users(&self) -> FetchResult<Vec<UserRecord>> {
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_set() {
        let rs = vec![UserRecord::new(1, "a"), UserRecord::new(2, "b")];
        assert!(validate_records(&rs).is_ok());
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn validate_rejects_zero_duplicate_and_blank() {
        assert!(matches!(
            validate_records(&[UserRecord::new(0, "a")]),
            Err(FetchError::Invalid(_))
        ));
        assert!(matches!(
            validate_records(&[UserRecord::new(3, "a"), UserRecord::new(3, "b")]),
            Err(FetchError::Invalid(msg)) if msg.contains("duplicate id 3")
        ));
        assert!(matches!(
            validate_records(&[UserRecord::new(4, "")]),
            Err(FetchError::Invalid(_))
        ));
    }
}
