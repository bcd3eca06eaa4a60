use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use super::UserSource;
use crate::app::{AppState, FetchTicket};
use crate::error::FetchResult;
use crate::model::UserRecord;

/// Result of one fetch invocation, tagged with the ticket it was started for.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: FetchResult<Vec<UserRecord>>,
}

/// Runs a `UserSource` on worker threads and collects their outcomes.
///
/// The UI thread never blocks on the network: it starts a fetch, keeps
/// drawing, and drains finished outcomes each tick. Whether an outcome is
/// still wanted is decided by `AppState::complete_fetch`.
pub struct Fetcher {
    source: Arc<dyn UserSource>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    /// Spawn a worker fetching for `ticket`.
    pub fn start(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch_users();
            // The receiver is gone once the view is dropped; nothing to do then.
            let _ = tx.send(FetchOutcome { ticket, result });
        });
    }

    /// Next finished outcome, if any, without blocking.
    pub fn try_next(&self) -> Option<FetchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next outcome arrives.
    pub fn wait_next(&self) -> Option<FetchOutcome> {
        self.rx.recv().ok()
    }

    /// Feed every finished outcome into `app`. Returns whether any applied.
    pub fn pump(&self, app: &mut AppState) -> bool {
        let mut applied = false;
        while let Some(outcome) = self.try_next() {
            applied |= app.complete_fetch(outcome.ticket, outcome.result);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::source::StaticUserSource;

    #[test]
    fn outcome_carries_its_ticket() {
        let fetcher = Fetcher::new(Arc::new(StaticUserSource::ok(vec![UserRecord::new(7, "Kurtis Weissnat")])));
        fetcher.start(FetchTicket(42));
        let outcome = fetcher.wait_next().unwrap();
        assert_eq!(outcome.ticket, FetchTicket(42));
        assert_eq!(outcome.result.unwrap()[0].id, 7);
    }

    #[test]
    fn wait_then_apply_failure() {
        let fetcher = Fetcher::new(Arc::new(StaticUserSource::failing(FetchError::Status(503))));
        let mut app = AppState::default();
        let t = app.begin_fetch();
        fetcher.start(t);
        let outcome = fetcher.wait_next().unwrap();
        assert!(app.complete_fetch(outcome.ticket, outcome.result));
        assert_eq!(app.error_message(), Some(FetchError::USER_MESSAGE));
    }
}
