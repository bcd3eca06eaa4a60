//! View derivation: filter the raw record set by the search term, then order
//! it by the active sort directive.
//!
//! Everything here is pure. `apply_search` is the only entry point that
//! touches `AppState`, and it only writes the derived rows back.

use std::cmp::Ordering;

use crate::app::{AppState, SortDirection, SortDirective, SortKey};
use crate::model::UserRecord;

/// Case-insensitive substring match against the stringified id or the name.
///
/// `needle` must already be lowercase. An empty needle matches everything.
pub fn matches_term(user: &UserRecord, needle: &str) -> bool {
    user.id.to_string().to_lowercase().contains(needle)
        || user.name.to_lowercase().contains(needle)
}

/// Order two records under `sort`. Returns `Equal` when no key is active.
pub fn compare_records(a: &UserRecord, b: &UserRecord, sort: SortDirective) -> Ordering {
    let ord = match sort.key {
        SortKey::None => return Ordering::Equal,
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    };
    match sort.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Produce the rows to display from `(records, term, sort)`.
///
/// The input slice is never touched; the result is a fresh vector holding a
/// subset of `records`. Without a sort key the original relative order is
/// kept. With one, ties keep their original relative order as well since
/// the sort is stable.
pub fn derive_view(records: &[UserRecord], term: &str, sort: SortDirective) -> Vec<UserRecord> {
    let needle = term.to_lowercase();
    let mut rows: Vec<UserRecord> = records
        .iter()
        .filter(|u| matches_term(u, &needle))
        .cloned()
        .collect();

    if sort.key != SortKey::None {
        rows.sort_by(|a, b| compare_records(a, b, sort));
    }
    rows
}

/// Recompute `app.users` from `app.users_all` and reset the selection.
pub fn apply_search(app: &mut AppState) {
    app.users = derive_view(&app.users_all, &app.search_query, app.sort);
    app.selected_user_index = 0.min(app.users.len().saturating_sub(1));
}
