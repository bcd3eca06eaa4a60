//! Library crate for userdata-tui.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, sort toggle and update loop (`app`)
//! - Command line configuration and logging setup (`config`)
//! - Error types (`error`)
//! - User records (`model`)
//! - View derivation: filtering and sorting (`search`)
//! - Data source: HTTP fetch and background fetcher (`source`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdata-tui` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use error::{FetchError, FetchResult};
pub use model::UserRecord;
pub use search::derive_view;
