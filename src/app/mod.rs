//! Application state types and entry glue.
//!
//! Defines the sort directive and its toggle machine, the load state of the
//! record set, and `AppState`, which owns all view data and exposes the
//! inputs the UI layer drives (search, clear, sort click, retry). The event
//! loop is re-exported as `run`.
//!
pub mod keymap;
pub mod update;

use std::path::{Path, PathBuf};

use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::error::FetchError;
use crate::model::UserRecord;
use crate::search::apply_search;

/// Column a sort directive orders by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    None,
    Id,
    Name,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active (key, direction) pair controlling row order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortDirective {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortDirective {
    /// Initial state: no ordering beyond the fetch order.
    pub const NONE: Self = Self { key: SortKey::None, direction: SortDirection::Ascending };

    /// Next state after the header for `key` was clicked.
    ///
    /// A different key starts ascending; the same key flips direction. Once a
    /// key is chosen the directive never returns to `SortKey::None`.
    /// Clicking `SortKey::None` is not a column and leaves the state alone.
    pub fn toggle(self, key: SortKey) -> Self {
        if key == SortKey::None {
            return self;
        }
        if self.key != key {
            return Self { key, direction: SortDirection::Ascending };
        }
        let direction = match self.direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
        Self { key, direction }
    }

    /// Direction shown for `key`'s header, if it is the active column.
    pub fn direction_for(&self, key: SortKey) -> Option<SortDirection> {
        (self.key != SortKey::None && self.key == key).then_some(self.direction)
    }
}

impl Default for SortDirective {
    fn default() -> Self {
        Self::NONE
    }
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Where the record set stands. Loading and failure are exclusive and both
/// hide the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(FetchError),
    Ready,
}

/// Token identifying one fetch invocation. Only the most recent ticket of a
/// mounted view may apply its outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket(pub u64);

/// What the presentation layer reads each frame.
#[derive(Debug, PartialEq, Eq)]
pub struct ViewSnapshot<'a> {
    pub loading: bool,
    pub error_message: Option<&'static str>,
    pub displayed: &'a [UserRecord],
    pub total_count: usize,
    pub displayed_count: usize,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub accent: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub stripe_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Default theme: slate neutrals with indigo accents.
    pub fn indigo() -> Self {
        Self {
            text: Color::Rgb(0xe2, 0xe8, 0xf0),         // slate-200
            muted: Color::Rgb(0x94, 0xa3, 0xb8),        // slate-400
            title: Color::Rgb(0xa5, 0xb4, 0xfc),        // indigo-300
            accent: Color::Rgb(0x81, 0x8c, 0xf8),       // indigo-400
            border: Color::Rgb(0x47, 0x55, 0x69),       // slate-600
            header_bg: Color::Rgb(0x1e, 0x29, 0x3b),    // slate-800
            header_fg: Color::Rgb(0xc7, 0xd2, 0xfe),    // indigo-200
            status_bg: Color::Rgb(0x33, 0x41, 0x55),    // slate-700
            status_fg: Color::Rgb(0xe2, 0xe8, 0xf0),
            highlight_fg: Color::Rgb(0xfd, 0xe6, 0x8a), // amber-200
            highlight_bg: Color::Rgb(0x31, 0x2e, 0x81), // indigo-900
            stripe_bg: Color::Rgb(0x17, 0x1f, 0x33),
            error: Color::Rgb(0xf8, 0x71, 0x71),        // red-400
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `indigo`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::indigo();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let (key, val) = (key.trim(), val.trim());
            let Some(color) = Self::parse_color(val) else { continue };
            match key {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "accent" => theme.accent = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "stripe_bg" => theme.stripe_bg = color,
                "error" => theme.error = color,
                _ => {}
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdata-tui theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::White => "#FFFFFF".to_string(),
                // Anything else has no stable hex form
                _ => "reset".to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("accent", self.accent);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("stripe_bg", self.stripe_bg);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Load the theme at `path`, writing the default there first if missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::indigo);
        }
        let t = Self::indigo();
        if let Err(e) = t.write_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::indigo()
    }
}

/// Resolve a config file name inside `dir`.
pub fn config_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// All state of the users view.
///
/// `users_all` is the raw record set and is never reordered. `users` holds
/// the derived rows and is recomputed whenever the records, the search term,
/// or the sort directive change.
pub struct AppState {
    pub users_all: Vec<UserRecord>,
    pub users: Vec<UserRecord>,
    pub load_state: LoadState,
    pub search_query: String,
    pub sort: SortDirective,
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub show_help: bool,
    /// Screen regions of the sortable headers, filled in while rendering.
    pub header_hitboxes: Vec<(Rect, SortKey)>,
    fetch_seq: u64,
    current_ticket: Option<FetchTicket>,
    mounted: bool,
}

impl AppState {
    /// Fresh view: loading, empty search, no sort.
    pub fn new(theme: Theme, keymap: keymap::Keymap) -> Self {
        Self {
            users_all: Vec::new(),
            users: Vec::new(),
            load_state: LoadState::Loading,
            search_query: String::new(),
            sort: SortDirective::NONE,
            selected_user_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            theme,
            keymap,
            show_help: false,
            header_hitboxes: Vec::new(),
            fetch_seq: 0,
            current_ticket: None,
            mounted: true,
        }
    }

    /// Enter the loading state and hand out the ticket for a new fetch.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        let ticket = FetchTicket(self.fetch_seq);
        self.current_ticket = Some(ticket);
        self.load_state = LoadState::Loading;
        tracing::debug!(ticket = ticket.0, "fetch started");
        ticket
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when the ticket is stale or the
    /// view was torn down.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<UserRecord>, FetchError>,
    ) -> bool {
        if !self.mounted || self.current_ticket != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "dropping stale fetch outcome");
            return false;
        }
        self.current_ticket = None;
        match outcome {
            Ok(records) => {
                tracing::info!(count = records.len(), "users loaded");
                self.users_all = records;
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetching users failed");
                self.users_all.clear();
                self.load_state = LoadState::Failed(e);
            }
        }
        apply_search(self);
        true
    }

    /// Replace the search term.
    pub fn on_search_change(&mut self, term: impl Into<String>) {
        self.search_query = term.into();
        apply_search(self);
    }

    /// Reset the search term to empty.
    pub fn on_clear_search(&mut self) {
        self.on_search_change(String::new());
    }

    /// A sortable column header was clicked.
    pub fn on_sort_column_click(&mut self, key: SortKey) {
        let next = self.sort.toggle(key);
        if next != self.sort {
            tracing::debug!(?next, "sort changed");
            self.sort = next;
            apply_search(self);
        }
    }

    /// Restart just the fetch. Search term and sort are kept.
    pub fn on_retry(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Mark the view as gone; outstanding fetches will be ignored.
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.current_ticket = None;
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match &self.load_state {
            LoadState::Failed(e) => Some(e.user_message()),
            _ => None,
        }
    }

    /// The outputs the presentation layer renders from.
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let displayed: &[UserRecord] = match self.load_state {
            LoadState::Ready => self.users.as_slice(),
            LoadState::Loading | LoadState::Failed(_) => &[],
        };
        ViewSnapshot {
            loading: self.is_loading(),
            error_message: self.error_message(),
            displayed,
            total_count: self.users_all.len(),
            displayed_count: displayed.len(),
        }
    }

    /// The currently highlighted row, if any.
    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users.get(self.selected_user_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_user_index + 1 < self.users.len() {
            self.selected_user_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_user_index = self.selected_user_index.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let rpp = self.rows_per_page.max(1);
        let new_idx = self.selected_user_index.saturating_add(rpp);
        self.selected_user_index = new_idx.min(self.users.len().saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_user_index = self.selected_user_index.saturating_sub(rpp);
    }

    /// Sortable header under the terminal cell `(column, row)`, if any.
    pub fn header_at(&self, column: u16, row: u16) -> Option<SortKey> {
        self.header_hitboxes
            .iter()
            .find(|(r, _)| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|(_, k)| *k)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default(), keymap::Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
