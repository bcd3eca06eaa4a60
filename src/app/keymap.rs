//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only normal-mode keys go through the keymap. While the search prompt is
//! open every printable key is text, so the loop handles it directly.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Several key combinations may map to the same action (e.g. both `j` and
/// Down move down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Open the search prompt.
    StartSearch,
    /// Reset the search term to empty.
    ClearSearch,
    /// Same as clicking the ID column header.
    SortById,
    /// Same as clicking the Name column header.
    SortByName,
    /// Re-run the fetch after a failure.
    Retry,
    /// Show or hide the help overlay.
    OpenHelp,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Swallow the key.
    Ignore,
}

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('x')), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('i')), KeyAction::SortById);
        bindings.insert((M::NONE, Char('n')), KeyAction::SortByName);
        bindings.insert((M::NONE, Char('r')), KeyAction::Retry);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Some terminals report '?' with SHIFT held
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load a keymap from `path`, or write and return the defaults if the file doesn't exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a `<Action> = <KeySpec>` file on top of the defaults.
    ///
    /// Returns `None` if the file can't be read. Unparseable lines are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else { continue };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "skipping unparseable keybinding"),
            }
        }
        Some(map)
    }

    /// Write the default bindings in `<Action> = <KeySpec>` form.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdata-tui keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Up, Down, Left, Right, PageUp, PageDown, /, ?, i, n\n");
        buf.push_str("# Actions: Quit, StartSearch, ClearSearch, SortById, SortByName, Retry, OpenHelp, MoveUp, MoveDown, PageUp, PageDown, Ignore\n\n");

        let mut dump = self.all_bindings();
        dump.sort_by_key(|(key, action)| (format_action(*action), Self::format_key(key.0, key.1)));
        for ((mods, code), action) in dump {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), Self::format_key(mods, code));
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its action, if bound.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted, for help text.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key into a spec like "Ctrl+c" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else if mods.contains(KeyModifiers::SHIFT) {
            format!("Shift+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = if let Some(after) = s.strip_prefix("Ctrl+") {
        (KeyModifiers::CONTROL, after)
    } else if let Some(after) = s.strip_prefix("Shift+") {
        (KeyModifiers::SHIFT, after)
    } else {
        (KeyModifiers::NONE, s)
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "StartSearch" => Some(KeyAction::StartSearch),
        "ClearSearch" => Some(KeyAction::ClearSearch),
        "SortById" => Some(KeyAction::SortById),
        "SortByName" => Some(KeyAction::SortByName),
        "Retry" => Some(KeyAction::Retry),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::ClearSearch => "ClearSearch",
        KeyAction::SortById => "SortById",
        KeyAction::SortByName => "SortByName",
        KeyAction::Retry => "Retry",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}
