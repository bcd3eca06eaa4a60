use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, FetchTicket, InputMode, LoadState, SortKey};
use crate::source::Fetcher;
use crate::ui;

/// What the loop should do after handling an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A fetch must be started for this ticket.
    Refetch(FetchTicket),
    Quit,
}

/// Draw, poll, dispatch until the user quits. Starts the initial fetch.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    fetcher: &Fetcher,
) -> Result<()> {
    fetcher.start(app.begin_fetch());

    loop {
        fetcher.pump(app);

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let flow = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => Flow::Continue,
        };
        match flow {
            Flow::Continue => {}
            Flow::Refetch(ticket) => fetcher.start(ticket),
            Flow::Quit => break,
        }
    }

    app.teardown();
    Ok(())
}

/// Route one key press according to the input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Flow::Continue;
    }
    match app.input_mode {
        InputMode::Search => handle_search_key(app, key),
        InputMode::Normal => match app.keymap.resolve(&key) {
            Some(action) => handle_action(app, action),
            None => Flow::Continue,
        },
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.on_clear_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            let mut term = app.search_query.clone();
            term.pop();
            app.on_search_change(term);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let term = format!("{}{}", app.search_query, c);
            app.on_search_change(term);
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_action(app: &mut AppState, action: KeyAction) -> Flow {
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::StartSearch => {
            if app.load_state == LoadState::Ready {
                app.input_mode = InputMode::Search;
            }
        }
        KeyAction::ClearSearch => app.on_clear_search(),
        KeyAction::SortById => app.on_sort_column_click(SortKey::Id),
        KeyAction::SortByName => app.on_sort_column_click(SortKey::Name),
        KeyAction::Retry => {
            if matches!(app.load_state, LoadState::Failed(_)) {
                return Flow::Refetch(app.on_retry());
            }
        }
        KeyAction::OpenHelp => app.show_help = true,
        KeyAction::MoveUp => app.select_prev(),
        KeyAction::MoveDown => app.select_next(),
        KeyAction::PageUp => app.page_up(),
        KeyAction::PageDown => app.page_down(),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

/// Left clicks on the ID/Name headers sort like the keyboard shortcuts.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Flow {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
        && app.load_state == LoadState::Ready
        && let Some(key) = app.header_at(mouse.column, mouse.row)
    {
        app.on_sort_column_click(key);
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{SortDirection, SortDirective};
    use crate::error::FetchError;
    use crate::model::UserRecord;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> AppState {
        let mut app = AppState::default();
        let t = app.begin_fetch();
        app.complete_fetch(
            t,
            Ok(vec![UserRecord::new(1, "Leanne Graham"), UserRecord::new(2, "Ervin Howell")]),
        );
        app
    }

    #[test]
    fn search_mode_updates_live() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);
        for c in "how".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.users.len(), 1);
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.search_query, "ho");
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search_query, "ho");
    }

    #[test]
    fn esc_in_search_clears_term() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_key(&mut app, press(KeyCode::Char('z')));
        assert!(app.users.is_empty());
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.search_query, "");
        assert_eq!(app.users.len(), 2);
    }

    #[test]
    fn typing_q_in_search_does_not_quit() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Flow::Continue);
        assert_eq!(app.search_query, "q");
    }

    #[test]
    fn sort_keys_drive_toggle() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.users[0].name, "Ervin Howell");
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.sort, SortDirective { key: SortKey::Name, direction: SortDirection::Descending });
        assert_eq!(app.users[0].name, "Leanne Graham");
    }

    #[test]
    fn retry_only_when_failed() {
        let mut app = ready_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Flow::Continue);

        let mut app = AppState::default();
        let t = app.begin_fetch();
        app.complete_fetch(t, Err(FetchError::Status(500)));
        assert!(matches!(handle_key(&mut app, press(KeyCode::Char('r'))), Flow::Refetch(_)));
        assert!(app.is_loading());
    }

    #[test]
    fn quit_key() {
        let mut app = ready_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Flow::Quit);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.sort, SortDirective::NONE);
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn header_click_sorts() {
        let mut app = ready_app();
        app.header_hitboxes = vec![(Rect::new(0, 0, 5, 1), SortKey::Id)];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, click);
        handle_mouse(&mut app, click);
        assert_eq!(app.sort, SortDirective { key: SortKey::Id, direction: SortDirection::Descending });
        assert_eq!(app.users[0].id, 2);
    }
}
