//! Rendering entry point.
//!
//! Loading and error panels replace the table wholesale; the table is only
//! drawn once the record set is ready.

pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, LoadState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());

    render_header(f, root[0], app);

    app.header_hitboxes.clear();
    match app.load_state {
        LoadState::Loading => components::render_loading(f, root[1], app),
        LoadState::Failed(_) => components::render_error(f, root[1], app),
        LoadState::Ready => {
            users::render_users_table(f, root[1], app);
            if app.users.is_empty() && !app.search_query.is_empty() {
                components::render_no_results(f, root[1], app);
            }
        }
    }

    components::render_status_bar(f, root[2], app);

    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let prompt_style = match app.input_mode {
        InputMode::Search => Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
        InputMode::Normal => Style::default().fg(app.theme.muted),
    };
    let search = if app.search_query.is_empty() && app.input_mode == InputMode::Normal {
        Span::styled("Search by ID or Name... (/)", Style::default().fg(app.theme.muted))
    } else {
        let cursor = if app.input_mode == InputMode::Search { "▏" } else { "" };
        Span::styled(format!("{}{}", app.search_query, cursor), Style::default().fg(app.theme.text))
    };
    let mut spans = vec![
        Span::styled("User Data", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("Search: ", prompt_style),
        search,
    ];
    if !app.search_query.is_empty() {
        spans.push(Span::styled("  [x] clear", Style::default().fg(app.theme.muted)));
    }
    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title("userdata-tui")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::model::UserRecord;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn loading_panel_hides_table() {
        let mut app = AppState::default();
        app.begin_fetch();
        let text = screen_text(&mut app);
        assert!(text.contains("Loading Users"));
        assert!(!text.contains("Company"));
    }

    #[test]
    fn error_panel_shows_message() {
        let mut app = AppState::default();
        let t = app.begin_fetch();
        app.complete_fetch(t, Err(FetchError::Status(500)));
        let text = screen_text(&mut app);
        assert!(text.contains("Error Loading Data"));
        assert!(text.contains("Failed to fetch users"));
        assert!(app.header_hitboxes.is_empty());
    }

    #[test]
    fn table_rows_and_counts() {
        let mut app = AppState::default();
        let t = app.begin_fetch();
        app.complete_fetch(t, Ok(vec![UserRecord::new(1, "Leanne Graham"), UserRecord::new(2, "Ervin Howell")]));
        let text = screen_text(&mut app);
        assert!(text.contains("Leanne Graham"));
        assert!(text.contains("2 total users"));
        assert_eq!(app.header_hitboxes.len(), 2);

        app.on_search_change("how");
        let text = screen_text(&mut app);
        assert!(text.contains("Showing 1 of 2 users"));
        assert!(!text.contains("Leanne Graham"));
    }

    #[test]
    fn no_results_panel_names_term() {
        let mut app = AppState::default();
        let t = app.begin_fetch();
        app.complete_fetch(t, Ok(vec![UserRecord::new(1, "Leanne Graham")]));
        app.on_search_change("zzz");
        let text = screen_text(&mut app);
        assert!(text.contains("No Results Found"));
        assert!(text.contains("\"zzz\""));
    }
}
