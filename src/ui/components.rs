//! Shared UI components (status bar, state panels, help modal).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};

/// Footer text: "Showing N of M users" while searching, else "M total users".
pub fn count_summary(app: &AppState) -> String {
    let snap = app.snapshot();
    if app.search_query.is_empty() {
        format!("{} total users", snap.total_count)
    } else {
        format!("Showing {} of {} users", snap.displayed_count, snap.total_count)
    }
}

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
    };
    let msg = if app.snapshot().error_message.is_some() || app.is_loading() {
        format!("mode: {mode}  ?: help  q: quit")
    } else {
        format!("mode: {mode}  {}  ?: help  q: quit", count_summary(app))
    };
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(36, 6, area);
    let lines = vec![
        Line::from(Span::styled(
            "Loading Users",
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled("Please wait...", Style::default().fg(app.theme.muted))),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Error panel with the failure message and the retry hint.
pub fn render_error(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(message) = app.error_message() else { return };
    let retry_keys = app.keymap.keys_for(KeyAction::Retry).join("/");
    let rect = centered_rect(48, 8, area);
    let lines = vec![
        Line::from(Span::styled(
            "Error Loading Data",
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(message, Style::default().fg(app.theme.error))),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(retry_keys, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to retry"),
        ]),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Drawn over the empty table when the search term matches nothing.
pub fn render_no_results(f: &mut Frame, area: Rect, app: &AppState) {
    let clear_keys = app.keymap.keys_for(KeyAction::ClearSearch).join("/");
    let width = 56u16.min(area.width.saturating_sub(4)).max(30);
    let rect = centered_rect(width, 7, area);
    let lines = vec![
        Line::from(Span::styled(
            "No Results Found",
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::raw("No users match your search for \""),
            Span::styled(app.search_query.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("\""),
        ]),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(clear_keys, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to clear search"),
        ]),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal listing the bound keys for each action.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 60u16.min(area.width.saturating_sub(4)).max(40);
    let height = 18u16.min(area.height.saturating_sub(2)).max(8);
    let rect = centered_rect(width, height, area);

    let entries = [
        ("Search", KeyAction::StartSearch),
        ("Clear search", KeyAction::ClearSearch),
        ("Sort by ID", KeyAction::SortById),
        ("Sort by name", KeyAction::SortByName),
        ("Retry after error", KeyAction::Retry),
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Page up", KeyAction::PageUp),
        ("Page down", KeyAction::PageDown),
        ("Help", KeyAction::OpenHelp),
        ("Quit", KeyAction::Quit),
    ];
    let label_w = entries.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut lines: Vec<Line> = Vec::with_capacity(entries.len() + 4);
    for (label, action) in entries {
        let keys = app.keymap.keys_for(action).join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("  Clicking the ID or Name header also sorts."));
    lines.push(Line::raw("  In search: type to filter, Enter keeps, Esc clears."));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
