use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::{AppState, SortDirection, SortKey, Theme};

const ROW_HEIGHT: u16 = 2;

const WIDTHS: [Constraint; 4] = [
    Constraint::Length(6),
    Constraint::Percentage(30),
    Constraint::Percentage(25),
    Constraint::Percentage(45),
];

/// Header label with its sort indicator.
fn sort_header(label: &str, key: SortKey, app: &AppState) -> Cell<'static> {
    let (icon, icon_style) = match app.sort.direction_for(key) {
        Some(SortDirection::Ascending) => ("▲", Style::default().fg(app.theme.accent)),
        Some(SortDirection::Descending) => ("▼", Style::default().fg(app.theme.accent)),
        None => ("▲", Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM)),
    };
    Cell::from(Line::from(vec![
        Span::raw(format!("{label} ")),
        Span::styled(icon, icon_style),
    ]))
}

fn two_line(top: &str, bottom: String, theme: &Theme, bottom_color: ratatui::style::Color) -> Cell<'static> {
    Cell::from(Text::from(vec![
        Line::styled(top.to_string(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Line::styled(bottom, Style::default().fg(bottom_color)),
    ]))
}

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    // Header takes one line of the inner area.
    let body_height = inner.height.saturating_sub(1);
    let rows_fit = (body_height / ROW_HEIGHT) as usize;
    if rows_fit > 0 {
        app.rows_per_page = rows_fit;
    }

    let start = (app.selected_user_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.users.len());
    let slice = app.users.get(start..end).unwrap_or(&[]);
    let theme = app.theme;

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_user_index {
            Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else if absolute_index % 2 == 1 {
            Style::default().bg(theme.stripe_bg)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(Line::styled(u.id.to_string(), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))),
            two_line(&u.name, format!("@{}", u.username), &theme, theme.accent),
            two_line(&u.address.city, u.address.zipcode.clone(), &theme, theme.muted),
            two_line(&u.company.name, u.company.catch_phrase.clone(), &theme, theme.muted),
        ])
        .height(ROW_HEIGHT)
        .style(style)
    });

    let header = Row::new(vec![
        sort_header("ID", SortKey::Id, app),
        sort_header("Name", SortKey::Name, app),
        Cell::from("Address"),
        Cell::from("Company"),
    ])
    .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(block)
        .column_spacing(1)
        .flex(Flex::Start);

    f.render_widget(table, area);

    // Mirror the table's column layout so header clicks can be hit-tested.
    let header_line = Rect { height: inner.height.min(1), ..inner };
    let columns = Layout::horizontal(WIDTHS).flex(Flex::Start).spacing(1u16).split(header_line);
    app.header_hitboxes = vec![(columns[0], SortKey::Id), (columns[1], SortKey::Name)];
}
