//! Club directory widget.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::{input_lines, truncate};
use crate::state::{CATEGORY_FILTERS, InputMode, Store};

/// Club list with search and category filter.
pub struct ClubList;

impl ClubList {
    /// Render the clubs view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        Self::render_search(frame, rows[0], store);
        Self::render_filters(frame, rows[1], store);
        Self::render_table(frame, rows[2], store);
    }

    fn render_search(frame: &mut Frame, area: Rect, store: &Store) {
        let focused = store.app.input_mode == InputMode::ClubSearch;
        let search = &store.clubs.search;
        let line = if search.is_empty() && !focused {
            Line::from(Span::styled(
                "Press i to search clubs",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            input_lines(search.value(), search.cursor(), focused).remove(0)
        };

        let border = if focused { Color::Green } else { Color::DarkGray };
        frame.render_widget(
            Paragraph::new(line).block(
                Block::default()
                    .title(" 🔍 Search ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            ),
            area,
        );
    }

    fn render_filters(frame: &mut Frame, area: Rect, store: &Store) {
        let mut spans = vec![Span::raw(" ")];
        for filter in CATEGORY_FILTERS {
            let label = filter.map(|c| c.label()).unwrap_or("All");
            let style = if filter == store.clubs.category {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("(f to filter)", Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_table(frame: &mut Frame, area: Rect, store: &Store) {
        let clubs = store.clubs.filtered();

        let header_cells = ["", "Club", "Category", "Members", ""].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let description_width = area.width.saturating_sub(40) as usize;
        let rows = clubs.iter().map(|club| {
            let joined = store.clubs.is_joined(&club.id);
            let (action, action_style) = if joined {
                ("Joined", Style::default().fg(Color::Green))
            } else {
                ("Join", Style::default().fg(Color::Cyan))
            };

            let name = Line::from(vec![
                Span::styled(club.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", truncate(&club.description, description_width)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            Row::new(vec![
                Cell::from(club.icon.clone()),
                Cell::from(name),
                Cell::from(club.category.label()),
                Cell::from(format_members(store.clubs.member_count(club))),
                Cell::from(action).style(action_style),
            ])
            .height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(7),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" Explore Clubs ({}) ", clubs.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select((!clubs.is_empty()).then_some(store.clubs.selected));

        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Compact member count, e.g. `12.5k`.
fn format_members(count: u32) -> String {
    if count >= 1000 {
        format!("{:.1}k", count as f64 / 1000.0)
    } else {
        count.to_string()
    }
}
