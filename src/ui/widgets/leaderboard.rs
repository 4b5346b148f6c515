//! Leaderboard widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::state::Store;

/// Users ranked by XP.
pub struct LeaderboardTable;

impl LeaderboardTable {
    /// Render the leaderboard.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let ranked = store.directory.leaderboard();

        let header_cells = ["Rank", "Trader", "Level", "XP", "Reputation"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = ranked.iter().enumerate().map(|(i, user)| {
            let own = user.id == store.current_user_id;
            let style = if own {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(rank_label(i + 1)),
                Cell::from(format!("{} @{}", user.name, user.handle)),
                Cell::from(user.level.to_string()),
                Cell::from(user.xp.to_string()).style(Style::default().fg(Color::Green)),
                Cell::from(user.reputation.to_string()),
            ])
            .style(style)
            .height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(24),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Top Traders ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select((!ranked.is_empty()).then_some(store.app.leaderboard_selected));

        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn rank_label(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{n}"),
    }
}
