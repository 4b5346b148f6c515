//! Gamification sidebar: level, rank and weekly XP.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
};

use crate::state::Store;

/// Sidebar with the signed-in user's progress.
pub struct Sidebar;

impl Sidebar {
    /// Render the sidebar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(user) = store.current_user() else {
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Identity and rank
                Constraint::Length(3), // Level progress
                Constraint::Min(8),    // Weekly activity
            ])
            .split(area);

        let rank = store
            .directory
            .rank_of(&user.id)
            .map(|r| format!("#{r} of {}", store.directory.len()))
            .unwrap_or_else(|| "unranked".to_string());
        let identity = Paragraph::new(vec![
            Line::from(Span::styled(
                user.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("@{} · {}", user.handle, user.reputation),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::raw("Rank "),
                Span::styled(rank, Style::default().fg(Color::Yellow)),
            ]),
        ])
        .block(
            Block::default()
                .title(" You ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(identity, rows[0]);

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" Level {} ", user.level))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .percent(user.level_progress())
            .label(format!("{}%", user.level_progress()));
        frame.render_widget(gauge, rows[1]);

        let bars: Vec<Bar> = store
            .weekly_activity
            .iter()
            .map(|day| {
                Bar::default()
                    .label(Line::from(day.day))
                    .value(day.xp)
                    .text_value(String::new())
            })
            .collect();
        let total: u64 = store.weekly_activity.iter().map(|d| d.xp).sum();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .title(format!(" This week · {total} XP "))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(3)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Magenta));
        frame.render_widget(chart, rows[2]);
    }
}
