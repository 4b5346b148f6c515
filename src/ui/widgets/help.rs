//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

/// Sections of the help panel: heading and (key, description) rows.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("Home/End", "Go to top / bottom"),
            ("Tab", "Next view"),
            ("1-5", "Feed, Charcha, Clubs, Leaderboard, Profile"),
        ],
    ),
    (
        "Feed",
        &[
            ("n", "Write a post (@ to mention, Ctrl+p for a poll)"),
            ("l", "Like / unlike"),
            ("c/Enter", "Show comments"),
            ("r", "Reply"),
            ("a", "AI sentiment analysis"),
            ("o / v", "Highlight poll option / vote"),
            ("u", "Open author's profile"),
            ("[ / ]", "Chart range"),
            ("m", "Chart type"),
        ],
    ),
    (
        "Community",
        &[
            ("i", "Type a message / search clubs"),
            ("s", "Catch me up (AI summary)"),
            ("f", "Cycle club category"),
            ("e", "Edit own profile"),
        ],
    ),
    ("General", &[("?", "Toggle help"), ("Esc", "Dismiss"), ("q", "Quit")]),
];

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = Vec::new();
        for (heading, rows) in SECTIONS {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                *heading,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in *rows {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<9}"), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
