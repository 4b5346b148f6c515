//! Status bar and key hint widgets.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{InputMode, Store, View};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let ai_status = if store.app.online {
            Span::styled("● AI online", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ AI offline", Style::default().fg(Color::Yellow))
        };

        let mode = match store.app.input_mode {
            InputMode::Normal => Span::raw(""),
            mode => Span::styled(
                format!(" {mode:?} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let left_content = vec![
            Span::styled(
                " 📈 InvestMate ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            ai_status,
            Span::raw(" | "),
            Span::styled(
                store.app.current_view.title(),
                Style::default().fg(Color::White),
            ),
            Span::raw(" "),
            mode,
        ];

        let user = store
            .current_user()
            .map(|u| format!(" {} · Lv {} ", u.name, u.level))
            .unwrap_or_default();
        let right = Span::styled(user, Style::default().fg(Color::Gray));

        // Calculate padding for the right-aligned user badge
        let left_len: usize = left_content.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_len + right.width());

        let mut full_line = left_content;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(right);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}

/// Context-sensitive key hints at the bottom of the screen.
pub struct KeyHints;

impl KeyHints {
    /// Render hints for the current view and input mode.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let hints = hints(store.app.current_view, store.app.input_mode);
        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled(
                format!(" {key} "),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ));
            spans.push(Span::styled(format!(" {label}  "), Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn hints(view: View, mode: InputMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        InputMode::Compose => &[
            ("Ctrl+s", "post"),
            ("Ctrl+p", "poll"),
            ("@", "mention"),
            ("Alt+1..5", "pick"),
            ("Esc", "close"),
        ],
        InputMode::Comment => &[("Enter", "comment"), ("Esc", "cancel")],
        InputMode::Chat => &[("Enter", "send"), ("Esc", "stop typing")],
        InputMode::ClubSearch => &[("Enter", "done"), ("Esc", "done")],
        InputMode::ProfileEdit => &[("Enter", "save"), ("Tab", "next"), ("Esc", "cancel")],
        InputMode::Normal => match view {
            View::Feed => &[
                ("n", "post"),
                ("l", "like"),
                ("c", "comments"),
                ("r", "reply"),
                ("a", "AI analyze"),
                ("o/v", "poll"),
                ("[ ]", "range"),
                ("?", "help"),
            ],
            View::Charcha => &[("i", "type"), ("s", "catch me up"), ("?", "help")],
            View::Clubs => &[("i", "search"), ("f", "category"), ("Enter", "join/leave"), ("?", "help")],
            View::Leaderboard => &[("Enter", "view profile"), ("?", "help")],
            View::Profile => &[("e", "edit"), ("1", "back to feed"), ("?", "help")],
        },
    }
}
