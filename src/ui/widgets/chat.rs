//! Market pe Charcha chat room.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{body_lines, input_lines};
use crate::state::{ChatMessage, InputMode, Store};

/// Chat view: optional summary, message history and the input line.
pub struct ChatView;

impl ChatView {
    /// Render the chat room.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chat = &store.chat;
        let summary_rows = match (&chat.summary, chat.summarizing) {
            (_, true) => 3,
            (Some(summary), false) => (summary.lines().count() as u16 + 2).min(area.height / 3),
            (None, false) => 0,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(summary_rows),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        if summary_rows > 0 {
            Self::render_summary(frame, rows[0], store);
        }
        Self::render_messages(frame, rows[1], store);
        Self::render_input(frame, rows[2], store);
    }

    fn render_summary(frame: &mut Frame, area: Rect, store: &Store) {
        let text = if store.chat.summarizing {
            Line::from(Span::styled(
                "Summarizing the discussion...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .into()
        } else {
            ratatui::text::Text::from(store.chat.summary.clone().unwrap_or_default())
        };

        let summary = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" ✦ AI Summary ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(summary, area);
    }

    fn render_messages(frame: &mut Frame, area: Rect, store: &Store) {
        let block = Block::default()
            .title(format!(" Live Discussion ({} online) ", store.chat.members.len() + 1))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = store
            .chat
            .messages
            .len()
            .saturating_sub(store.chat.scroll);
        let mut lines = Vec::new();
        for message in &store.chat.messages[..visible] {
            lines.extend(message_lines(message, store, inner.width));
        }

        // Show the newest messages, bottom-aligned
        let overflow = lines.len().saturating_sub(inner.height as usize);
        frame.render_widget(Paragraph::new(lines).scroll((overflow as u16, 0)), inner);
    }

    fn render_input(frame: &mut Frame, area: Rect, store: &Store) {
        let focused = store.app.input_mode == InputMode::Chat;
        let input = &store.chat.input;
        let line = if input.is_empty() && !focused {
            Line::from(Span::styled(
                "Press i to join the discussion",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            input_lines(input.value(), input.cursor(), focused).remove(0)
        };

        let border = if focused { Color::Green } else { Color::DarkGray };
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .title(" Message ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
    }
}

fn message_lines(message: &ChatMessage, store: &Store, width: u16) -> Vec<Line<'static>> {
    let own = message.author_id == store.current_user_id;
    let name_style = match (message.system, own) {
        (true, _) => Style::default().fg(Color::Yellow),
        (false, true) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().add_modifier(Modifier::BOLD),
    };
    let name = if own {
        "You".to_string()
    } else {
        store.user_name(&message.author_id).to_string()
    };

    let time = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();

    let mut lines = vec![Line::from(vec![
        Span::styled(name, name_style),
        Span::styled(format!("  {time}"), Style::default().fg(Color::DarkGray)),
    ])];
    lines.extend(body_lines(&message.content, width, "  "));
    lines
}
