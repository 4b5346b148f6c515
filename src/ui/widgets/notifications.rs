//! Notification rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{Notification, NotificationLevel};

/// Render a notification toast.
pub fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    frame.render_widget(Clear, area);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Info => (Color::Cyan, "ℹ"),
        NotificationLevel::Success => (Color::Green, "✓"),
        NotificationLevel::Warning => (Color::Yellow, "⚠"),
        NotificationLevel::Error => (Color::Red, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(border_color)),
        Span::raw(notification.message.as_str()),
    ]);

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}
