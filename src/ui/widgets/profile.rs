//! Profile view and edit form.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::{body_lines, input_lines, truncate};
use crate::state::{ProfileField, ProfileForm, Store, User, relative_time};
use chrono::Utc;

/// Profile card, level progress and the user's posts.
pub struct ProfileView;

impl ProfileView {
    /// Render the profile of the viewed user.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(user) = store.profile_user() else {
            frame.render_widget(
                Paragraph::new("User not found").style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9), // Card
                Constraint::Length(3), // Level
                Constraint::Min(0),    // Posts or form
            ])
            .split(area);

        Self::render_card(frame, rows[0], store, user);
        Self::render_level(frame, rows[1], user);

        match &store.profile.form {
            Some(form) => Self::render_form(frame, rows[2], form),
            None => Self::render_posts(frame, rows[2], store, user),
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, store: &Store, user: &User) {
        let muted = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    user.name.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  @{}", user.handle), muted),
                Span::styled(
                    format!("  {}", user.reputation),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(""),
        ];
        lines.extend(body_lines(&user.bio, area.width.saturating_sub(2), ""));

        let mut details = Vec::new();
        if let Some(location) = &user.location {
            details.push(Span::raw(format!("📍 {location}  ")));
        }
        if let Some(website) = &user.website {
            details.push(Span::styled(
                format!("🔗 {website}"),
                Style::default().fg(Color::Blue),
            ));
        }
        if !details.is_empty() {
            lines.push(Line::from(details));
        }

        lines.push(Line::from(vec![
            Span::styled(user.followers.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" followers  ", muted),
            Span::styled(user.following.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" following", muted),
        ]));

        if !user.badges.is_empty() {
            let badges: Vec<Span> = user
                .badges
                .iter()
                .map(|b| Span::styled(format!("[{b}] "), Style::default().fg(Color::Magenta)))
                .collect();
            lines.push(Line::from(badges));
        }

        let title = if store.viewing_own_profile() {
            " My Profile (e to edit) ".to_string()
        } else {
            format!(" {}'s Profile ", user.name)
        };
        let card = Paragraph::new(lines).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(card, area);
    }

    fn render_level(frame: &mut Frame, area: Rect, user: &User) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" Level {} ", user.level))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .percent(user.level_progress())
            .label(format!("{} / {} XP", user.xp, user.xp_goal()));
        frame.render_widget(gauge, area);
    }

    fn render_posts(frame: &mut Frame, area: Rect, store: &Store, user: &User) {
        let now = Utc::now();
        let width = area.width.saturating_sub(2) as usize;
        let mut lines = Vec::new();
        for post in store.feed.posts_by(&user.id) {
            lines.push(Line::from(vec![
                Span::styled(
                    relative_time(post.created_at, now),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  ♥ {}  💬 {}", post.likes, post.comment_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            let text = post
                .poll
                .as_ref()
                .filter(|_| post.content.trim().is_empty())
                .map(|poll| format!("📊 {}", poll.question()))
                .unwrap_or_else(|| post.content.replace('\n', " "));
            lines.push(Line::from(truncate(&text, width)));
            lines.push(Line::from(""));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No posts yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let posts = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Posts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(posts, area);
    }

    fn render_form(frame: &mut Frame, area: Rect, form: &ProfileForm) {
        let mut lines = Vec::new();
        for field in ProfileField::ALL {
            let focused = form.field == field;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let input = form.input(field);
            let mut spans = vec![Span::styled(format!("{:>12}: ", field.label()), label_style)];
            spans.extend(input_lines(input.value(), input.cursor(), focused).remove(0).spans);
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Enter save · Tab next field · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" Edit Profile ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(form, area);
    }
}
