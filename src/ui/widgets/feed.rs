//! Community feed widget.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{ChartPanel, ComposerPanel, body_lines, input_lines, percent_bar};
use crate::api::Sentiment;
use crate::content::Poll;
use crate::state::{AnalysisStatus, InputMode, Post, Store, relative_time};
use chrono::Utc;

/// Feed with the composer on top and the chart of the selected post.
pub struct FeedView;

impl FeedView {
    /// Render the feed.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let (posts_area, chart_area) = match &store.chart {
            Some(_) if area.width >= 90 => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                    .split(area);
                (columns[0], Some(columns[1]))
            }
            Some(_) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(14)])
                    .split(area);
                (rows[0], Some(rows[1]))
            }
            None => (area, None),
        };

        let posts_area = if store.feed.composing {
            let height = ComposerPanel::height(&store.feed.composer).min(posts_area.height / 2 + 4);
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(height), Constraint::Min(0)])
                .split(posts_area);
            ComposerPanel::render(frame, rows[0], store);
            rows[1]
        } else {
            posts_area
        };

        Self::render_posts(frame, posts_area, store);

        if let (Some(chart), Some(chart_area)) = (&store.chart, chart_area) {
            ChartPanel::render(frame, chart_area, chart);
        }
    }

    fn render_posts(frame: &mut Frame, area: Rect, store: &Store) {
        let block = Block::default()
            .title(format!(" My Feed ({}) ", store.feed.posts.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if store.feed.posts.is_empty() {
            let empty = Paragraph::new("No posts yet. Press n to write the first one.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, inner);
            return;
        }

        let now = Utc::now();
        let mut lines = Vec::new();
        let mut selected_start = 0;

        for (i, post) in store.feed.posts.iter().enumerate() {
            let selected = i == store.feed.selected;
            if selected {
                selected_start = lines.len();
            }
            lines.extend(post_lines(post, selected, inner.width, store, now));
            lines.push(Line::from(""));
        }

        // Keep the selected post's header in view
        let max_offset = lines.len().saturating_sub(inner.height as usize);
        let offset = selected_start.min(max_offset) as u16;

        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
    }
}

fn post_lines(
    post: &Post,
    selected: bool,
    width: u16,
    store: &Store,
    now: chrono::DateTime<Utc>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let author = store.directory.get(&post.author_id);

    let marker = if selected {
        Span::styled("▶ ", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("  ")
    };
    let name_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut header = vec![
        marker,
        Span::styled(
            author.map(|u| u.name.clone()).unwrap_or_else(|| "Unknown".into()),
            name_style,
        ),
    ];
    if let Some(user) = author {
        header.push(Span::styled(
            format!(" @{} · {}", user.handle, user.reputation),
            Style::default().fg(Color::DarkGray),
        ));
    }
    header.push(Span::styled(
        format!(" · {}", relative_time(post.created_at, now)),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(sentiment) = post.sentiment {
        header.push(Span::raw(" "));
        header.push(sentiment_badge(sentiment));
    }
    lines.push(Line::from(header));

    if !post.content.trim().is_empty() {
        lines.extend(body_lines(&post.content, width, "  "));
    }

    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{t}")).collect();
        lines.push(Line::from(Span::styled(
            format!("  {}", tags.join(" ")),
            Style::default().fg(Color::Blue),
        )));
    }

    if let Some(poll) = &post.poll {
        let cursor = selected.then_some(store.feed.poll_cursor);
        lines.extend(poll_lines(poll, cursor));
    }

    match store.feed.analysis(&post.id) {
        Some(AnalysisStatus::Pending) => lines.push(Line::from(Span::styled(
            "  ✦ AI is analyzing this post...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))),
        Some(AnalysisStatus::Ready(analysis)) => {
            lines.push(Line::from(vec![
                Span::styled("  ✦ AI ", Style::default().fg(Color::Yellow)),
                sentiment_badge(analysis.sentiment),
                Span::styled(
                    format!(" Risk: {}", analysis.risk),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
            lines.extend(body_lines(&analysis.summary, width, "    "));
        }
        None => {}
    }

    let like_style = if post.liked {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  ♥ {}", post.likes), like_style),
        Span::styled(
            format!("   💬 {}", post.comment_count),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    if store.feed.comments_open(&post.id) {
        for comment in &post.comments {
            let name = store.user_name(&comment.author_id).to_string();
            lines.push(Line::from(vec![
                Span::styled(format!("    {name}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" · {}", relative_time(comment.created_at, now)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.extend(body_lines(&comment.content, width, "      "));
        }
        if post.comments.is_empty() {
            lines.push(Line::from(Span::styled(
                "    No comments yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
        if selected && store.app.input_mode == InputMode::Comment {
            let input = &store.feed.comment_input;
            for mut line in input_lines(input.value(), input.cursor(), true) {
                line.spans.insert(0, Span::styled("    > ", Style::default().fg(Color::Cyan)));
                lines.push(line);
            }
        }
    }

    lines
}

fn poll_lines(poll: &Poll, cursor: Option<usize>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("  📊 {}", poll.question()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let open = poll.is_open();
    for (i, option) in poll.options().iter().enumerate() {
        let highlighted = cursor == Some(i);
        let chosen = poll.viewer_vote() == Some(option.id.as_str());
        let mark = match (open, chosen, highlighted) {
            (true, _, true) => "›",
            (false, true, _) => "✓",
            _ => " ",
        };
        let style = if chosen {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if highlighted && open {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(format!("   {mark} {:<24}", option.text), style)];
        if !open {
            let percent = poll.percentage(option);
            spans.push(Span::styled(
                format!(" {} {percent:>3}%", percent_bar(percent, 12)),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("   {} votes · {}", poll.total_votes(), poll.status()),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn sentiment_badge(sentiment: Sentiment) -> Span<'static> {
    let color = match sentiment {
        Sentiment::Bullish => Color::Green,
        Sentiment::Bearish => Color::Red,
        Sentiment::Neutral => Color::Gray,
    };
    Span::styled(
        format!("[{sentiment}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
