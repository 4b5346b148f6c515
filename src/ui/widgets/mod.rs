//! TUI widgets.

mod chart;
mod chat;
mod clubs;
mod composer;
mod feed;
mod help;
mod leaderboard;
mod notifications;
mod profile;
mod sidebar;
mod status_bar;
mod tab_bar;

pub use chart::ChartPanel;
pub use chat::ChatView;
pub use clubs::ClubList;
pub use composer::ComposerPanel;
pub use feed::FeedView;
pub use help::HelpPanel;
pub use leaderboard::LeaderboardTable;
pub use notifications::render_notification;
pub use profile::ProfileView;
pub use sidebar::Sidebar;
pub use status_bar::{KeyHints, StatusBar};
pub use tab_bar::TabBar;

use crate::content::{SpanKind, tokenize};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Style of a highlighted token in a body.
pub(crate) fn token_style(kind: SpanKind) -> Style {
    match kind {
        SpanKind::Plain => Style::default(),
        SpanKind::Ticker => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        SpanKind::Hashtag => Style::default().fg(Color::Blue),
        SpanKind::Mention => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    }
}

/// Tokenize `text` and wrap it to `width` columns, keeping tokens whole.
///
/// Hard line breaks are kept. Every line starts with `indent`.
pub(crate) fn body_lines(text: &str, width: u16, indent: &str) -> Vec<Line<'static>> {
    let width = (width as usize).saturating_sub(indent.chars().count()).max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    fn flush(
        lines: &mut Vec<Line<'static>>,
        current: &mut Vec<Span<'static>>,
        used: &mut usize,
        indent: &str,
    ) {
        let mut spans = vec![Span::raw(indent.to_string())];
        spans.append(current);
        lines.push(Line::from(spans));
        *used = 0;
    }

    for span in tokenize(text) {
        let style = token_style(span.kind);
        for (i, segment) in span.text.split('\n').enumerate() {
            if i > 0 {
                flush(&mut lines, &mut current, &mut used, indent);
            }
            for word in segment.split_inclusive(' ') {
                let len = word.chars().count();
                if used > 0 && used + len.min(width) > width {
                    flush(&mut lines, &mut current, &mut used, indent);
                }
                let word = if used == 0 { word.trim_start() } else { word };
                if word.is_empty() {
                    continue;
                }
                used += word.chars().count();
                current.push(Span::styled(word.to_string(), style));
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        flush(&mut lines, &mut current, &mut used, indent);
    }

    lines
}

/// Render a text field with a block cursor at `cursor` (a char index).
pub(crate) fn input_lines(value: &str, cursor: usize, focused: bool) -> Vec<Line<'static>> {
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
    let mut lines = Vec::new();
    let mut offset = 0;

    for line in value.split('\n') {
        let len = line.chars().count();
        let spans = if focused && (offset..=offset + len).contains(&cursor) {
            let at = cursor - offset;
            let before: String = line.chars().take(at).collect();
            let under: String = line.chars().nth(at).map(String::from).unwrap_or_else(|| " ".into());
            let after: String = line.chars().skip(at + 1).collect();
            vec![
                Span::raw(before),
                Span::styled(under, cursor_style),
                Span::raw(after),
            ]
        } else {
            vec![Span::raw(line.to_string())]
        };
        lines.push(Line::from(spans));
        // the newline occupies one cursor position
        offset += len + 1;
    }

    lines
}

/// Shorten `s` to `max` characters, ending with an ellipsis when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// A horizontal bar of `width` cells filled to `percent`.
pub(crate) fn percent_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_body_lines_wrap_on_words() {
        let lines = body_lines("long $INFY setup here", 12, "");
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts, vec!["long $INFY ", "setup here"]);
    }

    #[test]
    fn test_body_lines_style_tokens() {
        let lines = body_lines("buy $TCS", 40, "  ");
        let ticker = lines[0].spans.iter().find(|s| s.content == "$TCS").unwrap();
        assert_eq!(ticker.style, token_style(SpanKind::Ticker));
        assert_eq!(lines[0].spans[0].content, "  ");
    }

    #[test]
    fn test_body_lines_keep_breaks() {
        let lines = body_lines("one\ntwo", 40, "");
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[1]), "two");
        assert_eq!(body_lines("", 40, "").len(), 1);
    }

    #[test]
    fn test_body_lines_flush_after_breaks_and_wraps() {
        let lines = body_lines("a\n\nlong $INFY setup", 12, "> ");
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts, vec!["> a", "> ", "> long $INFY", "> setup"]);

        let empty = body_lines("", 40, "  ");
        assert_eq!(empty.len(), 1);
        assert_eq!(text(&empty[0]), "  ");
    }

    #[test]
    fn test_input_cursor_position() {
        let lines = input_lines("ab\ncd", 4, true);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[1].content, "d");

        let at_end = input_lines("ab", 2, true);
        assert_eq!(at_end[0].spans[1].content, " ");

        let unfocused = input_lines("ab", 1, false);
        assert_eq!(unfocused[0].spans.len(), 1);
    }

    #[test]
    fn test_truncate_and_bar() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(percent_bar(50, 10), "█████░░░░░");
        assert_eq!(percent_bar(0, 4), "░░░░");
    }
}
