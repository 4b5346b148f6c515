//! Post composer with the mention dropdown.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::input_lines;
use crate::state::{Composer, ComposerField, Store};

/// Rows of the body editor.
const BODY_ROWS: u16 = 4;
/// Candidates shown in the dropdown.
const MAX_SUGGESTIONS: usize = 5;

/// Composer panel.
pub struct ComposerPanel;

impl ComposerPanel {
    /// Height the panel needs, borders included.
    pub fn height(composer: &Composer) -> u16 {
        let poll_rows = if composer.poll_mode {
            1 + composer.poll.options().len() as u16
        } else {
            0
        };
        // body, poll fields, hint line, borders
        BODY_ROWS + poll_rows + 1 + 2
    }

    /// Render the composer.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let composer = &store.feed.composer;
        let title = if composer.poll_mode {
            " New Post + Poll "
        } else {
            " New Post "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let body_focused = composer.field == ComposerField::Body;
        let mut lines = if composer.body.is_empty() && !body_focused {
            vec![Line::from(Span::styled(
                "What's your view on the market?",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            input_lines(composer.body.value(), composer.body.cursor(), body_focused)
        };

        // Keep the cursor row inside the body rows
        let cursor_row = composer
            .body
            .value()
            .chars()
            .take(composer.body.cursor())
            .filter(|c| *c == '\n')
            .count();
        let skip = cursor_row.saturating_sub(BODY_ROWS as usize - 1);
        lines.drain(..skip.min(lines.len()));
        lines.truncate(BODY_ROWS as usize);
        lines.resize(BODY_ROWS as usize, Line::from(""));

        if composer.poll_mode {
            lines.push(field_line(
                "Question",
                &composer.poll.question,
                composer.field == ComposerField::Question,
            ));
            for (i, option) in composer.poll.options().iter().enumerate() {
                lines.push(field_line(
                    &format!("Option {}", i + 1),
                    option,
                    composer.field == ComposerField::Option(i),
                ));
            }
        }

        lines.push(Line::from(Span::styled(
            "Ctrl+s post · Ctrl+p poll · Ctrl+t #tag · Ctrl+a/d option · Tab field · Esc close",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);

        if body_focused {
            Self::render_mentions(frame, inner, store, cursor_row.min(BODY_ROWS as usize - 1));
        }
    }

    /// Dropdown below the cursor row while suggesting.
    fn render_mentions(frame: &mut Frame, inner: Rect, store: &Store, cursor_row: usize) {
        let mention = &store.feed.composer.mention;
        let candidates = mention.candidates(&store.directory);
        if candidates.is_empty() {
            return;
        }

        let shown = candidates.len().min(MAX_SUGGESTIONS);
        let y = inner.y + cursor_row as u16 + 1;
        let area = Rect {
            x: inner.x + 2,
            y,
            width: inner.width.saturating_sub(2).min(36),
            height: (shown as u16 + 2).min(frame.area().bottom().saturating_sub(y)),
        };
        if area.height < 3 {
            return;
        }

        let items: Vec<ListItem> = candidates
            .iter()
            .take(shown)
            .enumerate()
            .map(|(i, user)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("@{}", user.handle),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::raw(format!(" {}", user.name)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Mention ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(mention.highlighted().map(|i| i.min(shown - 1)));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(format!("{label:>9}: "), label_style)];
    spans.extend(input_lines(value, value.chars().count(), focused).remove(0).spans);
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_grows_with_poll() {
        let mut composer = Composer::default();
        assert_eq!(ComposerPanel::height(&composer), 7);
        composer.toggle_poll_mode();
        assert_eq!(ComposerPanel::height(&composer), 10);
        composer.poll.add_option();
        assert_eq!(ComposerPanel::height(&composer), 11);
    }
}
