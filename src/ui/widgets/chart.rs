//! Price chart of the selected post's ticker.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        canvas::{Canvas, Line as CanvasLine},
    },
};

use super::truncate;
use crate::market::{PriceSeries, TimeRange};
use crate::state::{ChartKind, ChartState};

/// Headlines listed under the chart.
const MAX_HEADLINES: usize = 3;

/// Chart panel.
pub struct ChartPanel;

impl ChartPanel {
    /// Render the chart panel.
    pub fn render(frame: &mut Frame, area: Rect, chart: &ChartState) {
        let block = Block::default()
            .title(format!(" {} · {} ", chart.symbol, chart.kind.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let news_rows = if chart.news.is_empty() {
            0
        } else {
            chart.news.len().min(MAX_HEADLINES) as u16 + 1
        };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Quote
                Constraint::Length(1), // Range selector
                Constraint::Min(0),    // Chart
                Constraint::Length(news_rows),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(quote_line(chart)), rows[0]);
        frame.render_widget(Paragraph::new(range_line(chart.range)), rows[1]);

        match &chart.series {
            Some(series) if !series.is_empty() => match chart.kind {
                ChartKind::Area | ChartKind::Line => {
                    render_line_chart(frame, rows[2], series, chart.kind == ChartKind::Area)
                }
                ChartKind::Candle => render_candles(frame, rows[2], series),
            },
            _ => {
                let loading = Paragraph::new(format!("Loading {}...", chart.symbol)).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                );
                frame.render_widget(loading, rows[2]);
            }
        }

        if news_rows > 0 {
            let width = rows[3].width.saturating_sub(4) as usize;
            let mut lines = vec![Line::from(Span::styled(
                "Market news",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];
            lines.extend(chart.news.iter().take(MAX_HEADLINES).map(|item| {
                Line::from(vec![
                    Span::raw("• "),
                    Span::raw(truncate(&item.title, width.saturating_sub(item.source.len() + 12))),
                    Span::styled(
                        format!(" ({}, {})", item.source, item.time_ago),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            }));
            frame.render_widget(Paragraph::new(lines), rows[3]);
        }
    }
}

fn quote_line(chart: &ChartState) -> Line<'static> {
    let Some(quote) = &chart.quote else {
        return Line::from(Span::styled("Fetching quote...", Style::default().fg(Color::DarkGray)));
    };

    let change_color = if quote.is_up() { Color::Green } else { Color::Red };
    let mut spans = vec![
        Span::styled(quote.display_price(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(quote.display_change(), Style::default().fg(change_color)),
    ];
    if chart.simulated {
        spans.push(Span::styled(" simulated", Style::default().fg(Color::DarkGray)));
    }
    if chart.is_live() {
        spans.push(Span::styled(
            " ● LIVE",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn range_line(current: TimeRange) -> Line<'static> {
    let mut spans = Vec::new();
    for range in TimeRange::ALL {
        let style = if range == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", range.label()), style));
    }
    spans.push(Span::styled("  [ ] range · m type", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Padded y bounds so the series does not touch the frame.
fn y_bounds(series: &PriceSeries) -> [f64; 2] {
    let (low, high) = series.price_bounds().unwrap_or((0.0, 1.0));
    let pad = ((high - low) * 0.05).max(0.01);
    [low - pad, high + pad]
}

fn x_labels(series: &PriceSeries) -> Vec<Span<'static>> {
    let points = series.points();
    let mut labels = Vec::new();
    if let Some(first) = points.first() {
        labels.push(Span::raw(first.label.clone()));
    }
    if points.len() > 2 {
        labels.push(Span::raw(points[points.len() / 2].label.clone()));
    }
    if let Some(last) = points.last().filter(|_| points.len() > 1) {
        labels.push(Span::raw(last.label.clone()));
    }
    labels
}

fn trend_color(series: &PriceSeries) -> Color {
    match (series.points().first(), series.last()) {
        (Some(first), Some(last)) if last.close < first.open => Color::Red,
        _ => Color::Green,
    }
}

fn render_line_chart(frame: &mut Frame, area: Rect, series: &PriceSeries, filled: bool) {
    let data: Vec<(f64, f64)> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();
    let color = trend_color(series);
    let [low, high] = y_bounds(series);

    let mut datasets = Vec::new();
    if filled {
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(color).add_modifier(Modifier::DIM))
                .data(&data),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&data),
    );

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, (data.len().max(2) - 1) as f64])
                .labels(x_labels(series)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([low, high])
                .labels([format!("{low:.0}"), format!("{high:.0}")]),
        );

    frame.render_widget(chart, area);
}

fn render_candles(frame: &mut Frame, area: Rect, series: &PriceSeries) {
    let [low, high] = y_bounds(series);
    let count = series.len() as f64;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, count])
        .y_bounds([low, high])
        .paint(|ctx| {
            for (i, point) in series.points().iter().enumerate() {
                let x = i as f64;
                let color = if point.is_bullish() { Color::Green } else { Color::Red };
                ctx.draw(&CanvasLine::new(x, point.low, x, point.high, color));

                let (bottom, top) = (point.open.min(point.close), point.open.max(point.close));
                for dx in [-0.25, 0.0, 0.25] {
                    ctx.draw(&CanvasLine::new(x + dx, bottom, x + dx, top, color));
                }
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn series() -> PriceSeries {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 5, 10)
            .and_then(|d| d.and_hms_opt(15, 30, 0))
            .unwrap();
        PriceSeries::generate_with("$INFY", TimeRange::OneDay, 1450.0, 1.0, now, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_y_bounds_enclose_series() {
        let s = series();
        let (low, high) = s.price_bounds().unwrap();
        let [lo, hi] = y_bounds(&s);
        assert!(lo < low && hi > high);
    }

    #[test]
    fn test_x_labels_span_series() {
        let s = series();
        let labels = x_labels(&s);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].content, s.points()[0].label);
        assert_eq!(labels[2].content, s.last().unwrap().label);
    }

    #[test]
    fn test_range_line_marks_current() {
        let line = range_line(TimeRange::OneWeek);
        let current = line.spans.iter().find(|s| s.content == " 1W ").unwrap();
        assert_eq!(current.style.bg, Some(Color::Cyan));
    }
}
