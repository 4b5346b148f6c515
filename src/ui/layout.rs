//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Terminals narrower than this get no sidebar.
const SIDEBAR_MIN_WIDTH: u16 = 100;
/// Width of the sidebar column.
const SIDEBAR_WIDTH: u16 = 34;

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Gamification sidebar. Zero-sized on narrow terminals.
    pub sidebar_area: Rect,
    /// Key hint line (bottom).
    pub hint_area: Rect,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let (main_area, sidebar_area) = if area.width >= SIDEBAR_MIN_WIDTH {
            let columns = RatatuiLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
                .split(chunks[2]);
            (columns[0], columns[1])
        } else {
            (chunks[2], Rect::new(chunks[2].right(), chunks[2].y, 0, 0))
        };

        // Notification sits at the top right, above the content
        let width = (area.width / 3).clamp(area.width.min(30), area.width);
        let notification_area = Rect {
            x: area.right().saturating_sub(width + 1).max(area.x),
            y: area.y + 2.min(area.height),
            width,
            height: 3.min(area.height.saturating_sub(2)),
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area,
            sidebar_area,
            hint_area: chunks[3],
            notification_area,
        }
    }

    /// Whether the sidebar is shown.
    pub fn has_sidebar(&self) -> bool {
        self.sidebar_area.width > 0
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
