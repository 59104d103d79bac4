//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Rect,
    /// First panel of the screen (top)
    pub primary: Rect,
    /// Second panel of the screen (bottom)
    pub secondary: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
///
/// `primary_percent` is the share of the content height given to the first panel.
pub fn calculate_main_layout(area: Rect, has_status: bool, primary_percent: u16) -> MainLayout {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let primary_percent = primary_percent.min(100);
    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(primary_percent),
            Constraint::Percentage(100 - primary_percent),
        ])
        .split(main_chunks[1]);

    let (status, help) = if has_status {
        (Some(main_chunks[2]), main_chunks[3])
    } else {
        (None, main_chunks[2])
    };

    MainLayout {
        tabs: main_chunks[0],
        primary: content[0],
        secondary: content[1],
        status,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_popup(area, 40, 4);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.y, 3);
    }

    #[test]
    fn test_main_layout_with_status() {
        let area = Rect::new(0, 0, 80, 40);
        let layout = calculate_main_layout(area, true, 40);
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.help.height, 1);
        assert!(layout.status.is_some());
        assert_eq!(
            layout.primary.height + layout.secondary.height,
            40 - 3 - 1 - 1
        );
    }

    #[test]
    fn test_main_layout_without_status() {
        let layout = calculate_main_layout(Rect::new(0, 0, 80, 30), false, 50);
        assert!(layout.status.is_none());
        assert_eq!(layout.help.y, 29);
    }
}
