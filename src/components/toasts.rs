//! Toast rendering in the top-right corner

use crate::model::{NotificationKind, NotificationQueue};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 3;

pub fn draw_toasts(frame: &mut Frame, area: Rect, queue: &NotificationQueue) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 1;

    for notification in queue.iter() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let (color, title) = match notification.kind {
            NotificationKind::Success => (Color::Green, " ✓ Done "),
            NotificationKind::Error => (Color::Red, " ✗ Error "),
        };
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(notification.message.clone()))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(Style::default().fg(color)),
                ),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}
