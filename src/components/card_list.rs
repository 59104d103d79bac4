//! Shared card list presentation
//!
//! A titled card that renders a query's rows and owns the loading, empty and
//! error states, with a link shown in the footer.

use crate::model::QueryState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// A row that knows how to render itself inside a card
pub trait CardRow {
    fn card_line(&self, width: usize) -> Line<'static>;
}

pub struct CardList<'a, T> {
    pub title: &'a str,
    pub query: &'a QueryState<Vec<T>>,
    pub link_label: &'a str,
    pub link_target: &'a str,
    pub focused: bool,
}

impl<'a, T: CardRow> CardList<'a, T> {
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if self.query.is_loading() {
                format!(" {} ⟳ ", self.title)
            } else {
                format!(" {} ", self.title)
            })
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(Paragraph::new(self.body_lines(chunks[0].width as usize)), chunks[0]);

        let link = Line::from(vec![
            Span::styled(
                format!("{} →", self.link_label),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(
                format!("  {}  (Enter)", self.link_target),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(link), chunks[1]);
    }

    pub fn body_lines(&self, width: usize) -> Vec<Line<'static>> {
        let note = |text: String, color: Color| vec![Line::from(Span::styled(text, Style::default().fg(color)))];
        match self.query {
            QueryState::Idle | QueryState::Loading => note("Loading...".to_string(), Color::Yellow),
            QueryState::Failed(e) => note(format!("Could not load: {}", e), Color::Red),
            QueryState::Ready(rows) if rows.is_empty() => {
                note("Nothing here yet.".to_string(), Color::DarkGray)
            }
            QueryState::Ready(rows) => rows.iter().map(|row| row.card_line(width)).collect(),
            QueryState::Stale { data, error } => {
                let mut lines = note(truncate(&format!("Refresh failed: {}", error), width), Color::Red);
                lines.extend(data.iter().map(|row| row.card_line(width)));
                lines
            }
        }
    }
}

/// Cut `text` to at most `width` display columns, ending in an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str);

    impl CardRow for Row {
        fn card_line(&self, width: usize) -> Line<'static> {
            Line::from(truncate(self.0, width))
        }
    }

    fn card(query: &QueryState<Vec<Row>>) -> CardList<'_, Row> {
        CardList {
            title: "Recent",
            query,
            link_label: "See all",
            link_target: "search",
            focused: false,
        }
    }

    #[test]
    fn test_loading_empty_error_states() {
        let loading = QueryState::Loading;
        assert_eq!(card(&loading).body_lines(20)[0].to_string(), "Loading...");

        let empty = QueryState::Ready(vec![]);
        assert_eq!(card(&empty).body_lines(20)[0].to_string(), "Nothing here yet.");

        let failed = QueryState::Failed("timeout".to_string());
        assert_eq!(
            card(&failed).body_lines(20)[0].to_string(),
            "Could not load: timeout"
        );
    }

    #[test]
    fn test_stale_rows_keep_error_line() {
        let stale = QueryState::Stale {
            data: vec![Row("a.txt")],
            error: "offline".to_string(),
        };
        let lines = card(&stale).body_lines(40);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "Refresh failed: offline");
        assert_eq!(lines[1].to_string(), "a.txt");
    }

    #[test]
    fn test_rows_rendered() {
        let ready = QueryState::Ready(vec![Row("a.txt"), Row("b.txt")]);
        let lines = card(&ready).body_lines(20);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].to_string(), "b.txt");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-much-longer-name", 8), "a-much-…");
        assert_eq!(truncate("日本語のファイル", 7), "日本語…");
    }
}
