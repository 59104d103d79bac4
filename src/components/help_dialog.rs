//! Keyboard reference popup

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Screens",
        &[
            ("1", "Overview (recent items, videos)"),
            ("2", "Settings (account, hosted locations)"),
            ("3", "Devices linked to the account"),
            ("Tab", "Focus next panel"),
            ("Shift+Tab", "Focus previous panel"),
        ],
    ),
    (
        "Recent Items",
        &[("r", "Refresh"), ("Enter", "Follow the card link")],
    ),
    (
        "Videos",
        &[
            ("h / ←", "Previous video"),
            ("l / →", "Next video"),
            ("Enter", "Play in overlay"),
            ("Esc", "Close the player"),
        ],
    ),
    (
        "Account",
        &[
            ("← / →", "Switch auth tab (signed out)"),
            ("o", "Sign out (signed in)"),
            ("r", "Check the session again"),
        ],
    ),
    (
        "Hosted Locations",
        &[
            ("j / k", "Select location"),
            ("n", "Edit new location name"),
            ("p", "Edit destination path"),
            ("Enter", "Submit the field being edited"),
            ("Esc", "Stop editing"),
            ("d / Del", "Remove selected location"),
            ("t", "Upload a test file"),
            ("r", "Refresh list"),
        ],
    ),
    (
        "Devices",
        &[
            ("j / k", "Select device"),
            ("Enter", "Load device details"),
            ("d / Del", "Delete selected device"),
            ("r", "Refresh list"),
        ],
    ),
    (
        "General",
        &[("?", "Show this help"), ("q", "Quit"), ("Ctrl+C", "Quit immediately")],
    ),
];

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                return Ok(Some(Action::CloseModal))
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_offset += 1,
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1)
            }
            KeyCode::PageDown => self.scroll_offset += 10,
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup = centered_popup(area, 60.min(area.width), area.height.saturating_sub(4));
        frame.render_widget(Clear, popup);

        let lines = help_lines();
        let visible = popup.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Keys ")
                        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .scroll((self.scroll_offset as u16, 0)),
            popup,
        );

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }
        Ok(())
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (section, keys) in SHORTCUTS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", section), heading)));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("    {:12}", key), key_style),
                Span::raw(*description),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  q, Esc or ? closes",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
