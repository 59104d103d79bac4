//! Quit confirmation popup

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct QuitDialog;

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup = centered_popup(area, 44, 8);
        frame.render_widget(Clear, popup);

        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let content = vec![
            Line::from(""),
            Line::from(Span::styled("Leave cloud-console?", bold(Color::White))),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", bold(Color::Green)),
                Span::raw("quit   "),
                Span::styled(" n/Esc ", bold(Color::Red)),
                Span::raw("stay"),
            ]),
            Line::from(Span::styled(
                "Requests still running are abandoned",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Quit ")
            .title_style(bold(Color::Yellow))
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(
            Paragraph::new(content)
                .block(block)
                .alignment(Alignment::Center),
            popup,
        );
        Ok(())
    }
}
