//! Video showcase section
//!
//! A row of video thumbnails. Choosing one selects it and opens the player
//! overlay; closing the overlay clears the selection.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Video, VideoSelection};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct VideoShowcase {
    videos: Vec<Video>,
    /// Highlighted thumbnail
    pub cursor: usize,
    pub selection: VideoSelection,
    pub focused: bool,
}

impl VideoShowcase {
    pub fn new(videos: Vec<Video>) -> Self {
        Self {
            videos,
            cursor: 0,
            selection: VideoSelection::None,
            focused: false,
        }
    }

    fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn selected_video(&self) -> Option<&Video> {
        self.selection.selected_id().and_then(|id| self.video(id))
    }

    /// Select a video by id; unknown ids leave the selection unchanged
    pub fn select(&mut self, id: &str) -> bool {
        if self.video(id).is_none() {
            return false;
        }
        self.selection.select(id);
        true
    }

    pub fn dismiss(&mut self) {
        self.selection.clear();
    }
}

impl Component for VideoShowcase {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.videos.len();
        if len == 0 {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1) % len;
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = (self.cursor + len - 1) % len;
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .videos
                .get(self.cursor)
                .map(|v| Action::PlayVideo(v.id.clone())),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" See it in action ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.videos.is_empty() {
            return Ok(());
        }

        let constraints = vec![Constraint::Ratio(1, self.videos.len() as u32); self.videos.len()];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        let playing = self.selection.selected_id();
        for (i, (video, cell)) in self.videos.iter().zip(cells.iter()).enumerate() {
            let highlighted = i == self.cursor;
            let thumb_border = if highlighted { Color::Yellow } else { Color::DarkGray };
            let marker = if playing == Some(video.id.as_str()) { "▶ " } else { "" };

            let lines = vec![
                Line::from(Span::styled(
                    format!("{}{}", marker, video.title),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    video.formatted_duration(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from(video.description.clone()),
            ];
            let thumb = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(thumb_border)),
                );
            frame.render_widget(thumb, *cell);
        }
        Ok(())
    }
}
