//! Video player overlay
//!
//! Terminals cannot play video, so the overlay shows the stream URL with a
//! progress bar advancing in real time. Any close key dismisses it.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Video;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

struct Playback {
    video: Video,
    started: Instant,
}

#[derive(Default)]
pub struct VideoPlayerDialog {
    playback: Option<Playback>,
}

impl VideoPlayerDialog {
    /// Play `video` from zero, replacing whatever was playing
    pub fn start(&mut self, video: Video) {
        self.playback = Some(Playback {
            video,
            started: Instant::now(),
        });
    }

    pub fn stop(&mut self) {
        self.playback = None;
    }

    pub fn playing(&self) -> Option<&Video> {
        self.playback.as_ref().map(|p| &p.video)
    }

    /// Playback position as a 0..=1 ratio
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(playback) = &self.playback else {
            return 0.0;
        };
        if playback.video.duration_secs == 0 {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(playback.started);
        let total = Duration::from_secs(playback.video.duration_secs as u64);
        (elapsed.as_secs_f64() / total.as_secs_f64()).min(1.0)
    }
}

impl Component for VideoPlayerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Action::DismissVideo),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let Some(video) = self.playing() else {
            return Ok(());
        };
        let popup = centered_popup(area, 70.min(area.width), 12);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" ▶ {} ", video.title))
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let lines = vec![
            Line::from(video.description.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Stream: ", Style::default().fg(Color::Cyan)),
                Span::raw(video.url.clone()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

        let ratio = self.progress(Instant::now());
        let played = (ratio * video.duration_secs as f64) as u32;
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow))
            .ratio(ratio)
            .label(format!(
                "{}:{:02} / {}",
                played / 60,
                played % 60,
                video.formatted_duration()
            ));
        frame.render_widget(gauge, chunks[1]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                " Esc/q close",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[3],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::video::default_catalog;

    #[test]
    fn test_progress() {
        let video = default_catalog().remove(0);
        let half = Duration::from_secs(video.duration_secs as u64 / 2);
        let mut player = VideoPlayerDialog::default();
        assert_eq!(player.progress(Instant::now()), 0.0);

        player.start(video.clone());
        assert_eq!(player.playing(), Some(&video));
        let ratio = player.progress(Instant::now() + half);
        assert!((0.45..=0.55).contains(&ratio));

        let end = Instant::now() + Duration::from_secs(10_000);
        assert_eq!(player.progress(end), 1.0);

        player.stop();
        assert_eq!(player.playing(), None);
        assert_eq!(player.progress(end), 0.0);
    }

    #[test]
    fn test_restart_resets_progress() {
        let catalog = default_catalog();
        let mut player = VideoPlayerDialog::default();
        player.start(catalog[0].clone());
        player.start(catalog[1].clone());
        assert_eq!(player.playing().map(|v| v.id.as_str()), Some(catalog[1].id.as_str()));
        assert!(player.progress(Instant::now()) < 0.05);
    }

    #[test]
    fn test_draw_shows_playing_video() {
        use ratatui::{backend::TestBackend, Terminal};

        let video = default_catalog().remove(0);
        let mut player = VideoPlayerDialog::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let screen = |terminal: &Terminal<TestBackend>| -> String {
            let buffer = terminal.backend().buffer();
            buffer.content.iter().map(|cell| cell.symbol()).collect()
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                player.draw(frame, area).unwrap();
            })
            .unwrap();
        assert!(!screen(&terminal).contains(&video.title));

        player.start(video.clone());
        terminal
            .draw(|frame| {
                let area = frame.area();
                player.draw(frame, area).unwrap();
            })
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains(&video.title));
        assert!(text.contains("Stream:"));
        assert!(text.contains(&video.formatted_duration()));
    }

    #[test]
    fn test_close_keys() {
        let mut player = VideoPlayerDialog::default();
        assert_eq!(
            player.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap(),
            Some(Action::DismissVideo)
        );
        assert_eq!(player.handle_key_event(KeyEvent::from(KeyCode::Char('x'))).unwrap(), None);
    }
}
