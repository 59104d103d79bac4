//! Terminal lifecycle and event polling
//!
//! Raw mode and the alternate screen are restored on exit, on drop, and
//! from the panic hook, so a crash never leaves the shell unusable.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::{Duration, Instant};

/// Paces Ticks by elapsed time, independent of how many events arrive
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    rate: Duration,
    last: Instant,
}

impl TickClock {
    pub fn new(rate: Duration, now: Instant) -> Self {
        Self { rate, last: now }
    }

    /// How long an event poll may block before the next Tick is due
    pub fn until_next(&self, now: Instant) -> Duration {
        self.rate.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// True at most once per period; restarts the period when it fires
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.rate {
            self.last = now;
            true
        } else {
            false
        }
    }
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    clock: TickClock,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            clock: TickClock::new(Duration::from_millis(100), Instant::now()),
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.clock = TickClock::new(tick_rate, Instant::now());
        self
    }

    /// Switch to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        self.active = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            restore()?;
        }
        Ok(())
    }

    /// Wait for a terminal event, at most until the next Tick is due
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.clock.until_next(Instant::now()))? {
            return Ok(None);
        }
        let event = event::read()?;
        Ok(accept_event(&event).then_some(event))
    }

    pub fn tick_due(&mut self) -> bool {
        self.clock.due(Instant::now())
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Key releases and repeats are dropped (Windows reports both)
fn accept_event(event: &Event) -> bool {
    match event {
        Event::Key(key) => key.kind == KeyEventKind::Press,
        _ => true,
    }
}

fn restore() -> Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key_with_kind(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_only_key_presses_are_accepted() {
        assert!(accept_event(&key_with_kind(KeyEventKind::Press)));
        assert!(!accept_event(&key_with_kind(KeyEventKind::Release)));
        assert!(!accept_event(&key_with_kind(KeyEventKind::Repeat)));
        assert!(accept_event(&Event::Resize(80, 24)));
    }

    #[test]
    fn test_ticks_follow_elapsed_time_under_steady_input() {
        let start = Instant::now();
        let mut clock = TickClock::new(Duration::from_millis(100), start);

        // A key every 30ms never lets a poll time out, ticks still come
        let ticks = (1..=10)
            .filter(|i| clock.due(start + Duration::from_millis(30 * i)))
            .count();
        assert_eq!(ticks, 2);
    }

    #[test]
    fn test_poll_timeout_shrinks_toward_next_tick() {
        let start = Instant::now();
        let mut clock = TickClock::new(Duration::from_millis(100), start);
        assert_eq!(
            clock.until_next(start + Duration::from_millis(40)),
            Duration::from_millis(60)
        );
        assert_eq!(clock.until_next(start + Duration::from_millis(150)), Duration::ZERO);

        assert!(clock.due(start + Duration::from_millis(150)));
        assert!(!clock.due(start + Duration::from_millis(200)));
        assert_eq!(
            clock.until_next(start + Duration::from_millis(200)),
            Duration::from_millis(50)
        );
    }
}
