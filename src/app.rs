//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that routes keys to the focused panel, turns Actions into backend requests,
//! and feeds request completions back to the panel that issued them.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_toasts, AccountPanel, DevicesPanel, HelpDialog, LocationsPlayground,
    QuitDialog, RecentItemsCard, VideoPlayerDialog, VideoShowcase,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::{Panel, Screen};
use crate::model::{NotificationQueue, SessionContext, SessionEvent};
use crate::services::{Completion, Gateway, Request, RequestRunner, Response};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub screen: Screen,
    pub focus: Panel,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background request runner
    runner: RequestRunner,

    session: SessionContext,
    session_events: Receiver<SessionEvent>,

    pub notifications: NotificationQueue,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Generic error channel, shown in the status bar
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub account: AccountPanel,
    pub locations: LocationsPlayground,
    pub recent: RecentItemsCard,
    pub showcase: VideoShowcase,
    pub devices: DevicesPanel,
    pub player: VideoPlayerDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: &Config, gateway: Arc<dyn Gateway>, session: SessionContext) -> App {
        let session_events = session.subscribe();
        App {
            screen: Screen::Overview,
            focus: Panel::RecentItems,
            modals: ModalStack::new(),
            runner: RequestRunner::new(gateway),
            session: session.clone(),
            session_events,
            notifications: NotificationQueue::new(Duration::from_secs(config.notification_secs)),
            should_quit: false,
            error: None,
            status_message: None,
            account: AccountPanel::new(session),
            locations: LocationsPlayground::new(config.busy_policy),
            recent: RecentItemsCard::new(),
            showcase: VideoShowcase::new(config.videos.clone()),
            devices: DevicesPanel::new(),
            player: VideoPlayerDialog::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    /// Mount the first screen
    pub fn init(&mut self) -> Result<()> {
        self.mount_screen()
    }

    /// Number of requests still in flight
    pub fn pending_requests(&self) -> usize {
        self.runner.pending()
    }

    /// Issue the on-mount requests of the current screen's panels
    fn mount_screen(&mut self) -> Result<()> {
        info!(screen = self.screen.name(), "mounting screen");
        match self.screen {
            Screen::Overview => self.apply_all(vec![Action::RefreshRecent]),
            Screen::Settings => {
                self.apply_all(vec![Action::CheckAccount, Action::RefreshLocations])
            }
            Screen::Devices => self.apply_all(vec![Action::RefreshDevices]),
        }
    }

    fn show_screen(&mut self, screen: Screen, panel: Option<Panel>) -> Result<()> {
        let changed = screen != self.screen;
        self.screen = screen;
        self.focus = panel.unwrap_or(screen.panels()[0]);
        if changed {
            self.mount_screen()?;
        }
        Ok(())
    }

    fn cycle_focus(&mut self, forward: bool) {
        let panels = self.screen.panels();
        let current = panels.iter().position(|p| *p == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % panels.len()
        } else {
            (current + panels.len() - 1) % panels.len()
        };
        self.focus = panels[next];
    }

    /// Start a request and tell the issuing panel which ticket to expect
    fn dispatch(&mut self, request: Request) {
        let ticket = self.runner.dispatch(request.clone());
        match request {
            Request::CurrentUser => self.account.dispatched(ticket),
            Request::ListLocations => self.locations.list_dispatched(ticket),
            Request::SearchObjects(_) => self.recent.dispatched(ticket),
            Request::ListDevices => self.devices.list_dispatched(ticket),
            Request::GetDevice { .. } => self.devices.detail_dispatched(ticket),
            // Mutations are tracked by per-action status
            Request::CreateLocation { .. }
            | Request::RemoveLocation { .. }
            | Request::TestLocation { .. }
            | Request::DeleteDevice { .. } => {}
        }
    }

    /// Hand a completion to its panel, returning follow-up actions
    fn route_completion(&mut self, completion: Completion) -> Vec<Action> {
        let Completion {
            ticket,
            request,
            result,
        } = completion;

        match request {
            Request::CurrentUser => {
                self.account
                    .apply(ticket, result.and_then(Response::into_current_user));
                Vec::new()
            }
            Request::ListLocations => {
                self.locations
                    .apply_list(ticket, result.and_then(Response::into_locations));
                Vec::new()
            }
            Request::CreateLocation { .. } => self
                .locations
                .apply_create(result.and_then(Response::into_created_location)),
            Request::RemoveLocation { .. } => {
                self.locations.apply_remove(result.and_then(Response::into_unit))
            }
            Request::TestLocation { path, .. } => self
                .locations
                .apply_diagnostic(&path, result.and_then(Response::into_unit)),
            Request::SearchObjects(_) => {
                self.recent.apply(ticket, result.and_then(Response::into_objects));
                Vec::new()
            }
            Request::ListDevices => {
                self.devices
                    .apply_list(ticket, result.and_then(Response::into_devices));
                Vec::new()
            }
            Request::GetDevice { .. } => {
                self.devices
                    .apply_detail(ticket, result.and_then(Response::into_device));
                Vec::new()
            }
            Request::DeleteDevice { .. } => {
                self.devices.apply_delete(result.and_then(Response::into_unit))
            }
        }
    }

    /// Run actions and everything they chain into
    fn apply_all(&mut self, actions: Vec<Action>) -> Result<()> {
        for action in actions {
            let mut current = Some(action);
            while let Some(a) = current {
                current = self.update(a)?;
            }
        }
        Ok(())
    }

    fn on_tick(&mut self) -> Result<()> {
        for completion in self.runner.poll() {
            let follow_ups = self.route_completion(completion);
            self.apply_all(follow_ups)?;
        }

        let events: Vec<SessionEvent> = self.session_events.try_iter().collect();
        for event in events {
            info!(?event, "session changed");
            self.account.on_session_event(&event);
        }

        self.notifications.prune(Instant::now());
        Ok(())
    }

    fn focused_component(&mut self) -> &mut dyn Component {
        match self.focus {
            Panel::RecentItems => &mut self.recent,
            Panel::Showcase => &mut self.showcase,
            Panel::Account => &mut self.account,
            Panel::Locations => &mut self.locations,
            Panel::Devices => &mut self.devices,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        // A key press acknowledges whatever the status bar was showing
        self.error = None;
        self.status_message = None;

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        // Text fields capture every key until Esc
        if self.focus == Panel::Locations && self.locations.is_editing() {
            return self.locations.handle_key_event(key);
        }

        let action = match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('1') => Some(Action::ShowScreen(Screen::Overview)),
            KeyCode::Char('2') => Some(Action::ShowScreen(Screen::Settings)),
            KeyCode::Char('3') => Some(Action::ShowScreen(Screen::Devices)),
            KeyCode::Tab => Some(Action::NextPanel),
            KeyCode::BackTab => Some(Action::PrevPanel),
            _ => return self.focused_component().handle_key_event(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.on_tick()?,
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::ShowScreen(screen) => self.show_screen(screen, None)?,
            Action::NextPanel => self.cycle_focus(true),
            Action::PrevPanel => self.cycle_focus(false),
            Action::Navigate(target) => match Screen::from_route(&target) {
                Some((screen, panel)) => self.show_screen(screen, Some(panel))?,
                None => {
                    info!(%target, "link has no view in this client");
                    self.status_message = Some(format!("Open {} in the desktop app", target));
                }
            },

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Account
            // ─────────────────────────────────────────────────────────────────
            Action::CheckAccount => {
                let request = self.account.mount();
                self.dispatch(request);
            }
            Action::Logout => {
                self.account.logout();
                self.status_message = Some("Signed out".to_string());
            }

            // ─────────────────────────────────────────────────────────────────
            // Hosted Locations
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshLocations => {
                let request = self.locations.refresh();
                self.dispatch(request);
            }
            Action::CreateLocation => {
                if let Some(request) = self.locations.create_request() {
                    self.dispatch(request);
                }
            }
            Action::RemoveLocation => {
                if let Some(request) = self.locations.remove_request() {
                    self.dispatch(request);
                }
            }
            Action::TestLocation => {
                if let Some(request) = self.locations.diagnostic_request() {
                    self.dispatch(request);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Devices
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshDevices => {
                let request = self.devices.refresh();
                self.dispatch(request);
            }
            Action::InspectDevice => {
                if let Some(request) = self.devices.inspect_request() {
                    self.dispatch(request);
                }
            }
            Action::DeleteDevice => {
                if let Some(request) = self.devices.delete_request() {
                    self.dispatch(request);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Overview
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshRecent => {
                let request = self.recent.refresh();
                self.dispatch(request);
            }
            Action::PlayVideo(video_id) => {
                if self.showcase.select(&video_id) {
                    if let Some(video) = self.showcase.selected_video().cloned() {
                        self.player.start(video);
                    }
                    self.modals.remove_players();
                    self.modals.push(Modal::VideoPlayer { video_id });
                }
            }
            Action::DismissVideo => {
                self.showcase.dismiss();
                self.player.stop();
                self.modals.remove_players();
            }

            // ─────────────────────────────────────────────────────────────────
            // Feedback
            // ─────────────────────────────────────────────────────────────────
            Action::Notify(notification) => self.notifications.push(notification),
            Action::ReportError(message) => {
                error!(%message, "request failed");
                self.error = Some(message);
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_status = self.error.is_some() || self.status_message.is_some();
        let primary_percent = match self.screen {
            Screen::Overview => 45,
            Screen::Settings => 35,
            Screen::Devices => 50,
        };
        let layout = calculate_main_layout(area, has_status, primary_percent);

        self.draw_tabs(frame, layout.tabs);

        self.recent.focused = self.focus == Panel::RecentItems;
        self.showcase.focused = self.focus == Panel::Showcase;
        self.account.focused = self.focus == Panel::Account;
        self.locations.focused = self.focus == Panel::Locations;
        self.devices.focused = self.focus == Panel::Devices;

        match self.screen {
            Screen::Overview => {
                self.recent.draw(frame, layout.primary)?;
                self.showcase.draw(frame, layout.secondary)?;
            }
            Screen::Settings => {
                self.account.draw(frame, layout.primary)?;
                self.locations.draw(frame, layout.secondary)?;
            }
            Screen::Devices => {
                self.devices
                    .draw(frame, layout.primary.union(layout.secondary))?;
            }
        }

        if let Some(status_area) = layout.status {
            let line = match (&self.error, &self.status_message) {
                (Some(e), _) => Span::styled(format!(" ✗ {}", e), Style::default().fg(Color::Red)),
                (None, Some(s)) => Span::styled(format!(" {}", s), Style::default().fg(Color::Yellow)),
                (None, None) => Span::raw(""),
            };
            frame.render_widget(Paragraph::new(line), status_area);
        }

        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        draw_toasts(frame, area, &self.notifications);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::VideoPlayer { .. } => self.player.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::VideoPlayer { .. } => self.player.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = Screen::all()
            .iter()
            .map(|s| format!("{} {}", s.index() + 1, s.name()))
            .collect();
        let who = match self.session.user() {
            Some(user) => format!(" {} ", user.email),
            None => String::new(),
        };
        let tabs = Tabs::new(titles)
            .select(self.screen.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" cloud-console ")
                    .title(Line::from(who).right_aligned())
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " 1/2/3 screen  Tab panel  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        )];
        let pending = self.pending_requests();
        if pending > 0 {
            spans.push(Span::styled(
                format!("   ⟳ {} request{}", pending, if pending == 1 { "" } else { "s" }),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
