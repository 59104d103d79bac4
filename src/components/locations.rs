//! Hosted locations playground
//!
//! CRUD panel over the cloud locations list plus a diagnostic upload. The
//! list is never edited locally: every successful create or remove asks for
//! a refetch, and only the most recently issued list request is applied.

use crate::action::Action;
use crate::component::Component;
use crate::config::BusyPolicy;
use crate::model::{CloudLocation, MutationStatus, Notification, QueryState};
use crate::services::{GatewayError, Request, Ticket};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::{debug, error};

/// Which part of the playground receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    List,
    Name,
    Path,
}

/// A mutating control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Create,
    Remove,
    Diagnostic,
}

pub struct LocationsPlayground {
    pub locations: QueryState<Vec<CloudLocation>>,
    /// Latest list request; older completions are dropped
    list_ticket: Option<Ticket>,
    pub selected: usize,
    pub name_input: String,
    pub path_input: String,
    /// Set once the user edits the path
    path_touched: bool,
    /// Set once the path was filled from the list
    path_autofilled: bool,
    pub field: LocationField,
    pub create_status: MutationStatus,
    pub remove_status: MutationStatus,
    pub diagnostic_status: MutationStatus,
    busy_policy: BusyPolicy,
    pub focused: bool,
}

impl LocationsPlayground {
    pub fn new(busy_policy: BusyPolicy) -> Self {
        Self {
            locations: QueryState::Idle,
            list_ticket: None,
            selected: 0,
            name_input: String::new(),
            path_input: String::new(),
            path_touched: false,
            path_autofilled: false,
            field: LocationField::List,
            create_status: MutationStatus::Idle,
            remove_status: MutationStatus::Idle,
            diagnostic_status: MutationStatus::Idle,
            busy_policy,
            focused: false,
        }
    }

    /// Whether a text field is capturing keys
    pub fn is_editing(&self) -> bool {
        self.field != LocationField::List
    }

    pub fn selected_location(&self) -> Option<&CloudLocation> {
        self.locations.data().and_then(|list| list.get(self.selected))
    }

    fn status(&self, control: Control) -> &MutationStatus {
        match control {
            Control::Create => &self.create_status,
            Control::Remove => &self.remove_status,
            Control::Diagnostic => &self.diagnostic_status,
        }
    }

    /// Any mutation in flight
    pub fn is_busy(&self) -> bool {
        self.create_status.is_pending()
            || self.remove_status.is_pending()
            || self.diagnostic_status.is_pending()
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        match self.busy_policy {
            BusyPolicy::Coarse => self.is_busy(),
            BusyPolicy::PerAction => self.status(control).is_pending(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────────────────

    pub fn refresh(&mut self) -> Request {
        self.locations.begin();
        Request::ListLocations
    }

    pub fn list_dispatched(&mut self, ticket: Ticket) {
        self.list_ticket = Some(ticket);
    }

    /// Build the create request; `None` when the name is empty or the control is disabled
    pub fn create_request(&mut self) -> Option<Request> {
        if self.name_input.is_empty() || self.is_disabled(Control::Create) {
            return None;
        }
        self.create_status = MutationStatus::Pending;
        Some(Request::CreateLocation {
            name: self.name_input.clone(),
        })
    }

    pub fn remove_request(&mut self) -> Option<Request> {
        if self.is_disabled(Control::Remove) {
            return None;
        }
        let id = self.selected_location()?.id.clone();
        self.remove_status = MutationStatus::Pending;
        Some(Request::RemoveLocation { id })
    }

    pub fn diagnostic_request(&mut self) -> Option<Request> {
        if self.is_disabled(Control::Diagnostic) {
            return None;
        }
        let id = self.selected_location()?.id.clone();
        self.diagnostic_status = MutationStatus::Pending;
        Some(Request::TestLocation {
            id,
            path: self.path_input.clone(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn apply_list(&mut self, ticket: Ticket, result: Result<Vec<CloudLocation>, GatewayError>) {
        if self.list_ticket != Some(ticket) {
            debug!(ticket = ticket.0, "dropping stale location list");
            return;
        }
        self.list_ticket = None;

        if let Err(ref e) = result {
            error!(error = %e, "failed to list locations");
        }
        self.locations.settle(result.map_err(|e| e.user_message()));

        let len = self.locations.data().map(Vec::len).unwrap_or(0);
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.autofill_path();
    }

    /// Seed the destination path from the first location, once
    fn autofill_path(&mut self) {
        if self.path_touched || self.path_autofilled || !self.path_input.is_empty() {
            return;
        }
        if let Some(first) = self.locations.data().and_then(|list| list.first()) {
            self.path_input = first.sample_path();
            self.path_autofilled = true;
        }
    }

    pub fn apply_create(&mut self, result: Result<CloudLocation, GatewayError>) -> Vec<Action> {
        match result {
            Ok(location) => {
                debug!(id = %location.id, "location created");
                self.create_status = MutationStatus::Succeeded;
                self.name_input.clear();
                vec![Action::RefreshLocations]
            }
            Err(e) => {
                self.create_status = MutationStatus::Failed(e.user_message());
                vec![Action::ReportError(format!("Failed to create location: {}", e))]
            }
        }
    }

    pub fn apply_remove(&mut self, result: Result<(), GatewayError>) -> Vec<Action> {
        match result {
            Ok(()) => {
                self.remove_status = MutationStatus::Succeeded;
                vec![Action::RefreshLocations]
            }
            Err(e) => {
                self.remove_status = MutationStatus::Failed(e.user_message());
                vec![Action::ReportError(format!("Failed to remove location: {}", e))]
            }
        }
    }

    pub fn apply_diagnostic(&mut self, path: &str, result: Result<(), GatewayError>) -> Vec<Action> {
        match result {
            Ok(()) => {
                self.diagnostic_status = MutationStatus::Succeeded;
                vec![Action::Notify(Notification::success(format!(
                    "Uploaded {}",
                    path
                )))]
            }
            Err(e) => {
                let message = e.user_message();
                self.diagnostic_status = MutationStatus::Failed(message.clone());
                vec![Action::Notify(Notification::error(message))]
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    fn next(&mut self) {
        let len = self.locations.data().map(Vec::len).unwrap_or(0);
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn previous(&mut self) {
        let len = self.locations.data().map(Vec::len).unwrap_or(0);
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous();
                None
            }
            KeyCode::Char('n') => {
                self.field = LocationField::Name;
                None
            }
            KeyCode::Char('p') => {
                self.field = LocationField::Path;
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveLocation),
            KeyCode::Char('t') => Some(Action::TestLocation),
            KeyCode::Char('r') => Some(Action::RefreshLocations),
            _ => None,
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::CreateLocation),
            KeyCode::Esc => {
                self.field = LocationField::List;
                None
            }
            KeyCode::Backspace => {
                self.name_input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.name_input.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_path_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::TestLocation),
            KeyCode::Esc => {
                self.field = LocationField::List;
                None
            }
            KeyCode::Backspace => {
                self.path_input.pop();
                self.path_touched = true;
                None
            }
            KeyCode::Char(c) => {
                self.path_input.push(c);
                self.path_touched = true;
                None
            }
            _ => None,
        }
    }
}

impl Component for LocationsPlayground {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.field {
            LocationField::List => self.handle_list_key(key),
            LocationField::Name => self.handle_name_key(key),
            LocationField::Path => self.handle_path_key(key),
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Hosted Locations ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // name + create
                Constraint::Min(3),    // list
                Constraint::Length(3), // path + diagnostic
                Constraint::Length(1), // hints
            ])
            .split(inner);

        self.draw_input(
            frame,
            chunks[0],
            " New location ",
            &self.name_input,
            self.field == LocationField::Name,
            Control::Create,
            "Create",
        );
        self.draw_list(frame, chunks[1]);
        self.draw_input(
            frame,
            chunks[2],
            " Destination path ",
            &self.path_input,
            self.field == LocationField::Path,
            Control::Diagnostic,
            "Do the thing",
        );

        let hints = match self.field {
            LocationField::List => {
                " n name  p path  d remove  t test upload  r refresh"
            }
            LocationField::Name => " Enter create  Esc back",
            LocationField::Path => " Enter test upload  Esc back",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
            chunks[3],
        );
        Ok(())
    }
}

impl LocationsPlayground {
    #[allow(clippy::too_many_arguments)]
    fn draw_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        active: bool,
        control: Control,
        label: &str,
    ) {
        let cursor = if active { "_" } else { "" };
        let line = Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{}{}", value, cursor),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            button(label, self.is_disabled(control), self.status(control)),
        ]);
        let border = if active { Color::Yellow } else { Color::DarkGray };
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let message = |text: String, color: Color| {
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
        };

        match &self.locations {
            QueryState::Idle | QueryState::Loading => {
                frame.render_widget(message("Loading locations...".to_string(), Color::Yellow), area);
            }
            QueryState::Failed(e) => {
                frame.render_widget(message(format!("Error: {}", e), Color::Red), area);
            }
            QueryState::Ready(list) if list.is_empty() => {
                frame.render_widget(
                    message(
                        "No locations yet. Press n to name one.".to_string(),
                        Color::DarkGray,
                    ),
                    area,
                );
            }
            QueryState::Ready(list) => self.draw_rows(frame, area, list),
            QueryState::Stale { data, error } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);
                frame.render_widget(message(format!("Refresh failed: {}", error), Color::Red), chunks[0]);
                self.draw_rows(frame, chunks[1], data);
            }
        }
    }

    fn draw_rows(&self, frame: &mut Frame, area: Rect, list: &[CloudLocation]) {
        let remove = button("Remove", self.is_disabled(Control::Remove), &self.remove_status);
        let items: Vec<ListItem> = list
            .iter()
            .enumerate()
            .map(|(i, location)| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:<24}", location.name),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!(" {}", location.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                if i == self.selected {
                    spans.push(Span::raw("  "));
                    spans.push(remove.clone());
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.selected));
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Render a control as a bracketed label, dimmed while disabled
fn button(label: &str, disabled: bool, status: &MutationStatus) -> Span<'static> {
    if disabled {
        let text = if status.is_pending() {
            format!("[ {}… ]", label)
        } else {
            format!("[ {} ]", label)
        };
        Span::styled(text, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("[ {} ]", label),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn location(id: &str, name: &str) -> CloudLocation {
        CloudLocation {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(playground: &mut LocationsPlayground, text: &str) {
        for c in text.chars() {
            playground.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Playground with a loaded list
    fn loaded(policy: BusyPolicy, list: Vec<CloudLocation>) -> LocationsPlayground {
        let mut playground = LocationsPlayground::new(policy);
        playground.refresh();
        playground.list_dispatched(Ticket(1));
        playground.apply_list(Ticket(1), Ok(list));
        playground
    }

    #[test]
    fn test_list_states() {
        let mut playground = LocationsPlayground::new(BusyPolicy::PerAction);
        assert_eq!(playground.refresh(), Request::ListLocations);
        assert_eq!(playground.locations, QueryState::Loading);

        playground.list_dispatched(Ticket(1));
        playground.apply_list(Ticket(1), Ok(vec![]));
        assert_eq!(playground.locations, QueryState::Ready(vec![]));

        let playground = loaded(BusyPolicy::PerAction, vec![location("1", "A")]);
        assert_eq!(playground.locations.data().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_name_issues_no_request() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![]);
        assert_eq!(playground.create_request(), None);
        assert_eq!(playground.name_input, "");
        assert_eq!(playground.create_status, MutationStatus::Idle);
    }

    #[test]
    fn test_successful_create_clears_name_and_refetches_once() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![]);
        playground.field = LocationField::Name;
        type_text(&mut playground, "Photos");

        let action = playground.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::CreateLocation));

        let request = playground.create_request();
        assert_eq!(
            request,
            Some(Request::CreateLocation {
                name: "Photos".to_string()
            })
        );

        let follow_ups = playground.apply_create(Ok(location("9", "Photos")));
        assert_eq!(playground.name_input, "");
        assert_eq!(
            follow_ups
                .iter()
                .filter(|a| **a == Action::RefreshLocations)
                .count(),
            1
        );
    }

    #[test]
    fn test_failed_create_goes_to_error_channel() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![]);
        playground.name_input = "Photos".to_string();
        playground.create_request();

        let follow_ups = playground.apply_create(Err(GatewayError::Transport("down".to_string())));
        assert!(matches!(follow_ups.as_slice(), [Action::ReportError(_)]));
        assert_eq!(playground.name_input, "Photos");
    }

    #[test]
    fn test_remove_refetches() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A"), location("2", "B")]);
        playground.handle_key_event(key(KeyCode::Down)).unwrap();

        let request = playground.remove_request();
        assert_eq!(request, Some(Request::RemoveLocation { id: "2".to_string() }));
        assert_eq!(playground.apply_remove(Ok(())), vec![Action::RefreshLocations]);
    }

    #[test]
    fn test_failed_remove_goes_to_error_channel() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A")]);
        playground.remove_request();
        assert!(playground.is_disabled(Control::Remove));

        let follow_ups = playground.apply_remove(Err(GatewayError::Remote {
            code: 409,
            message: "location in use".to_string(),
        }));
        assert!(matches!(
            follow_ups.as_slice(),
            [Action::ReportError(message)] if message.contains("location in use")
        ));
        assert!(!follow_ups.contains(&Action::RefreshLocations));
        assert!(!playground.is_disabled(Control::Remove));
        assert_eq!(
            playground.remove_status,
            MutationStatus::Failed("location in use".to_string())
        );
    }

    #[test]
    fn test_remove_without_locations() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![]);
        assert_eq!(playground.remove_request(), None);
        assert_eq!(playground.remove_status, MutationStatus::Idle);
    }

    #[test]
    fn test_diagnostic_notifications() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A")]);
        let request = playground.diagnostic_request();
        assert_eq!(
            request,
            Some(Request::TestLocation {
                id: "1".to_string(),
                path: "location/1/hello.txt".to_string()
            })
        );

        let ok = playground.apply_diagnostic("location/1/hello.txt", Ok(()));
        assert!(matches!(
            ok.as_slice(),
            [Action::Notify(n)] if n.kind == crate::model::NotificationKind::Success
        ));

        playground.diagnostic_request();
        let failed = playground.apply_diagnostic(
            "location/1/hello.txt",
            Err(GatewayError::Remote {
                code: 500,
                message: "bucket missing".to_string(),
            }),
        );
        assert_eq!(
            failed,
            vec![Action::Notify(Notification::error("bucket missing"))]
        );
    }

    #[test]
    fn test_path_autofills_from_first_location() {
        let playground = loaded(BusyPolicy::PerAction, vec![location("abc", "A"), location("def", "B")]);
        assert_eq!(playground.path_input, "location/abc/hello.txt");
    }

    #[test]
    fn test_path_autofills_only_once() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("abc", "A")]);
        playground.path_input.clear();

        playground.refresh();
        playground.list_dispatched(Ticket(2));
        playground.apply_list(Ticket(2), Ok(vec![location("xyz", "Z")]));
        assert_eq!(playground.path_input, "");
    }

    #[test]
    fn test_user_edit_is_never_overwritten() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![]);
        playground.field = LocationField::Path;
        type_text(&mut playground, "custom.txt");

        playground.refresh();
        playground.list_dispatched(Ticket(2));
        playground.apply_list(Ticket(2), Ok(vec![location("abc", "A")]));
        assert_eq!(playground.path_input, "custom.txt");

        // Clearing the field counts as editing it
        let mut cleared = loaded(BusyPolicy::PerAction, vec![]);
        cleared.field = LocationField::Path;
        type_text(&mut cleared, "x");
        cleared.handle_key_event(key(KeyCode::Backspace)).unwrap();
        cleared.refresh();
        cleared.list_dispatched(Ticket(3));
        cleared.apply_list(Ticket(3), Ok(vec![location("abc", "A")]));
        assert_eq!(cleared.path_input, "");
    }

    #[test]
    fn test_stale_list_is_dropped() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A")]);
        playground.refresh();
        playground.list_dispatched(Ticket(5));
        playground.refresh();
        playground.list_dispatched(Ticket(6));

        playground.apply_list(Ticket(6), Ok(vec![location("1", "A"), location("2", "B")]));
        playground.apply_list(Ticket(5), Ok(vec![]));
        assert_eq!(playground.locations.data().map(Vec::len), Some(2));
    }

    #[test]
    fn test_failed_refetch_shows_error_above_kept_rows() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A")]);
        playground.refresh();
        playground.list_dispatched(Ticket(2));
        playground.apply_list(Ticket(2), Err(GatewayError::Transport("offline".to_string())));
        assert_eq!(playground.locations.data().map(Vec::len), Some(1));
        assert_eq!(playground.locations.error(), Some("request failed: offline"));

        let mut terminal = Terminal::new(TestBackend::new(70, 16)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                playground.draw(frame, area).unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();
        let error_row = rows.iter().position(|r| r.contains("Refresh failed: request failed: offline"));
        let data_row = rows.iter().position(|r| r.contains("▶ A"));
        assert!(error_row.is_some(), "{:#?}", rows);
        assert!(data_row.is_some(), "{:#?}", rows);
        assert!(error_row < data_row);
    }

    #[test]
    fn test_coarse_policy_disables_everything() {
        let mut playground = loaded(BusyPolicy::Coarse, vec![location("1", "A")]);
        assert!(!playground.is_disabled(Control::Create));

        playground.remove_request();
        for control in [Control::Create, Control::Remove, Control::Diagnostic] {
            assert!(playground.is_disabled(control));
        }
        playground.name_input = "x".to_string();
        assert_eq!(playground.create_request(), None);

        playground.apply_remove(Ok(()));
        for control in [Control::Create, Control::Remove, Control::Diagnostic] {
            assert!(!playground.is_disabled(control));
        }
    }

    #[test]
    fn test_per_action_policy_disables_only_pending_control() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A")]);
        playground.diagnostic_request();

        assert!(playground.is_busy());
        assert!(playground.is_disabled(Control::Diagnostic));
        assert!(!playground.is_disabled(Control::Create));
        assert!(!playground.is_disabled(Control::Remove));
        assert_eq!(playground.diagnostic_request(), None);

        playground.apply_diagnostic("p", Err(GatewayError::Unauthorised));
        assert!(!playground.is_busy());
    }

    #[test]
    fn test_selection_clamped_after_shrink() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![location("1", "A"), location("2", "B")]);
        playground.selected = 1;
        playground.refresh();
        playground.list_dispatched(Ticket(2));
        playground.apply_list(Ticket(2), Ok(vec![location("1", "A")]));
        assert_eq!(playground.selected, 0);
    }

    #[test]
    fn test_editing_mode_keys() {
        let mut playground = loaded(BusyPolicy::PerAction, vec![]);
        assert!(!playground.is_editing());

        playground.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        assert!(playground.is_editing());
        type_text(&mut playground, "dq");
        assert_eq!(playground.name_input, "dq");

        playground.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!playground.is_editing());
        assert_eq!(
            playground.handle_key_event(key(KeyCode::Char('d'))).unwrap(),
            Some(Action::RemoveLocation)
        );
    }
}
