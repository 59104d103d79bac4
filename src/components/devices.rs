//! Devices linked to the account
//!
//! Lists the registered devices, fetches one device's details on demand,
//! and deletes the selected device. Like the locations list, the device list
//! is only ever replaced by a refetch.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Device, MutationStatus, QueryState};
use crate::services::{GatewayError, Request, Ticket};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::{debug, error};

pub struct DevicesPanel {
    pub devices: QueryState<Vec<Device>>,
    list_ticket: Option<Ticket>,
    /// Details of the device last inspected
    pub detail: QueryState<Device>,
    detail_ticket: Option<Ticket>,
    pub selected: usize,
    pub delete_status: MutationStatus,
    pub focused: bool,
}

impl DevicesPanel {
    pub fn new() -> Self {
        Self {
            devices: QueryState::Idle,
            list_ticket: None,
            detail: QueryState::Idle,
            detail_ticket: None,
            selected: 0,
            delete_status: MutationStatus::Idle,
            focused: false,
        }
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.devices.data().and_then(|list| list.get(self.selected))
    }

    pub fn refresh(&mut self) -> Request {
        self.devices.begin();
        Request::ListDevices
    }

    pub fn list_dispatched(&mut self, ticket: Ticket) {
        self.list_ticket = Some(ticket);
    }

    pub fn apply_list(&mut self, ticket: Ticket, result: Result<Vec<Device>, GatewayError>) {
        if self.list_ticket != Some(ticket) {
            debug!(ticket = ticket.0, "dropping stale device list");
            return;
        }
        self.list_ticket = None;

        if let Err(ref e) = result {
            error!(error = %e, "failed to list devices");
        }
        self.devices.settle(result.map_err(|e| e.user_message()));

        let len = self.devices.data().map(Vec::len).unwrap_or(0);
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }

        // Details of a device that is gone are dropped
        let shown = self.detail.data().map(|d| d.pub_id.clone());
        let still_listed = self
            .devices
            .data()
            .is_some_and(|list| list.iter().any(|d| Some(&d.pub_id) == shown.as_ref()));
        if shown.is_some() && !still_listed {
            self.detail = QueryState::Idle;
        }
    }

    /// Build the details request for the selected device
    pub fn inspect_request(&mut self) -> Option<Request> {
        let pub_id = self.selected_device()?.pub_id.clone();
        self.detail = QueryState::Loading;
        Some(Request::GetDevice { pub_id })
    }

    pub fn detail_dispatched(&mut self, ticket: Ticket) {
        self.detail_ticket = Some(ticket);
    }

    pub fn apply_detail(&mut self, ticket: Ticket, result: Result<Device, GatewayError>) {
        if self.detail_ticket != Some(ticket) {
            return;
        }
        self.detail_ticket = None;
        self.detail.settle(result.map_err(|e| e.user_message()));
    }

    /// `None` while a delete is pending or nothing is selected
    pub fn delete_request(&mut self) -> Option<Request> {
        if self.delete_status.is_pending() {
            return None;
        }
        let pub_id = self.selected_device()?.pub_id.clone();
        self.delete_status = MutationStatus::Pending;
        Some(Request::DeleteDevice { pub_id })
    }

    pub fn apply_delete(&mut self, result: Result<(), GatewayError>) -> Vec<Action> {
        match result {
            Ok(()) => {
                self.delete_status = MutationStatus::Succeeded;
                vec![Action::RefreshDevices]
            }
            Err(e) => {
                self.delete_status = MutationStatus::Failed(e.user_message());
                vec![Action::ReportError(format!("Failed to delete device: {}", e))]
            }
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.detail = QueryState::Idle;
            self.detail_ticket = None;
        }
    }
}

impl Default for DevicesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DevicesPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.devices.data().map(Vec::len).unwrap_or(0);
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down if len > 0 => {
                self.select((self.selected + 1) % len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up if len > 0 => {
                self.select((self.selected + len - 1) % len);
                None
            }
            KeyCode::Enter => Some(Action::InspectDevice),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteDevice),
            KeyCode::Char('r') => Some(Action::RefreshDevices),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Devices ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(columns[0]);
        frame.render_widget(block, columns[0]);
        self.draw_list(frame, inner);

        self.draw_detail(frame, columns[1]);
        Ok(())
    }
}

impl DevicesPanel {
    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let note = |text: String, color: Color| {
            Paragraph::new(Span::styled(text, Style::default().fg(color)))
        };
        let (list, error) = match &self.devices {
            QueryState::Idle | QueryState::Loading => {
                frame.render_widget(note("Loading devices...".to_string(), Color::Yellow), area);
                return;
            }
            QueryState::Failed(e) => {
                frame.render_widget(note(format!("Error: {}", e), Color::Red), area);
                return;
            }
            QueryState::Ready(list) => (list, None),
            QueryState::Stale { data, error } => (data, Some(error)),
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(error.map_or(0, |_| 1)),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        if let Some(error) = error {
            frame.render_widget(note(format!("Refresh failed: {}", error), Color::Red), chunks[0]);
        }

        if list.is_empty() {
            frame.render_widget(note("No other devices.".to_string(), Color::DarkGray), chunks[1]);
        } else {
            let items: Vec<ListItem> = list
                .iter()
                .map(|device| {
                    ListItem::new(Line::from(vec![
                        Span::styled(device.name.clone(), Style::default().fg(Color::White)),
                        Span::styled(format!("  {}", device.os), Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect();
            let mut state = ListState::default().with_selected(Some(self.selected));
            frame.render_stateful_widget(
                List::new(items)
                    .highlight_style(Style::default().bg(Color::DarkGray))
                    .highlight_symbol("▶ "),
                chunks[1],
                &mut state,
            );
        }

        let delete = if self.delete_status.is_pending() {
            Span::styled("[ Deleting… ]", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(" Enter details  d delete  r refresh", Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(delete), chunks[2]);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let device = match &self.detail {
            QueryState::Idle => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Press Enter to load details",
                        Style::default().fg(Color::DarkGray),
                    )),
                    inner,
                );
                return;
            }
            QueryState::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled("Loading...", Style::default().fg(Color::Yellow))),
                    inner,
                );
                return;
            }
            QueryState::Failed(e) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(format!("Error: {}", e), Style::default().fg(Color::Red))),
                    inner,
                );
                return;
            }
            QueryState::Ready(device) | QueryState::Stale { data: device, .. } => device,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
        let lines = vec![
            Line::from(Span::styled(
                device.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![label("Id:        "), Span::raw(device.pub_id.clone())]),
            Line::from(vec![label("System:    "), Span::raw(device.os.clone())]),
            Line::from(vec![label("Model:     "), Span::raw(device.hardware_model.clone())]),
            Line::from(vec![label("Last seen: "), Span::raw(device.last_seen_label())]),
        ];
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(device.storage_ratio())
            .label(device.storage_label());
        frame.render_widget(gauge, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn device(pub_id: &str, name: &str) -> Device {
        Device {
            pub_id: pub_id.to_string(),
            name: name.to_string(),
            os: "Linux".to_string(),
            hardware_model: "Other".to_string(),
            used_storage: 10,
            storage_size: 100,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(list: Vec<Device>) -> DevicesPanel {
        let mut panel = DevicesPanel::new();
        assert_eq!(panel.refresh(), Request::ListDevices);
        panel.list_dispatched(Ticket(1));
        panel.apply_list(Ticket(1), Ok(list));
        panel
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_inspect_selected_device() {
        let mut panel = loaded(vec![device("a", "Laptop"), device("b", "Phone")]);
        panel.handle_key_event(key(KeyCode::Down)).unwrap();

        assert_eq!(
            panel.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::InspectDevice)
        );
        assert_eq!(
            panel.inspect_request(),
            Some(Request::GetDevice {
                pub_id: "b".to_string()
            })
        );
        assert_eq!(panel.detail, QueryState::Loading);

        panel.detail_dispatched(Ticket(2));
        panel.apply_detail(Ticket(2), Ok(device("b", "Phone")));
        assert_eq!(panel.detail.data().map(|d| d.name.as_str()), Some("Phone"));
    }

    #[test]
    fn test_moving_selection_drops_detail() {
        let mut panel = loaded(vec![device("a", "Laptop"), device("b", "Phone")]);
        panel.inspect_request();
        panel.detail_dispatched(Ticket(2));

        panel.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        panel.apply_detail(Ticket(2), Ok(device("a", "Laptop")));
        assert_eq!(panel.detail, QueryState::Idle);
    }

    #[test]
    fn test_delete_refetches_and_blocks_while_pending() {
        let mut panel = loaded(vec![device("a", "Laptop")]);
        assert_eq!(
            panel.delete_request(),
            Some(Request::DeleteDevice {
                pub_id: "a".to_string()
            })
        );
        assert_eq!(panel.delete_request(), None);

        assert_eq!(panel.apply_delete(Ok(())), vec![Action::RefreshDevices]);
        assert!(!panel.delete_status.is_pending());
    }

    #[test]
    fn test_failed_delete_goes_to_error_channel() {
        let mut panel = loaded(vec![device("a", "Laptop")]);
        panel.delete_request();
        let follow_ups = panel.apply_delete(Err(GatewayError::Remote {
            code: 403,
            message: "not the owner".to_string(),
        }));
        assert!(matches!(
            follow_ups.as_slice(),
            [Action::ReportError(message)] if message.contains("not the owner")
        ));
    }

    #[test]
    fn test_removed_device_detail_is_dropped() {
        let mut panel = loaded(vec![device("a", "Laptop"), device("b", "Phone")]);
        panel.inspect_request();
        panel.detail_dispatched(Ticket(2));
        panel.apply_detail(Ticket(2), Ok(device("a", "Laptop")));

        panel.refresh();
        panel.list_dispatched(Ticket(3));
        panel.apply_list(Ticket(3), Ok(vec![device("b", "Phone")]));
        assert_eq!(panel.detail, QueryState::Idle);
        assert_eq!(panel.selected_device().map(|d| d.name.as_str()), Some("Phone"));
    }

    #[test]
    fn test_empty_list_has_nothing_to_act_on() {
        let mut panel = loaded(vec![]);
        assert_eq!(panel.inspect_request(), None);
        assert_eq!(panel.delete_request(), None);
        assert_eq!(panel.handle_key_event(key(KeyCode::Down)).unwrap(), None);
    }
}
