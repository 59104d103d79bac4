//! Recent items card
//!
//! One `search.objects` query for the six most recently accessed objects,
//! rendered through `CardList`.

use super::card_list::{truncate, CardList, CardRow};
use crate::action::Action;
use crate::component::Component;
use crate::model::object::RECENT_ITEMS_TAKE;
use crate::model::{FileObject, QueryState, SearchObjectsArgs};
use crate::services::{GatewayError, Request, Ticket};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

pub const LINK_LABEL: &str = "See all recents";
pub const LINK_TARGET: &str = "search?order=dateAccessed";

pub struct RecentItemsCard {
    pub objects: QueryState<Vec<FileObject>>,
    ticket: Option<Ticket>,
    pub focused: bool,
}

impl Default for RecentItemsCard {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentItemsCard {
    pub fn new() -> Self {
        Self {
            objects: QueryState::Idle,
            ticket: None,
            focused: false,
        }
    }

    pub fn query() -> SearchObjectsArgs {
        SearchObjectsArgs::recently_accessed(RECENT_ITEMS_TAKE)
    }

    pub fn refresh(&mut self) -> Request {
        self.objects.begin();
        Request::SearchObjects(Self::query())
    }

    pub fn dispatched(&mut self, ticket: Ticket) {
        self.ticket = Some(ticket);
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<FileObject>, GatewayError>) {
        if self.ticket != Some(ticket) {
            return;
        }
        self.ticket = None;
        self.objects.settle(result.map_err(|e| e.user_message()));
    }
}

impl CardRow for FileObject {
    fn card_line(&self, width: usize) -> Line<'static> {
        let accessed = self.accessed_label(Utc::now());
        let name_width = width.saturating_sub(accessed.len() + 3).max(4);
        Line::from(vec![
            Span::styled(
                format!("{:<w$}", truncate(&self.display_name(), name_width), w = name_width),
                Style::default().fg(Color::White),
            ),
            Span::raw("  "),
            Span::styled(accessed, Style::default().fg(Color::DarkGray)),
        ])
    }
}

impl Component for RecentItemsCard {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('r') => Some(Action::RefreshRecent),
            KeyCode::Enter => Some(Action::Navigate(LINK_TARGET.to_string())),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        CardList {
            title: "Recent items",
            query: &self.objects,
            link_label: LINK_LABEL,
            link_target: LINK_TARGET,
            focused: self.focused,
        }
        .draw(frame, area);
        Ok(())
    }
}
