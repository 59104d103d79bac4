//! Account panel
//!
//! Shows the signed-in profile, or the auth tabs when nobody is signed in.
//! Any failure to fetch the identity is displayed as "signed out".

use crate::action::Action;
use crate::component::Component;
use crate::model::{SessionContext, SessionEvent, User};
use crate::services::{GatewayError, Request, Ticket};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountState {
    Checking,
    SignedOut,
    SignedIn(User),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    SignIn,
    CreateAccount,
}

impl AuthTab {
    fn title(&self) -> &str {
        match self {
            AuthTab::SignIn => "Sign in",
            AuthTab::CreateAccount => "Create account",
        }
    }

    fn toggle(&self) -> AuthTab {
        match self {
            AuthTab::SignIn => AuthTab::CreateAccount,
            AuthTab::CreateAccount => AuthTab::SignIn,
        }
    }
}

pub struct AccountPanel {
    pub state: AccountState,
    pub auth_tab: AuthTab,
    /// Identity request of the current mount
    ticket: Option<Ticket>,
    session: SessionContext,
    pub focused: bool,
}

impl AccountPanel {
    pub fn new(session: SessionContext) -> Self {
        Self {
            state: AccountState::Checking,
            auth_tab: AuthTab::SignIn,
            ticket: None,
            session,
            focused: false,
        }
    }

    /// Start a fresh identity check
    pub fn mount(&mut self) -> Request {
        self.state = AccountState::Checking;
        Request::CurrentUser
    }

    pub fn dispatched(&mut self, ticket: Ticket) {
        self.ticket = Some(ticket);
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Option<User>, GatewayError>) {
        if self.ticket != Some(ticket) {
            return;
        }
        self.ticket = None;

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "identity check failed, showing signed-out view");
                None
            }
        };
        self.state = match &user {
            Some(user) => AccountState::SignedIn(user.clone()),
            None => AccountState::SignedOut,
        };
        self.session.set_user(user);
    }

    pub fn logout(&mut self) {
        if let AccountState::SignedIn(user) = &self.state {
            info!(user = %user.id, "signing out");
            self.session.logout();
            self.state = AccountState::SignedOut;
        }
    }

    /// Follow session changes made elsewhere
    pub fn on_session_event(&mut self, event: &SessionEvent) {
        if *event == SessionEvent::SignedOut && matches!(self.state, AccountState::SignedIn(_)) {
            self.state = AccountState::SignedOut;
        }
    }
}

impl Component for AccountPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (&self.state, key.code) {
            (_, KeyCode::Char('r')) => Some(Action::CheckAccount),
            (AccountState::SignedIn(_), KeyCode::Char('o')) => Some(Action::Logout),
            (
                AccountState::SignedOut,
                KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l'),
            ) => {
                self.auth_tab = self.auth_tab.toggle();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Account ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.state {
            AccountState::Checking => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Checking session...",
                        Style::default().fg(Color::Yellow),
                    )),
                    inner,
                );
            }
            AccountState::SignedIn(user) => draw_profile(frame, inner, user),
            AccountState::SignedOut => self.draw_auth_tabs(frame, inner),
        }
        Ok(())
    }
}

impl AccountPanel {
    fn draw_auth_tabs(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let titles = [AuthTab::SignIn, AuthTab::CreateAccount]
            .iter()
            .map(|t| t.title().to_string())
            .collect::<Vec<_>>();
        let selected = match self.auth_tab {
            AuthTab::SignIn => 0,
            AuthTab::CreateAccount => 1,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        let body = match self.auth_tab {
            AuthTab::SignIn => vec![
                Line::from(""),
                Line::from("You are not signed in."),
                Line::from("Sign in from the web console, then set the session"),
                Line::from("token in the config or CLOUD_CONSOLE_TOKEN."),
            ],
            AuthTab::CreateAccount => vec![
                Line::from(""),
                Line::from("New here? Create an account on the web console."),
                Line::from("Hosted locations become available once signed in."),
            ],
        };
        let mut lines = body;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " ←/→ switch tab  r check again",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }
}

fn draw_profile(frame: &mut Frame, area: Rect, user: &User) {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
    let lines = vec![
        Line::from(vec![
            label("Email:   "),
            Span::styled(
                user.email.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("User id: "), Span::raw(user.id.clone())]),
        Line::from(vec![label("Joined:  "), Span::raw(user.formatted_joined())]),
        Line::from(vec![label("Roles:   "), Span::raw(user.roles_label())]),
        Line::from(""),
        Line::from(Span::styled(
            " o sign out  r refresh",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
