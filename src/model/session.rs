//! Session context - the injected authentication snapshot
//!
//! Holds the signed-in user, the bearer token sent with every request and
//! the refresh token used to renew it. The context is cheap to clone; the
//! HTTP gateway reads and rotates the tokens on the same handle the UI
//! writes to.

use super::user::User;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Change notifications delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut,
    /// The access token was renewed with the refresh token
    TokensRefreshed,
}

#[derive(Default)]
struct SessionInner {
    user: Option<User>,
    token: Option<String>,
    refresh_token: Option<String>,
    subscribers: Vec<Sender<SessionEvent>>,
}

/// Shared handle to the current session
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionInner>>,
}

impl SessionContext {
    pub fn new(token: Option<String>) -> Self {
        let context = Self::default();
        context.write().token = token;
        context
    }

    /// Attach the refresh token used to renew an expired access token
    pub fn with_refresh_token(self, refresh_token: Option<String>) -> Self {
        self.write().refresh_token = refresh_token;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    /// Replace both tokens after a successful refresh
    pub fn set_tokens(&self, access: String, refresh: String) {
        let mut inner = self.write();
        inner.token = Some(access);
        inner.refresh_token = Some(refresh);
        Self::broadcast(&mut inner, SessionEvent::TokensRefreshed);
    }

    /// Receive every future session change
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.write().subscribers.push(tx);
        rx
    }

    /// Record the identity returned by the backend
    pub fn set_user(&self, user: Option<User>) {
        let mut inner = self.write();
        if inner.user == user {
            return;
        }
        inner.user = user.clone();
        let event = match user {
            Some(user) => SessionEvent::SignedIn(user),
            None => SessionEvent::SignedOut,
        };
        Self::broadcast(&mut inner, event);
    }

    /// Forget the user and both tokens
    pub fn logout(&self) {
        let mut inner = self.write();
        inner.user = None;
        inner.token = None;
        inner.refresh_token = None;
        Self::broadcast(&mut inner, SessionEvent::SignedOut);
    }

    fn broadcast(inner: &mut SessionInner, event: SessionEvent) {
        // Dropped receivers are pruned here
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn user() -> User {
        User {
            email: "ada@example.com".to_string(),
            id: "u-1".to_string(),
            timejoined: Utc.timestamp_opt(0, 0).unwrap(),
            roles: BTreeSet::new(),
        }
    }

    #[test]
    fn test_logout_clears_user_and_token() {
        let session = SessionContext::new(Some("secret".to_string()));
        session.set_user(Some(user()));
        assert_eq!(session.user(), Some(user()));
        assert_eq!(session.token().as_deref(), Some("secret"));

        session.logout();
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let session = SessionContext::new(None);
        let rx = session.subscribe();

        session.set_user(Some(user()));
        session.set_user(Some(user()));
        session.logout();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![SessionEvent::SignedIn(user()), SessionEvent::SignedOut]
        );
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let session = SessionContext::new(None);
        drop(session.subscribe());
        session.logout();
        assert!(session.read().subscribers.is_empty());
    }

    #[test]
    fn test_set_tokens_rotates_both() {
        let session = SessionContext::new(Some("old".to_string()))
            .with_refresh_token(Some("r-old".to_string()));
        let rx = session.subscribe();

        session.set_tokens("new".to_string(), "r-new".to_string());
        assert_eq!(session.token().as_deref(), Some("new"));
        assert_eq!(session.refresh_token().as_deref(), Some("r-new"));
        assert_eq!(rx.try_recv(), Ok(SessionEvent::TokensRefreshed));

        session.logout();
        assert_eq!(session.refresh_token(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::new(Some("t".to_string()));
        let other = session.clone();
        other.logout();
        assert_eq!(session.token(), None);
    }
}
