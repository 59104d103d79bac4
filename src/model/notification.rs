//! Toast notifications

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown in the corner of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Visible notifications, oldest first
#[derive(Debug)]
pub struct NotificationQueue {
    entries: Vec<(Notification, Instant)>,
    ttl: Duration,
}

impl NotificationQueue {
    /// Maximum number of toasts kept on screen
    const CAPACITY: usize = 4;

    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        self.entries.push((notification, Instant::now()));
        if self.entries.len() > Self::CAPACITY {
            self.entries.remove(0);
        }
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|(_, created)| now.saturating_duration_since(*created) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|(n, _)| n)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_expired() {
        let mut queue = NotificationQueue::new(Duration::from_secs(3));
        queue.push(Notification::success("done"));
        assert!(!queue.is_empty());

        queue.prune(Instant::now());
        assert_eq!(queue.iter().count(), 1);

        queue.prune(Instant::now() + Duration::from_secs(4));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = NotificationQueue::new(Duration::from_secs(60));
        for i in 0..6 {
            queue.push(Notification::error(format!("e{}", i)));
        }
        let messages: Vec<_> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["e2", "e3", "e4", "e5"]);
    }
}
