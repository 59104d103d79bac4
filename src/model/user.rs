//! Authenticated user identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The current user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub id: String,
    /// Sign-up time, transported as milliseconds since the epoch
    #[serde(alias = "timeJoined", with = "chrono::serde::ts_milliseconds")]
    pub timejoined: DateTime<Utc>,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl User {
    pub fn formatted_joined(&self) -> String {
        self.timejoined.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    pub fn roles_label(&self) -> String {
        if self.roles.is_empty() {
            "none".to_string()
        } else {
            self.roles.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_user_with_millis() {
        let json = r#"{
            "email": "ada@example.com",
            "id": "u-1",
            "timeJoined": 1700000000000,
            "roles": ["admin", "admin", "beta"]
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.timejoined.timestamp(), 1_700_000_000);
        assert_eq!(user.roles.len(), 2);
        assert_eq!(user.roles_label(), "admin, beta");
    }

    #[test]
    fn test_missing_roles_defaults_to_empty() {
        let json = r#"{"email":"a@b.c","id":"x","timejoined":0}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.roles.is_empty());
        assert_eq!(user.roles_label(), "none");
        assert_eq!(user.formatted_joined(), "1970-01-01 00:00 UTC");
    }
}
