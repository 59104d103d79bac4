use crate::model::video::{default_catalog, Video};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// How mutating controls in the locations playground are disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusyPolicy {
    /// A control is disabled only while its own mutation is pending
    #[default]
    PerAction,
    /// Every control is disabled while any mutation is pending
    Coarse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend, without the `/rspc` suffix
    pub api_url: String,
    /// Legacy identity endpoint; when set it replaces `auth.me`
    pub identity_endpoint: Option<String>,
    pub auth_token: Option<String>,
    /// Renews `auth_token` when the backend rejects it
    pub refresh_token: Option<String>,
    /// Auth server base URL; the API URL when unset
    pub auth_url: Option<String>,
    pub request_timeout_secs: u64,
    pub busy_policy: BusyPolicy,
    /// Seconds a toast stays visible
    pub notification_secs: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub videos: Vec<Video>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            identity_endpoint: None,
            auth_token: None,
            refresh_token: None,
            auth_url: None,
            request_timeout_secs: 15,
            busy_policy: BusyPolicy::PerAction,
            notification_secs: 4,
            log_level: "info".to_string(),
            log_file: None,
            videos: default_catalog(),
        }
    }
}

impl Config {
    pub const API_URL_ENV: &'static str = "CLOUD_CONSOLE_API_URL";
    pub const TOKEN_ENV: &'static str = "CLOUD_CONSOLE_TOKEN";
    pub const REFRESH_TOKEN_ENV: &'static str = "CLOUD_CONSOLE_REFRESH_TOKEN";

    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".cloud-console"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Log file used when none is configured
    pub fn default_log_file() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("cloud-console.log")
    }

    /// Load the config from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Config> {
        let mut config: Config = serde_json::from_str(contents)?;
        if config.videos.is_empty() {
            config.videos = default_catalog();
        }
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            env::var(Self::API_URL_ENV).ok(),
            env::var(Self::TOKEN_ENV).ok(),
            env::var(Self::REFRESH_TOKEN_ENV).ok(),
        );
    }

    fn apply_overrides(
        &mut self,
        api_url: Option<String>,
        token: Option<String>,
        refresh_token: Option<String>,
    ) {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.auth_token = Some(token);
        }
        if let Some(token) = refresh_token.filter(|t| !t.is_empty()) {
            self.refresh_token = Some(token);
        }
    }

    /// Base URL of the auth server
    pub fn auth_base(&self) -> &str {
        self.auth_url.as_deref().unwrap_or(&self.api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(r#"{"api_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.busy_policy, BusyPolicy::PerAction);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.videos.len(), default_catalog().len());
    }

    #[test]
    fn test_busy_policy_names() {
        let config = Config::parse(r#"{"busy_policy": "coarse", "videos": []}"#).unwrap();
        assert_eq!(config.busy_policy, BusyPolicy::Coarse);
        assert!(!config.videos.is_empty());
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(Config::parse("{not json").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = env::temp_dir().join("cloud-console-does-not-exist.json");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api_url, Config::default().api_url);
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let mut config = Config::default();
        config.apply_overrides(Some(String::new()), Some("tok".to_string()), Some(String::new()));
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.refresh_token, None);
    }

    #[test]
    fn test_auth_base_falls_back_to_api_url() {
        let mut config = Config::parse(r#"{"api_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(config.auth_base(), "https://api.example.com");
        config.auth_url = Some("https://auth.example.com".to_string());
        assert_eq!(config.auth_base(), "https://auth.example.com");
    }
}
