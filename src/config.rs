//! Configuration loaded from `closeout.toml`.
//!
//! [`Config`] carries the tracker endpoint, credentials and release
//! naming scheme. Values absent from the file fall back to defaults; the
//! `CLOSEOUT_TOKEN` environment variable takes precedence over the file
//! for the API token. Credentials are validated before any tracker call.

use std::path::Path;

use serde::Deserialize;

use crate::error::CloseoutError;

/// Top-level configuration read from `closeout.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the issue tracker, e.g. "https://jira.example.com".
    #[serde(default)]
    pub tracker_url: String,

    /// Tracker account used for basic auth.
    #[serde(default)]
    pub username: String,

    /// API token or password for the account.
    #[serde(default)]
    pub token: String,

    /// Product name prefixed to fix versions, e.g. "Operator".
    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    /// Major version baked into every release fix version.
    #[serde(default = "default_major_version")]
    pub major_version: u32,

    /// Path of the learned-rules JSON file.
    #[serde(default = "default_rules_file")]
    pub rules_file: String,
}

fn default_release_prefix() -> String {
    "Operator".to_string()
}

fn default_major_version() -> u32 {
    4
}

fn default_rules_file() -> String {
    "tracker_rules.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker_url: String::new(),
            username: String::new(),
            token: String::new(),
            release_prefix: default_release_prefix(),
            major_version: default_major_version(),
            rules_file: default_rules_file(),
        }
    }
}

impl Config {
    /// Load the configuration from the given path, falling back to
    /// defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, CloseoutError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };

        // Environment variable beats the config file for the token.
        if let Ok(token) = std::env::var("CLOSEOUT_TOKEN")
            && !token.is_empty()
        {
            config.token = token;
        }

        Ok(config)
    }

    /// Fail fast on missing credentials, before any tracker call is made.
    pub fn validate(&self) -> Result<(), CloseoutError> {
        if self.tracker_url.is_empty() {
            return Err(CloseoutError::Config(
                "tracker_url is not set in closeout.toml".into(),
            ));
        }
        if self.username.is_empty() || self.token.is_empty() {
            return Err(CloseoutError::Config(
                "missing username/token — did you forget to set them?".into(),
            ));
        }
        Ok(())
    }
}
