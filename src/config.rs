//! Configuration handling for the form client

use crate::schema::{FormMode, OptionLookup};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default member service address
pub const DEFAULT_BASE_URL: &str = "http://backup.weehan.com";

/// User configuration for the form client
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormConfig {
    /// Member service base URL
    pub base_url: Option<String>,
    /// Referer header sent with form posts (defaults to the base URL)
    pub referer: Option<String>,
    /// Login id for profile edits
    pub user_id: Option<String>,
    /// Login password for profile edits
    pub password: Option<String>,
    /// Sign-up or profile edit
    #[serde(default)]
    pub mode: FormMode,
    /// How choice fields find their option sets
    #[serde(default)]
    pub option_lookup: OptionLookup,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "weehan", "member-form-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the config directory, then apply env overrides
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: FormConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    /// Apply `MEMBER_FORM_*` variables on top of file values
    pub fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var("MEMBER_FORM_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Some(user_id) = var("MEMBER_FORM_USER_ID") {
            self.user_id = Some(user_id);
        }
        if let Some(password) = var("MEMBER_FORM_PASSWORD") {
            self.password = Some(password);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn referer(&self) -> &str {
        self.referer.as_deref().unwrap_or_else(|| self.base_url())
    }

    /// Login credentials when both parts are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.user_id, &self.password) {
            (Some(user_id), Some(password)) => Some((user_id.as_str(), password.as_str())),
            _ => None,
        }
    }
}
