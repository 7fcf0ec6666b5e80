//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Locale;

/// Environment variable that overrides `api.base_url`.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Site presentation settings
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply an `API_BASE_URL` override if one is given.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            log::debug!("Overriding api.base_url with {}", url);
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.api.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "api.base_url must be http or https, got {}",
                base.scheme()
            )));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::config("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.site.page_size == 0 {
            return Err(AppError::config("site.page_size must be > 0"));
        }
        if self.site.default_locale.parse::<Locale>().is_err() {
            return Err(AppError::config(format!(
                "site.default_locale '{}' is not one of ru, en, ky",
                self.site.default_locale
            )));
        }
        if self.site.journals.iter().any(|j| j.trim().is_empty()) {
            return Err(AppError::config("site.journals contains a blank abbreviation"));
        }
        Ok(())
    }

    /// Active locale, falling back to Russian.
    pub fn locale(&self) -> Locale {
        self.site.default_locale.parse().unwrap_or_default()
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/api/...` paths are appended to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Where the admin session is kept between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "defaults::session_dir")]
    pub storage_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: defaults::session_dir(),
        }
    }
}

/// Site presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Locale used when rendering locale-keyed fields
    #[serde(default = "defaults::locale")]
    pub default_locale: String,

    /// Rows per page in list views
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Journal micro-sites, by abbreviation
    #[serde(default = "defaults::journals")]
    pub journals: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: defaults::locale(),
            page_size: defaults::page_size(),
            journals: defaults::journals(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn base_url() -> String {
        "http://localhost:5000".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        concat!("scijournal/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn session_dir() -> PathBuf {
        std::env::temp_dir().join("scijournal")
    }
    pub fn locale() -> String {
        "ru".into()
    }
    pub fn page_size() -> usize {
        5
    }
    pub fn journals() -> Vec<String> {
        vec!["nntiik".into(), "ivk".into()]
    }
}
