use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, WidgetError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// Settings for the comment widget and its service client
///
/// Read from `~/.commentbox/config.toml`. Every key is optional:
///
/// ```toml
/// [service]
/// endpoint = "https://comments.example.com/api"
/// insecure = false
///
/// [widget]
/// scroll_debounce_ms = 20
/// success_notice_ms = 3000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentboxConfig {
    pub service: ServiceConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL; `/comments` is appended
    pub endpoint: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            insecure: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub scroll_debounce_ms: u64,
    pub success_notice_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 20,
            success_notice_ms: 3000,
        }
    }
}

impl WidgetConfig {
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn success_notice(&self) -> Duration {
        Duration::from_millis(self.success_notice_ms)
    }
}

impl CommentboxConfig {
    /// Config file path: ~/.commentbox/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".commentbox/config.toml")
    }

    /// Load from the default path, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| WidgetError::config(path, e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| WidgetError::config(Self::config_path(), e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| WidgetError::config(path, e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
