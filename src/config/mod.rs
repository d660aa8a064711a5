// SPDX-License-Identifier: MPL-2.0
//! This module handles the client's configuration, loaded read-only from a
//! `settings.toml` file. The client never writes it.
//!
//! # Configuration Sections
//!
//! - `[service]` - Notification service origin, autostart and transport tuning
//! - `[display]` - Headless output format and window theme
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. Set the `MATRIX_NOTIFY_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use matrix_notify::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//!
//! // Point the client at another service for this run
//! config.service.base_url = Some("http://10.0.0.2:5069".to_string());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MatrixNotify";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MATRIX_NOTIFY_CONFIG_DIR";

// =============================================================================
// Enums
// =============================================================================

/// Which transport the client may use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TransportPreference {
    /// Try the event stream, fall back to polling when it is unsupported.
    #[default]
    Auto,
    /// Event stream only; an unsupported stream is retried like any fault.
    Sse,
    /// Skip the event stream entirely.
    Polling,
}

impl TransportPreference {
    /// Parses a CLI value (`auto`, `sse`, `polling`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "sse" | "push" => Some(Self::Sse),
            "polling" | "poll" | "pull" => Some(Self::Polling),
            _ => None,
        }
    }
}

/// Output format of the headless front-end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One human-readable line per toast.
    #[default]
    Text,
    /// One style-isolated HTML fragment per toast.
    Html,
}

impl OutputFormat {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "plain" => Some(Self::Text),
            "html" => Some(Self::Html),
            _ => None,
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Notification service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Service origin, e.g. `http://127.0.0.1:5069`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Start delivery as soon as the client launches.
    #[serde(default = "default_autostart")]
    pub autostart: bool,

    /// Transport selection policy.
    #[serde(default)]
    pub transport: TransportPreference,

    /// Heartbeat interval requested from the event stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_secs: Option<u32>,

    /// Long-poll wait sent with each pull request.
    #[serde(default = "default_pull_wait_secs")]
    pub pull_wait_secs: u32,

    /// Timeout for pull, test and send requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            autostart: default_autostart(),
            transport: TransportPreference::default(),
            heartbeat_secs: None,
            pull_wait_secs: default_pull_wait_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Returns the configured origin, or the default one.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Long-poll wait clamped to what the service honours.
    #[must_use]
    pub fn pull_wait_secs(&self) -> u32 {
        self.pull_wait_secs.min(MAX_PULL_WAIT_SECS)
    }

    /// Heartbeat interval clamped to a sane range; `0` counts as unset.
    #[must_use]
    pub fn heartbeat_secs(&self) -> Option<u32> {
        self.heartbeat_secs
            .filter(|secs| *secs > 0)
            .map(|secs| secs.min(MAX_HEARTBEAT_SECS))
    }

    /// Request timeout clamped to the supported range.
    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS)
    }
}

/// Toast display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DisplayConfig {
    /// Output of the headless front-end.
    #[serde(default)]
    pub format: OutputFormat,

    /// Theme of the toast window.
    #[serde(default)]
    pub theme: ThemeMode,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_autostart() -> bool {
    true
}

fn default_pull_wait_secs() -> u32 {
    DEFAULT_PULL_WAIT_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honouring an explicit override first and
/// the environment variable second.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("ignoring {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn serialized_config_loads_back_unchanged() {
        let config = Config {
            service: ServiceConfig {
                base_url: Some("http://10.1.2.3:5069".to_string()),
                autostart: false,
                transport: TransportPreference::Polling,
                heartbeat_secs: Some(5),
                pull_wait_secs: 15,
                request_timeout_secs: 3,
            },
            display: DisplayConfig {
                format: OutputFormat::Html,
                theme: ThemeMode::Light,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        let content = toml::to_string(&config).expect("failed to serialize config");
        fs::write(&config_path, content).expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn load_with_override_falls_back_to_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[service\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[service]\nautostart = false\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert!(!loaded.service.autostart);
        assert_eq!(loaded.service.transport, TransportPreference::Auto);
        assert_eq!(loaded.service.pull_wait_secs, DEFAULT_PULL_WAIT_SECS);
        assert_eq!(loaded.service.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn default_config_autostarts_against_local_service() {
        let config = Config::default();
        assert!(config.service.autostart);
        assert_eq!(config.service.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.display.format, OutputFormat::Text);
        assert_eq!(config.display.theme, ThemeMode::System);
    }

    #[test]
    fn service_values_are_clamped() {
        let service = ServiceConfig {
            heartbeat_secs: Some(0),
            pull_wait_secs: 999,
            request_timeout_secs: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(service.heartbeat_secs(), None);
        assert_eq!(service.pull_wait_secs(), MAX_PULL_WAIT_SECS);
        assert_eq!(service.request_timeout_secs(), MIN_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn transport_preference_parses_cli_names() {
        assert_eq!(
            TransportPreference::from_name("SSE"),
            Some(TransportPreference::Sse)
        );
        assert_eq!(
            TransportPreference::from_name("poll"),
            Some(TransportPreference::Polling)
        );
        assert_eq!(
            TransportPreference::from_name("auto"),
            Some(TransportPreference::Auto)
        );
        assert_eq!(TransportPreference::from_name("carrier-pigeon"), None);
    }

    #[test]
    fn output_format_parses_cli_names() {
        assert_eq!(OutputFormat::from_name("html"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::from_name("Text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_name("json"), None);
    }
}
