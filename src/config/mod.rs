use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/wxterm/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Weather API base URL (no trailing slash)
    pub api_base_url: String,
    /// User-Agent sent with every API request
    pub user_agent: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Alert monitor poll interval in seconds
    pub alert_poll_secs: u64,
    /// Delay between revealed output lines in milliseconds (0 = instant)
    pub reveal_delay_ms: u64,
    /// Ring the terminal bell on new alerts
    pub bell: bool,
    /// Theme name (default, amber, mono)
    pub theme: String,
    /// Log store database location
    pub log_db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            alert_poll_secs: DEFAULT_ALERT_POLL_SECS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            bell: true,
            theme: "default".to_string(),
            log_db_path: default_log_db_path(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    api_base_url: Option<String>,
    user_agent: Option<String>,
    request_timeout_secs: Option<u64>,
    alert_poll_secs: Option<u64>,
    reveal_delay_ms: Option<u64>,
    bell: Option<bool>,
    theme: Option<String>,
    log_db_path: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.config/wxterm/config.toml, falling back to defaults
    /// for any missing fields. If the file doesn't exist, returns pure defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Config::default(), // No config file — use defaults
        };

        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    /// Merge a TOML document over the defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(v) = file_config.api_base_url {
            let trimmed = v.trim_end_matches('/');
            if !trimmed.is_empty() {
                config.api_base_url = trimmed.to_string();
            }
        }
        if let Some(v) = file_config.user_agent {
            if !v.is_empty() {
                config.user_agent = v;
            }
        }
        if let Some(v) = file_config.request_timeout_secs {
            config.request_timeout_secs = v.max(MIN_REQUEST_TIMEOUT_SECS);
        }
        if let Some(v) = file_config.alert_poll_secs {
            config.alert_poll_secs = v.max(MIN_ALERT_POLL_SECS);
        }
        if let Some(v) = file_config.reveal_delay_ms {
            config.reveal_delay_ms = v.min(MAX_REVEAL_DELAY_MS);
        }
        if let Some(v) = file_config.bell {
            config.bell = v;
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }
        if let Some(v) = file_config.log_db_path {
            if !v.as_os_str().is_empty() {
                config.log_db_path = v;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.alert_poll_secs, DEFAULT_ALERT_POLL_SECS);
        assert!(config.bell);
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn file_values_override_defaults() {
        let config = Config::from_toml(
            r#"
            api_base_url = "http://localhost:8080/"
            user_agent = "test-agent"
            alert_poll_secs = 120
            bell = false
            theme = "amber"
            log_db_path = "/tmp/wx.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.alert_poll_secs, 120);
        assert!(!config.bell);
        assert_eq!(config.theme, "amber");
        assert_eq!(config.log_db_path, PathBuf::from("/tmp/wx.db"));
    }

    #[test]
    fn limits_are_clamped() {
        let config = Config::from_toml(
            r#"
            alert_poll_secs = 1
            request_timeout_secs = 0
            reveal_delay_ms = 999999
            "#,
        )
        .unwrap();
        assert_eq!(config.alert_poll_secs, MIN_ALERT_POLL_SECS);
        assert_eq!(config.request_timeout_secs, MIN_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.reveal_delay_ms, MAX_REVEAL_DELAY_MS);
    }

    #[test]
    fn empty_strings_keep_defaults() {
        let config = Config::from_toml(
            r#"
            user_agent = ""
            theme = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "alert_poll_secs = \"soon\"").unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.alert_poll_secs, DEFAULT_ALERT_POLL_SECS);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
