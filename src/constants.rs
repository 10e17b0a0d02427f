//! Application-wide constants.
//!
//! Centralizes defaults, limits, and filesystem locations so the
//! config layer and the subsystems agree on them.

use std::path::PathBuf;

// ── Weather API ───────────────────────────────────────────────────
/// Default National Weather Service API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.weather.gov";
/// Default User-Agent. The NWS API rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "wxterm/0.1 (terminal weather console)";
/// Default HTTP request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Minimum HTTP request timeout (seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

// ── Alert Monitor ─────────────────────────────────────────────────
/// Default alert poll interval (seconds).
pub const DEFAULT_ALERT_POLL_SECS: u64 = 60;
/// Minimum alert poll interval (seconds), keeps us polite to the API.
pub const MIN_ALERT_POLL_SECS: u64 = 5;

// ── Log Store ─────────────────────────────────────────────────────
/// Key of the persisted log blob in the key-value table.
pub const LOG_STORE_KEY: &str = "weatherLogs";
/// Date format used to partition the log store.
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";
/// Timestamp format of a log entry.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Default delay between revealed output lines (ms).
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 100;
/// Upper bound for the reveal delay (ms).
pub const MAX_REVEAL_DELAY_MS: u64 = 2000;

// ── UI Layout ─────────────────────────────────────────────────────
/// Prompt shown in front of the input line and echoed commands.
pub const PROMPT: &str = "C:\\> ";
/// Page up/down step size (lines).
pub const PAGE_SIZE: usize = 20;
/// How long a status bar message stays visible (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/wxterm/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("wxterm")
}

/// Returns `~/.config/wxterm/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.local/share/wxterm/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("wxterm")
}

/// Returns `~/.local/share/wxterm/wxterm.db`.
pub fn default_log_db_path() -> PathBuf {
    data_dir().join("wxterm.db")
}

/// Returns `~/.local/share/wxterm/wxterm.log`.
pub fn diagnostics_log_path() -> PathBuf {
    data_dir().join("wxterm.log")
}
