//! Shared utility functions used across modules.

use chrono::{DateTime, Local};

use crate::constants::{LOG_DATE_FORMAT, LOG_TIMESTAMP_FORMAT, SPINNER_CHARS};

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    SPINNER_CHARS[(tick % SPINNER_CHARS.len() as u64) as usize]
}

/// Log-store partition key for a moment in time (`YYYY-MM-DD`).
pub fn date_key(now: DateTime<Local>) -> String {
    now.format(LOG_DATE_FORMAT).to_string()
}

/// Log entry timestamp for a moment in time (`YYYY-MM-DD HH:MM:SS`).
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Partition key for today.
pub fn today() -> String {
    date_key(Local::now())
}

/// Whether `s` is a valid `YYYY-MM-DD` calendar date.
pub fn is_valid_date(s: &str) -> bool {
    s.len() == 10 && chrono::NaiveDate::parse_from_str(s, LOG_DATE_FORMAT).is_ok()
}

/// Get animated loading dots for the current tick.
pub fn loading_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ── spinner_char ──────────────────────────────────────────────

    #[test]
    fn spinner_char_cycles() {
        assert_eq!(spinner_char(0), "◐");
        assert_eq!(spinner_char(1), "◓");
        assert_eq!(spinner_char(2), "◑");
        assert_eq!(spinner_char(3), "◒");
        // Wraps around
        assert_eq!(spinner_char(4), "◐");
        assert_eq!(spinner_char(100), "◐"); // 100 % 4 == 0
    }

    // ── loading_dots ──────────────────────────────────────────────

    #[test]
    fn loading_dots_cycles() {
        assert_eq!(loading_dots(0), "");
        assert_eq!(loading_dots(3), "...");
        assert_eq!(loading_dots(4), "");
    }

    // ── dates ─────────────────────────────────────────────────────

    #[test]
    fn date_and_timestamp_formats() {
        let now = Local.with_ymd_and_hms(2024, 1, 1, 9, 5, 7).unwrap();
        assert_eq!(date_key(now), "2024-01-01");
        assert_eq!(timestamp(now), "2024-01-01 09:05:07");
    }

    #[test]
    fn date_validation() {
        assert!(is_valid_date("2024-01-01"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("2024-1-1"));
        assert!(!is_valid_date("yesterday"));
        assert!(!is_valid_date(""));
    }
}
