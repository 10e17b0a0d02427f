//! Plain-text renderings of weather data, as shown in the output pane and
//! written to the command log.

use std::fmt::Display;

use chrono::{DateTime, Local};

use super::{Alert, ForecastPeriod, Observation};

const MISSING: &str = "N/A";

fn or_missing<T: Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// Render an RFC 3339 timestamp in local time, falling back to the input.
pub fn local_time(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(t) => t
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => rfc3339.to_string(),
    }
}

pub fn observation(station: &str, obs: &Observation) -> String {
    format!(
        "Weather for {}:\n\
         Temperature: {}°C\n\
         Wind: {} m/s from {}°\n\
         Visibility: {} meters\n\
         Conditions: {}",
        station,
        or_missing(obs.temperature),
        or_missing(obs.wind_speed),
        or_missing(obs.wind_direction),
        or_missing(obs.visibility),
        or_missing(obs.text_description.as_deref()),
    )
}

pub fn raw_metar(station: &str, obs: &Observation) -> String {
    format!(
        "Raw METAR for {}:\n{}",
        station,
        or_missing(obs.raw_message.as_deref())
    )
}

pub fn alerts(zone: &str, alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return format!("No active alerts for zone {}", zone);
    }

    let mut text = format!("Active alerts for zone {}:\n\n", zone);
    for (index, alert) in alerts.iter().enumerate() {
        text.push_str(&format!("Alert {}:\n", index + 1));
        text.push_str(&format!("Type: {}\n", alert.event));
        text.push_str(&format!("Severity: {}\n", alert.severity));
        text.push_str(&format!("Headline: {}\n", alert.headline));
        text.push_str(&format!("Description: {}\n", alert.description));
        text.push_str(&format!("Effective: {}\n", local_time(&alert.effective)));
        text.push_str(&format!("Expires: {}\n\n", local_time(&alert.expires)));
    }
    text
}

pub fn forecast(zone: &str, periods: &[ForecastPeriod]) -> String {
    let mut text = format!("Forecast for zone {}:\n\n", zone);
    for period in periods {
        text.push_str(&format!("{}:\n", period.name));
        text.push_str(&format!(
            "Temperature: {}°{}\n",
            or_missing(period.temperature),
            period.temperature_unit.as_deref().unwrap_or("")
        ));
        text.push_str(&format!(
            "Wind: {} {}\n",
            or_missing(period.wind_speed.as_deref()),
            period.wind_direction.as_deref().unwrap_or("")
        ));
        text.push_str(&format!(
            "Forecast: {}\n\n",
            or_missing(period.detailed_forecast.as_deref())
        ));
    }
    text
}
