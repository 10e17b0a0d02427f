use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{Alert, FetchError, ForecastPeriod, Observation, WeatherService};
use crate::config::Config;

/// Async client for the National Weather Service JSON API.
pub struct NwsClient {
    client: Client,
    base: Url,
}

impl NwsClient {
    /// Build a client from the API settings in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.api_base_url)
            .with_context(|| format!("invalid API base URL '{}'", config.api_base_url))?;
        if base.cannot_be_a_base() {
            bail!("API base URL '{}' cannot hold a path", config.api_base_url);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, base })
    }

    /// Append path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport("invalid API base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `segments` and return the body. Any non-success status maps to `not_found`.
    async fn get_text(&self, segments: &[&str], not_found: FetchError) -> Result<String, FetchError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "weather request");

        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/geo+json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            tracing::debug!(%url, status = %resp.status(), "weather request rejected");
            return Err(not_found);
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[async_trait]
impl WeatherService for NwsClient {
    async fn latest_observation(&self, station: &str) -> Result<Observation, FetchError> {
        let body = self
            .get_text(
                &["stations", station, "observations", "latest"],
                FetchError::StationNotFound,
            )
            .await?;
        parse_observation(&body)
    }

    async fn active_alerts(&self, zone: &str) -> Result<Vec<Alert>, FetchError> {
        let body = self
            .get_text(&["alerts", "active", "zone", zone], FetchError::ZoneNotFound)
            .await?;
        parse_alerts(&body)
    }

    async fn zone_forecast(&self, zone: &str) -> Result<Vec<ForecastPeriod>, FetchError> {
        let body = self
            .get_text(&["zones", "forecast", zone, "forecast"], FetchError::ZoneNotFound)
            .await?;
        parse_forecast(&body)
    }
}

// ── NWS JSON structures ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    properties: ObservationProps,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ObservationProps {
    raw_message: Option<String>,
    text_description: Option<String>,
    temperature: Option<Measurement>,
    wind_speed: Option<Measurement>,
    wind_direction: Option<Measurement>,
    visibility: Option<Measurement>,
}

/// `{"unitCode": "...", "value": 12.3}`; only the value is used.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Measurement {
    value: Option<f64>,
}

fn measurement(m: Option<Measurement>) -> Option<f64> {
    m.and_then(|m| m.value)
}

#[derive(Debug, Deserialize)]
struct AlertCollection {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    properties: AlertProps,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AlertProps {
    id: Option<String>,
    event: Option<String>,
    severity: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    effective: Option<String>,
    expires: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProps,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ForecastProps {
    periods: Vec<PeriodWire>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PeriodWire {
    name: Option<String>,
    temperature: Option<f64>,
    temperature_unit: Option<String>,
    /// A plain string ("10 mph") on most endpoints, a quantity object on some.
    wind_speed: Option<Value>,
    wind_direction: Option<String>,
    detailed_forecast: Option<String>,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

pub(crate) fn parse_observation(body: &str) -> Result<Observation, FetchError> {
    let p = decode::<ObservationResponse>(body)?.properties;
    Ok(Observation {
        temperature: measurement(p.temperature),
        wind_speed: measurement(p.wind_speed),
        wind_direction: measurement(p.wind_direction),
        visibility: measurement(p.visibility),
        text_description: p.text_description,
        raw_message: p.raw_message,
    })
}

pub(crate) fn parse_alerts(body: &str) -> Result<Vec<Alert>, FetchError> {
    let collection: AlertCollection = decode(body)?;
    Ok(collection
        .features
        .into_iter()
        .map(|f| {
            let p = f.properties;
            Alert {
                id: f.id.or(p.id).unwrap_or_default(),
                event: p.event.unwrap_or_default(),
                severity: p.severity.unwrap_or_default(),
                headline: p.headline.unwrap_or_default(),
                description: p.description.unwrap_or_default(),
                effective: p.effective.unwrap_or_default(),
                expires: p.expires.unwrap_or_default(),
            }
        })
        .collect())
}

pub(crate) fn parse_forecast(body: &str) -> Result<Vec<ForecastPeriod>, FetchError> {
    let response: ForecastResponse = decode(body)?;
    Ok(response
        .properties
        .periods
        .into_iter()
        .map(|p| ForecastPeriod {
            name: p.name.unwrap_or_default(),
            temperature: p.temperature,
            temperature_unit: p.temperature_unit,
            wind_speed: p.wind_speed.and_then(wind_speed_text),
            wind_direction: p.wind_direction,
            detailed_forecast: p.detailed_forecast,
        })
        .collect())
}

fn wind_speed_text(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("value").and_then(|v| match v {
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
        _ => None,
    }
}
