//! Weather data provider.
//!
//! The rest of the crate only talks to [`WeatherService`]; [`NwsClient`] is
//! the production implementation over the National Weather Service API.

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod format;
mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use client::NwsClient;
pub use models::{Alert, ForecastPeriod, Observation};

/// Why a fetch produced no data. `Display` is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Station not found")]
    StationNotFound,
    #[error("Zone not found")]
    ZoneNotFound,
    #[error("{0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Read access to the three weather endpoints the console uses.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Latest observation for a station (e.g. `KPNS`).
    async fn latest_observation(&self, station: &str) -> Result<Observation, FetchError>;

    /// Active alerts for a zone (e.g. `FLZ204`), in the provider's order.
    async fn active_alerts(&self, zone: &str) -> Result<Vec<Alert>, FetchError>;

    /// Forecast periods for a zone.
    async fn zone_forecast(&self, zone: &str) -> Result<Vec<ForecastPeriod>, FetchError>;
}
