//! Scripted [`WeatherService`] for tests. No network.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{Alert, FetchError, ForecastPeriod, Observation, WeatherService};

/// Unknown stations/zones answer "not found". Alert responses are a queue per
/// zone; the last queued response repeats once the queue drains.
#[derive(Default)]
pub struct FakeWeather {
    observations: Mutex<HashMap<String, Result<Observation, FetchError>>>,
    alerts: Mutex<HashMap<String, VecDeque<Result<Vec<Alert>, FetchError>>>>,
    alert_delays: Mutex<HashMap<String, Duration>>,
    forecasts: Mutex<HashMap<String, Result<Vec<ForecastPeriod>, FetchError>>>,
    alert_calls: AtomicUsize,
}

impl FakeWeather {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observation(self, station: &str, obs: Result<Observation, FetchError>) -> Self {
        self.observations
            .lock()
            .unwrap()
            .insert(station.to_string(), obs);
        self
    }

    pub fn with_forecast(self, zone: &str, periods: Result<Vec<ForecastPeriod>, FetchError>) -> Self {
        self.forecasts
            .lock()
            .unwrap()
            .insert(zone.to_string(), periods);
        self
    }

    pub fn with_alerts(self, zone: &str, alerts: Result<Vec<Alert>, FetchError>) -> Self {
        self.push_alerts(zone, alerts);
        self
    }

    /// Queue the next alert response for `zone`.
    pub fn push_alerts(&self, zone: &str, alerts: Result<Vec<Alert>, FetchError>) {
        self.alerts
            .lock()
            .unwrap()
            .entry(zone.to_string())
            .or_default()
            .push_back(alerts);
    }

    /// Make alert fetches for `zone` take `delay` before answering.
    pub fn delay_alerts(&self, zone: &str, delay: Duration) {
        self.alert_delays
            .lock()
            .unwrap()
            .insert(zone.to_string(), delay);
    }

    pub fn alert_calls(&self) -> usize {
        self.alert_calls.load(Ordering::SeqCst)
    }
}

/// Minimal alert with just an id and an event name.
pub fn alert(id: &str) -> Alert {
    Alert {
        id: id.to_string(),
        event: format!("Event {}", id),
        severity: "Moderate".to_string(),
        headline: format!("Headline {}", id),
        ..Alert::default()
    }
}

#[async_trait]
impl WeatherService for FakeWeather {
    async fn latest_observation(&self, station: &str) -> Result<Observation, FetchError> {
        self.observations
            .lock()
            .unwrap()
            .get(station)
            .cloned()
            .unwrap_or(Err(FetchError::StationNotFound))
    }

    async fn active_alerts(&self, zone: &str) -> Result<Vec<Alert>, FetchError> {
        self.alert_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.alert_delays.lock().unwrap().get(zone).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut alerts = self.alerts.lock().unwrap();
        match alerts.get_mut(zone) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(Ok(Vec::new())),
            None => Err(FetchError::ZoneNotFound),
        }
    }

    async fn zone_forecast(&self, zone: &str) -> Result<Vec<ForecastPeriod>, FetchError> {
        self.forecasts
            .lock()
            .unwrap()
            .get(zone)
            .cloned()
            .unwrap_or(Err(FetchError::ZoneNotFound))
    }
}
