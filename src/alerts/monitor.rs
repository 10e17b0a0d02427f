//! Background alert polling for a single zone.
//!
//! Lifecycle: `Idle -> Active(zone) -> Active(other zone) -> Idle`.
//! Each start gets a new generation number. Events carry the generation
//! that produced them, and both the poll task and the receiver drop
//! anything from a generation that is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::AlertTracker;
use crate::weather::{Alert, WeatherService};

/// A newly observed alert, tagged with the monitor generation that saw it.
#[derive(Debug, Clone)]
pub struct MonitorEvent {
    pub generation: u64,
    pub zone: String,
    pub alert: Alert,
}

#[derive(Default)]
struct Slot {
    zone: Option<String>,
    task: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel(&mut self) -> Option<String> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.zone.take()
    }
}

/// Owns the single active alert poll, if any.
pub struct AlertMonitor {
    weather: Arc<dyn WeatherService>,
    poll_interval: Duration,
    events: mpsc::UnboundedSender<MonitorEvent>,
    generation: Arc<AtomicU64>,
    slot: Mutex<Slot>,
}

impl AlertMonitor {
    pub fn new(
        weather: Arc<dyn WeatherService>,
        poll_interval: Duration,
        events: mpsc::UnboundedSender<MonitorEvent>,
    ) -> Self {
        Self {
            weather,
            poll_interval,
            events,
            generation: Arc::new(AtomicU64::new(0)),
            slot: Mutex::new(Slot::default()),
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start monitoring `zone`, replacing any active monitor.
    ///
    /// Fetches the current alerts once to form the baseline. If that fetch
    /// fails the baseline is empty, so every alert on the next successful
    /// poll counts as new. Returns `false` if another start or a stop
    /// superseded this one while the baseline was loading.
    pub async fn start(&self, zone: &str) -> bool {
        let generation = {
            let mut slot = self.lock_slot();
            if let Some(previous) = slot.cancel() {
                tracing::info!(zone = %previous, "alert monitor replaced");
            }
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let baseline = match self.weather.active_alerts(zone).await {
            Ok(alerts) => alerts,
            Err(e) => {
                tracing::warn!(
                    zone,
                    error = %e,
                    "initial alert fetch failed; starting with an empty baseline"
                );
                Vec::new()
            }
        };

        let mut slot = self.lock_slot();
        if !self.is_current(generation) {
            tracing::debug!(zone, generation, "alert monitor start superseded");
            return false;
        }

        let task = tokio::spawn(poll_loop(PollTask {
            weather: Arc::clone(&self.weather),
            zone: zone.to_string(),
            generation,
            current: Arc::clone(&self.generation),
            tracker: AlertTracker::seeded(&baseline),
            period: self.poll_interval,
            events: self.events.clone(),
        }));
        slot.task = Some(task);
        slot.zone = Some(zone.to_string());

        tracing::info!(
            zone,
            generation,
            baseline = baseline.len(),
            "alert monitor started"
        );
        true
    }

    /// Stop the active monitor. Returns the zone that was being watched.
    pub fn stop(&self) -> Option<String> {
        let mut slot = self.lock_slot();
        self.generation.fetch_add(1, Ordering::SeqCst);
        let zone = slot.cancel();
        if let Some(zone) = &zone {
            tracing::info!(zone = %zone, "alert monitor stopped");
        }
        zone
    }

    /// Whether events of `generation` should still be acted on.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Zone being monitored, if any.
    pub fn active_zone(&self) -> Option<String> {
        self.lock_slot().zone.clone()
    }
}

impl Drop for AlertMonitor {
    fn drop(&mut self) {
        self.lock_slot().cancel();
    }
}

struct PollTask {
    weather: Arc<dyn WeatherService>,
    zone: String,
    generation: u64,
    current: Arc<AtomicU64>,
    tracker: AlertTracker,
    period: Duration,
    events: mpsc::UnboundedSender<MonitorEvent>,
}

impl PollTask {
    fn superseded(&self) -> bool {
        self.current.load(Ordering::SeqCst) != self.generation
    }
}

async fn poll_loop(mut task: PollTask) {
    let mut ticker = tokio::time::interval_at(Instant::now() + task.period, task.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let result = task.weather.active_alerts(&task.zone).await;
        if task.superseded() {
            return;
        }

        let current = match result {
            Ok(alerts) => alerts,
            Err(e) => {
                // Skip the cycle; the baseline stays as it was.
                tracing::debug!(zone = %task.zone, error = %e, "alert poll failed");
                continue;
            }
        };

        for alert in task.tracker.observe(current) {
            tracing::info!(zone = %task.zone, id = %alert.id, event = %alert.event, "new alert");
            let event = MonitorEvent {
                generation: task.generation,
                zone: task.zone.clone(),
                alert,
            };
            if task.events.send(event).is_err() {
                return;
            }
        }
    }
}
