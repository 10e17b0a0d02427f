use std::collections::HashSet;

use crate::weather::Alert;

/// Remembers which alert ids the last poll returned and reports the ones
/// that weren't there before.
#[derive(Debug, Default)]
pub struct AlertTracker {
    last_seen: HashSet<String>,
}

impl AlertTracker {
    /// Start from an already-known alert set.
    pub fn seeded(alerts: &[Alert]) -> Self {
        Self {
            last_seen: alerts.iter().map(|a| a.id.clone()).collect(),
        }
    }

    /// Record a poll result and return the alerts not seen last time, in the
    /// order the poll returned them. Alerts that vanished are forgotten.
    pub fn observe(&mut self, current: Vec<Alert>) -> Vec<Alert> {
        let mut reported = HashSet::new();
        let mut fresh = Vec::new();
        for alert in &current {
            if !self.last_seen.contains(&alert.id) && reported.insert(alert.id.clone()) {
                fresh.push(alert.clone());
            }
        }
        self.last_seen = current.into_iter().map(|a| a.id).collect();
        fresh
    }

    #[cfg(test)]
    pub fn last_seen(&self) -> &HashSet<String> {
        &self.last_seen
    }
}
