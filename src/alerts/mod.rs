mod monitor;
mod tracker;

pub use monitor::{AlertMonitor, MonitorEvent};
pub use tracker::AlertTracker;
