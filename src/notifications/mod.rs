//! New-alert notifications: a terminal bell plus a highlighted callout in
//! the output pane.
//!
//! Only the alert monitor triggers these; command results never ring.

use std::io::Write;

use crate::weather::Alert;

/// Callout text for a newly detected alert.
pub fn alert_callout(alert: &Alert) -> String {
    format!(
        "NEW ALERT DETECTED!\nType: {}\nSeverity: {}\nHeadline: {}\n",
        alert.event, alert.severity, alert.headline
    )
}

/// Rings the terminal bell.
pub struct Notifier {
    bell: bool,
}

impl Notifier {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    /// Audible half of a notification. Write errors are ignored; the
    /// callout is still shown.
    pub fn ring(&self) {
        if !self.bell {
            return;
        }
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }

    pub fn bell_enabled(&self) -> bool {
        self.bell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::fake::alert;

    #[test]
    fn callout_lists_type_severity_headline() {
        let text = alert_callout(&alert("7"));
        assert_eq!(
            text,
            "NEW ALERT DETECTED!\nType: Event 7\nSeverity: Moderate\nHeadline: Headline 7\n"
        );
    }

    #[test]
    fn silent_notifier_reports_disabled() {
        let notifier = Notifier::new(false);
        assert!(!notifier.bell_enabled());
        notifier.ring(); // no-op
    }
}
