//! Completion notifier backends for the terminal front-end.

use std::io::Write;

use notify_rust::Notification;
use pomotick_core::{Config, NotifierSet, NotifyError, Notifier, SessionType};

/// Rings the terminal bell on stderr.
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify_session_complete(&self, _session: SessionType) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))
    }
}

/// Shows a desktop notification.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify_session_complete(&self, session: SessionType) -> Result<(), NotifyError> {
        let body = if session.is_break() {
            format!("{} is over. Back to focus.", session.label())
        } else {
            "Focus session complete. Time for a break.".to_string()
        };
        Notification::new()
            .summary("Pomotick")
            .body(&body)
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Unavailable(e.to_string()))
    }
}

/// Build the notifier set selected by the configuration.
pub fn from_config(config: &Config) -> NotifierSet {
    let mut set = NotifierSet::new();
    if !config.notifications.enabled {
        return set;
    }
    if config.notifications.bell {
        set = set.with(TerminalBell);
    }
    if config.notifications.desktop {
        set = set.with(DesktopNotifier);
    }
    set
}
