/// Blocking, user-facing notice shown when an action is rejected or a request fails
pub trait Alerts {
    fn alert(&self, message: &str);
}

/// Sends alerts to the log, for consoles running without a display
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl Alerts for LogAlerts {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "Console alert");
    }
}
