//! Worker configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::probe::ProbeError;

/// Interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Callback invoked synchronously with every probe failure.
pub type ErrorHandler = Arc<dyn Fn(&ProbeError) + Send + Sync>;

/// Settings fixed for the lifetime of a [`Worker`](super::Worker).
#[derive(Clone)]
pub struct WorkerOptions {
    /// Time between probe attempts.
    pub interval: Duration,
    /// Receives probe failures. `None` drops them.
    pub error_handler: Option<ErrorHandler>,
}

impl WorkerOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ProbeError) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            error_handler: None,
        }
    }
}

impl fmt::Debug for WorkerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerOptions")
            .field("interval", &self.interval)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = WorkerOptions::default();
        assert_eq!(options.interval, Duration::from_secs(10));
        assert!(options.error_handler.is_none());
    }

    #[test]
    fn with_interval_overrides_default() {
        let options = WorkerOptions::default().with_interval(Duration::from_millis(250));
        assert_eq!(options.interval, Duration::from_millis(250));
    }

    #[test]
    fn with_error_handler_sets_handler() {
        let options = WorkerOptions::default().with_error_handler(|_| {});
        assert!(options.error_handler.is_some());
        assert!(format!("{options:?}").contains("error_handler: true"));
    }
}
