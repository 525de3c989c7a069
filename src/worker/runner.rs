//! Periodic probe scheduling.
//!
//! # Responsibilities
//! - Tick every `interval`, one probe attempt per tick
//! - Route failures to the error handler
//! - Stop on parent cancellation or `Worker::stop`

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::observability::metrics;
use crate::probe::{Probe, ProbeError};
use crate::worker::options::{WorkerOptions, DEFAULT_INTERVAL};
use crate::worker::state::WorkerState;

/// Runs a probe on a fixed interval until cancelled.
///
/// Share it through an `Arc` to call [`Worker::stop`] from another task
/// while [`Worker::run`] is in progress. Runs must not overlap.
pub struct Worker {
    probe: Box<dyn Probe>,
    options: WorkerOptions,
    state: AtomicU8,
    /// Cancellation scope of the active run; `None` outside `run`.
    scope: ArcSwapOption<CancellationToken>,
}

impl Worker {
    pub fn new<P>(probe: P, options: WorkerOptions) -> Self
    where
        P: Probe + 'static,
    {
        let mut options = options;
        if options.interval.is_zero() {
            warn!(
                default_ms = DEFAULT_INTERVAL.as_millis() as u64,
                "Zero probe interval configured, using default"
            );
            options.interval = DEFAULT_INTERVAL;
        } else if Instant::now().checked_add(options.interval).is_none() {
            warn!(
                default_ms = DEFAULT_INTERVAL.as_millis() as u64,
                "Probe interval exceeds the timer range, using default"
            );
            options.interval = DEFAULT_INTERVAL;
        }

        Self {
            probe: Box::new(probe),
            options,
            state: AtomicU8::new(WorkerState::Idle as u8),
            scope: ArcSwapOption::empty(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.options.interval
    }

    pub fn state(&self) -> WorkerState {
        WorkerState::from(self.state.load(Ordering::Acquire))
    }

    /// Probe every interval until `parent` is cancelled or [`Worker::stop`]
    /// is called.
    ///
    /// Probe failures never end the run. The first attempt happens one full
    /// interval after the call.
    pub async fn run(&self, parent: &CancellationToken) {
        let scope = Arc::new(parent.child_token());
        let _guard = RunGuard::enter(self, scope.clone());

        let now = Instant::now();
        let (first_tick, interval) = match now.checked_add(self.options.interval) {
            Some(first_tick) => (first_tick, self.options.interval),
            None => (now + DEFAULT_INTERVAL, DEFAULT_INTERVAL),
        };
        info!(interval_ms = interval.as_millis() as u64, "Worker starting");

        let mut ticker = time::interval_at(first_tick, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = scope.cancelled() => break,
                _ = ticker.tick() => self.probe_once(&scope).await,
            }
        }

        info!("Worker stopped");
    }

    /// Cancel the active run, if any. Safe to call at any time.
    pub fn stop(&self) {
        if let Some(scope) = self.scope.load_full() {
            scope.cancel();
        }
    }

    async fn probe_once(&self, scope: &CancellationToken) {
        let start = Instant::now();
        let result = self.probe.attempt(scope).await;

        // Interrupted by shutdown rather than a real failure.
        if matches!(result, Err(ProbeError::Cancelled)) && scope.is_cancelled() {
            debug!("Probe interrupted by cancellation");
            return;
        }
        metrics::record_attempt(start.elapsed(), &result);

        match result {
            Ok(()) => debug!("Probe succeeded"),
            Err(e) => match &self.options.error_handler {
                Some(handler) => handler(&e),
                None => debug!(error = %e, kind = e.kind(), "Probe failed"),
            },
        }
    }
}

/// Publishes a run's scope for `stop()` and retracts it on every exit path,
/// including the run future being dropped.
struct RunGuard<'a> {
    worker: &'a Worker,
    scope: Arc<CancellationToken>,
}

impl<'a> RunGuard<'a> {
    fn enter(worker: &'a Worker, scope: Arc<CancellationToken>) -> Self {
        worker.scope.store(Some(scope.clone()));
        worker
            .state
            .store(WorkerState::Running as u8, Ordering::Release);
        Self { worker, scope }
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let scope = &self.scope;
        self.worker.scope.rcu(|current| match current {
            Some(active) if Arc::ptr_eq(active, scope) => None,
            other => other.clone(),
        });
        self.worker
            .state
            .store(WorkerState::Stopped as u8, Ordering::Release);
    }
}
