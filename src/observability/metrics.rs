//! Probe metrics.
//!
//! # Metrics
//! - `pinger_probe_attempts_total` (counter): every probe attempt
//! - `pinger_probe_failures_total` (counter): failed attempts by error kind
//! - `pinger_probe_duration_seconds` (histogram): attempt latency

use std::time::Duration;

use crate::probe::ProbeError;

pub const PROBE_ATTEMPTS: &str = "pinger_probe_attempts_total";
pub const PROBE_FAILURES: &str = "pinger_probe_failures_total";
pub const PROBE_DURATION: &str = "pinger_probe_duration_seconds";

/// Record the outcome of one probe attempt that took `elapsed`.
pub fn record_attempt(elapsed: Duration, result: &Result<(), ProbeError>) {
    ::metrics::counter!(PROBE_ATTEMPTS).increment(1);
    ::metrics::histogram!(PROBE_DURATION).record(elapsed.as_secs_f64());

    if let Err(e) = result {
        ::metrics::counter!(PROBE_FAILURES, "kind" => e.kind()).increment(1);
    }
}
