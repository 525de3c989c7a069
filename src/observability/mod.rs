//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Worker and probes produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (attempt/failure counters, latency histogram)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → whatever `metrics` recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Logging level comes from config, `RUST_LOG` overrides it
//! - Metrics are recorded through the `metrics` facade only; no exporter
//!   is bundled, so recording is a no-op until a recorder is installed

pub mod logging;
pub mod metrics;
