//! Periodic health-check library.
//!
//! A [`Probe`] performs one check (an HTTP request, a TCP dial, or anything
//! implementing the trait). A [`Worker`] runs that probe on a fixed interval
//! until its cancellation token fires or [`Worker::stop`] is called.
//!
//! ```no_run
//! use std::time::Duration;
//! use pinger::{HttpProbe, Shutdown, Worker, WorkerOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let probe = HttpProbe::builder("http://127.0.0.1:8080/health".parse()?)
//!     .method("GET")
//!     .header("X-Probe", "pinger")
//!     .build();
//!
//! let options = WorkerOptions::default()
//!     .with_interval(Duration::from_secs(5))
//!     .with_error_handler(|err| eprintln!("probe failed: {err}"));
//!
//! let shutdown = Shutdown::new();
//! Worker::new(probe, options).run(shutdown.token()).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod worker;

pub use config::PingerConfig;
pub use lifecycle::Shutdown;
pub use probe::{HttpProbe, Probe, ProbeError, TcpProbe};
pub use worker::{Worker, WorkerOptions, WorkerState};
