//! Worker subsystem.
//!
//! # Data Flow
//! ```text
//! Worker::run(&parent)
//!     → child scope (stored for Worker::stop)
//!     → periodic timer (first tick after one interval)
//!     → loop:
//!         scope cancelled → return
//!         tick            → Probe::attempt(&scope)
//!                         → Err → error handler (if any) / dropped
//! ```
//!
//! # State Machine (state.rs)
//! ```text
//! Idle → Running → Stopped
//!          ↑          │
//!          └──────────┘  (sequential re-runs)
//! ```
//!
//! # Design Decisions
//! - One probe in flight at most; a slow probe delays the next tick
//! - Probe failures never end a run; they are routed to the handler
//! - Without a handler failures are dropped (fire-and-forget)
//! - Cancellation is a normal exit, not an error

pub mod options;
pub mod runner;
pub mod state;

pub use options::{ErrorHandler, WorkerOptions, DEFAULT_INTERVAL};
pub use runner::Worker;
pub use state::WorkerState;
