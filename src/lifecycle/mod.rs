//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     root CancellationToken → handed to Worker::run
//!     trigger() / trigger_after(d) → cancels every derived scope
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - One root token per process; workers derive child scopes from it
//! - A deadline is just a delayed trigger

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
