//! Probe subsystem.
//!
//! # Data Flow
//! ```text
//! Worker tick
//!     → Probe::attempt(&scope)
//!         http.rs: one request/response round trip, body drained
//!         tcp.rs:  one TCP connect
//!     → Ok(()) | Err(ProbeError)
//! ```
//!
//! # Design Decisions
//! - One method, object-safe: a worker owns a `Box<dyn Probe>`
//! - Every blocking step races the cancellation token
//! - No retries inside a probe; pacing belongs to the worker

pub mod error;
pub mod http;
pub mod tcp;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use error::ProbeError;
pub use http::{HttpProbe, HttpProbeBuilder};
pub use tcp::TcpProbe;

/// A single liveness check against some target.
///
/// Implementations perform exactly one externally observable action per
/// call and must return [`ProbeError::Cancelled`] promptly once `cancel`
/// fires.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Attempt the probe once.
    async fn attempt(&self, cancel: &CancellationToken) -> Result<(), ProbeError>;
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for Box<P> {
    async fn attempt(&self, cancel: &CancellationToken) -> Result<(), ProbeError> {
        (**self).attempt(cancel).await
    }
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for std::sync::Arc<P> {
    async fn attempt(&self, cancel: &CancellationToken) -> Result<(), ProbeError> {
        (**self).attempt(cancel).await
    }
}
