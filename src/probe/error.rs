//! Error types for probe attempts.

use std::time::Duration;
use thiserror::Error;

/// Reasons a single probe attempt failed.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The configured HTTP method is not a valid token.
    #[error("invalid http method: {0:?}")]
    InvalidMethod(String),

    /// A header injector produced a name or value the HTTP types reject.
    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    /// Building or sending the request failed.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response arrived but its body could not be drained.
    #[error("failed to release response body: {0}")]
    Body(#[source] reqwest::Error),

    /// TCP dial failure.
    #[error("tcp connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe's own deadline elapsed.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// The cancellation token fired mid-attempt.
    #[error("probe cancelled")]
    Cancelled,

    /// Failure reported by a user-supplied probe.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ProbeError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::InvalidMethod(_) => "invalid_method",
            ProbeError::InvalidHeader { .. } => "invalid_header",
            ProbeError::Request(_) => "request",
            ProbeError::Body(_) => "body",
            ProbeError::Connect { .. } => "connect",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::Cancelled => "cancelled",
            ProbeError::Other(_) => "other",
        }
    }

    /// Wrap any error from a custom probe.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ProbeError::Other(err.into())
    }
}
