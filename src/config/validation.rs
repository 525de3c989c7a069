//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the probe target, method and headers
//! - Validate value ranges (interval > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: PingerConfig → Result<(), Vec<ValidationError>>
//! - Probe and worker constructors stay infallible; this is the front door
//!   for file and CLI input only

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use thiserror::Error;
use url::Url;

use crate::config::schema::{HttpProbeConfig, PingerConfig, ProbeConfig, TcpProbeConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("worker.interval_ms must be greater than zero")]
    ZeroInterval,

    #[error("probe.url is required")]
    MissingUrl,

    #[error("probe.url {url:?} is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("probe.method {0:?} is not a valid HTTP method")]
    InvalidMethod(String),

    #[error("probe header {0:?} has an invalid name")]
    InvalidHeaderName(String),

    #[error("probe header {0:?} has an invalid value")]
    InvalidHeaderValue(String),

    #[error("probe.address is required")]
    MissingAddress,

    #[error("probe.address {0:?} must be host:port")]
    InvalidAddress(String),

    #[error("probe.timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &PingerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.worker.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    match &config.probe {
        ProbeConfig::Http(http) => validate_http(http, &mut errors),
        ProbeConfig::Tcp(tcp) => validate_tcp(tcp, &mut errors),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_http(http: &HttpProbeConfig, errors: &mut Vec<ValidationError>) {
    if http.url.is_empty() {
        errors.push(ValidationError::MissingUrl);
    } else {
        match Url::parse(&http.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidUrl {
                url: http.url.clone(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidUrl {
                url: http.url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if Method::from_bytes(http.method.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidMethod(http.method.clone()));
    }

    if http.timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    for header in &http.headers {
        if HeaderName::from_bytes(header.name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(header.name.clone()));
        }
        if HeaderValue::from_str(&header.value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue(header.name.clone()));
        }
    }
}

fn validate_tcp(tcp: &TcpProbeConfig, errors: &mut Vec<ValidationError>) {
    if tcp.address.is_empty() {
        errors.push(ValidationError::MissingAddress);
    } else {
        let valid = tcp
            .address
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !valid {
            errors.push(ValidationError::InvalidAddress(tcp.address.clone()));
        }
    }

    if tcp.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
}
