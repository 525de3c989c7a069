//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the pinger.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::loader::ConfigError;
use crate::probe::{http::DEFAULT_METHOD, tcp::DEFAULT_CONNECT_TIMEOUT, HttpProbe, Probe, TcpProbe};
use crate::worker::{WorkerOptions, DEFAULT_INTERVAL};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PingerConfig {
    /// Scheduling settings.
    pub worker: WorkerConfig,

    /// What to probe.
    pub probe: ProbeConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Worker scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Probe interval in milliseconds.
    pub interval_ms: u64,
}

impl WorkerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Options without an error handler; callers attach their own.
    pub fn options(&self) -> WorkerOptions {
        WorkerOptions::default().with_interval(self.interval())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

/// Probe selection, tagged by `kind`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeConfig {
    Http(HttpProbeConfig),
    Tcp(TcpProbeConfig),
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig::Http(HttpProbeConfig::default())
    }
}

impl ProbeConfig {
    /// Build the runtime probe described by this config.
    pub fn build(&self) -> Result<Box<dyn Probe>, ConfigError> {
        Ok(match self {
            ProbeConfig::Http(http) => Box::new(http.build_probe()?),
            ProbeConfig::Tcp(tcp) => Box::new(tcp.build_probe()),
        })
    }

    /// Human-readable target for logs.
    pub fn target(&self) -> &str {
        match self {
            ProbeConfig::Http(http) => &http.url,
            ProbeConfig::Tcp(tcp) => &tcp.address,
        }
    }
}

/// HTTP probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpProbeConfig {
    /// Fully-qualified target URL.
    pub url: String,

    /// HTTP method (default: HEAD).
    pub method: String,

    /// Whole-request timeout applied to the HTTP client.
    pub timeout_ms: Option<u64>,

    /// Headers appended to every request, in order.
    pub headers: Vec<HeaderConfig>,
}

impl HttpProbeConfig {
    pub fn build_probe(&self) -> Result<HttpProbe, ConfigError> {
        let url = Url::parse(&self.url)?;

        let mut builder = HttpProbe::builder(url).method(self.method.clone());
        if let Some(ms) = self.timeout_ms {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_millis(ms))
                .build()
                .map_err(ConfigError::Client)?;
            builder = builder.client(client);
        }
        for header in &self.headers {
            builder = builder.header(header.name.clone(), header.value.clone());
        }

        Ok(builder.build())
    }
}

impl Default for HttpProbeConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: DEFAULT_METHOD.to_string(),
            timeout_ms: None,
            headers: Vec::new(),
        }
    }
}

/// A single header to append.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderConfig {
    pub name: String,
    pub value: String,
}

/// TCP probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TcpProbeConfig {
    /// Target as `host:port`.
    pub address: String,

    /// Connect timeout in milliseconds.
    pub timeout_ms: u64,
}

impl TcpProbeConfig {
    pub fn build_probe(&self) -> TcpProbe {
        TcpProbe::new(self.address.clone()).with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

impl Default for TcpProbeConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            timeout_ms: DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's events; `RUST_LOG` overrides.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
