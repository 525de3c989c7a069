//! HTTP request probing.
//!
//! # Responsibilities
//! - Send one request per attempt to a fixed target URL
//! - Inject configured headers, in registration order
//! - Drain the response body before reporting success
//!
//! # Design Decisions
//! - Default method is `HEAD`: idempotent and side-effect free
//! - The method is parsed per attempt, so a bad method fails every attempt
//!   instead of failing construction
//! - `header(k, v)` appends; repeated keys yield multiple values
//! - The response status is not inspected; any completed round trip passes

use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::{Probe, ProbeError};

/// Method used when none is configured.
pub const DEFAULT_METHOD: &str = "HEAD";

/// Mutates the outgoing request headers.
pub type HeaderInjector =
    Arc<dyn Fn(&mut HeaderMap) -> Result<(), ProbeError> + Send + Sync>;

/// Shared client used by probes that were not given one.
pub fn default_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(Client::new).clone()
}

/// Probe that issues a single HTTP request per attempt.
#[derive(Clone)]
pub struct HttpProbe {
    url: Url,
    method: String,
    client: Client,
    injectors: Vec<HeaderInjector>,
}

impl HttpProbe {
    /// Probe `url` with the default method, client and no extra headers.
    pub fn new(url: Url) -> Self {
        Self::builder(url).build()
    }

    pub fn builder(url: Url) -> HttpProbeBuilder {
        HttpProbeBuilder {
            url,
            method: DEFAULT_METHOD.to_string(),
            client: None,
            injectors: Vec::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    fn build_request(&self) -> Result<reqwest::Request, ProbeError> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|_| ProbeError::InvalidMethod(self.method.clone()))?;

        let mut request = self
            .client
            .request(method, self.url.clone())
            .build()
            .map_err(ProbeError::Request)?;

        for inject in &self.injectors {
            inject(request.headers_mut())?;
        }

        Ok(request)
    }
}

impl fmt::Debug for HttpProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpProbe")
            .field("url", &self.url.as_str())
            .field("method", &self.method)
            .field("injectors", &self.injectors.len())
            .finish()
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn attempt(&self, cancel: &CancellationToken) -> Result<(), ProbeError> {
        let request = self.build_request()?;

        debug!(url = %self.url, method = %self.method, "HTTP probe sending request");

        let mut response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProbeError::Cancelled),
            res = self.client.execute(request) => res.map_err(ProbeError::Request)?,
        };

        let status = response.status();

        // The round trip only counts once the body is fully released.
        // Chunks are discarded as they arrive so large bodies are never buffered.
        let drain = async {
            while response.chunk().await.map_err(ProbeError::Body)?.is_some() {}
            Ok::<(), ProbeError>(())
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProbeError::Cancelled),
            drained = drain => {
                drained?;
                debug!(url = %self.url, %status, "HTTP probe completed");
                Ok(())
            }
        }
    }
}

/// Builder for [`HttpProbe`]. Building never fails.
pub struct HttpProbeBuilder {
    url: Url,
    method: String,
    client: Option<Client>,
    injectors: Vec<HeaderInjector>,
}

impl HttpProbeBuilder {
    /// HTTP verb for each request. Validated when a probe is attempted.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Reuse an existing client (connection pool, timeouts, TLS settings).
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Append `key: value` to every request.
    pub fn header(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        self.header_with(move |headers| {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| ProbeError::InvalidHeader { name: key.clone() })?;
            let value = HeaderValue::from_str(&value)
                .map_err(|_| ProbeError::InvalidHeader { name: key.clone() })?;
            headers.append(name, value);
            Ok(())
        })
    }

    /// Register an arbitrary header injector.
    pub fn header_with<F>(mut self, inject: F) -> Self
    where
        F: Fn(&mut HeaderMap) -> Result<(), ProbeError> + Send + Sync + 'static,
    {
        self.injectors.push(Arc::new(inject));
        self
    }

    pub fn build(self) -> HttpProbe {
        HttpProbe {
            url: self.url,
            method: self.method,
            client: self.client.unwrap_or_else(default_client),
            injectors: self.injectors,
        }
    }
}
