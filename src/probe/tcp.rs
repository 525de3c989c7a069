//! TCP connect probing.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Probe, ProbeError};

/// Connect timeout used when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe that opens (and immediately drops) one TCP connection per attempt.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    /// `address` is a `host:port` pair, resolved on every attempt.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn attempt(&self, cancel: &CancellationToken) -> Result<(), ProbeError> {
        let connect = timeout(self.timeout, TcpStream::connect(self.address.as_str()));

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProbeError::Cancelled),
            result = connect => result,
        };

        match result {
            Ok(Ok(_stream)) => {
                debug!(address = %self.address, "TCP probe connected");
                Ok(())
            }
            Ok(Err(source)) => Err(ProbeError::Connect {
                addr: self.address.clone(),
                source,
            }),
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_to_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { while listener.accept().await.is_ok() {} });

        let probe = TcpProbe::new(addr.to_string());
        let result = probe.attempt(&CancellationToken::new()).await;
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        // Grab a free port, then close it again.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();

        let probe = TcpProbe::new(addr.to_string()).with_timeout(Duration::from_secs(1));
        match probe.attempt(&CancellationToken::new()).await {
            Err(ProbeError::Connect { addr: a, .. }) => assert_eq!(a, addr.to_string()),
            other => panic!("expected Connect error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_before_connect() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let probe = TcpProbe::new("127.0.0.1:9");
        let result = probe.attempt(&cancel).await;
        assert!(matches!(result, Err(ProbeError::Cancelled)), "{result:?}");
    }

    #[test]
    fn default_timeout() {
        let probe = TcpProbe::new("localhost:80");
        assert_eq!(probe.address(), "localhost:80");
        assert_eq!(probe.timeout, DEFAULT_CONNECT_TIMEOUT);
    }
}
