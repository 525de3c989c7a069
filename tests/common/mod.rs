//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::any;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use url::Url;

/// What the mock endpoint saw.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
}

/// A local HTTP endpoint that records every request it receives.
///
/// Routes:
/// - `/bar`  → 200
/// - `/fail` → 500
/// - `/slow` → never answers within a test's lifetime
/// - `/large` → 200 with a multi-megabyte body
pub struct RecordingBackend {
    pub addr: SocketAddr,
    requests: mpsc::UnboundedReceiver<RecordedRequest>,
}

impl RecordingBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, requests) = mpsc::unbounded_channel();

        let app = Router::new()
            .route("/bar", any(ok))
            .route("/fail", any(fail))
            .route("/slow", any(slow))
            .route("/large", any(large))
            .with_state(tx);

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, requests }
    }

    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).unwrap()
    }

    /// Wait for the next recorded request.
    pub async fn next_request(&mut self) -> RecordedRequest {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("endpoint was not hit")
            .expect("endpoint stopped")
    }
}

/// Answers one request with a body shorter than its `Content-Length`, then
/// closes the connection.
#[allow(dead_code)]
pub async fn truncated_body_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await;
        let _ = stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nhello")
            .await;
        let _ = stream.shutdown().await;
    });

    Url::parse(&format!("http://{addr}/truncated")).unwrap()
}

/// Client that ignores proxy environment variables.
#[allow(dead_code)]
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

type Recorder = mpsc::UnboundedSender<RecordedRequest>;

fn record(tx: &Recorder, method: Method, path: &str, headers: HeaderMap) {
    let _ = tx.send(RecordedRequest {
        method,
        path: path.to_string(),
        headers,
    });
}

async fn ok(State(tx): State<Recorder>, method: Method, headers: HeaderMap) -> StatusCode {
    record(&tx, method, "/bar", headers);
    StatusCode::OK
}

async fn fail(State(tx): State<Recorder>, method: Method, headers: HeaderMap) -> StatusCode {
    record(&tx, method, "/fail", headers);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow(State(tx): State<Recorder>, method: Method, headers: HeaderMap) -> StatusCode {
    record(&tx, method, "/slow", headers);
    tokio::time::sleep(Duration::from_secs(60)).await;
    StatusCode::OK
}

async fn large(State(tx): State<Recorder>, method: Method, headers: HeaderMap) -> Vec<u8> {
    record(&tx, method, "/large", headers);
    vec![0u8; LARGE_BODY_LEN]
}

/// Size of the `/large` response body.
const LARGE_BODY_LEN: usize = 8 * 1024 * 1024;
