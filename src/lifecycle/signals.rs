//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGTERM/SIGINT (ctrl-c elsewhere)
//! - Translate the first signal into `Shutdown::trigger`
//! - If listeners cannot be installed, log it and keep running; shutdown
//!   then only comes from other triggers

use std::future::Future;
use std::io;

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Resolves when the process receives a termination signal.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

/// Resolves when the process receives ctrl-c.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
}

/// Trigger `shutdown` on the first termination signal.
pub fn spawn_signal_handler(shutdown: &Shutdown) -> JoinHandle<()> {
    tokio::spawn(forward_signal(shutdown.clone(), wait_for_signal()))
}

async fn forward_signal<F>(shutdown: Shutdown, signal: F)
where
    F: Future<Output = io::Result<&'static str>>,
{
    tokio::select! {
        res = signal => match res {
            Ok(name) => {
                tracing::info!(signal = name, "Received signal, shutting down");
                shutdown.trigger();
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to listen for signals, signal-driven shutdown disabled"
                );
                shutdown.wait().await;
            }
        },
        _ = shutdown.wait() => {}
    }
}
