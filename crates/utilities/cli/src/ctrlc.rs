//! Shutdown signal utilities.
//!
//! Waits for `SIGINT` (Ctrl+C) or, on unix, `SIGTERM`, and turns either into
//! a cancelled [`CancellationToken`].

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Waits for `SIGINT` or `SIGTERM`.
///
/// # Errors
///
/// Returns an error if a signal handler could not be installed.
///
/// # Examples
///
/// ```no_run
/// use synclog_cli::wait_for_shutdown_signal;
///
/// #[tokio::main]
/// async fn main() -> std::io::Result<()> {
///     tokio::select! {
///         res = wait_for_shutdown_signal() => res?,
///         _ = async { /* main work */ } => {}
///     }
///     Ok(())
/// }
/// ```
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Cancels `token` once a shutdown signal arrives.
///
/// The spawned task exits without cancelling if the token is cancelled first.
/// If the handlers cannot be installed the token is cancelled right away.
pub fn cancel_on_shutdown(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            res = wait_for_shutdown_signal() => {
                match res {
                    Ok(()) => tracing::info!("Received shutdown signal, stopping"),
                    Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signals"),
                }
                token.cancel();
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_exits_when_token_cancelled_first() {
        let token = CancellationToken::new();
        let handle = cancel_on_shutdown(token.clone());
        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn wait_for_shutdown_signal_signature() {
        use std::future::Future;
        fn assert_future<F: Future<Output = std::io::Result<()>>>(_: F) {}
        assert_future(wait_for_shutdown_signal());
    }
}
