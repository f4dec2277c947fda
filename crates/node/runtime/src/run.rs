//! Process entry points.

use std::sync::Arc;

use eyre::{Result, WrapErr};
use synclog_cli::{SynclogCli, cancel_on_shutdown};
use synclog_dispatch::{OutputGate, StatusPrinter, TracingSink};
use synclog_node::Node;
use tokio_util::sync::CancellationToken;

use crate::{build_node, dispatch_status_logs};

/// Run the status display until `SIGINT` or `SIGTERM`.
///
/// `gate` controls the terminal log writer and is handed to the display
/// system through the status printer.
pub async fn run(cli: SynclogCli, gate: OutputGate) -> Result<()> {
    let cancel = CancellationToken::new();
    let signals = cancel_on_shutdown(cancel.clone());
    let result = run_until(cli, gate, cancel.clone()).await;
    cancel.cancel();
    if let Err(e) = signals.await {
        tracing::warn!(error = %e, "Signal handler task failed");
    }
    result
}

/// Run the status display until `cancel` fires.
///
/// Invalid `--log-status` values are reported before the node starts.
pub async fn run_until(cli: SynclogCli, gate: OutputGate, cancel: CancellationToken) -> Result<()> {
    let features = cli.status_features().wrap_err("invalid --log-status")?;
    let printer = StatusPrinter::new(Arc::new(TracingSink), cli.display_level()).with_gate(gate);

    let harness = build_node(&cli, cancel.child_token());
    let node: Arc<dyn Node> = Arc::clone(harness.node()) as Arc<dyn Node>;
    let loops =
        dispatch_status_logs(&features, cli.display_fmt, node, printer, cli.max_peers, &cancel);

    cancel.cancelled().await;
    tracing::debug!("Shutting down status loops");

    for (feature, handle) in loops {
        let state = handle.await.wrap_err_with(|| format!("{feature} status loop panicked"))?;
        tracing::debug!(
            %feature,
            head = state.current_block_number(),
            mode = %state.mode,
            "Status loop stopped"
        );
    }
    harness.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn invalid_status_log_fails_fast() {
        let cli = SynclogCli::try_parse_from(["synclog", "--log-status", "sync=0"]).unwrap();
        let err =
            run_until(cli, OutputGate::default(), CancellationToken::new()).await.unwrap_err();
        assert!(err.to_string().contains("invalid --log-status"));
    }

    #[tokio::test]
    async fn stops_when_cancelled() {
        let cli =
            SynclogCli::try_parse_from(["synclog", "--log-status", "sync=1s", "--display", "0"])
                .unwrap();
        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            stopper.cancel();
        });
        run_until(cli, OutputGate::default(), cancel).await.unwrap();
    }
}
