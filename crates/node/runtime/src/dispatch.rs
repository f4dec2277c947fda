//! Spawning one status loop per feature.

use std::sync::{Arc, Mutex};

use synclog_cli::DisplayFormat;
use synclog_dash::{DashState, dash_display_system};
use synclog_dispatch::{
    DisplaySystem, ProgressState, StatusConfig, StatusFeature, StatusFeatures, StatusLoop,
    StatusPrinter,
};
use synclog_display::{basic_display_system, green_display_system};
use synclog_node::Node;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The display system rendering `format`.
pub fn display_system(format: DisplayFormat) -> DisplaySystem {
    match format {
        DisplayFormat::Basic => basic_display_system(),
        DisplayFormat::Green => green_display_system(),
        DisplayFormat::Dash => dash_display_system(Arc::new(Mutex::new(DashState::new()))),
    }
}

/// Spawn one status loop per feature in `features`.
///
/// Every loop renders with the `format` display system into `printer` and
/// stops when `cancel` fires, yielding its final progress state.
pub fn dispatch_status_logs(
    features: &StatusFeatures,
    format: DisplayFormat,
    node: Arc<dyn Node>,
    printer: StatusPrinter,
    max_peers: usize,
    cancel: &CancellationToken,
) -> Vec<(StatusFeature, JoinHandle<ProgressState>)> {
    features
        .iter()
        .map(|(feature, interval)| {
            tracing::info!(%feature, ?interval, %format, "Dispatching status log");
            let config = StatusConfig::default().with_interval(interval).with_max_peers(max_peers);
            let handle = match feature {
                StatusFeature::Sync => StatusLoop::new(
                    Arc::clone(&node),
                    display_system(format),
                    config,
                    printer.clone(),
                )
                .spawn(cancel.child_token()),
            };
            (feature, handle)
        })
        .collect()
}
