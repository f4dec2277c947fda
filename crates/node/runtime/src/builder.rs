//! Node construction from the command line.

use std::sync::Arc;

use synclog_cli::SynclogCli;
use synclog_harness::{Harness, SimulatedNode};
use tokio_util::sync::CancellationToken;

/// Build the simulated node and start driving it with the CLI's harness settings.
///
/// The driver stops when `cancel` fires.
pub fn build_node(cli: &SynclogCli, cancel: CancellationToken) -> Harness {
    let node = Arc::new(SimulatedNode::new());
    Harness::spawn(cli.harness_config(), node, cancel)
}
