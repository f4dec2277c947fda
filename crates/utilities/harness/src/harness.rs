//! Background driver for a [`SimulatedNode`].

use std::{sync::Arc, time::Duration};

use rand::{Rng, SeedableRng, rngs::StdRng};
use synclog_node::{DownloaderMode, Qos};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{HarnessConfig, SimulatedNode};

/// Peer the simulated sync cycle runs against.
const SYNC_PEER: &str = "5f2a61c0e8a1d3b7";

/// Drives a [`SimulatedNode`] through discovery, sync and import.
///
/// The driver runs as a tokio task until its token is cancelled. Dropping the
/// harness cancels it as well.
#[derive(Debug)]
pub struct Harness {
    node: Arc<SimulatedNode>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Harness {
    /// Spawn the driver for `node`.
    ///
    /// The driver stops when `cancel` (or the harness) is cancelled.
    pub fn spawn(
        config: HarnessConfig,
        node: Arc<SimulatedNode>,
        cancel: CancellationToken,
    ) -> Self {
        tracing::info!(?config, "Spawning simulated node harness");
        let task_node = Arc::clone(&node);
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_cancel.cancelled() => {}
                _ = drive(config, task_node) => {}
            }
            tracing::info!("Harness driver stopped");
        });
        Self { node, cancel, handle: Some(handle) }
    }

    /// The driven node.
    pub fn node(&self) -> &Arc<SimulatedNode> {
        &self.node
    }

    /// Stop the driver and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "Harness driver panicked");
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Walk the node through discovery, one sync cycle and then steady import.
async fn drive(config: HarnessConfig, node: Arc<SimulatedNode>) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let block_time = Duration::from_millis(config.block_time_ms);
    let mode = if config.fast_sync { DownloaderMode::Fast } else { DownloaderMode::Full };

    tokio::time::sleep(Duration::from_millis(config.discover_ms)).await;

    node.set_peer_count(config.peers);
    node.set_qos(Qos {
        rtt: Duration::from_millis(rng.gen_range(200..2_000)),
        ttl: Duration::from_secs(rng.gen_range(5..30)),
        confidence: rng.gen_range(0.5..1.0),
    });
    node.set_height(config.sync_target);
    node.start_sync(SYNC_PEER, mode);
    tracing::debug!(target_height = config.sync_target, %mode, "Simulated sync started");

    let batch = config.sync_batch.max(1);
    while node.head_number() < config.sync_target {
        let remaining = config.sync_target - node.head_number();
        let count = batch.min(remaining) as usize;
        if mode == DownloaderMode::Fast {
            node.import_headers(count, Duration::from_micros(rng.gen_range(500..5_000)));
        }
        let txs = random_tx_counts(&mut rng, count, config.max_txs_per_block);
        node.import_blocks(&txs, Duration::from_millis(rng.gen_range(5..250)));
        tokio::time::sleep(block_time).await;
    }

    node.finish_sync(SYNC_PEER);
    tracing::debug!(head = node.head_number(), "Simulated sync done");

    let mut produced: u64 = 0;
    loop {
        tokio::time::sleep(block_time).await;
        produced += 1;
        let tx_count = rng.gen_range(0..=config.max_txs_per_block);
        if config.mine_every > 0 && produced % config.mine_every == 0 {
            node.mine_block(tx_count);
        } else {
            node.import_blocks(&[tx_count], Duration::from_millis(rng.gen_range(1..50)));
        }
        if rng.gen_ratio(1, 20) {
            node.fork_head();
        }
        node.set_height(node.head_number());
    }
}

fn random_tx_counts(rng: &mut StdRng, count: usize, max: usize) -> Vec<usize> {
    (0..count).map(|_| rng.gen_range(0..=max)).collect()
}
