//! Dashboard widget model.

use std::time::{Duration, SystemTime};

use synclog_dispatch::{BlockDiff, SyncMode};
use synclog_node::{Block, PeerInfo};
use synclog_tui_common::{BoundedSeries, calc_percent, format_age, format_duration};

/// Maximum number of samples kept per sparkline.
pub const SPARKLINE_LIMIT: usize = 100;

/// A titled, bounded sparkline series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparkSeries {
    /// Title drawn above the sparkline.
    pub title: String,
    /// The samples, oldest first.
    pub samples: BoundedSeries,
}

impl SparkSeries {
    /// An empty series titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), samples: BoundedSeries::new(SPARKLINE_LIMIT) }
    }
}

/// Everything the dashboard draws.
#[derive(Debug, Clone, PartialEq)]
pub struct DashState {
    /// Mode and local head, drawn as the gauge's border label.
    pub header: String,
    /// Local head as a percent of the sync height.
    pub gauge_percent: u16,
    /// Text drawn inside the gauge.
    pub gauge_label: String,
    /// Whether the local head reached the sync height.
    pub caught_up: bool,
    /// Blocks per chain insert.
    pub blocks: SparkSeries,
    /// Millions of gas per chain insert.
    pub mgas: SparkSeries,
    /// Transactions per chain insert.
    pub txs: SparkSeries,
    /// Peer count per tick.
    pub peers: SparkSeries,
    /// Connected peers.
    pub peer_list: Vec<String>,
}

impl Default for DashState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashState {
    /// An empty dashboard.
    pub fn new() -> Self {
        let mut peers = SparkSeries::new("Peers (0)");
        peers.samples.push(0);
        Self {
            header: String::new(),
            gauge_percent: 0,
            gauge_label: String::new(),
            caught_up: false,
            blocks: SparkSeries::new("Blks"),
            mgas: SparkSeries::new("Mgas"),
            txs: SparkSeries::new("Txs"),
            peers,
            peer_list: Vec::new(),
        }
    }

    /// Update the gauge for `local` out of `height`.
    pub fn set_sync_height(&mut self, local: u64, height: u64) {
        self.gauge_percent = calc_percent(local, height).clamp(0.0, 100.0) as u16;
        self.caught_up = local >= height;
        self.gauge_label =
            if self.caught_up { local.to_string() } else { format!("{local} / {height}") };
    }

    /// Append the totals of one chain insert ending at `local`.
    pub fn record_insert(
        &mut self,
        local: u64,
        diff: BlockDiff,
        inserted_at: SystemTime,
        elapsed: Duration,
    ) {
        self.blocks.samples.push(diff.blocks);
        self.blocks.title = format!(
            "n={local}] ∆ blks={} (inserted_at={} took={})",
            diff.blocks,
            humantime::format_rfc3339_seconds(inserted_at),
            format_duration(elapsed, Duration::from_millis(1)),
        );
        self.mgas.samples.push(diff.mgas);
        self.mgas.title = format!("n={local}] ∑ mgas={:2}/{:4}blks", diff.mgas, diff.blocks);
        self.txs.samples.push(diff.txs);
        self.txs.title = format!("n={local}] ∑ txs={:3}/{:4}blks", diff.txs, diff.blocks);
    }

    /// Append a peer count sample and replace the peer list.
    pub fn record_peers(&mut self, peers: &[PeerInfo], max_peers: usize) {
        self.peers.samples.push(peers.len() as u64);
        self.peers.title = format!("Peers ({} / {max_peers})", peers.len());
        self.peer_list = peers.iter().map(ToString::to_string).collect();
    }

    /// Drop the oldest block, gas and transaction samples.
    ///
    /// The three series move together, and the last sample is always kept.
    pub fn drop_oldest_sample(&mut self) -> bool {
        if self.blocks.samples.len() <= 1 {
            return false;
        }
        self.blocks.samples.drop_oldest();
        self.mgas.samples.drop_oldest();
        self.txs.samples.drop_oldest();
        true
    }

    /// Describe `head` under `mode` in the header.
    pub fn set_header(&mut self, mode: SyncMode, head: &Block, now: SystemTime) {
        let block_time = SystemTime::UNIX_EPOCH + Duration::from_secs(head.timestamp);
        self.header = format!(
            "{mode} | local_head ◼ n={} ⬡={}… txs={} time={} ago",
            head.number,
            head.hash_prefix(10),
            head.tx_count,
            format_age(block_time, now, Duration::from_secs(1)),
        );
    }
}
