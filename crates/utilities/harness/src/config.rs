//! Configuration for the simulated node harness.

/// Configuration for the simulated node harness.
///
/// Controls how long discovery lasts, how far the simulated network is ahead
/// and how fast blocks arrive once caught up.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Time between imports in milliseconds.
    ///
    /// During sync this is the delay between batches, afterwards the block time.
    /// Default: 1000ms
    pub block_time_ms: u64,

    /// Time spent without peers before the first one connects.
    ///
    /// Default: 3000ms
    pub discover_ms: u64,

    /// Height advertised by peers when sync starts.
    ///
    /// Default: 2000
    pub sync_target: u64,

    /// Blocks imported per batch while syncing.
    ///
    /// Default: 64
    pub sync_batch: u64,

    /// Number of peers that connect after discovery.
    ///
    /// Default: 8
    pub peers: usize,

    /// Maximum transactions per simulated block.
    ///
    /// Default: 16
    pub max_txs_per_block: usize,

    /// Sync in fast mode instead of full mode.
    ///
    /// Default: false
    pub fast_sync: bool,

    /// Seal every n-th block locally once caught up. Zero disables mining.
    ///
    /// Default: 0
    pub mine_every: u64,

    /// Seed for the transaction count generator.
    ///
    /// Default: 42
    pub seed: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            block_time_ms: 1000,
            discover_ms: 3000,
            sync_target: 2000,
            sync_batch: 64,
            peers: 8,
            max_txs_per_block: 16,
            fast_sync: false,
            mine_every: 0,
            seed: 42,
        }
    }
}
