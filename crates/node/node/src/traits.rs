//! Collaborator traits implemented by a running node.

use crate::{Block, DownloaderMode, EventMux, PeerInfo, Qos, SyncProgress};

/// Read access to the local chain.
pub trait ChainReader: Send + Sync {
    /// Returns the canonical block at `number`, if known.
    fn block_by_number(&self, number: u64) -> Option<Block>;

    /// Returns the block with the given hash, if known.
    fn block_by_hash(&self, hash: &alloy_primitives::B256) -> Option<Block>;

    /// Returns the head of the fully imported chain.
    fn current_block(&self) -> Block;

    /// Returns the head of the fast-synced chain.
    fn current_fast_block(&self) -> Block;
}

/// Read access to the block downloader.
pub trait Downloader: Send + Sync {
    /// Returns the current sync progress.
    fn progress(&self) -> SyncProgress;

    /// Returns whether a sync cycle is running.
    fn synchronising(&self) -> bool;

    /// Returns the configured sync strategy.
    fn mode(&self) -> DownloaderMode;

    /// Returns the currently connected peers.
    fn peers(&self) -> Vec<PeerInfo>;

    /// Returns the number of connected peers.
    fn peer_count(&self) -> usize {
        self.peers().len()
    }

    /// Returns quality of service estimates.
    fn qos(&self) -> Qos;
}

/// A running node as seen by the status display.
pub trait Node: Send + Sync {
    /// Returns whether the p2p server is accepting connections.
    fn is_listening(&self) -> bool;

    /// Returns the chain reader.
    fn chain(&self) -> &dyn ChainReader;

    /// Returns the downloader.
    fn downloader(&self) -> &dyn Downloader;

    /// Returns the event multiplexer events are posted to.
    fn event_mux(&self) -> &EventMux;
}
