//! Chain and downloader data types.

use std::time::Duration;

use alloy_primitives::{Address, B256, U256};

/// Summary of a block held by the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Block number.
    pub number: u64,
    /// Block hash.
    pub hash: B256,
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Miner of the block.
    pub coinbase: Address,
    /// Number of transactions in the block.
    pub tx_count: usize,
    /// Gas used by all transactions.
    pub gas_used: u64,
    /// Number of uncles referenced by the block.
    pub uncle_count: usize,
    /// Block timestamp in unix seconds.
    pub timestamp: u64,
    /// Total difficulty up to and including this block.
    pub total_difficulty: U256,
}

impl Block {
    /// Returns the `0x`-prefixed hash hex truncated to `len` characters.
    pub fn hash_prefix(&self, len: usize) -> String {
        let hex = format!("{:#x}", self.hash);
        hex[..len.min(hex.len())].to_string()
    }
}

/// Downloader synchronisation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum DownloaderMode {
    /// Download and execute every block.
    #[default]
    #[display("full")]
    Full,
    /// Download state at a pivot, then execute the remainder.
    #[display("fast")]
    Fast,
}

/// Progress reported by the downloader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncProgress {
    /// Block the current sync cycle started at.
    pub origin: u64,
    /// Block the local chain has reached.
    pub current: u64,
    /// Highest block advertised by the best peer.
    pub height: u64,
    /// Number of state entries processed.
    pub pulled: u64,
    /// Number of known state entries.
    pub known: u64,
}

/// Downloader quality of service estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Qos {
    /// Round trip time estimate.
    pub rtt: Duration,
    /// Request time-to-live.
    pub ttl: Duration,
    /// Confidence in the estimates, between `0.0` and `1.0`.
    pub confidence: f64,
}

/// A connected peer as seen by the downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    /// Peer identifier.
    pub id: B256,
    /// Negotiated protocol, e.g. `eth/63`.
    pub protocol: String,
    /// Remote client name.
    pub name: String,
}

impl std::fmt::Display for PeerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = format!("{:x}", self.id);
        write!(f, "Peer id={} {} [{}]", &id[..16], self.protocol, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(number: u64) -> Block {
        Block {
            number,
            hash: B256::repeat_byte(0xab),
            parent_hash: B256::ZERO,
            coinbase: Address::ZERO,
            tx_count: 0,
            gas_used: 0,
            uncle_count: 0,
            timestamp: 0,
            total_difficulty: U256::ZERO,
        }
    }

    #[test]
    fn hash_prefix_includes_0x() {
        assert_eq!(block(1).hash_prefix(9), "0xabababa");
        assert_eq!(block(1).hash_prefix(10), "0xabababab");
    }

    #[test]
    fn hash_prefix_clamps_to_hex_length() {
        assert_eq!(block(1).hash_prefix(1000).len(), 66);
    }

    #[test]
    fn downloader_mode_display() {
        assert_eq!(DownloaderMode::Full.to_string(), "full");
        assert_eq!(DownloaderMode::Fast.to_string(), "fast");
        assert_eq!(DownloaderMode::default(), DownloaderMode::Full);
    }

    #[test]
    fn peer_display_truncates_id() {
        let peer = PeerInfo {
            id: B256::repeat_byte(0x12),
            protocol: "eth/63".to_string(),
            name: "Geth/v1.8".to_string(),
        };
        assert_eq!(peer.to_string(), "Peer id=1212121212121212 eth/63 [Geth/v1.8]");
    }
}
