//! Events posted by the node.

use std::time::{Duration, SystemTime};

use alloy_primitives::{B256, U256};

use crate::Block;

/// A batch of blocks was written to the canonical chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInsertEvent {
    /// Blocks imported in this batch.
    pub processed: usize,
    /// Blocks queued for later import.
    pub queued: usize,
    /// Blocks skipped as already known.
    pub ignored: usize,
    /// Transactions across the imported blocks.
    pub tx_count: usize,
    /// Number of the last imported block.
    pub last_number: u64,
    /// Hash of the last imported block.
    pub last_hash: B256,
    /// Time spent importing the batch.
    pub elapsed: Duration,
    /// Timestamp of the last imported block.
    pub latest_block_time: SystemTime,
}

/// A batch of headers was written to the header chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChainInsertEvent {
    /// Headers imported in this batch.
    pub processed: usize,
    /// Headers skipped as already known.
    pub ignored: usize,
    /// Number of the last imported header.
    pub last_number: u64,
    /// Hash of the last imported header.
    pub last_hash: B256,
    /// Time spent importing the batch.
    pub elapsed: Duration,
}

/// Downloader lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloaderEvent {
    /// A sync cycle started against a peer.
    Start {
        /// Peer id the sync runs against.
        peer: String,
        /// Head hash advertised by the peer.
        hash: B256,
        /// Total difficulty advertised by the peer.
        total_difficulty: U256,
    },
    /// A sync cycle finished.
    Done {
        /// Peer id the sync ran against.
        peer: String,
        /// Head hash advertised by the peer.
        hash: B256,
        /// Total difficulty advertised by the peer.
        total_difficulty: U256,
    },
    /// A sync cycle aborted.
    Failed {
        /// Peer id the sync ran against.
        peer: String,
        /// Reason of the failure.
        error: String,
    },
}

/// Events broadcast by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEvent {
    /// Blocks were imported into the canonical chain.
    ChainInsert(ChainInsertEvent),
    /// A block was imported on a side chain.
    ChainSide(Block),
    /// Headers were imported into the header chain.
    HeaderChainInsert(HeaderChainInsertEvent),
    /// The local miner sealed a block.
    MinedBlock(Block),
    /// The downloader changed state.
    Downloader(DownloaderEvent),
}

/// Discriminant of a [`NodeEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NodeEventKind {
    /// [`NodeEvent::ChainInsert`]
    ChainInsert,
    /// [`NodeEvent::ChainSide`]
    ChainSide,
    /// [`NodeEvent::HeaderChainInsert`]
    HeaderChainInsert,
    /// [`NodeEvent::MinedBlock`]
    MinedBlock,
    /// [`DownloaderEvent::Start`]
    DownloaderStart,
    /// [`DownloaderEvent::Done`]
    DownloaderDone,
    /// [`DownloaderEvent::Failed`]
    DownloaderFailed,
}

impl DownloaderEvent {
    /// Returns the kind of this downloader event.
    pub const fn kind(&self) -> NodeEventKind {
        match self {
            Self::Start { .. } => NodeEventKind::DownloaderStart,
            Self::Done { .. } => NodeEventKind::DownloaderDone,
            Self::Failed { .. } => NodeEventKind::DownloaderFailed,
        }
    }
}

impl NodeEvent {
    /// Returns the kind of this event.
    pub const fn kind(&self) -> NodeEventKind {
        match self {
            Self::ChainInsert(_) => NodeEventKind::ChainInsert,
            Self::ChainSide(_) => NodeEventKind::ChainSide,
            Self::HeaderChainInsert(_) => NodeEventKind::HeaderChainInsert,
            Self::MinedBlock(_) => NodeEventKind::MinedBlock,
            Self::Downloader(event) => event.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn insert() -> NodeEvent {
        NodeEvent::ChainInsert(ChainInsertEvent {
            processed: 1,
            queued: 0,
            ignored: 0,
            tx_count: 3,
            last_number: 10,
            last_hash: B256::ZERO,
            elapsed: Duration::from_millis(4),
            latest_block_time: SystemTime::UNIX_EPOCH,
        })
    }

    #[rstest]
    #[case::insert(insert(), NodeEventKind::ChainInsert)]
    #[case::start(
        NodeEvent::Downloader(DownloaderEvent::Start {
            peer: "a".into(),
            hash: B256::ZERO,
            total_difficulty: U256::ZERO,
        }),
        NodeEventKind::DownloaderStart
    )]
    #[case::done(
        NodeEvent::Downloader(DownloaderEvent::Done {
            peer: "a".into(),
            hash: B256::ZERO,
            total_difficulty: U256::ZERO,
        }),
        NodeEventKind::DownloaderDone
    )]
    #[case::failed(
        NodeEvent::Downloader(DownloaderEvent::Failed {
            peer: "a".into(),
            error: "timeout".into(),
        }),
        NodeEventKind::DownloaderFailed
    )]
    fn event_kind(#[case] event: NodeEvent, #[case] expected: NodeEventKind) {
        assert_eq!(event.kind(), expected);
    }

    #[test]
    fn kind_display() {
        assert_eq!(NodeEventKind::HeaderChainInsert.to_string(), "HeaderChainInsert");
    }
}
