//! In-memory implementation of the node traits.

use std::{
    sync::{
        PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use alloy_primitives::{Address, B256, U256, keccak256};
use synclog_node::{
    Block, ChainInsertEvent, ChainReader, Downloader, DownloaderEvent, DownloaderMode, EventMux,
    HeaderChainInsertEvent, Node, NodeEvent, PeerInfo, Qos, SyncProgress,
};

/// Difficulty assigned to every simulated block.
const BLOCK_DIFFICULTY: u64 = 131_072;

/// Gas charged per simulated transaction.
const GAS_PER_TX: u64 = 52_000;

#[derive(Debug)]
struct ChainState {
    blocks: Vec<Block>,
    origin: u64,
    height: u64,
    synchronising: bool,
    mode: DownloaderMode,
    peers: Vec<PeerInfo>,
    qos: Qos,
}

/// A node whose chain and downloader live in memory.
///
/// Every mutator that corresponds to something a real node would announce
/// posts the matching [`NodeEvent`] to the node's [`EventMux`].
#[derive(Debug)]
pub struct SimulatedNode {
    state: RwLock<ChainState>,
    listening: AtomicBool,
    mux: EventMux,
    coinbase: Address,
}

impl Default for SimulatedNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedNode {
    /// Creates a listening node holding only the genesis block.
    pub fn new() -> Self {
        let genesis = Block {
            number: 0,
            hash: keccak256(b"synclog-genesis"),
            parent_hash: B256::ZERO,
            coinbase: Address::ZERO,
            tx_count: 0,
            gas_used: 0,
            uncle_count: 0,
            timestamp: unix_now(),
            total_difficulty: U256::from(BLOCK_DIFFICULTY),
        };
        Self {
            state: RwLock::new(ChainState {
                blocks: vec![genesis],
                origin: 0,
                height: 0,
                synchronising: false,
                mode: DownloaderMode::Full,
                peers: Vec::new(),
                qos: Qos::default(),
            }),
            listening: AtomicBool::new(true),
            mux: EventMux::default(),
            coinbase: Address::with_last_byte(0xc0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ChainState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChainState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of the local head block.
    pub fn head_number(&self) -> u64 {
        self.read().blocks.len() as u64 - 1
    }

    /// Appends blocks without announcing them.
    ///
    /// Returns the new head.
    pub fn extend_chain(&self, tx_counts: &[usize]) -> Block {
        let mut state = self.write();
        for &tx_count in tx_counts {
            let block = self.next_block(&state.blocks, tx_count);
            state.blocks.push(block);
        }
        state.blocks.last().cloned().unwrap_or_else(|| unreachable!("genesis is never removed"))
    }

    fn next_block(&self, blocks: &[Block], tx_count: usize) -> Block {
        let parent = blocks.last().unwrap_or_else(|| unreachable!("genesis is never removed"));
        let number = parent.number + 1;
        let mut preimage = parent.hash.to_vec();
        preimage.extend_from_slice(&number.to_be_bytes());
        Block {
            number,
            hash: keccak256(&preimage),
            parent_hash: parent.hash,
            coinbase: self.coinbase,
            tx_count,
            gas_used: tx_count as u64 * GAS_PER_TX,
            uncle_count: 0,
            timestamp: unix_now(),
            total_difficulty: parent.total_difficulty + U256::from(BLOCK_DIFFICULTY),
        }
    }

    /// Imports blocks with the given transaction counts and posts a chain insert event.
    ///
    /// Returns `None` when `tx_counts` is empty.
    pub fn import_blocks(
        &self,
        tx_counts: &[usize],
        elapsed: Duration,
    ) -> Option<ChainInsertEvent> {
        if tx_counts.is_empty() {
            return None;
        }
        let head = self.extend_chain(tx_counts);
        let event = ChainInsertEvent {
            processed: tx_counts.len(),
            queued: 0,
            ignored: 0,
            tx_count: tx_counts.iter().sum(),
            last_number: head.number,
            last_hash: head.hash,
            elapsed,
            latest_block_time: UNIX_EPOCH + Duration::from_secs(head.timestamp),
        };
        self.mux.post(NodeEvent::ChainInsert(event.clone()));
        Some(event)
    }

    /// Announces a batch of `count` headers ahead of the local head.
    pub fn import_headers(&self, count: usize, elapsed: Duration) -> HeaderChainInsertEvent {
        let last_number = self.head_number() + count as u64;
        let event = HeaderChainInsertEvent {
            processed: count,
            ignored: 0,
            last_number,
            last_hash: keccak256(last_number.to_be_bytes()),
            elapsed,
        };
        self.mux.post(NodeEvent::HeaderChainInsert(event.clone()));
        event
    }

    /// Seals a block locally, appends it and posts a mined block event.
    pub fn mine_block(&self, tx_count: usize) -> Block {
        let block = self.extend_chain(&[tx_count]);
        self.mux.post(NodeEvent::MinedBlock(block.clone()));
        block
    }

    /// Posts a side chain block competing with the current head.
    pub fn fork_head(&self) -> Block {
        let head = self.chain().current_block();
        let sibling = Block {
            hash: keccak256(head.hash),
            uncle_count: 1,
            ..head
        };
        self.mux.post(NodeEvent::ChainSide(sibling.clone()));
        sibling
    }

    /// Replaces the peer set with `count` deterministic peers.
    pub fn set_peer_count(&self, count: usize) {
        let peers = (0..count)
            .map(|i| PeerInfo {
                id: keccak256((i as u64).to_be_bytes()),
                protocol: "eth/63".to_string(),
                name: format!("simulated/v1.{i}"),
            })
            .collect();
        self.write().peers = peers;
    }

    /// Sets the height advertised by peers.
    pub fn set_height(&self, height: u64) {
        self.write().height = height;
    }

    /// Sets the quality of service estimates.
    pub fn set_qos(&self, qos: Qos) {
        self.write().qos = qos;
    }

    /// Sets whether the p2p server is listening.
    pub fn set_listening(&self, listening: bool) {
        self.listening.store(listening, Ordering::SeqCst);
    }

    /// Flags the downloader as synchronising in `mode` without announcing it.
    pub fn set_synchronising(&self, synchronising: bool, mode: DownloaderMode) {
        let mut state = self.write();
        state.synchronising = synchronising;
        state.mode = mode;
    }

    /// Starts a sync cycle against `peer` and posts the start event.
    pub fn start_sync(&self, peer: &str, mode: DownloaderMode) {
        let head = self.chain().current_block();
        {
            let mut state = self.write();
            state.synchronising = true;
            state.mode = mode;
            state.origin = head.number;
        }
        self.mux.post(NodeEvent::Downloader(DownloaderEvent::Start {
            peer: peer.to_string(),
            hash: head.hash,
            total_difficulty: head.total_difficulty,
        }));
    }

    /// Completes the running sync cycle and posts the done event.
    pub fn finish_sync(&self, peer: &str) {
        self.write().synchronising = false;
        let head = self.chain().current_block();
        self.mux.post(NodeEvent::Downloader(DownloaderEvent::Done {
            peer: peer.to_string(),
            hash: head.hash,
            total_difficulty: head.total_difficulty,
        }));
    }

    /// Aborts the running sync cycle and posts the failed event.
    pub fn fail_sync(&self, peer: &str, error: &str) {
        self.write().synchronising = false;
        self.mux.post(NodeEvent::Downloader(DownloaderEvent::Failed {
            peer: peer.to_string(),
            error: error.to_string(),
        }));
    }
}

impl ChainReader for SimulatedNode {
    fn block_by_number(&self, number: u64) -> Option<Block> {
        usize::try_from(number).ok().and_then(|n| self.read().blocks.get(n).cloned())
    }

    fn block_by_hash(&self, hash: &B256) -> Option<Block> {
        self.read().blocks.iter().rev().find(|b| b.hash == *hash).cloned()
    }

    fn current_block(&self) -> Block {
        self.read()
            .blocks
            .last()
            .cloned()
            .unwrap_or_else(|| unreachable!("genesis is never removed"))
    }

    fn current_fast_block(&self) -> Block {
        self.current_block()
    }
}

impl Downloader for SimulatedNode {
    fn progress(&self) -> SyncProgress {
        let state = self.read();
        SyncProgress {
            origin: state.origin,
            current: state.blocks.len() as u64 - 1,
            height: state.height,
            pulled: 0,
            known: 0,
        }
    }

    fn synchronising(&self) -> bool {
        self.read().synchronising
    }

    fn mode(&self) -> DownloaderMode {
        self.read().mode
    }

    fn peers(&self) -> Vec<PeerInfo> {
        self.read().peers.clone()
    }

    fn peer_count(&self) -> usize {
        self.read().peers.len()
    }

    fn qos(&self) -> Qos {
        self.read().qos
    }
}

impl Node for SimulatedNode {
    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn chain(&self) -> &dyn ChainReader {
        self
    }

    fn downloader(&self) -> &dyn Downloader {
        self
    }

    fn event_mux(&self) -> &EventMux {
        &self.mux
    }
}

fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use synclog_node::NodeEventKind;

    use super::*;

    #[test]
    fn starts_with_genesis() {
        let node = SimulatedNode::new();
        assert_eq!(node.head_number(), 0);
        assert_eq!(node.progress(), SyncProgress::default());
        assert!(node.is_listening());
        assert_eq!(node.peer_count(), 0);
    }

    #[test]
    fn extend_chain_links_parents() {
        let node = SimulatedNode::new();
        let head = node.extend_chain(&[1, 2, 3]);
        assert_eq!(head.number, 3);
        assert_eq!(head.tx_count, 3);
        assert_eq!(head.gas_used, 3 * GAS_PER_TX);

        let parent = node.block_by_number(2).unwrap();
        assert_eq!(head.parent_hash, parent.hash);
        assert_eq!(node.block_by_hash(&parent.hash), Some(parent));
        assert_eq!(node.block_by_number(4), None);
    }

    #[tokio::test]
    async fn import_posts_chain_insert() {
        let node = SimulatedNode::new();
        let mut sub = node.event_mux().subscribe([NodeEventKind::ChainInsert]);

        let event = node.import_blocks(&[4, 6], Duration::from_millis(3)).unwrap();
        assert_eq!(event.processed, 2);
        assert_eq!(event.tx_count, 10);
        assert_eq!(event.last_number, 2);

        assert_eq!(sub.recv().await, Some(NodeEvent::ChainInsert(event)));
        assert!(node.import_blocks(&[], Duration::ZERO).is_none());
    }

    #[tokio::test]
    async fn sync_cycle_posts_downloader_events() {
        let node = SimulatedNode::new();
        let mut sub = node.event_mux().subscribe([
            NodeEventKind::DownloaderStart,
            NodeEventKind::DownloaderDone,
            NodeEventKind::DownloaderFailed,
        ]);

        node.start_sync("peer-1", DownloaderMode::Fast);
        assert!(node.synchronising());
        assert_eq!(node.mode(), DownloaderMode::Fast);
        node.finish_sync("peer-1");
        assert!(!node.synchronising());
        node.fail_sync("peer-2", "timeout");

        assert_eq!(sub.recv().await.map(|e| e.kind()), Some(NodeEventKind::DownloaderStart));
        assert_eq!(sub.recv().await.map(|e| e.kind()), Some(NodeEventKind::DownloaderDone));
        assert_eq!(sub.recv().await.map(|e| e.kind()), Some(NodeEventKind::DownloaderFailed));
    }

    #[test]
    fn peers_are_deterministic() {
        let node = SimulatedNode::new();
        node.set_peer_count(3);
        let first = node.peers();
        node.set_peer_count(3);
        assert_eq!(first, node.peers());
        assert_eq!(node.peer_count(), 3);
    }

    #[test]
    fn fork_head_differs_from_head() {
        let node = SimulatedNode::new();
        node.extend_chain(&[1]);
        let sibling = node.fork_head();
        assert_eq!(sibling.number, 1);
        assert_ne!(sibling.hash, node.current_block().hash);
    }
}
