//! Broadcast multiplexer for [`NodeEvent`]s.
//!
//! The [`EventMux`] fans every posted event out to all subscribers. Each
//! [`Subscription`] only yields the kinds it asked for.

use std::collections::HashSet;

use tokio::sync::broadcast;

use crate::{NodeEvent, NodeEventKind};

/// Default capacity of the broadcast channel.
pub const DEFAULT_MUX_CAPACITY: usize = 1024;

/// Broadcasts node events to any number of subscribers.
#[derive(Debug, Clone)]
pub struct EventMux {
    tx: broadcast::Sender<NodeEvent>,
}

impl Default for EventMux {
    fn default() -> Self {
        Self::new(DEFAULT_MUX_CAPACITY)
    }
}

impl EventMux {
    /// Creates a multiplexer buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Posts an event to every subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn post(&self, event: NodeEvent) -> usize {
        // No subscribers is not an error for a broadcaster.
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribes to the given event kinds.
    pub fn subscribe(&self, kinds: impl IntoIterator<Item = NodeEventKind>) -> Subscription {
        Subscription { rx: self.tx.subscribe(), kinds: kinds.into_iter().collect() }
    }

    /// Returns the number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A filtered view on an [`EventMux`].
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<NodeEvent>,
    kinds: HashSet<NodeEventKind>,
}

impl Subscription {
    /// Returns whether this subscription yields events of `kind`.
    pub fn wants(&self, kind: NodeEventKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Waits for the next event of a subscribed kind.
    ///
    /// Returns `None` once the multiplexer is dropped. Events missed because the
    /// subscriber fell behind are skipped.
    pub async fn recv(&mut self) -> Option<NodeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.wants(event.kind()) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscription lagged, dropping events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy_primitives::{Address, B256, U256};

    use super::*;
    use crate::{Block, DownloaderEvent};

    fn block(number: u64) -> Block {
        Block {
            number,
            hash: B256::with_last_byte(number as u8),
            parent_hash: B256::ZERO,
            coinbase: Address::ZERO,
            tx_count: 1,
            gas_used: 21_000,
            uncle_count: 0,
            timestamp: 0,
            total_difficulty: U256::from(number),
        }
    }

    #[tokio::test]
    async fn subscription_filters_kinds() {
        let mux = EventMux::default();
        let mut sub = mux.subscribe([NodeEventKind::MinedBlock]);

        mux.post(NodeEvent::ChainSide(block(1)));
        mux.post(NodeEvent::Downloader(DownloaderEvent::Failed {
            peer: "p".into(),
            error: "stalled".into(),
        }));
        mux.post(NodeEvent::MinedBlock(block(2)));

        let event = tokio::time::timeout(Duration::from_secs(1), sub.recv()).await.unwrap();
        assert_eq!(event, Some(NodeEvent::MinedBlock(block(2))));
    }

    #[tokio::test]
    async fn recv_returns_none_when_closed() {
        let mux = EventMux::new(4);
        let mut sub = mux.subscribe([NodeEventKind::ChainSide]);
        drop(mux);
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn lagged_subscriber_skips_ahead() {
        let mux = EventMux::new(2);
        let mut sub = mux.subscribe([NodeEventKind::ChainSide]);
        for n in 0..5 {
            mux.post(NodeEvent::ChainSide(block(n)));
        }
        let event = sub.recv().await;
        assert_eq!(event, Some(NodeEvent::ChainSide(block(3))));
    }

    #[test]
    fn post_without_subscribers() {
        let mux = EventMux::default();
        assert_eq!(mux.subscriber_count(), 0);
        assert_eq!(mux.post(NodeEvent::MinedBlock(block(1))), 0);
    }
}
