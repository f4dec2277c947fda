//! Sync mode classification.

use synclog_node::{DownloaderMode, Node};

/// The phase a node is in, as far as the status display is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SyncMode {
    /// Looking for peers, or connected but not caught up and not syncing.
    #[default]
    #[display("Discover")]
    Discover,
    /// Synchronising in full mode.
    #[display("Sync")]
    FullSync,
    /// Synchronising in fast mode.
    #[display("Fast")]
    FastSync,
    /// Caught up and importing new blocks as they arrive.
    #[display("Import")]
    Import,
}

impl SyncMode {
    /// All modes in display order.
    pub const ALL: [Self; 4] = [Self::Discover, Self::FullSync, Self::FastSync, Self::Import];

    /// Whether the downloader is running a sync cycle in this mode.
    pub const fn is_syncing(self) -> bool {
        matches!(self, Self::FullSync | Self::FastSync)
    }
}

/// Derive the [`SyncMode`] from the node's live state.
///
/// A synchronising downloader wins. Without peers the node is discovering.
/// With peers it is importing once the local chain has reached a known,
/// non-zero height, and discovering otherwise.
pub fn classify(node: &dyn Node) -> SyncMode {
    let downloader = node.downloader();
    if downloader.synchronising() {
        return match downloader.mode() {
            DownloaderMode::Full => SyncMode::FullSync,
            DownloaderMode::Fast => SyncMode::FastSync,
        };
    }
    if downloader.peer_count() == 0 {
        return SyncMode::Discover;
    }
    let progress = downloader.progress();
    if progress.height > 0 && progress.current >= progress.height {
        return SyncMode::Import;
    }
    SyncMode::Discover
}
