//! Event kinds a display system can bind handlers to.

use synclog_node::NodeEventKind;

/// Everything a display system can react to.
///
/// Node events map one to one onto [`NodeEventKind`]; the remaining kinds are
/// produced by the [`StatusLoop`](crate::StatusLoop) itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EventKind {
    /// Blocks were imported into the canonical chain.
    ChainInsert,
    /// A block was imported on a side chain.
    ChainInsertSide,
    /// Headers were imported.
    HeaderChainInsert,
    /// The local miner sealed a block.
    MinedBlock,
    /// The downloader started a sync cycle.
    DownloaderStart,
    /// The downloader finished a sync cycle.
    DownloaderDone,
    /// The downloader aborted a sync cycle.
    DownloaderFailed,
    /// The status ticker fired.
    IntervalTick,
    /// The loop is starting.
    Before,
    /// The loop is stopping.
    After,
}

impl EventKind {
    /// The node event kind this maps to, `None` for loop generated kinds.
    pub const fn node_kind(self) -> Option<NodeEventKind> {
        match self {
            Self::ChainInsert => Some(NodeEventKind::ChainInsert),
            Self::ChainInsertSide => Some(NodeEventKind::ChainSide),
            Self::HeaderChainInsert => Some(NodeEventKind::HeaderChainInsert),
            Self::MinedBlock => Some(NodeEventKind::MinedBlock),
            Self::DownloaderStart => Some(NodeEventKind::DownloaderStart),
            Self::DownloaderDone => Some(NodeEventKind::DownloaderDone),
            Self::DownloaderFailed => Some(NodeEventKind::DownloaderFailed),
            Self::IntervalTick | Self::Before | Self::After => None,
        }
    }
}

impl From<NodeEventKind> for EventKind {
    fn from(kind: NodeEventKind) -> Self {
        match kind {
            NodeEventKind::ChainInsert => Self::ChainInsert,
            NodeEventKind::ChainSide => Self::ChainInsertSide,
            NodeEventKind::HeaderChainInsert => Self::HeaderChainInsert,
            NodeEventKind::MinedBlock => Self::MinedBlock,
            NodeEventKind::DownloaderStart => Self::DownloaderStart,
            NodeEventKind::DownloaderDone => Self::DownloaderDone,
            NodeEventKind::DownloaderFailed => Self::DownloaderFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(NodeEventKind::ChainInsert)]
    #[case(NodeEventKind::ChainSide)]
    #[case(NodeEventKind::HeaderChainInsert)]
    #[case(NodeEventKind::MinedBlock)]
    #[case(NodeEventKind::DownloaderStart)]
    #[case(NodeEventKind::DownloaderDone)]
    #[case(NodeEventKind::DownloaderFailed)]
    fn node_kinds_map_back(#[case] kind: NodeEventKind) {
        assert_eq!(EventKind::from(kind).node_kind(), Some(kind));
    }

    #[rstest]
    #[case(EventKind::IntervalTick)]
    #[case(EventKind::Before)]
    #[case(EventKind::After)]
    fn loop_kinds_have_no_node_kind(#[case] kind: EventKind) {
        assert_eq!(kind.node_kind(), None);
    }
}
