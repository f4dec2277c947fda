#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Chain and downloader data types.
///
/// The [`Block`] struct carries the summary of a block the display needs, while
/// [`SyncProgress`], [`Qos`] and [`PeerInfo`] describe what the downloader reports.
mod types;
pub use types::{Block, DownloaderMode, PeerInfo, Qos, SyncProgress};

/// Node events.
///
/// The [`NodeEvent`] enum is the tagged union of everything a node broadcasts.
/// Downloader notifications are nested under [`DownloaderEvent`].
mod events;
pub use events::{
    ChainInsertEvent, DownloaderEvent, HeaderChainInsertEvent, NodeEvent, NodeEventKind,
};

/// Event multiplexer.
mod mux;
pub use mux::{DEFAULT_MUX_CAPACITY, EventMux, Subscription};

/// Collaborator traits.
///
/// The [`Node`], [`ChainReader`] and [`Downloader`] traits are the only surface
/// the status display reads from.
mod traits;
pub use traits::{ChainReader, Downloader, Node};
