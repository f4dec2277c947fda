#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Sync mode classification.
///
/// The [`SyncMode`] enum names the phase a node is in and [`classify`]
/// derives it from the node's downloader.
mod mode;
pub use mode::{SyncMode, classify};

/// Progress shared between the handlers of one display system.
mod state;
pub use state::ProgressState;

/// Event kinds a display system can bind handlers to.
mod kind;
pub use kind::EventKind;

/// Status line output.
///
/// The [`StatusPrinter`] forwards lines to a [`StatusSink`] when their
/// [`DisplayLevel`] passes the current display verbosity.
mod printer;
pub use printer::{
    DISPLAY_TARGET, DisplayLevel, MemorySink, OutputGate, StatusPrinter, StatusSink, TracingSink,
};

/// Handler registry.
///
/// A [`DisplaySystem`] is an ordered list of [`DisplayEventHandler`]s, each
/// binding one [`EventKind`] to a list of [`HandlerFn`]s.
mod registry;
pub use registry::{DisplayEventHandler, DisplaySystem, HandlerContext, HandlerFn};

/// Block statistics between two heads.
mod stats;
pub use stats::BlockDiff;

/// Duration parsing.
mod duration;
pub use duration::parse_duration;

/// Configuration errors.
mod error;
pub use error::{DurationError, StatusConfigError};

/// Status feature selection.
///
/// The [`StatusFeatures`] struct parses the comma separated `module=interval`
/// list given on the command line.
mod features;
pub use features::{DEFAULT_STATUS_LOG, DEFAULT_SYNC_INTERVAL, StatusFeature, StatusFeatures};

/// The event dispatch loop.
mod runner;
pub use runner::{DEFAULT_MAX_PEERS, StatusConfig, StatusLoop};
