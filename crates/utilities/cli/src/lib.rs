#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Display back end selection.
///
/// The [`DisplayFormat`] enum picks the basic, green or dashboard display.
mod display_format;
pub use display_format::DisplayFormat;

/// Synclog CLI argument parsing.
///
/// The [`SynclogCli`] struct parses the status log features, the display
/// format and verbosity, and the simulated node configuration.
mod synclog_cli;
pub use synclog_cli::SynclogCli;

/// Tracing initialization utilities.
///
/// The [`init_tracing`] function configures the tracing subscriber with a
/// verbosity-based log level and respects the `RUST_LOG` environment variable.
mod tracing_init;
pub use crate::tracing_init::{DISPLAY_DIRECTIVE, init_tracing};

/// Shutdown signal utilities.
///
/// The [`wait_for_shutdown_signal`] function resolves on `SIGINT` or `SIGTERM`.
/// The [`cancel_on_shutdown`] function cancels a token when that happens.
mod ctrlc;
pub use crate::ctrlc::{cancel_on_shutdown, wait_for_shutdown_signal};
