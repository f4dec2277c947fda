#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Dashboard model.
///
/// The [`DashState`] struct holds everything the dashboard draws: the sync
/// gauge, the bounded sparkline series and the peer list. It is shared
/// between the status loop and the UI thread behind a mutex.
mod app;
pub use app::{DashState, SPARKLINE_LIMIT, SparkSeries};

/// Terminal handling.
///
/// The [`DashUi`] struct owns the UI thread that draws the [`DashState`] and
/// polls the keyboard. [`handle_key`] maps a key press to a [`KeyAction`].
mod tui;
pub use tui::{DashUi, KeyAction, handle_key};

/// Display system.
///
/// The [`dash_display_system`] function binds the dashboard to the status loop.
mod system;
pub use system::dash_display_system;
