#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Column formatting shared by the text back ends.
mod format;
pub use format::{
    basic_line, format_local_of_max, format_peers, format_progress_rate, hex_prefix, short_hash,
};

/// The basic back end.
///
/// The [`basic_display_system`] function builds a
/// [`DisplaySystem`](synclog_dispatch::DisplaySystem) printing fixed-width
/// status lines, and [`print_status_basic`] renders one of them.
mod basic;
pub use basic::{basic_display_system, basic_tick_due, print_status_basic};

/// The green back end.
///
/// The [`green_display_system`] function builds a
/// [`DisplaySystem`](synclog_dispatch::DisplaySystem) printing colorized event
/// lines and a periodic summary rendered by [`print_status_green`].
mod green;
pub use green::{
    DOMINOES, domino_graph, green_display_system, green_tick_due, mode_icon, print_status_green,
};
