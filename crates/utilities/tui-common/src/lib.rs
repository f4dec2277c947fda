#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Bounded sample buffers.
///
/// The [`BoundedSeries`] struct keeps at most a fixed number of samples,
/// dropping the oldest one when a new sample would exceed the limit.
mod series;
pub use series::BoundedSeries;

/// Helper functions for formatting status fragments.
///
/// The [`format_block_number`], [`format_duration`], [`format_age`],
/// [`round_duration`] and [`calc_percent`] functions are shared by every
/// display back end.
mod helpers;
pub use helpers::{calc_percent, format_age, format_block_number, format_duration, round_duration};
