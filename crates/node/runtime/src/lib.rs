#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/synclog/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod dispatch;
pub use dispatch::{dispatch_status_logs, display_system};

mod builder;
pub use builder::build_node;

mod run;
pub use run::{run, run_until};
