//! Sync progress display.
//!
//! Runs a simulated node through peer discovery, a sync cycle and steady
//! block import, and renders its progress with one of the display back ends:
//!
//! - **basic**: one fixed-width status line per interval, and per block while importing
//! - **green**: a colorized line per chain and downloader event plus a periodic summary
//! - **dash**: a full screen terminal dashboard

use clap::Parser;
use eyre::Result;
use synclog_cli::{SynclogCli, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = SynclogCli::parse();
    let gate = init_tracing(cli.verbosity);
    synclog_runtime::run(cli, gate).await
}
