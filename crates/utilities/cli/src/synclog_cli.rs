//! Command line arguments.

use clap::Parser;
use synclog_dispatch::{
    DEFAULT_MAX_PEERS, DEFAULT_STATUS_LOG, DisplayLevel, StatusConfigError, StatusFeatures,
};
use synclog_harness::HarnessConfig;

use crate::DisplayFormat;

/// Synclog CLI arguments.
///
/// Runs a simulated node through discovery, sync and import and renders its
/// progress with the selected display back end.
#[derive(Parser, Debug, Clone)]
#[command(name = "synclog", about = "Sync progress display for a block chain node")]
pub struct SynclogCli {
    /// Status log features as `name=interval` pairs, comma separated.
    ///
    /// A bare name uses the default interval of 60s. Intervals take an
    /// optional `s`, `m`, `h`, `d` or `w` suffix.
    #[arg(long, env = "SYNCLOG_LOG_STATUS", default_value = DEFAULT_STATUS_LOG)]
    pub log_status: String,

    /// Display back end
    #[arg(long, default_value = "basic")]
    pub display_fmt: DisplayFormat,

    /// Display verbosity (0 silence, 1 error, 2 warn, 3 info, 4 core, 5 debug)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub display: u8,

    /// Maximum number of peers shown next to the peer count
    #[arg(long = "maxpeers", default_value_t = DEFAULT_MAX_PEERS)]
    pub max_peers: usize,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Milliseconds between simulated imports
    #[arg(long, default_value = "1000")]
    pub block_time_ms: u64,

    /// Milliseconds before the first simulated peer connects
    #[arg(long, default_value = "3000")]
    pub discover_ms: u64,

    /// Height the simulated network is at when sync starts
    #[arg(long, default_value = "2000")]
    pub sync_target: u64,

    /// Blocks per simulated sync batch
    #[arg(long, default_value = "64")]
    pub sync_batch: u64,

    /// Number of simulated peers
    #[arg(long, default_value = "8")]
    pub peers: usize,

    /// Sync the simulated node in fast mode
    #[arg(long)]
    pub fast_sync: bool,

    /// Seal every n-th simulated block locally (0 disables mining)
    #[arg(long, default_value = "0")]
    pub mine_every: u64,

    /// Seed for the simulated transaction counts
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

impl SynclogCli {
    /// Parse `--log-status` into status features.
    pub fn status_features(&self) -> Result<StatusFeatures, StatusConfigError> {
        StatusFeatures::parse(&self.log_status)
    }

    /// The `--display` verbosity.
    pub const fn display_level(&self) -> DisplayLevel {
        DisplayLevel::from_u8(self.display)
    }

    /// The simulated node configuration.
    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            block_time_ms: self.block_time_ms,
            discover_ms: self.discover_ms,
            sync_target: self.sync_target,
            sync_batch: self.sync_batch,
            peers: self.peers,
            fast_sync: self.fast_sync,
            mine_every: self.mine_every,
            seed: self.seed,
            ..HarnessConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;
    use synclog_dispatch::StatusFeature;

    use super::*;

    #[test]
    fn defaults() {
        let cli = SynclogCli::try_parse_from(["synclog"]).unwrap();
        assert_eq!(cli.log_status, "sync=60s");
        assert_eq!(cli.display_fmt, DisplayFormat::Basic);
        assert_eq!(cli.display_level(), DisplayLevel::Info);
        assert_eq!(cli.max_peers, 25);
        assert_eq!(cli.verbosity, 0);
        assert_eq!(
            cli.status_features().unwrap().interval(StatusFeature::Sync),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn overrides() {
        let cli = SynclogCli::try_parse_from([
            "synclog",
            "--log-status",
            "sync=10s",
            "--display-fmt",
            "green",
            "--display",
            "5",
            "--maxpeers",
            "50",
            "-vv",
            "--fast-sync",
            "--mine-every",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.display_fmt, DisplayFormat::Green);
        assert_eq!(cli.display_level(), DisplayLevel::Debug);
        assert_eq!(cli.max_peers, 50);
        assert_eq!(cli.verbosity, 2);
        assert_eq!(
            cli.status_features().unwrap().interval(StatusFeature::Sync),
            Some(Duration::from_secs(10))
        );
        let harness = cli.harness_config();
        assert!(harness.fast_sync);
        assert_eq!(harness.mine_every, 4);
        assert_eq!(harness.max_txs_per_block, HarnessConfig::default().max_txs_per_block);
    }

    #[rstest]
    #[case("6")]
    #[case("-1")]
    #[case("loud")]
    fn display_level_out_of_range(#[case] level: &str) {
        assert!(SynclogCli::try_parse_from(["synclog", "--display", level]).is_err());
    }

    #[test]
    fn unknown_status_feature_is_rejected() {
        let cli = SynclogCli::try_parse_from(["synclog", "--log-status", "blocks=1m"]).unwrap();
        assert!(cli.status_features().unwrap_err().is_feature_error());
    }
}
