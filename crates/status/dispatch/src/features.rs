//! Status feature selection.

use std::{str::FromStr, time::Duration};

use crate::{StatusConfigError, parse_duration};

/// Default value of the status feature list.
pub const DEFAULT_STATUS_LOG: &str = "sync=60s";

/// Interval used by `sync` when none is given.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(60);

/// A periodic status log that can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StatusFeature {
    /// Chain sync progress.
    #[display("sync")]
    Sync,
}

impl StatusFeature {
    /// Every available feature.
    pub const ALL: [Self; 1] = [Self::Sync];

    /// Interval used when the feature is given without one.
    pub const fn default_interval(self) -> Duration {
        match self {
            Self::Sync => DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl FromStr for StatusFeature {
    type Err = StatusConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.to_string() == s)
            .ok_or_else(|| StatusConfigError::UnknownFeature(s.to_string()))
    }
}

/// Validated list of status features and their tick intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFeatures {
    entries: Vec<(StatusFeature, Duration)>,
}

impl Default for StatusFeatures {
    fn default() -> Self {
        Self { entries: vec![(StatusFeature::Sync, DEFAULT_SYNC_INTERVAL)] }
    }
}

impl StatusFeatures {
    /// Parse a comma separated list of `module=interval` entries.
    ///
    /// Empty entries are skipped and a bare `module` uses its default interval.
    /// Unknown or repeated modules, malformed entries and unparsable or zero
    /// intervals are rejected.
    pub fn parse(value: &str) -> Result<Self, StatusConfigError> {
        let mut entries: Vec<(StatusFeature, Duration)> = Vec::new();
        for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.split('=');
            let name = parts.next().unwrap_or_default().trim();
            let interval = parts.next().map(str::trim);
            if parts.next().is_some() || name.is_empty() {
                return Err(StatusConfigError::Malformed(entry.to_string()));
            }

            let feature: StatusFeature = name.parse()?;
            if entries.iter().any(|(f, _)| *f == feature) {
                return Err(StatusConfigError::DuplicateFeature(name.to_string()));
            }

            let interval = match interval {
                None | Some("") => feature.default_interval(),
                Some(raw) => parse_duration(raw).map_err(|source| {
                    StatusConfigError::InvalidInterval {
                        module: name.to_string(),
                        value: raw.to_string(),
                        source,
                    }
                })?,
            };
            if interval.is_zero() {
                return Err(StatusConfigError::ZeroInterval { module: name.to_string() });
            }
            entries.push((feature, interval));
        }

        if entries.is_empty() {
            return Err(StatusConfigError::Empty);
        }
        Ok(Self { entries })
    }

    /// Features in the order given, with their intervals.
    pub fn iter(&self) -> impl Iterator<Item = (StatusFeature, Duration)> + '_ {
        self.entries.iter().copied()
    }

    /// Interval of `feature`, if enabled.
    pub fn interval(&self, feature: StatusFeature) -> Option<Duration> {
        self.iter().find_map(|(f, interval)| (f == feature).then_some(interval))
    }

    /// Number of enabled features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no feature is enabled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for StatusFeatures {
    type Err = StatusConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
