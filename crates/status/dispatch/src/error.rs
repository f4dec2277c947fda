//! Configuration errors.

use thiserror::Error;

/// Errors parsing a duration such as `60s` or `2w`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The unit suffix is not one of `s`, `m`, `h`, `d`, `w`.
    #[error("invalid suffix '{0}', expected one of [s m h d w]")]
    InvalidSuffix(char),

    /// The numeric part is not a natural number.
    #[error("invalid value '{0}': natural number expected")]
    InvalidValue(String),

    /// The duration does not fit in 64 bits of seconds.
    #[error("duration '{0}' is too large")]
    Overflow(String),
}

/// Errors validating the status feature list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusConfigError {
    /// No feature was given.
    #[error("status feature list is empty")]
    Empty,

    /// An entry is not of the form `module` or `module=interval`.
    #[error("invalid status entry '{0}': must be comma-separated pairs of module=interval")]
    Malformed(String),

    /// No status feature by that name exists.
    #[error("unavailable status feature by name of '{0}'")]
    UnknownFeature(String),

    /// The same feature was given twice.
    #[error("duplicate status feature by name of '{0}'")]
    DuplicateFeature(String),

    /// The interval of a feature could not be parsed.
    #[error("{}: could not parse interval '{value}'", .module.to_uppercase())]
    InvalidInterval {
        /// Feature the interval belongs to.
        module: String,
        /// The raw interval.
        value: String,
        /// Why parsing failed.
        #[source]
        source: DurationError,
    },

    /// The interval of a feature is zero.
    #[error("{}: interval must be greater than zero", .module.to_uppercase())]
    ZeroInterval {
        /// Feature the interval belongs to.
        module: String,
    },
}

impl StatusConfigError {
    /// Whether the error names a feature the user mistyped or repeated.
    pub const fn is_feature_error(&self) -> bool {
        matches!(self, Self::UnknownFeature(_) | Self::DuplicateFeature(_))
    }
}
