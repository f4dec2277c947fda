//! Display back end selection.

use clap::ValueEnum;

/// Display back end for the status log.
///
/// # Examples
///
/// ```
/// use synclog_cli::DisplayFormat;
///
/// assert_eq!(DisplayFormat::default(), DisplayFormat::Basic);
/// assert_eq!(DisplayFormat::Dash.to_string(), "dash");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, derive_more::Display)]
pub enum DisplayFormat {
    /// Fixed-width status lines (default).
    #[default]
    #[display("basic")]
    Basic,
    /// Colorized event lines with a periodic summary.
    #[display("green")]
    Green,
    /// Full screen terminal dashboard.
    #[display("dash")]
    Dash,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn display_format_default() {
        assert_eq!(DisplayFormat::default(), DisplayFormat::Basic);
    }

    #[rstest]
    #[case(DisplayFormat::Basic, "basic")]
    #[case(DisplayFormat::Green, "green")]
    #[case(DisplayFormat::Dash, "dash")]
    fn display_format_round_trips_through_clap(#[case] format: DisplayFormat, #[case] name: &str) {
        assert_eq!(format.to_string(), name);
        assert_eq!(DisplayFormat::from_str(name, false), Ok(format));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(DisplayFormat::from_str("fancy", false).is_err());
    }
}
