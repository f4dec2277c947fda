//! Helper functions for formatting status fragments.

use std::time::{Duration, SystemTime};

/// Format a block number with a leading `#`.
///
/// # Examples
///
/// ```
/// use synclog_tui_common::format_block_number;
///
/// assert_eq!(format_block_number(92481951), "#92481951");
/// ```
pub fn format_block_number(number: u64) -> String {
    format!("#{number}")
}

/// Percentage of `part` over `whole`, or `0.0` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use synclog_tui_common::calc_percent;
///
/// assert_eq!(calc_percent(50, 200), 25.0);
/// assert_eq!(calc_percent(5, 0), 0.0);
/// ```
pub fn calc_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Round `duration` to the nearest multiple of `unit`.
///
/// A zero `unit` returns the duration unchanged.
pub fn round_duration(duration: Duration, unit: Duration) -> Duration {
    let unit = unit.as_nanos();
    if unit == 0 {
        return duration;
    }
    let rounded = (duration.as_nanos() + unit / 2) / unit * unit;
    Duration::from_nanos(u64::try_from(rounded).unwrap_or(u64::MAX))
}

/// Format a duration rounded to `unit`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use synclog_tui_common::format_duration;
///
/// let took = Duration::from_micros(1_250_400);
/// assert_eq!(format_duration(took, Duration::from_millis(1)), "1s 250ms");
/// assert_eq!(format_duration(Duration::ZERO, Duration::from_millis(1)), "0s");
/// ```
pub fn format_duration(duration: Duration, unit: Duration) -> String {
    humantime::format_duration(round_duration(duration, unit)).to_string()
}

/// Format the time elapsed between `then` and `now`, rounded to `unit`.
///
/// Timestamps in the future render as `0s`.
pub fn format_age(then: SystemTime, now: SystemTime, unit: Duration) -> String {
    format_duration(now.duration_since(then).unwrap_or_default(), unit)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Duration::from_millis(1_499), Duration::from_secs(1), Duration::from_secs(1))]
    #[case(Duration::from_millis(1_500), Duration::from_secs(1), Duration::from_secs(2))]
    #[case(Duration::from_micros(2_345), Duration::from_millis(1), Duration::from_millis(2))]
    #[case(Duration::from_millis(7), Duration::ZERO, Duration::from_millis(7))]
    fn test_round_duration(
        #[case] input: Duration,
        #[case] unit: Duration,
        #[case] expected: Duration,
    ) {
        assert_eq!(round_duration(input, unit), expected);
    }

    #[test]
    fn test_format_age() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let then = SystemTime::UNIX_EPOCH + Duration::from_secs(70);
        assert_eq!(format_age(then, now, Duration::from_secs(1)), "30s");
        assert_eq!(format_age(now, then, Duration::from_secs(1)), "0s");
    }

    #[test]
    fn test_calc_percent() {
        assert_eq!(calc_percent(100, 100), 100.0);
        assert_eq!(calc_percent(1, 4), 25.0);
        assert_eq!(calc_percent(0, 0), 0.0);
    }

    #[test]
    fn test_format_block_number() {
        assert_eq!(format_block_number(0), "#0");
    }
}
