//! Duration parsing.

use std::time::Duration;

use crate::error::DurationError;

/// Seconds per unit suffix.
const UNITS: [(char, u64); 5] =
    [('s', 1), ('m', 60), ('h', 60 * 60), ('d', 24 * 60 * 60), ('w', 7 * 24 * 60 * 60)];

/// Parse a natural number of seconds with an optional unit suffix.
///
/// Suffixes are `s`, `m`, `h`, `d` and `w`, case insensitive. Whitespace around
/// the value and between the number and its suffix is ignored.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use synclog_dispatch::parse_duration;
///
/// assert_eq!(parse_duration("60").unwrap(), Duration::from_secs(60));
/// assert_eq!(parse_duration(" 4 w ").unwrap(), Duration::from_secs(4 * 7 * 24 * 3600));
/// assert!(parse_duration("1y").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let lowered = input.trim().to_lowercase();
    let (number, multiplier) = match lowered.chars().last() {
        Some(suffix) if !suffix.is_ascii_digit() => {
            let multiplier = UNITS
                .iter()
                .find_map(|&(unit, secs)| (unit == suffix).then_some(secs))
                .ok_or(DurationError::InvalidSuffix(suffix))?;
            (lowered[..lowered.len() - suffix.len_utf8()].trim_end(), multiplier)
        }
        _ => (lowered.as_str(), 1),
    };

    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::InvalidValue(number.to_string()));
    }
    let value: u64 = number.parse().map_err(|_| DurationError::Overflow(input.trim().to_string()))?;
    let secs = value
        .checked_mul(multiplier)
        .ok_or_else(|| DurationError::Overflow(input.trim().to_string()))?;
    Ok(Duration::from_secs(secs))
}
