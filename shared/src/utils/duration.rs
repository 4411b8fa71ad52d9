//! Parsing of human-friendly duration strings used in expiry settings.
//!
//! Accepted forms are a bare integer (seconds) or an integer followed by a
//! single unit suffix: `s`, `m`, `h` or `d`. Examples: `900`, `15m`, `168h`, `7d`.

use chrono::Duration;
use thiserror::Error;

/// Errors returned by [`parse_duration`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("invalid duration '{value}': expected <number>[s|m|h|d]")]
    Malformed { value: String },

    #[error("duration '{value}' is out of range")]
    OutOfRange { value: String },
}

/// Parses a duration such as `15m` or `168h`
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let (digits, multiplier) = match value.char_indices().last() {
        Some((idx, 's')) => (&value[..idx], 1),
        Some((idx, 'm')) => (&value[..idx], 60),
        Some((idx, 'h')) => (&value[..idx], 60 * 60),
        Some((idx, 'd')) => (&value[..idx], 24 * 60 * 60),
        _ => (value, 1),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationParseError::Malformed {
            value: value.to_string(),
        });
    }

    let amount: i64 = digits.parse().map_err(|_| DurationParseError::OutOfRange {
        value: value.to_string(),
    })?;

    amount
        .checked_mul(multiplier)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| DurationParseError::OutOfRange {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_seconds() {
        assert_eq!(parse_duration("900").unwrap(), Duration::seconds(900));
        assert_eq!(parse_duration(" 60 ").unwrap(), Duration::seconds(60));
    }

    #[test]
    fn test_parse_with_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_duration("168h").unwrap(), Duration::hours(168));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_duration(""), Err(DurationParseError::Empty));
        assert!(matches!(
            parse_duration("m"),
            Err(DurationParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_duration("-5m"),
            Err(DurationParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_duration("1.5h"),
            Err(DurationParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_duration("10w"),
            Err(DurationParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            parse_duration("99999999999999999999d"),
            Err(DurationParseError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_duration("9223372036854775807d"),
            Err(DurationParseError::OutOfRange { .. })
        ));
    }
}
