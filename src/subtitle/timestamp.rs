// Cue timestamp formatting
use crate::error::{HebscribeError, Result};

/// Millisecond separator used in a cue timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    /// `HH:MM:SS.mmm` (WebVTT).
    Dot,
    /// `HH:MM:SS,mmm` (SubRip).
    Comma,
}

impl TimestampStyle {
    pub fn separator(&self) -> char {
        match self {
            TimestampStyle::Dot => '.',
            TimestampStyle::Comma => ',',
        }
    }
}

/// Format an offset in seconds as `HH:MM:SS<sep>mmm`.
///
/// Milliseconds are truncated, never rounded, so `1.9995` renders as
/// `00:00:01.999`. Hours have no upper bound and widen past two digits.
pub fn format_timestamp(seconds: f64, style: TimestampStyle) -> Result<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(HebscribeError::InvalidTimestamp { seconds });
    }

    let hours = (seconds / 3600.0).floor() as u64;
    let remainder = seconds % 3600.0;
    let minutes = (remainder / 60.0).floor() as u64;
    let secs = remainder % 60.0;
    let whole_secs = secs.trunc();
    let millis = (((secs - whole_secs) * 1000.0).floor() as u64).min(999);

    Ok(format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours,
        minutes,
        whole_secs as u64,
        style.separator(),
        millis
    ))
}

/// Convert clock components back to seconds.
pub(crate) fn clock_to_seconds(hours: u64, minutes: u64, seconds: u64, millis: u64) -> f64 {
    (hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(
            format_timestamp(0.0, TimestampStyle::Dot).unwrap(),
            "00:00:00.000"
        );
        assert_eq!(
            format_timestamp(0.0, TimestampStyle::Comma).unwrap(),
            "00:00:00,000"
        );
    }

    #[test]
    fn test_format_truncates_millis() {
        assert_eq!(
            format_timestamp(3661.1234, TimestampStyle::Dot).unwrap(),
            "01:01:01.123"
        );
        assert_eq!(
            format_timestamp(1.9995, TimestampStyle::Dot).unwrap(),
            "00:00:01.999"
        );
    }

    #[test]
    fn test_format_no_rollover_from_truncation() {
        assert_eq!(
            format_timestamp(59.9996, TimestampStyle::Comma).unwrap(),
            "00:00:59,999"
        );
    }

    #[test]
    fn test_format_long_durations() {
        assert_eq!(
            format_timestamp(360_000.0, TimestampStyle::Comma).unwrap(),
            "100:00:00,000"
        );
        assert_eq!(
            format_timestamp(7325.5, TimestampStyle::Dot).unwrap(),
            "02:02:05.500"
        );
    }

    #[test]
    fn test_format_rejects_negative() {
        let err = format_timestamp(-0.5, TimestampStyle::Dot).unwrap_err();
        assert!(matches!(err, HebscribeError::InvalidTimestamp { .. }));
        assert!(err.to_string().contains("Time formatting failed"));
    }

    #[test]
    fn test_format_rejects_non_finite() {
        assert!(format_timestamp(f64::NAN, TimestampStyle::Dot).is_err());
        assert!(format_timestamp(f64::INFINITY, TimestampStyle::Comma).is_err());
    }

    #[test]
    fn test_clock_to_seconds() {
        assert_eq!(clock_to_seconds(1, 1, 1, 500), 3661.5);
        assert_eq!(clock_to_seconds(0, 0, 0, 0), 0.0);
    }
}
