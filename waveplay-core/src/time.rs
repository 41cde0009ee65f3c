//! Playback clock formatting.
//!
//! Media elements report time as floating point seconds and report `NaN`
//! while the duration is still unknown, so every value is sanitized before
//! it reaches a display string or a progress computation.

/// Clamp a media time to a finite, non-negative number of seconds.
///
/// `NaN`, infinities and negative values all map to `0.0`.
#[must_use]
pub fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Format seconds as `M:SS`.
///
/// Minutes are unbounded and seconds are truncated, never rounded, so
/// `59.9` still reads `0:59`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    // Saturating float-to-int cast; the value is already finite and non-negative.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = sanitize_seconds(seconds).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Format the time display shown next to the waveform: `M:SS / M:SS`.
#[must_use]
pub fn format_progress(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_minutes_and_padding() {
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(0.0), "0:00");
    }

    #[test]
    fn test_format_time_truncates() {
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(3599.5), "59:59");
    }

    #[test]
    fn test_format_time_unbounded_minutes() {
        assert_eq!(format_time(7322.0), "122:02");
    }

    #[test]
    fn test_format_time_unknown_duration() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(65.2, 200.0), "1:05 / 3:20");
        assert_eq!(format_progress(0.0, f64::NAN), "0:00 / 0:00");
    }

    #[test]
    fn test_sanitize_seconds() {
        assert!((sanitize_seconds(12.5) - 12.5).abs() < f64::EPSILON);
        assert!(sanitize_seconds(f64::NAN).abs() < f64::EPSILON);
        assert!(sanitize_seconds(f64::NEG_INFINITY).abs() < f64::EPSILON);
    }
}
