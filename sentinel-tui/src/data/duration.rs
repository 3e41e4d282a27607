use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse duration strings like "12s", "500ms", "1.5m"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str
                .trim()
                .parse()
                .with_context(|| format!("Invalid duration: {}", s))?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {}", s);
            }
            return Ok(Duration::from_micros((val * multiplier * 1_000.0) as u64));
        }
    }

    bail!("Unknown duration format: {} (expected e.g. \"12s\" or \"500ms\")", s)
}

/// Format the age of a packet for display ("3.2s", "1m 05s")
pub fn format_age(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3_600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3_600, (secs % 3_600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_duration("12s").unwrap(), Duration::from_secs(12));
        assert_eq!(parse_duration(" 2.5s ").unwrap(), Duration::from_millis(2500));
    }

    #[test]
    fn test_parse_milliseconds() {
        assert_eq!(parse_duration("3000ms").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_duration("1.5m").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("12").is_err());
        assert!(parse_duration("-3s").is_err());
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_millis(3200)), "3.2s");
        assert_eq!(format_age(Duration::from_secs(65)), "1m 05s");
        assert_eq!(format_age(Duration::from_secs(3_720)), "1h 02m");
    }
}
