use chrono::{DateTime, TimeZone};

// Constants for format strings
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const DAY_FORMAT: &str = "%A";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Render an instant as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
///
/// Fractional seconds are dropped and a zero offset is written as `+00:00`,
/// never as `Z`.
pub fn format_instant<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format(DATETIME_FORMAT).to_string()
}

/// Full English weekday name of the instant's civil date.
pub fn format_weekday<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format(DAY_FORMAT).to_string()
}

/// Format the signed hour difference `target - source` between two UTC offsets
///
/// # Arguments
///
/// * `offset_source_seconds` - UTC offset of the source zone in seconds
/// * `offset_target_seconds` - UTC offset of the target zone in seconds
///
/// # Returns
///
/// Whole hours keep exactly one decimal (`+1.0h`, `-5.0h`, `+0.0h`); fractional
/// hours keep at most two decimals with trailing zeros stripped (`+5.75h`, `-9.5h`).
pub fn format_offset_difference(offset_source_seconds: i32, offset_target_seconds: i32) -> String {
    let hours_difference =
        f64::from(offset_target_seconds - offset_source_seconds) / SECONDS_PER_HOUR;

    if hours_difference.fract() == 0.0 {
        return format!("{:+.1}h", hours_difference);
    }

    let formatted = format!("{:+.2}", hours_difference);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.contains('.') {
        format!("{}h", trimmed)
    } else {
        // sub-minute offsets can round to a whole hour at two decimals
        format!("{}.0h", trimmed)
    }
}
