use chrono::DateTime;
use chrono_tz::Tz;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::core::format;
use crate::core::timezone::TimezoneResolver;

/// Time result containing timezone information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeResult {
    /// IANA timezone name
    pub timezone: String,
    /// ISO 8601 datetime with second precision and numeric UTC offset
    pub datetime: String,
    /// Day of the week
    pub day_of_week: String,
    /// Whether daylight saving time is active
    pub is_dst: bool,
}

impl TimeResult {
    /// Create a TimeResult from a zoned instant, labelled with the name the caller used
    pub fn from_datetime(
        resolver: &TimezoneResolver,
        dt: &DateTime<Tz>,
        timezone_name: &str,
    ) -> TimeResult {
        TimeResult {
            timezone: timezone_name.to_string(),
            datetime: format::format_instant(dt),
            day_of_week: format::format_weekday(dt),
            is_dst: resolver.is_dst(dt),
        }
    }
}

/// Time conversion result with source and target information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeConversionResult {
    /// Source time information
    pub source: TimeResult,
    /// Target time information
    pub target: TimeResult,
    /// Target offset minus source offset in hours, e.g. "+5.75h"
    pub time_difference: String,
}

/// Request to get current time in a timezone
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetCurrentTimeRequest {
    /// IANA timezone name (e.g., 'America/New_York', 'Europe/London'). Empty means UTC.
    #[serde(default)]
    pub timezone: String,
}

/// Request to convert time between timezones
///
/// Absent fields deserialize as empty strings so that presence is checked by
/// the conversion itself and reported as a missing field. Values are kept
/// verbatim; surrounding whitespace makes them invalid.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ConvertTimeRequest {
    /// Source IANA timezone name (e.g., 'America/New_York', 'Europe/London')
    #[serde(default)]
    pub source_timezone: String,
    /// Time to convert in 24-hour format (HH:MM)
    #[serde(default)]
    pub time: String,
    /// Target IANA timezone name (e.g., 'Asia/Tokyo', 'America/Los_Angeles')
    #[serde(default)]
    pub target_timezone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_result_serialization() {
        let time_result = TimeResult {
            timezone: "UTC".to_string(),
            datetime: "2024-01-01T12:00:00+00:00".to_string(),
            day_of_week: "Monday".to_string(),
            is_dst: false,
        };

        let json = serde_json::to_value(&time_result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timezone": "UTC",
                "datetime": "2024-01-01T12:00:00+00:00",
                "day_of_week": "Monday",
                "is_dst": false
            })
        );
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let json = r#"{"timezone": "   Africa/Cairo   "}"#;
        let request: GetCurrentTimeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.timezone, "   Africa/Cairo   ");

        let json = r#"{
            "source_timezone": "  UTC ",
            "time": " 12:30 ",
            "target_timezone": "\tEurope/Paris\n"
        }"#;
        let request: ConvertTimeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.source_timezone, "  UTC ");
        assert_eq!(request.time, " 12:30 ");
        assert_eq!(request.target_timezone, "\tEurope/Paris\n");
    }

    #[test]
    fn test_timezone_optional() {
        let request: GetCurrentTimeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.timezone.is_empty());
    }

    #[test]
    fn test_convert_request_absent_fields_are_empty() {
        let request: ConvertTimeRequest = serde_json::from_str(r#"{"time": "12:00"}"#).unwrap();
        assert_eq!(request.time, "12:00");
        assert!(request.source_timezone.is_empty());
        assert!(request.target_timezone.is_empty());
    }
}
