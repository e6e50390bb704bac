use chrono::{DateTime, NaiveTime, Utc};

use crate::core::{
    error::{TimeServerError, TimeServerResult, ZoneRole},
    format,
    models::{TimeConversionResult, TimeResult},
    timezone::{self, TimezoneResolver},
};

/// Parse a strict 24-hour `HH:MM` clock time.
///
/// The hour may drop its leading zero (`9:30`); the minute must be two digits.
pub fn parse_clock(time_str: &str) -> TimeServerResult<(u32, u32)> {
    let invalid = || TimeServerError::InvalidTimeFormat {
        time: time_str.to_string(),
    };

    let (hour, minute) = time_str.split_once(':').ok_or_else(invalid)?;
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return Err(invalid());
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok((hour, minute))
}

/// Converts a clock time on "today" from one zone into another.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionEngine {
    resolver: TimezoneResolver,
}

impl ConversionEngine {
    pub fn new(resolver: TimezoneResolver) -> Self {
        Self { resolver }
    }

    pub fn convert(
        &self,
        source_tz: &str,
        time_str: &str,
        target_tz: &str,
    ) -> TimeServerResult<TimeConversionResult> {
        self.convert_at(source_tz, time_str, target_tz, Utc::now())
    }

    /// Same as [`convert`](Self::convert), with "today" taken from `reference`
    /// as seen in the source zone.
    pub fn convert_at(
        &self,
        source_tz: &str,
        time_str: &str,
        target_tz: &str,
        reference: DateTime<Utc>,
    ) -> TimeServerResult<TimeConversionResult> {
        require("source_timezone", source_tz)?;
        require("target_timezone", target_tz)?;
        require("time", time_str)?;

        let (hour, minute) = parse_clock(time_str)?;
        let clock = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            TimeServerError::InvalidTimeFormat {
                time: time_str.to_string(),
            }
        })?;

        let source_zone = self.resolver.resolve(source_tz, ZoneRole::Source)?;
        let today = reference.with_timezone(&source_zone).date_naive();
        let source_time = timezone::localize(&source_zone, &today.and_time(clock));

        let target_zone = self.resolver.resolve(target_tz, ZoneRole::Target)?;
        let target_time = source_time.with_timezone(&target_zone);

        let time_difference = format::format_offset_difference(
            timezone::offset_seconds(&source_time),
            timezone::offset_seconds(&target_time),
        );

        Ok(TimeConversionResult {
            source: TimeResult::from_datetime(&self.resolver, &source_time, source_tz),
            target: TimeResult::from_datetime(&self.resolver, &target_time, target_tz),
            time_difference,
        })
    }
}

fn require(field: &'static str, value: &str) -> TimeServerResult<()> {
    if value.is_empty() {
        return Err(TimeServerError::MissingField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn reference(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00").unwrap(), (0, 0));
        assert_eq!(parse_clock("14:30").unwrap(), (14, 30));
        assert_eq!(parse_clock("23:59").unwrap(), (23, 59));
        assert_eq!(parse_clock("9:30").unwrap(), (9, 30));
        assert_eq!(parse_clock("09:05").unwrap(), (9, 5));
    }

    #[test]
    fn test_parse_clock_rejects() {
        for input in [
            "", "badtime", "24:00", "12:60", "25:00", "12", "12:", ":30", "12-30", "12:3",
            "123:00", "12:300", "+1:30", "1a:30", " 12:30", "12:30:00", "12.30",
        ] {
            assert!(
                matches!(
                    parse_clock(input),
                    Err(TimeServerError::InvalidTimeFormat { .. })
                ),
                "expected InvalidTimeFormat for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_convert_integer_offset() {
        let engine = ConversionEngine::default();

        let winter = engine
            .convert_at("UTC", "00:00", "Europe/Paris", reference(2025, 1, 15))
            .unwrap();
        assert_eq!(winter.time_difference, "+1.0h");
        assert_eq!(winter.source.datetime, "2025-01-15T00:00:00+00:00");
        assert_eq!(winter.target.datetime, "2025-01-15T01:00:00+01:00");
        assert!(!winter.target.is_dst);

        let summer = engine
            .convert_at("UTC", "00:00", "Europe/Paris", reference(2025, 7, 15))
            .unwrap();
        assert_eq!(summer.time_difference, "+2.0h");
        assert!(summer.target.is_dst);
    }

    #[test]
    fn test_convert_fractional_offset() {
        let engine = ConversionEngine::default();
        let result = engine
            .convert_at("UTC", "00:00", "Asia/Kathmandu", reference(2025, 3, 1))
            .unwrap();

        assert_eq!(result.time_difference, "+5.75h");
        assert_eq!(result.target.datetime, "2025-03-01T05:45:00+05:45");
        assert_eq!(result.target.timezone, "Asia/Kathmandu");
        assert_eq!(result.source.day_of_week, "Saturday");
    }

    #[test]
    fn test_convert_negative_difference_and_day_change() {
        let engine = ConversionEngine::default();
        let result = engine
            .convert_at("Asia/Tokyo", "08:00", "America/New_York", reference(2025, 1, 15))
            .unwrap();

        assert_eq!(result.time_difference, "-14.0h");
        assert_eq!(result.source.datetime, "2025-01-15T08:00:00+09:00");
        assert_eq!(result.target.datetime, "2025-01-14T18:00:00-05:00");
        assert_eq!(result.target.day_of_week, "Tuesday");
    }

    #[test]
    fn test_convert_uses_source_zone_date() {
        // 12:00 UTC on 2025-01-15 is already the 16th in Kiritimati (UTC+14)
        let engine = ConversionEngine::default();
        let result = engine
            .convert_at("Pacific/Kiritimati", "01:00", "UTC", reference(2025, 1, 15))
            .unwrap();

        assert_eq!(result.source.datetime, "2025-01-16T01:00:00+14:00");
        assert_eq!(result.target.datetime, "2025-01-15T11:00:00+00:00");
    }

    #[test]
    fn test_convert_inside_spring_forward_gap_west_of_utc() {
        let engine = ConversionEngine::default();
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 16, 0, 0).unwrap();

        let result = engine.convert_at("America/New_York", "02:30", "UTC", at).unwrap();
        assert_eq!(result.source.datetime, "2025-03-09T01:30:00-05:00");
        assert!(!result.source.is_dst);
        assert_eq!(result.target.datetime, "2025-03-09T06:30:00+00:00");
        assert_eq!(result.time_difference, "+5.0h");
    }

    #[test]
    fn test_convert_inside_spring_forward_gap_east_of_utc() {
        let engine = ConversionEngine::default();
        let at = Utc.with_ymd_and_hms(2025, 3, 30, 12, 0, 0).unwrap();

        let result = engine.convert_at("Europe/Paris", "02:30", "UTC", at).unwrap();
        assert_eq!(result.source.datetime, "2025-03-30T03:30:00+02:00");
        assert!(result.source.is_dst);
        assert_eq!(result.target.datetime, "2025-03-30T01:30:00+00:00");
        assert_eq!(result.time_difference, "-2.0h");
    }

    #[test]
    fn test_convert_rejects_surrounding_whitespace() {
        let engine = ConversionEngine::default();
        let at = reference(2025, 6, 15);

        for time in [" 12:30", "12:30 ", "   "] {
            assert!(
                matches!(
                    engine.convert_at("UTC", time, "Europe/Paris", at),
                    Err(TimeServerError::InvalidTimeFormat { .. })
                ),
                "expected InvalidTimeFormat for {:?}",
                time
            );
        }
        assert!(matches!(
            engine.convert_at("  UTC ", "12:30", "Europe/Paris", at),
            Err(TimeServerError::UnknownTimezone {
                role: ZoneRole::Source,
                ..
            })
        ));
        assert!(matches!(
            engine.convert_at("UTC", "12:30", "\tEurope/Paris\n", at),
            Err(TimeServerError::UnknownTimezone {
                role: ZoneRole::Target,
                ..
            })
        ));
    }

    #[test]
    fn test_convert_round_trip() {
        let engine = ConversionEngine::default();
        let at = reference(2025, 6, 15);

        let there = engine.convert_at("UTC", "12:00", "Asia/Tokyo", at).unwrap();
        assert_eq!(there.target.datetime, "2025-06-15T21:00:00+09:00");

        let back = engine.convert_at("Asia/Tokyo", "21:00", "UTC", at).unwrap();
        assert_eq!(back.target.datetime, there.source.datetime);
        assert_eq!(back.time_difference, "-9.0h");
    }

    #[test]
    fn test_convert_missing_fields() {
        let engine = ConversionEngine::default();
        let cases = [
            ("", "12:00", "UTC", "source_timezone"),
            ("UTC", "", "UTC", "time"),
            ("UTC", "12:00", "", "target_timezone"),
            ("UTC", "", "", "target_timezone"),
            ("", "", "", "source_timezone"),
        ];

        for (source, time, target, expected) in cases {
            match engine.convert(source, time, target) {
                Err(TimeServerError::MissingField { field }) => assert_eq!(field, expected),
                other => panic!("expected MissingField, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_convert_error_order() {
        let engine = ConversionEngine::default();

        // Time format is checked before either zone
        assert!(matches!(
            engine.convert("Invalid/Zone", "badtime", "Europe/Paris"),
            Err(TimeServerError::InvalidTimeFormat { .. })
        ));
        assert!(matches!(
            engine.convert("Invalid/Zone", "12:00", "Europe/Paris"),
            Err(TimeServerError::UnknownTimezone {
                role: ZoneRole::Source,
                ..
            })
        ));
        assert!(matches!(
            engine.convert("UTC", "12:00", "Invalid/Zone"),
            Err(TimeServerError::UnknownTimezone {
                role: ZoneRole::Target,
                ..
            })
        ));
    }
}
