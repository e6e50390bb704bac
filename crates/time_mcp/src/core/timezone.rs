use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::core::error::{TimeServerError, TimeServerResult, ZoneRole};

/// Layout accepted for timestamps that carry no offset.
pub const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone name used whenever no usable zone is available.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Resolves IANA zone names against the tz database compiled into `chrono-tz`.
///
/// The database is static, read-only data, so the resolver carries no state and
/// can be shared freely between concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimezoneResolver;

impl TimezoneResolver {
    pub fn new() -> Self {
        Self
    }

    /// Look up an IANA zone name.
    ///
    /// An empty name is not special-cased here; callers substitute `"UTC"`
    /// before resolving.
    pub fn resolve(&self, name: &str, role: ZoneRole) -> TimeServerResult<Tz> {
        Tz::from_str(name).map_err(|_| TimeServerError::unknown_timezone(role, name))
    }

    /// The current civil instant in `zone`.
    pub fn now_in(&self, zone: &Tz) -> DateTime<Tz> {
        Utc::now().with_timezone(zone)
    }

    /// Whether `instant` falls in daylight saving time for its zone.
    ///
    /// The standard offset is taken as the lesser of the offsets in force on
    /// January 1 and July 1 of the instant's year, which covers both
    /// hemispheres. DST is reported when the instant's offset differs from it.
    pub fn is_dst(&self, instant: &DateTime<Tz>) -> bool {
        let zone = instant.timezone();
        let year = instant.year();
        let (Some(january), Some(july)) = (
            offset_at_local_midnight(&zone, year, 1),
            offset_at_local_midnight(&zone, year, 7),
        ) else {
            return false;
        };

        let standard = january.min(july);
        offset_seconds(instant) != standard
    }

    /// Name of the zone to advertise as "local".
    ///
    /// A non-empty `override_name` is returned verbatim. Otherwise the host's
    /// configured IANA zone is used when it resolves, falling back to `"UTC"`.
    pub fn local_default(&self, override_name: &str) -> String {
        if !override_name.is_empty() {
            return override_name.to_string();
        }

        match iana_time_zone::get_timezone() {
            Ok(tz_name) => match self.resolve(&tz_name, ZoneRole::Requested) {
                Ok(_) => tz_name,
                Err(_) => {
                    tracing::warn!(
                        "Could not parse timezone '{}', defaulting to {}",
                        tz_name,
                        DEFAULT_TIMEZONE
                    );
                    DEFAULT_TIMEZONE.to_string()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Could not detect system timezone ({}), defaulting to {}",
                    e,
                    DEFAULT_TIMEZONE
                );
                DEFAULT_TIMEZONE.to_string()
            }
        }
    }

    /// Reproject a timestamp string into `to_tz`.
    ///
    /// RFC 3339 input keeps its own offset and ignores `from_tz`. Otherwise the
    /// string must match `YYYY-MM-DD HH:MM:SS` and is read as civil time in
    /// `from_tz`, or in UTC when `from_tz` is empty.
    pub fn convert_time_string(
        &self,
        time_str: &str,
        from_tz: &str,
        to_tz: &str,
    ) -> TimeServerResult<DateTime<Tz>> {
        if time_str.is_empty() {
            return Err(TimeServerError::EmptyInput);
        }

        let instant = match DateTime::parse_from_rfc3339(time_str) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(_) => {
                let naive = NaiveDateTime::parse_from_str(time_str, NAIVE_DATETIME_FORMAT)
                    .map_err(|_| TimeServerError::InvalidTimeFormat {
                        time: time_str.to_string(),
                    })?;
                let from_zone = if from_tz.is_empty() {
                    chrono_tz::UTC
                } else {
                    self.resolve(from_tz, ZoneRole::From)?
                };
                localize(&from_zone, &naive).with_timezone(&Utc)
            }
        };

        let to_zone = self.resolve(to_tz, ZoneRole::To)?;
        Ok(instant.with_timezone(&to_zone))
    }
}

/// Total UTC offset in force at `instant`, in seconds east of UTC.
pub fn offset_seconds(instant: &DateTime<Tz>) -> i32 {
    instant.offset().fix().local_minus_utc()
}

/// Attach `zone` to a civil date-time.
///
/// A wall time repeated by a fall-back transition maps to its earlier instant.
/// A wall time skipped by a spring-forward transition takes the offset in
/// force at that wall time read as UTC, re-checked at the instant it yields.
/// Zones west of UTC move back by the gap (02:30 on a New York transition day
/// becomes 01:30 EST) and zones east of UTC move forward (02:30 in Paris
/// becomes 03:30 CEST).
pub fn localize(zone: &Tz, naive: &NaiveDateTime) -> DateTime<Tz> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let first = zone.offset_from_utc_datetime(naive).fix();
            let candidate = *naive - Duration::seconds(i64::from(first.local_minus_utc()));
            let second = zone.offset_from_utc_datetime(&candidate).fix();
            let utc = *naive - Duration::seconds(i64::from(second.local_minus_utc()));
            zone.from_utc_datetime(&utc)
        }
    }
}

fn offset_at_local_midnight(zone: &Tz, year: i32, month: u32) -> Option<i32> {
    let midnight = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    Some(localize(zone, &midnight).offset().fix().local_minus_utc())
}
