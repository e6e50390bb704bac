use crate::core::{
    conversion::ConversionEngine,
    error::{TimeServerResult, ZoneRole},
    models::{TimeConversionResult, TimeResult},
    timezone::{DEFAULT_TIMEZONE, TimezoneResolver},
};

/// Time server implementation
#[derive(Debug, Clone)]
pub struct TimeServer {
    resolver: TimezoneResolver,
    engine: ConversionEngine,
    local_timezone: String,
}

impl TimeServer {
    /// Build a server whose local zone is `local_timezone_override`, or the
    /// host zone when the override is empty.
    pub fn new(local_timezone_override: &str) -> Self {
        let resolver = TimezoneResolver::new();
        let local_timezone = resolver.local_default(local_timezone_override);

        if resolver
            .resolve(&local_timezone, ZoneRole::Requested)
            .is_err()
        {
            tracing::warn!(
                "Local timezone override '{}' is not a known IANA zone",
                local_timezone
            );
        }

        Self {
            resolver,
            engine: ConversionEngine::new(resolver),
            local_timezone,
        }
    }

    pub fn local_timezone(&self) -> &str {
        &self.local_timezone
    }

    /// Current time in `timezone_name`; an empty name means UTC.
    pub fn get_current_time(&self, timezone_name: &str) -> TimeServerResult<TimeResult> {
        let timezone_name = if timezone_name.is_empty() {
            DEFAULT_TIMEZONE
        } else {
            timezone_name
        };

        let timezone = self.resolver.resolve(timezone_name, ZoneRole::Requested)?;
        let current_time = self.resolver.now_in(&timezone);

        Ok(TimeResult::from_datetime(
            &self.resolver,
            &current_time,
            timezone_name,
        ))
    }

    pub fn convert_time(
        &self,
        source_tz: &str,
        time_str: &str,
        target_tz: &str,
    ) -> TimeServerResult<TimeConversionResult> {
        self.engine.convert(source_tz, time_str, target_tz)
    }
}

impl Default for TimeServer {
    fn default() -> Self {
        Self::new("")
    }
}
