use std::fmt;

use rmcp::ErrorData as McpError;
use rmcp::serde_json::json;

// Error codes
const ERROR_MISSING_FIELD: &str = "missing_field";
const ERROR_INVALID_TIME_FORMAT: &str = "invalid_time_format";
const ERROR_UNKNOWN_TIMEZONE: &str = "unknown_timezone";
const ERROR_EMPTY_INPUT: &str = "empty_input";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";
const ERROR_LOGGING_INITIALIZATION: &str = "logging_initialization";

/// Which input a timezone name was supplied through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRole {
    /// The single zone of a `get_current_time` request.
    Requested,
    Source,
    Target,
    /// Origin zone of a timestamp string conversion.
    From,
    /// Destination zone of a timestamp string conversion.
    To,
}

impl ZoneRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneRole::Requested => "requested",
            ZoneRole::Source => "source",
            ZoneRole::Target => "target",
            ZoneRole::From => "from",
            ZoneRole::To => "to",
        }
    }
}

impl fmt::Display for ZoneRole {
    /// Renders as the qualifier placed before the word "timezone" in messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneRole::Requested => Ok(()),
            other => write!(f, "{} ", other.as_str()),
        }
    }
}

/// Custom error types for better error handling
#[derive(Debug, thiserror::Error)]
pub enum TimeServerError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("invalid time format \"{time}\": expected HH:MM [24-hour format]")]
    InvalidTimeFormat { time: String },
    #[error("invalid {role}timezone: unknown timezone \"{timezone}\"")]
    UnknownTimezone { role: ZoneRole, timezone: String },
    #[error("time string is empty")]
    EmptyInput,
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl TimeServerError {
    pub fn unknown_timezone(role: ZoneRole, timezone: impl Into<String>) -> Self {
        TimeServerError::UnknownTimezone {
            role,
            timezone: timezone.into(),
        }
    }
}

impl From<TimeServerError> for McpError {
    fn from(err: TimeServerError) -> Self {
        let message = err.to_string();
        match err {
            TimeServerError::MissingField { field } => McpError::invalid_params(
                message,
                Some(json!({"code": ERROR_MISSING_FIELD, "field": field})),
            ),
            TimeServerError::InvalidTimeFormat { time } => McpError::invalid_params(
                message,
                Some(json!({
                    "code": ERROR_INVALID_TIME_FORMAT,
                    "time": time,
                    "expected": "HH:MM"
                })),
            ),
            TimeServerError::UnknownTimezone { role, timezone } => McpError::invalid_params(
                message,
                Some(json!({
                    "code": ERROR_UNKNOWN_TIMEZONE,
                    "role": role.as_str(),
                    "timezone": timezone
                })),
            ),
            TimeServerError::EmptyInput => {
                McpError::invalid_params(message, Some(json!({"code": ERROR_EMPTY_INPUT})))
            }
            TimeServerError::ResourceNotFound { uri } => McpError::resource_not_found(
                message,
                Some(json!({
                    "code": ERROR_RESOURCE_NOT_FOUND,
                    "uri": uri,
                    "available_resources": crate::server::AVAILABLE_RESOURCES
                })),
            ),
            TimeServerError::LoggingInitialization(_) => McpError::internal_error(
                message,
                Some(json!({"code": ERROR_LOGGING_INITIALIZATION})),
            ),
        }
    }
}

pub type TimeServerResult<T> = Result<T, TimeServerError>;
pub type McpResult<T> = Result<T, McpError>;
