//! # MCP Time
//!
//! A Model Context Protocol server with two tools:
//! - `get_current_time`: the current time in an IANA timezone
//! - `convert_time`: a 24-hour `HH:MM` time of day converted between timezones
//!
//! Results carry an ISO 8601 timestamp with an explicit numeric offset, the
//! weekday, a DST flag, and for conversions the signed hour difference.

pub mod cli;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;
