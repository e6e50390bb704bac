//! # Time MCP Core
//!
//! Timezone-aware time operations behind the MCP tools.
//!
//! ## Modules
//! - `error`: Error taxonomy and its mapping onto MCP errors
//! - `models`: Request and response structures
//! - `timezone`: IANA zone resolution, DST detection, local zone detection
//! - `format`: Timestamp and offset-difference rendering
//! - `conversion`: `HH:MM` parsing and cross-zone conversion
//! - `provider`: The two tool operations

pub mod conversion;
pub mod error;
pub mod format;
pub mod models;
pub mod provider;
pub mod timezone;
