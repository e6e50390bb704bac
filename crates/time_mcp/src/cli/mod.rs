use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

use crate::config::{Config, Transport};

pub const DEFAULT_PORT: u16 = 8080;

/// Time MCP Server
///
/// Serves `get_current_time` and `convert_time` over the Model Context Protocol.
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector http://localhost:8080/mcp
/// ```
///
/// ## Environment Variables
/// - `MCP_TIME_LOCAL_TIMEZONE`, `MCP_TIME_HOST`, `MCP_TIME_PORT`: same as the flags
/// - `RUST_LOG` / `LOG_LEVEL`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-time")]
#[command(about = "An MCP server for current time lookups and timezone conversion")]
#[command(version)]
pub struct Cli {
    /// Override local timezone (e.g., 'America/New_York')
    #[arg(long, env = "MCP_TIME_LOCAL_TIMEZONE", default_value = "")]
    pub local_timezone: String,

    /// Address to listen on
    #[arg(long, env = "MCP_TIME_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "MCP_TIME_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Transport to serve the MCP protocol over
    #[arg(long, value_enum, default_value_t = Transport::Http)]
    pub transport: Transport,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub fn parse_config() -> Config {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> Config {
        Config {
            local_timezone: self.local_timezone,
            bind_address: SocketAddr::new(self.host, self.port),
            transport: self.transport,
        }
    }
}
