use std::net::SocketAddr;

use clap::ValueEnum;

/// Wire the MCP server speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Streamable HTTP on the configured address
    Http,
    /// JSON-RPC over stdin/stdout
    Stdio,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw override for the local timezone; empty means detect from the host
    pub local_timezone: String,
    pub bind_address: SocketAddr,
    pub transport: Transport,
}
