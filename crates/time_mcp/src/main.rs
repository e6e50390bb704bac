use mcp_time::cli::Cli;
use mcp_time::server;
use mcp_time::utils::logging;

/// Time MCP Server
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-time -- --transport stdio
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let config = Cli::parse_config();

    logging::init_logging()?;
    tracing::info!("Starting Time MCP server ({:?} transport)", config.transport);

    if let Err(e) = server::run(config).await {
        tracing::error!("Error running Time MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
