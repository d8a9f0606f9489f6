//! NutriSafe
//!
//! An MCP server for nutrition reconciliation and allergen screening.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrisafe::build_info;
use nutrisafe::config::EngineConfig;
use nutrisafe::mcp::NutriSafeService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrisafe=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Load engine configuration
    let config = EngineConfig::from_env()?;
    eprintln!("Display chunk size: {}", config.display_chunk_size);

    // Create the NutriSafe service
    let service = NutriSafeService::new(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;
    tracing::info!("MCP server running");

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
