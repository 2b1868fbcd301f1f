//! LinkedIn MCP server binary.

use anyhow::Result;
use linkedin_core::{CredentialBundle, CredentialStore, LinkedInConfig};
use linkedin_mcp::{
    ByteTransport, LinkedInRouter, LinkedInService, Router, RouterService, Server, ToolRegistry,
};
use std::sync::Arc;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting LinkedIn MCP server");

    let config = LinkedInConfig::load()?;
    let credentials = Arc::new(CredentialStore::new(CredentialBundle::from_env()));
    let capabilities = credentials.capabilities();
    tracing::info!(
        scraping = capabilities.has(linkedin_core::Capability::Scraping),
        api = capabilities.has(linkedin_core::Capability::Api),
        "Credentials loaded"
    );

    let service = Arc::new(LinkedInService::from_config(credentials, config)?);
    if let Err(e) = service.start().await {
        tracing::warn!(error = %e, "Eager browser start failed; will retry on first use");
    }

    let router = LinkedInRouter::builder()
        .name("linkedin")
        .version(env!("CARGO_PKG_VERSION"))
        .tools(ToolRegistry::linkedin(Arc::clone(&service)))
        .build();
    tracing::info!(tools = router.list_tools().len(), "Router initialized");

    let server = Server::new(RouterService(router));
    let transport = ByteTransport::new(stdin(), stdout());

    tracing::info!("Server ready, listening on stdio");
    let result = server.run(transport).await;

    if let Err(e) = service.close_session().await {
        tracing::warn!(error = %e, "Browser session did not close cleanly");
    }
    result?;
    Ok(())
}
