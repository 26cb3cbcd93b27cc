use anyhow::{Context, Result};
use rmcp::ServiceExt;
use std::sync::Arc;
use weather_mcp::{OpenMeteoClient, Settings, WeatherServer, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    telemetry::init(&settings.logging)?;

    tracing::info!("Starting weather-mcp...");

    let client =
        OpenMeteoClient::new(&settings.upstream).context("Failed to create HTTP client")?;
    let server = WeatherServer::new(Arc::new(client), settings.tools.resolution);

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| tracing::error!("Failed to start MCP service: {:?}", e))?;

    let reason = service.waiting().await?;
    tracing::info!("weather-mcp stopped: {:?}", reason);
    Ok(())
}
