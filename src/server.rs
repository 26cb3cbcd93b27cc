//! MCP tool surface
//!
//! Exposes `get_weather` and `search_location` to the host. Domain failures
//! come back as tool results flagged `is_error` with a JSON body of the form
//! `{"error": ..., "kind": ...}`; they are never protocol errors.

use crate::api::OpenMeteoApi;
use crate::config::{LocationDefaults, ResolutionMode};
use crate::error::ToolError;
use crate::location_resolver::WeatherRequest;
use crate::weather;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, schemars, tool, tool_handler, tool_router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// get_weather arguments
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetWeatherArgs {
    /// Latitude in decimal degrees. Used only together with longitude.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees. Used only together with latitude.
    pub longitude: Option<f64>,
    /// Place name, e.g. "Seoul", "New York", "Tokyo"
    pub location: Option<String>,
}

/// search_location arguments
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchLocationArgs {
    /// Place name to search for
    pub query: String,
}

#[derive(Debug, Serialize)]
struct ErrorPayload<'a> {
    error: String,
    kind: &'a str,
}

/// Weather tool server
#[derive(Clone)]
pub struct WeatherServer {
    api: Arc<dyn OpenMeteoApi>,
    mode: ResolutionMode,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WeatherServer {
    pub fn new(api: Arc<dyn OpenMeteoApi>, mode: ResolutionMode) -> Self {
        Self {
            api,
            mode,
            tool_router: Self::tool_router(),
        }
    }

    /// Current weather for explicit coordinates, a place name, or the
    /// configured default location
    #[tool(
        description = "Get current weather (temperature, wind speed and direction, weather code) for a latitude/longitude pair or a place name. With no arguments, uses the LOCATION or LATITUDE/LONGITUDE environment defaults, falling back to Seoul."
    )]
    pub async fn get_weather(
        &self,
        Parameters(args): Parameters<GetWeatherArgs>,
    ) -> Result<CallToolResult, McpError> {
        let request = WeatherRequest {
            latitude: args.latitude,
            longitude: args.longitude,
            location: args.location,
        };
        let defaults = LocationDefaults::from_env();

        match weather::get_weather(self.api.as_ref(), &request, &defaults, self.mode).await {
            Ok(reading) => Ok(CallToolResult::success(vec![Content::json(&reading)?])),
            Err(e) => error_result(&e, "Failed to fetch weather data"),
        }
    }

    /// Candidate locations for a free-text query
    #[tool(
        description = "Search for locations by name. Returns up to five matches with name, country, region (admin1), latitude and longitude."
    )]
    pub async fn search_location(
        &self,
        Parameters(args): Parameters<SearchLocationArgs>,
    ) -> Result<CallToolResult, McpError> {
        match weather::search_location(self.api.as_ref(), &args.query).await {
            Ok(search) => Ok(CallToolResult::success(vec![Content::json(&search)?])),
            Err(e) => error_result(&e, "Location search failed"),
        }
    }
}

fn error_result(error: &ToolError, operation: &str) -> Result<CallToolResult, McpError> {
    warn!(kind = error.kind(), "{}: {}", operation, error);
    let payload = ErrorPayload {
        error: error.user_message(operation),
        kind: error.kind(),
    };
    Ok(CallToolResult::error(vec![Content::json(&payload)?]))
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Current weather and place-name lookups backed by Open-Meteo. Use search_location to disambiguate a place, then get_weather with its latitude/longitude.".to_string(),
            ),
            ..Default::default()
        }
    }
}
