//! weather-mcp - current weather and place-name lookups as MCP tools
//!
//! The tools are backed by the Open-Meteo geocoding and forecast APIs. Every
//! invocation is stateless: at most a geocoding call followed by a weather
//! call, with failures returned as structured results.

pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod server;
pub mod telemetry;
pub mod weather;

// Re-export core types for public API
pub use api::{OpenMeteoApi, OpenMeteoClient};
// `crate::` is required: `config` is also an external crate name
pub use crate::config::{LocationDefaults, ResolutionMode, Settings};
pub use error::{ConfigError, ToolError, UpstreamError};
pub use location_resolver::{LocationResolver, ResolvedLocation, WeatherRequest, geocode_location};
pub use models::{Coordinates, GeocodeResult, LocationCandidate, LocationSearch, WeatherReading};
pub use server::WeatherServer;
pub use weather::{get_weather, search_location};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
