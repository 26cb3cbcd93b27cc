//! Data models for weather-mcp
//!
//! - Location: coordinates, geocoding matches and search candidates
//! - Weather: the current weather snapshot and WMO code descriptions

pub mod location;
pub mod weather;

pub use location::{Coordinates, GeocodeResult, LocationCandidate, LocationSearch};
pub use weather::{WeatherReading, weather_code_to_description};
