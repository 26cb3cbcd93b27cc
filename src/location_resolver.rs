//! Location Resolution Module
//!
//! Turns get_weather inputs (explicit coordinates, a place name, or the
//! process environment) into the coordinates and label of a weather lookup.

use crate::api::OpenMeteoApi;
use crate::config::{LocationDefaults, ResolutionMode};
use crate::error::ToolError;
use crate::models::location::{
    CUSTOM_LOCATION_LABEL, DEFAULT_LATITUDE, DEFAULT_LOCATION_LABEL, DEFAULT_LONGITUDE,
};
use crate::models::{Coordinates, GeocodeResult};
use tracing::{debug, warn};

/// Caller-supplied get_weather arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location: Option<String>,
}

impl WeatherRequest {
    #[must_use]
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            location: None,
        }
    }

    #[must_use]
    pub fn place(name: impl Into<String>) -> Self {
        Self {
            location: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Coordinates plus the label reported back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub label: String,
}

/// Resolve a place name to its best geocoding match.
///
/// Failures are logged and reported as `None`, the same as "no match".
pub async fn geocode_location(api: &dyn OpenMeteoApi, name: &str) -> Option<GeocodeResult> {
    if name.trim().is_empty() {
        debug!("Skipping geocoding of an empty place name");
        return None;
    }

    let matches = match api.search(name, 1).await {
        Ok(matches) => matches,
        Err(e) => {
            warn!(location = name, error = %e, "Geocoding failed");
            return None;
        }
    };

    let Some(first) = matches.into_iter().next() else {
        warn!(location = name, "Geocoding returned no matches");
        return None;
    };

    match (first.latitude, first.longitude) {
        (Some(latitude), Some(longitude)) => Some(GeocodeResult {
            latitude,
            longitude,
            name: first.name,
            country: first.country,
        }),
        _ => {
            warn!(location = name, "Geocoding match has no coordinates");
            None
        }
    }
}

/// Service for resolving get_weather inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Apply the input precedence: explicit coordinates, explicit place
    /// name, `LOCATION`, then `LATITUDE`/`LONGITUDE` with the Seoul fallback.
    pub async fn resolve(
        api: &dyn OpenMeteoApi,
        request: &WeatherRequest,
        defaults: &LocationDefaults,
        mode: ResolutionMode,
    ) -> Result<ResolvedLocation, ToolError> {
        if let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) {
            debug!("Using explicit coordinates ({}, {})", latitude, longitude);
            return Ok(ResolvedLocation {
                coordinates: Coordinates::new(latitude, longitude),
                label: CUSTOM_LOCATION_LABEL.to_string(),
            });
        }

        match mode {
            ResolutionMode::Extended => {
                if let Some(name) = &request.location {
                    return Self::resolve_name(api, name).await;
                }
                if let Some(name) = defaults.location.as_deref().filter(|n| !n.is_empty()) {
                    debug!("Using LOCATION environment variable: {}", name);
                    return match geocode_location(api, name).await {
                        Some(result) => Ok(Self::from_geocode(result)),
                        None => Err(ToolError::EnvironmentLocationNotFound {
                            name: name.to_string(),
                        }),
                    };
                }
            }
            ResolutionMode::CoordinatesOnly => {
                if request.location.is_some() || defaults.location.is_some() {
                    debug!("Place names are disabled in coordinates_only mode, ignoring");
                }
            }
        }

        Self::resolve_defaults(defaults)
    }

    async fn resolve_name(
        api: &dyn OpenMeteoApi,
        name: &str,
    ) -> Result<ResolvedLocation, ToolError> {
        if name.trim().is_empty() {
            return Err(ToolError::EmptyQuery);
        }

        debug!("Geocoding location name: {}", name);
        geocode_location(api, name)
            .await
            .map(Self::from_geocode)
            .ok_or_else(|| ToolError::LocationNotFound {
                name: name.to_string(),
            })
    }

    fn from_geocode(result: GeocodeResult) -> ResolvedLocation {
        debug!(
            "Found location: {} ({:.4}, {:.4})",
            result.label(),
            result.latitude,
            result.longitude
        );
        ResolvedLocation {
            coordinates: result.coordinates(),
            label: result.label(),
        }
    }

    fn resolve_defaults(defaults: &LocationDefaults) -> Result<ResolvedLocation, ToolError> {
        let latitude = parse_coordinate("LATITUDE", defaults.latitude.as_deref(), DEFAULT_LATITUDE)?;
        let longitude =
            parse_coordinate("LONGITUDE", defaults.longitude.as_deref(), DEFAULT_LONGITUDE)?;

        Ok(ResolvedLocation {
            coordinates: Coordinates::new(latitude, longitude),
            label: DEFAULT_LOCATION_LABEL.to_string(),
        })
    }
}

/// Parse an environment coordinate; unset or blank means `fallback`
fn parse_coordinate(
    variable: &'static str,
    value: Option<&str>,
    fallback: f64,
) -> Result<f64, ToolError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(fallback),
        Some(raw) => raw.parse::<f64>().map_err(|_| ToolError::InvalidEnvironment {
            variable,
            value: raw.to_string(),
        }),
    }
}
