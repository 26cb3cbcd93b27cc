//! get_weather and search_location operations

use crate::api::OpenMeteoApi;
use crate::config::{LocationDefaults, ResolutionMode};
use crate::error::ToolError;
use crate::location_resolver::{LocationResolver, WeatherRequest};
use crate::models::{LocationCandidate, LocationSearch, WeatherReading, weather_code_to_description};
use tracing::{info, instrument};

/// Number of candidates requested by search_location
pub const SEARCH_RESULT_COUNT: u8 = 5;

/// Resolve the request to coordinates and fetch the current weather there
#[instrument(skip(api, defaults))]
pub async fn get_weather(
    api: &dyn OpenMeteoApi,
    request: &WeatherRequest,
    defaults: &LocationDefaults,
    mode: ResolutionMode,
) -> Result<WeatherReading, ToolError> {
    let resolved = LocationResolver::resolve(api, request, defaults, mode).await?;
    let current = api.current_weather(resolved.coordinates).await?;

    info!(
        "Current weather for {}: {:?}°C, code {:?}",
        resolved.label, current.temperature, current.weathercode
    );

    Ok(WeatherReading {
        location: resolved.label,
        latitude: resolved.coordinates.latitude,
        longitude: resolved.coordinates.longitude,
        temperature: current.temperature,
        windspeed: current.windspeed,
        condition: current
            .weathercode
            .and_then(weather_code_to_description)
            .map(str::to_string),
        weathercode: current.weathercode,
        winddirection: current.winddirection,
        time: current.time,
    })
}

/// Up to five places matching `query`, in upstream relevance order
#[instrument(skip(api))]
pub async fn search_location(
    api: &dyn OpenMeteoApi,
    query: &str,
) -> Result<LocationSearch, ToolError> {
    if query.trim().is_empty() {
        return Err(ToolError::EmptyQuery);
    }

    let locations = api
        .search(query, SEARCH_RESULT_COUNT)
        .await?
        .into_iter()
        .map(|m| LocationCandidate {
            name: m.name,
            country: m.country,
            admin1: m.admin1,
            latitude: m.latitude,
            longitude: m.longitude,
        })
        .collect();

    Ok(LocationSearch {
        query: query.to_string(),
        locations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CurrentWeather, GeocodingMatch};
    use crate::error::UpstreamError;
    use crate::location_resolver::tests::FakeApi;
    use crate::models::Coordinates;

    fn sunny() -> CurrentWeather {
        CurrentWeather {
            temperature: Some(18.2),
            windspeed: Some(7.6),
            weathercode: Some(1),
            winddirection: Some(250.0),
            time: Some("2026-10-17T09:00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_weather_maps_current_conditions() {
        let api = FakeApi {
            current: sunny(),
            ..FakeApi::default()
        };

        let reading = get_weather(
            &api,
            &WeatherRequest::coordinates(52.52, 13.41),
            &LocationDefaults::default(),
            ResolutionMode::Extended,
        )
        .await
        .unwrap();

        assert_eq!(reading.location, "Custom Location");
        assert_eq!(reading.latitude, 52.52);
        assert_eq!(reading.temperature, Some(18.2));
        assert_eq!(reading.windspeed, Some(7.6));
        assert_eq!(reading.weathercode, Some(1));
        assert_eq!(reading.winddirection, Some(250.0));
        assert_eq!(reading.time.as_deref(), Some("2026-10-17T09:00"));
        assert_eq!(reading.condition.as_deref(), Some("Mainly clear"));
        assert_eq!(
            *api.weather_calls.lock().unwrap(),
            vec![Coordinates::new(52.52, 13.41)]
        );
    }

    #[tokio::test]
    async fn test_get_weather_passes_missing_fields_through() {
        let api = FakeApi::default();
        let reading = get_weather(
            &api,
            &WeatherRequest::default(),
            &LocationDefaults::default(),
            ResolutionMode::Extended,
        )
        .await
        .unwrap();

        assert_eq!(reading.location, "Seoul, South Korea");
        assert!(reading.temperature.is_none());
        assert!(reading.weathercode.is_none());
        assert!(reading.condition.is_none());
    }

    #[tokio::test]
    async fn test_get_weather_upstream_failure() {
        let api = FakeApi {
            fail_weather: true,
            ..FakeApi::default()
        };
        let err = get_weather(
            &api,
            &WeatherRequest::coordinates(1.0, 2.0),
            &LocationDefaults::default(),
            ResolutionMode::Extended,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::Upstream(UpstreamError::Status { status: 500, .. })));
        assert!(!err.user_message("Failed to fetch weather data").is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_name_skips_weather_call() {
        let api = FakeApi::default();
        let err = get_weather(
            &api,
            &WeatherRequest::place("Atlantis"),
            &LocationDefaults::default(),
            ResolutionMode::Extended,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::LocationNotFound { .. }));
        assert!(api.weather_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_location_keeps_order() {
        let api = FakeApi {
            matches: vec![
                GeocodingMatch {
                    name: Some("Springfield".to_string()),
                    latitude: Some(39.8017),
                    longitude: Some(-89.6437),
                    country: Some("United States".to_string()),
                    admin1: Some("Illinois".to_string()),
                },
                GeocodingMatch {
                    name: Some("Springfield".to_string()),
                    latitude: Some(37.2153),
                    longitude: Some(-93.2982),
                    country: Some("United States".to_string()),
                    admin1: None,
                },
            ],
            ..FakeApi::default()
        };

        let search = search_location(&api, "Springfield").await.unwrap();
        assert_eq!(search.query, "Springfield");
        assert_eq!(search.locations.len(), 2);
        assert_eq!(search.locations[0].admin1.as_deref(), Some("Illinois"));
        assert!(search.locations[1].admin1.is_none());
        assert_eq!(
            *api.searches.lock().unwrap(),
            vec![("Springfield".to_string(), SEARCH_RESULT_COUNT)]
        );
    }

    #[tokio::test]
    async fn test_search_location_empty_query() {
        let api = FakeApi::default();
        let err = search_location(&api, "").await.unwrap_err();
        assert!(matches!(err, ToolError::EmptyQuery));
        assert_eq!(api.search_count(), 0);
    }

    #[tokio::test]
    async fn test_search_location_upstream_failure() {
        let api = FakeApi {
            fail_search: true,
            ..FakeApi::default()
        };
        let err = search_location(&api, "Paris").await.unwrap_err();
        assert_eq!(err.kind(), "upstream_status");
    }
}
