//! Open-Meteo API client
//!
//! Thin async wrapper over the geocoding search and current-weather
//! endpoints. Each call is a single GET; failures are classified into
//! [`UpstreamError`] and never retried.

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub use openmeteo::{CurrentWeather, GeocodingMatch};

const GEOCODING_ENDPOINT: &str = "geocoding";
const FORECAST_ENDPOINT: &str = "forecast";

/// Upstream operations the tools depend on
#[async_trait]
pub trait OpenMeteoApi: Send + Sync {
    /// Search places by name, at most `count` matches in relevance order
    async fn search(&self, name: &str, count: u8) -> Result<Vec<GeocodingMatch>, UpstreamError>;

    /// Current conditions for a coordinate pair. A response without a
    /// `current_weather` section yields an all-empty [`CurrentWeather`].
    async fn current_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<CurrentWeather, UpstreamError>;
}

/// reqwest-backed [`OpenMeteoApi`]
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_base_url: String,
    weather_base_url: String,
}

impl OpenMeteoClient {
    /// Build a client from upstream settings
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            geocoding_base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            weather_base_url: config.weather_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, UpstreamError> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} endpoint returned HTTP {}", endpoint, status);
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|source| UpstreamError::Decode { endpoint, source })?;

        debug!(
            "{} response decoded in {:.3}s",
            endpoint,
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

#[async_trait]
impl OpenMeteoApi for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str, count: u8) -> Result<Vec<GeocodingMatch>, UpstreamError> {
        let url = format!(
            "{}/search?name={}&count={}",
            self.geocoding_base_url,
            urlencoding::encode(name),
            count
        );

        let response: openmeteo::GeocodingResponse =
            self.get_json(GEOCODING_ENDPOINT, &url).await?;
        let results = response.results.unwrap_or_default();

        if results.is_empty() {
            info!("No geocoding results for '{}'", name);
        } else {
            info!("Found {} geocoding results for '{}'", results.len(), name);
        }
        Ok(results)
    }

    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    async fn current_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<CurrentWeather, UpstreamError> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true",
            self.weather_base_url, coordinates.latitude, coordinates.longitude
        );

        let response: openmeteo::ForecastResponse = self.get_json(FORECAST_ENDPOINT, &url).await?;
        if response.current_weather.is_none() {
            warn!("Forecast response has no current_weather section");
        }
        Ok(response.current_weather.unwrap_or_default())
    }
}

/// `OpenMeteo` response structures. Every field is optional; absent values
/// are passed through rather than rejected.
mod openmeteo {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    /// Geocoding search response
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingMatch>>,
    }

    /// One geocoding search result
    #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
    pub struct GeocodingMatch {
        pub name: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub country: Option<String>,
        pub admin1: Option<String>,
    }

    /// Forecast response, only the `current_weather=true` section
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current_weather: Option<CurrentWeather>,
    }

    /// Current conditions. A value of an unexpected type reads as absent
    /// instead of failing the whole reading.
    #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
    pub struct CurrentWeather {
        #[serde(default, deserialize_with = "lenient")]
        pub temperature: Option<f64>,
        #[serde(default, deserialize_with = "lenient")]
        pub windspeed: Option<f64>,
        #[serde(default, deserialize_with = "weather_code")]
        pub weathercode: Option<i64>,
        #[serde(default, deserialize_with = "lenient")]
        pub winddirection: Option<f64>,
        #[serde(default, deserialize_with = "lenient")]
        pub time: Option<String>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Other(IgnoredAny),
    }

    fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
            Some(Lenient::Value(value)) => Some(value),
            Some(Lenient::Other(_)) | None => None,
        })
    }

    /// WMO codes are integers, but `3.0` is accepted as `3`
    fn weather_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code: Option<f64> = lenient(deserializer)?;
        Ok(code.filter(|c| c.fract() == 0.0).map(|c| c as i64))
    }
}
