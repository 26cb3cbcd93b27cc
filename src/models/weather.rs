//! Current weather snapshot model

use serde::{Deserialize, Serialize};

/// Point-in-time reading for one coordinate pair, as returned by get_weather.
///
/// Values reported by the forecast API stay `None` (serialized as `null`)
/// when upstream omits them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// Human-readable label for where the reading applies
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Air temperature in °C
    pub temperature: Option<f64>,
    /// Wind speed in km/h
    pub windspeed: Option<f64>,
    /// WMO weather interpretation code
    pub weathercode: Option<i64>,
    /// Wind direction in degrees
    pub winddirection: Option<f64>,
    /// Observation time (ISO 8601, upstream timezone)
    pub time: Option<String>,
    /// Description of `weathercode`
    pub condition: Option<String>,
}

/// Describe a WMO weather interpretation code
///
/// See <https://open-meteo.com/en/docs#weathervariables>
#[must_use]
pub fn weather_code_to_description(code: i64) -> Option<&'static str> {
    let description = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return None,
    };
    Some(description)
}
