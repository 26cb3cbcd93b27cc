//! Location models: coordinates, geocoding matches and search candidates

use serde::{Deserialize, Serialize};

/// Label used when the caller supplies coordinates directly
pub const CUSTOM_LOCATION_LABEL: &str = "Custom Location";

/// Label used for the environment/default coordinate fallback
pub const DEFAULT_LOCATION_LABEL: &str = "Seoul, South Korea";

/// Seoul, the fallback when neither arguments nor environment name a place
pub const DEFAULT_LATITUDE: f64 = 37.5665;
pub const DEFAULT_LONGITUDE: f64 = 126.978;

/// A latitude/longitude pair in decimal degrees. Not range checked.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Best geocoding match for a place name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub country: Option<String>,
}

impl GeocodeResult {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "Name, Country", skipping whichever part upstream left out
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.name, &self.country) {
            (Some(name), Some(country)) => format!("{name}, {country}"),
            (Some(name), None) => name.clone(),
            (None, Some(country)) => country.clone(),
            (None, None) => format!("{:.4}, {:.4}", self.latitude, self.longitude),
        }
    }
}

/// One search_location match. Absent upstream fields serialize as null.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LocationCandidate {
    pub name: Option<String>,
    pub country: Option<String>,
    /// State, province or other first-level region
    pub admin1: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// search_location payload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationSearch {
    pub query: String,
    /// Upstream relevance order
    pub locations: Vec<LocationCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_label() {
        let mut result = GeocodeResult {
            latitude: 48.8566,
            longitude: 2.3522,
            name: Some("Paris".to_string()),
            country: Some("France".to_string()),
        };
        assert_eq!(result.label(), "Paris, France");

        result.country = None;
        assert_eq!(result.label(), "Paris");

        result.name = None;
        assert_eq!(result.label(), "48.8566, 2.3522");
    }

    #[test]
    fn test_candidate_serializes_all_five_fields() {
        let candidate = LocationCandidate {
            name: Some("Springfield".to_string()),
            country: Some("United States".to_string()),
            admin1: None,
            latitude: Some(39.8017),
            longitude: Some(-89.6437),
        };
        let value = serde_json::to_value(&candidate).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(object["admin1"].is_null());
        assert_eq!(object["latitude"], 39.8017);
    }
}
