use crate::constants::{DEFAULT_NOMINATIM_API_URL, GEOCODER_TIMEOUT_SECONDS, HTTP_USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const LOCATION_NOT_FOUND_MESSAGE: &str =
    "Could not find location. Please try a different address.";

/// A resolved free-text location
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub coordinates: Coordinates,
    pub display_name: Option<String>,
}

/// Nominatim-compatible geocoding client
#[derive(Clone)]
pub struct GeocoderClient {
    client: Client,
    base_url: String,
    contact_email: Option<String>,
}

impl GeocoderClient {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_NOMINATIM_API_URL.to_string(), None)
    }

    pub fn with_config(base_url: String, contact_email: Option<String>) -> Self {
        GeocoderClient {
            client: Client::new(),
            base_url,
            contact_email,
        }
    }

    /// Resolve `location` to the single best candidate.
    ///
    /// Returns `NotFound` when the service answers non-200 or with no
    /// candidates, and `Network` on transport faults. Nothing is retried.
    pub async fn geocode(&self, location: &str) -> Result<GeocodedLocation> {
        let mut params = vec![("q", location), ("format", "json"), ("limit", "1")];
        if let Some(ref email) = self.contact_email {
            params.push(("email", email.as_str()));
        }

        tracing::debug!("Geocoding '{}'", location);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .header(reqwest::header::USER_AGENT, HTTP_USER_AGENT)
            .timeout(Duration::from_secs(GEOCODER_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Geocoder returned HTTP {} for '{}'", status, location);
            return Err(AppError::NotFound(LOCATION_NOT_FOUND_MESSAGE.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        // An unparseable body counts as "no candidates", matching an empty list
        let candidates: Vec<NominatimPlace> = match serde_json::from_slice(&body) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Unreadable geocoder response for '{}': {}", location, e);
                return Err(AppError::NotFound(LOCATION_NOT_FOUND_MESSAGE.to_string()));
            }
        };

        let place = candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(LOCATION_NOT_FOUND_MESSAGE.to_string()))?;

        let lat: f64 = place
            .lat
            .trim()
            .parse()
            .map_err(|_| AppError::Upstream(format!("Invalid latitude '{}'", place.lat)))?;
        let lng: f64 = place
            .lon
            .trim()
            .parse()
            .map_err(|_| AppError::Upstream(format!("Invalid longitude '{}'", place.lon)))?;
        let coordinates = Coordinates::new(lat, lng).map_err(AppError::Upstream)?;

        tracing::debug!(
            "Geocoded '{}' to ({:.5}, {:.5})",
            location,
            coordinates.lat,
            coordinates.lng
        );

        Ok(GeocodedLocation {
            coordinates,
            display_name: place.display_name,
        })
    }
}

impl Default for GeocoderClient {
    fn default() -> Self {
        Self::new()
    }
}

// Nominatim response types

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    /// Nominatim sends coordinates as decimal strings
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_public_endpoint() {
        let client = GeocoderClient::new();
        assert_eq!(client.base_url, DEFAULT_NOMINATIM_API_URL);
        assert!(client.contact_email.is_none());
    }

    #[test]
    fn test_place_deserialization() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"lat": "48.8566", "lon": "2.3522", "display_name": "Paris, France", "importance": 0.9}]"#,
        )
        .unwrap();
        assert_eq!(places[0].lat, "48.8566");
        assert_eq!(places[0].display_name.as_deref(), Some("Paris, France"));
    }
}
