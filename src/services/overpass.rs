use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, DistanceKm, FacilityCategory, FacilityRecord};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_OVERPASS_API_URL.to_string())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        OverpassClient {
            client: Client::new(),
            endpoint,
        }
    }

    /// Query facilities of one category within `radius_meters` of `center`.
    ///
    /// Results are sorted nearest first and capped at
    /// [`MAX_FACILITIES_PER_CATEGORY`]. Any failure (transport, non-200,
    /// unparseable body) yields an empty list; the search around it carries on.
    pub async fn query_facilities(
        &self,
        center: &Coordinates,
        category: FacilityCategory,
        radius_meters: u32,
    ) -> Vec<FacilityRecord> {
        match self.try_query_facilities(center, category, radius_meters).await {
            Ok(facilities) => {
                tracing::info!(
                    "Overpass returned {} {} results within {}m",
                    facilities.len(),
                    category,
                    radius_meters
                );
                facilities
            }
            Err(e) => {
                tracing::warn!("Overpass {} query failed, returning no results: {}", category, e);
                Vec::new()
            }
        }
    }

    async fn try_query_facilities(
        &self,
        center: &Coordinates,
        category: FacilityCategory,
        radius_meters: u32,
    ) -> Result<Vec<FacilityRecord>> {
        let query = build_query(center, category, radius_meters);

        tracing::debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("data={}", urlencoding::encode(&query)))
            .timeout(Duration::from_secs(OVERPASS_QUERY_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!("HTTP {}: {}", status, error_text)));
        }

        let api_response: OverpassResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse response: {}", e)))?;

        Ok(rank_facilities(center, category, api_response.elements))
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Overpass QL for one category: pharmacies as nodes only, hospitals as
/// nodes or ways (campus outlines). `out center` gives ways a centroid.
fn build_query(center: &Coordinates, category: FacilityCategory, radius_meters: u32) -> String {
    let around = format!("(around:{},{},{})", radius_meters, center.lat, center.lng);
    let amenity = category.amenity();

    let selectors = match category {
        FacilityCategory::Pharmacy => {
            format!(r#"node["amenity"="{}"]{};"#, amenity, around)
        }
        FacilityCategory::Hospital => format!(
            r#"(node["amenity"="{a}"]{r};way["amenity"="{a}"]{r};);"#,
            a = amenity,
            r = around
        ),
    };

    format!(
        "[out:json][timeout:{}];\n{}\nout center;",
        OVERPASS_QUERY_TIMEOUT_SECONDS, selectors
    )
}

/// Normalize elements, measure them from `center`, keep the nearest ones.
fn rank_facilities(
    center: &Coordinates,
    category: FacilityCategory,
    elements: Vec<OverpassElement>,
) -> Vec<FacilityRecord> {
    let mut facilities: Vec<FacilityRecord> = elements
        .into_iter()
        .map(|elem| elem.into_facility(center, category))
        .collect();

    // Stable sort on the unrounded distance keeps upstream order for exact ties
    facilities.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    facilities.truncate(MAX_FACILITIES_PER_CATEGORY);
    facilities
}

// Overpass API response types

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl OverpassElement {
    /// Ways carry a computed `center`; nodes carry their own lat/lon.
    /// Missing values fall back to 0.
    fn position(&self) -> (f64, f64) {
        match self.center {
            Some(ref center) => (center.lat.unwrap_or(0.0), center.lon.unwrap_or(0.0)),
            None => (self.lat.unwrap_or(0.0), self.lon.unwrap_or(0.0)),
        }
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    fn address(&self) -> String {
        if let Some(full) = self.tag("addr:full").filter(|a| !a.is_empty()) {
            return full.to_string();
        }

        let street = self.tag("addr:street").unwrap_or("");
        let city = self.tag("addr:city").unwrap_or("");
        let joined = format!("{}, {}", street, city);
        let trimmed = joined.trim_matches(|c: char| c == ',' || c == ' ');

        if trimmed.is_empty() {
            "Address not available".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn into_facility(self, center: &Coordinates, category: FacilityCategory) -> FacilityRecord {
        let (lat, lng) = self.position();
        let distance = center.distance_to(&Coordinates { lat, lng });

        FacilityRecord {
            category,
            name: self
                .tag("name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unnamed {}", category.label())),
            address: self.address(),
            phone: self.tag("phone").unwrap_or("N/A").to_string(),
            website: self.tag("website").unwrap_or("").to_string(),
            hours: self.tag("opening_hours").unwrap_or("Open 24/7").to_string(),
            distance: DistanceKm(distance),
            latitude: lat,
            longitude: lng,
        }
    }
}
