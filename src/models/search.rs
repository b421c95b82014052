use crate::constants::DEFAULT_SEARCH_RADIUS_METERS;
use crate::models::FacilityRecord;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Request body for POST /api/search-nearby
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchRequest {
    #[serde(default)]
    pub location: String,
    /// "all", "pharmacy" or "hospital" (case-insensitive)
    #[serde(default = "default_search_type")]
    pub search_type: String,
    /// Search radius in meters
    #[serde(default = "default_radius")]
    pub radius: u32,
}

fn default_search_type() -> String {
    "all".to_string()
}

fn default_radius() -> u32 {
    DEFAULT_SEARCH_RADIUS_METERS
}

/// Outcome of a nearby facility search.
///
/// Serializes to `{success: true, location, results, count}` or
/// `{success: false, error, results: []}`.
#[derive(Debug, Clone)]
pub enum SearchResult {
    Success {
        /// Geocoder display name, or the input text when it has none
        location: String,
        results: Vec<FacilityRecord>,
    },
    Failure {
        error: String,
    },
}

impl SearchResult {
    pub fn failure(error: impl Into<String>) -> Self {
        SearchResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchResult::Success { .. })
    }

    pub fn results(&self) -> &[FacilityRecord] {
        match self {
            SearchResult::Success { results, .. } => results,
            SearchResult::Failure { .. } => &[],
        }
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchResult::Success { location, results } => {
                let mut state = serializer.serialize_struct("SearchResult", 4)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("location", location)?;
                state.serialize_field("results", results)?;
                state.serialize_field("count", &results.len())?;
                state.end()
            }
            SearchResult::Failure { error } => {
                let mut state = serializer.serialize_struct("SearchResult", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.serialize_field("results", &[] as &[FacilityRecord])?;
                state.end()
            }
        }
    }
}
