use crate::error::AppError;
use crate::models::{FacilityRecord, SearchResult, SearchScope};
use crate::services::geocoder::GeocoderClient;
use crate::services::overpass::OverpassClient;

/// Geocode a location, then look up nearby pharmacies and/or hospitals.
pub struct FacilitySearchService {
    geocoder: GeocoderClient,
    overpass: OverpassClient,
}

impl FacilitySearchService {
    pub fn new(geocoder: GeocoderClient, overpass: OverpassClient) -> Self {
        FacilitySearchService { geocoder, overpass }
    }

    /// Run one search and fold every failure into `SearchResult::Failure`.
    ///
    /// With `search_type == "all"` the result is the pharmacy run followed by
    /// the hospital run, each ordered by distance on its own. The combined
    /// list is not re-sorted. A search type naming neither category still
    /// geocodes and succeeds with no results.
    pub async fn search(&self, location: &str, search_type: &str, radius_meters: u32) -> SearchResult {
        let location = location.trim();

        if location.is_empty() {
            return SearchResult::failure("Location is required");
        }

        let scope = SearchScope::from(search_type);
        if scope == SearchScope::Unmatched {
            tracing::debug!("Search type '{}' matches no facility category", search_type);
        }

        tracing::info!(
            "Nearby search: location='{}', scope={:?}, radius={}m",
            location,
            scope,
            radius_meters
        );

        let place = match self.geocoder.geocode(location).await {
            Ok(place) => place,
            Err(e) => {
                e.report("Nearby search");
                return SearchResult::failure(search_error_message(&e));
            }
        };

        let lookups = scope.categories().into_iter().map(|category| {
            self.overpass
                .query_facilities(&place.coordinates, category, radius_meters)
        });

        // join_all yields in input order, so pharmacies stay ahead of hospitals
        let results: Vec<FacilityRecord> = futures::future::join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .collect();

        tracing::info!("Nearby search for '{}' found {} facilities", location, results.len());

        SearchResult::Success {
            location: place.display_name.unwrap_or_else(|| location.to_string()),
            results,
        }
    }
}

fn search_error_message(error: &AppError) -> String {
    match error {
        AppError::InvalidRequest(_) | AppError::NotFound(_) | AppError::Network(_) => {
            error.user_message()
        }
        other => format!("Error searching nearby locations: {}", other),
    }
}
