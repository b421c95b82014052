use crate::error::AppError;
use crate::models::{NearbySearchRequest, SearchResult};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

/// POST /api/search-nearby - Pharmacies and hospitals around a free-text location
pub async fn search_nearby(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NearbySearchRequest>, JsonRejection>,
) -> Json<SearchResult> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let e = AppError::from(rejection);
            e.report("Nearby search");
            return Json(SearchResult::failure(e.user_message()));
        }
    };

    let result = state
        .facility_search
        .search(&request.location, &request.search_type, request.radius)
        .await;

    Json(result)
}
