use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use healthbuddy::config::LlmConfig;
use healthbuddy::constants::EARTH_RADIUS_KM;
use healthbuddy::db::{JsonFileUserRepository, UserRepository};
use healthbuddy::services::chat::ChatClient;
use healthbuddy::services::facility_search::FacilitySearchService;
use healthbuddy::services::geocoder::GeocoderClient;
use healthbuddy::services::overpass::OverpassClient;
use healthbuddy::AppState;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
#[allow(dead_code)]
pub const TEST_BCRYPT_COST: u32 = 4;

#[allow(dead_code)]
pub const TEST_LLM_KEY: &str = "test-llm-key";

/// Search service whose geocoder and Overpass endpoints live on `upstream`
#[allow(dead_code)]
pub fn search_service(upstream: &str, contact_email: Option<&str>) -> FacilitySearchService {
    FacilitySearchService::new(
        GeocoderClient::with_config(
            format!("{}/search", upstream),
            contact_email.map(str::to_string),
        ),
        OverpassClient::with_endpoint(format!("{}/api/interpreter", upstream)),
    )
}

#[allow(dead_code)]
pub fn user_repository(dir: &Path) -> JsonFileUserRepository {
    JsonFileUserRepository::new(dir.join("users.json"), TEST_BCRYPT_COST)
}

/// Full router with every upstream pointed at `upstream`
#[allow(dead_code)]
pub fn setup_test_app(upstream: &str, users_dir: &Path, maps_key: Option<&str>) -> Router {
    build_app(upstream, users_dir, maps_key, Some(TEST_LLM_KEY))
}

/// Same as `setup_test_app` but with no chat model key configured
#[allow(dead_code)]
pub fn setup_test_app_without_llm_key(upstream: &str, users_dir: &Path) -> Router {
    build_app(upstream, users_dir, None, None)
}

#[allow(dead_code)]
fn build_app(
    upstream: &str,
    users_dir: &Path,
    maps_key: Option<&str>,
    llm_key: Option<&str>,
) -> Router {
    let users: Arc<dyn UserRepository> = Arc::new(user_repository(users_dir));
    let llm = LlmConfig {
        api_key: llm_key.map(str::to_string),
        base_url: format!("{}/v1", upstream),
        model: "test-model".to_string(),
    };

    let state = Arc::new(AppState {
        facility_search: search_service(upstream, None),
        chat: ChatClient::new(llm),
        users,
        google_maps_api_key: maps_key.map(str::to_string),
    });

    healthbuddy::routes::create_router(state)
}

/// POST an arbitrary body, optionally without a content-type header
#[allow(dead_code)]
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, Some("application/json"), &body.to_string()).await
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

#[allow(dead_code)]
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Overpass node `km` kilometres due north of (0, 0)
#[allow(dead_code)]
pub fn node_north_of_origin(km: f64, name: &str) -> Value {
    json!({
        "type": "node",
        "id": (km * 1000.0) as i64,
        "lat": (km / EARTH_RADIUS_KM).to_degrees(),
        "lon": 0.0,
        "tags": {"amenity": "pharmacy", "name": name}
    })
}

/// Nominatim answer placing the location at (0, 0)
#[allow(dead_code)]
pub fn geocode_at_origin(display_name: &str) -> Value {
    json!([{"lat": "0.0", "lon": "0.0", "display_name": display_name}])
}
