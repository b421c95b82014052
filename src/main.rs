use axum::Router;
use healthbuddy::config::Config;
use healthbuddy::db::{JsonFileUserRepository, UserRepository};
use healthbuddy::services::chat::ChatClient;
use healthbuddy::services::facility_search::FacilitySearchService;
use healthbuddy::services::geocoder::GeocoderClient;
use healthbuddy::services::overpass::OverpassClient;
use healthbuddy::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthbuddy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Health-Buddy API server");

    if config.llm.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set. Chat endpoints will reply with an error.");
    }

    let users: Arc<dyn UserRepository> = Arc::new(JsonFileUserRepository::new(
        config.users_db_path.clone(),
        config.bcrypt_cost,
    ));
    tracing::info!("User directory at {}", config.users_db_path.display());

    let facility_search = FacilitySearchService::new(
        GeocoderClient::with_config(
            config.nominatim_api_url.clone(),
            config.nominatim_email.clone(),
        ),
        OverpassClient::with_endpoint(config.overpass_api_url.clone()),
    );

    let state = Arc::new(AppState {
        facility_search,
        chat: ChatClient::new(config.llm.clone()),
        users,
        google_maps_api_key: config.google_maps_api_key.clone(),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .merge(healthbuddy::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
