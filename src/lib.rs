// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use db::UserRepository;
use services::chat::ChatClient;
use services::facility_search::FacilitySearchService;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub facility_search: FacilitySearchService,
    pub chat: ChatClient,
    pub users: Arc<dyn UserRepository>,
    pub google_maps_api_key: Option<String>,
}
