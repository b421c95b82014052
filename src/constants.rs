//! Stable application-wide constants.
//!
//! Values here are fixed request timeouts, result limits, validation
//! thresholds, and default fallbacks for env-var-based configuration.
//! Endpoints and credentials live in [`Config`](crate::config::Config).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "8000";

// --- Upstream endpoint defaults ---

pub const DEFAULT_NOMINATIM_API_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_OVERPASS_API_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "nvidia/nemotron-3-nano-30b-a3b:free";
pub const DEFAULT_USERS_DB_PATH: &str = "data/users.json";

/// Sent with geocoder requests; Nominatim rejects anonymous clients.
pub const HTTP_USER_AGENT: &str = concat!("healthbuddy/", env!("CARGO_PKG_VERSION"));

// --- Upstream timeouts (seconds) ---

pub const GEOCODER_TIMEOUT_SECONDS: u64 = 10;
/// Also embedded in the Overpass QL `[timeout:]` setting.
pub const OVERPASS_QUERY_TIMEOUT_SECONDS: u64 = 15;
pub const LLM_REQUEST_TIMEOUT_SECONDS: u64 = 60;

// --- Facility search ---

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Search radius applied when the request omits one.
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 5000;
/// Per-category cap on returned facilities (nearest first).
pub const MAX_FACILITIES_PER_CATEGORY: usize = 10;

// --- User directory validation ---

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MIN_PASSWORD_LENGTH: usize = 6;
