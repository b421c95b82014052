use crate::constants::*;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
    pub nominatim_api_url: String,
    /// Contact address forwarded to Nominatim for rate-limit courtesy
    pub nominatim_email: Option<String>,
    pub overpass_api_url: String,
    pub google_maps_api_key: Option<String>,
    pub users_db_path: PathBuf,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chat requests fail with a displayable error while this is unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: non_empty_var("OPENROUTER_API_KEY"),
            base_url: env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
        }
    }
}

/// Reads an env var, treating an empty value the same as an absent one.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load `.env` from the working directory (if any), then read the environment.
    pub fn load() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read settings from process environment variables only.
    pub fn from_env() -> Result<Self, String> {
        let bcrypt_cost: u32 = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse()
            .map_err(|_| "Invalid BCRYPT_COST")?;

        if !(4..=31).contains(&bcrypt_cost) {
            return Err("BCRYPT_COST must be between 4 and 31".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            llm: LlmConfig::from_env(),
            nominatim_api_url: env::var("NOMINATIM_API_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_API_URL.to_string()),
            nominatim_email: non_empty_var("NOMINATIM_EMAIL"),
            overpass_api_url: env::var("OVERPASS_API_URL")
                .unwrap_or_else(|_| DEFAULT_OVERPASS_API_URL.to_string()),
            google_maps_api_key: non_empty_var("GOOGLE_MAPS_API_KEY"),
            users_db_path: env::var("USERS_DB_PATH")
                .unwrap_or_else(|_| DEFAULT_USERS_DB_PATH.to_string())
                .into(),
            bcrypt_cost,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
