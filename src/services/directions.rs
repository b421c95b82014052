use crate::error::{AppError, Result};

const GOOGLE_MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Google Maps directions link to `address`. Words are percent-encoded and
/// joined with `+`; the maps key is appended when one is configured.
pub fn directions_url(address: &str, maps_api_key: Option<&str>) -> Result<String> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::InvalidRequest("Address is required".to_string()));
    }

    let destination = address
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");

    let mut url = format!("{}&destination={}", GOOGLE_MAPS_DIRECTIONS_URL, destination);
    if let Some(key) = maps_api_key {
        url.push_str("&key=");
        url.push_str(&urlencoding::encode(key));
    }

    Ok(url)
}
