use crate::constants::{MIN_PASSWORD_LENGTH, MIN_PHONE_DIGITS};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stored user entry, keyed by normalized phone number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub phone: String,
    /// bcrypt hash; the plaintext password is never stored
    pub password_hash: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_login: Option<OffsetDateTime>,
}

/// What callers get to see of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub phone: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_login: Option<OffsetDateTime>,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        PublicUser {
            phone: record.phone.clone(),
            name: record.name.clone(),
            created_at: record.created_at,
            last_login: record.last_login,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// Strip everything but ASCII digits: "(555) 123-4567" -> "5551234567"
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone(phone).len() >= MIN_PHONE_DIGITS
}

impl RegisterRequest {
    /// Returns the normalized phone key on success
    pub fn validate(&self) -> Result<String> {
        if self.phone.is_empty() || self.password.is_empty() || self.name.is_empty() {
            return Err(AppError::InvalidRequest(
                "All fields are required".to_string(),
            ));
        }
        if !is_valid_phone(&self.phone) {
            return Err(AppError::InvalidRequest(
                "Invalid phone number. Please enter a valid phone number.".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::InvalidRequest(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(normalize_phone(&self.phone))
    }
}

impl LoginRequest {
    /// Returns the normalized phone key on success
    pub fn validate(&self) -> Result<String> {
        if self.phone.is_empty() || self.password.is_empty() {
            return Err(AppError::InvalidRequest(
                "Phone number and password are required".to_string(),
            ));
        }
        if !is_valid_phone(&self.phone) {
            return Err(AppError::InvalidRequest(
                "Invalid phone number".to_string(),
            ));
        }
        Ok(normalize_phone(&self.phone))
    }
}
