use crate::error::{AppError, Result};
use crate::models::user::normalize_phone;
use crate::models::{LoginRequest, PublicUser, RegisterRequest, UserRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Users keyed by normalized phone number
pub type UserMap = BTreeMap<String, UserRecord>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Validate and store a new user. Fails if the phone is already taken.
    async fn register(&self, request: &RegisterRequest) -> Result<()>;

    /// Check credentials and stamp `last_login`.
    async fn login(&self, request: &LoginRequest) -> Result<PublicUser>;

    async fn lookup(&self, phone: &str) -> Result<Option<PublicUser>>;

    async fn count(&self) -> Result<usize>;
}

/// Whole-directory JSON file. Every mutation rewrites the file under a
/// process-wide lock; the write goes to a sibling temp file first and is
/// renamed into place.
pub struct JsonFileUserRepository {
    path: PathBuf,
    bcrypt_cost: u32,
    write_lock: Mutex<()>,
}

impl JsonFileUserRepository {
    pub fn new(path: impl Into<PathBuf>, bcrypt_cost: u32) -> Self {
        Self {
            path: path.into(),
            bcrypt_cost,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files read as an empty directory.
    async fn load(&self) -> UserMap {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("User file {} does not exist yet", self.path.display());
                return UserMap::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read user file {}: {}. Treating as empty.",
                    self.path.display(),
                    e
                );
                return UserMap::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(
                "Corrupt user file {}: {}. Treating as empty.",
                self.path.display(),
                e
            );
            UserMap::new()
        })
    }

    async fn save(&self, users: &UserMap) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(users)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!("Saved {} users to {}", users.len(), self.path.display());
        Ok(())
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let phone = request.validate()?;
        let password_hash = hash_password(request.password.clone(), self.bcrypt_cost).await?;

        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await;

        if users.contains_key(&phone) {
            return Err(AppError::InvalidRequest(
                "Phone number already registered. Please login or use a different number."
                    .to_string(),
            ));
        }

        users.insert(
            phone.clone(),
            UserRecord {
                phone: phone.clone(),
                password_hash,
                name: request.name.clone(),
                created_at: OffsetDateTime::now_utc(),
                last_login: None,
            },
        );
        self.save(&users).await?;

        tracing::info!("Registered user {}", phone);
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<PublicUser> {
        let phone = request.validate()?;

        let stored_hash = self
            .load()
            .await
            .get(&phone)
            .map(|user| user.password_hash.clone())
            .ok_or_else(|| {
                AppError::NotFound("Phone number not found. Please register first.".to_string())
            })?;

        if !verify_password(request.password.clone(), stored_hash).await? {
            return Err(AppError::Unauthorized("Incorrect password".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await;
        let user = users.get_mut(&phone).ok_or_else(|| {
            AppError::NotFound("Phone number not found. Please register first.".to_string())
        })?;
        user.last_login = Some(OffsetDateTime::now_utc());
        let public = PublicUser::from(&*user);
        self.save(&users).await?;

        tracing::info!("User {} logged in", phone);
        Ok(public)
    }

    async fn lookup(&self, phone: &str) -> Result<Option<PublicUser>> {
        let phone = normalize_phone(phone);
        Ok(self.load().await.get(&phone).map(PublicUser::from))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.load().await.len())
    }
}
