use std::sync::Arc;

use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::api_key::{ApiKey, CreateApiKeyRequest, NewApiKey, DEFAULT_RATE_LIMIT};
use crate::repository::ApiKeyRepository;

/// Generate a new API key with format ak_<64_hex_chars>.
///
/// 32 bytes from the OS CSPRNG; predictability here would be a full
/// authentication bypass.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    format!("ak_{}", hex::encode(bytes))
}

/// Issues, validates and revokes API keys against the repository.
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn ApiKeyRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn ApiKeyRepository>) -> Self {
        Self { repository }
    }

    /// Look up an active record for `key` and check its expiration against
    /// the clock at call time. A key can be nominally active but expired;
    /// both conditions gate access independently.
    pub async fn validate_api_key(&self, key: &str) -> Result<ApiKey, AppError> {
        let record = self
            .repository
            .find_active_by_key(key)
            .await
            .map_err(AppError::Internal)?;

        let Some(api_key) = record else {
            debug!("unknown or inactive API key presented");
            return Err(AppError::InvalidApiKey);
        };

        if let Some(expires_at) = api_key.expires_at {
            if expires_at < Utc::now() {
                warn!("expired API key presented (id: {})", api_key.id);
                return Err(AppError::InvalidApiKey);
            }
        }

        Ok(api_key)
    }

    /// Create a key and return both the persisted record and the raw secret.
    /// The raw value is returned exactly once; listings only ever see the
    /// masked form.
    pub async fn create_api_key(
        &self,
        request: CreateApiKeyRequest,
    ) -> Result<(ApiKey, String), AppError> {
        let raw_key = generate_api_key();

        let record = self
            .repository
            .insert(NewApiKey {
                key: raw_key.clone(),
                name: request.name,
                description: request.description,
                is_active: request.is_active.unwrap_or(true),
                rate_limit: request.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
                expires_at: request.expires_at,
            })
            .await
            .map_err(AppError::Internal)?;

        info!("API key created (id: {}, name: {})", record.id, record.name);
        Ok((record, raw_key))
    }

    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>, AppError> {
        self.repository.list().await.map_err(AppError::Internal)
    }

    /// Soft-revoke: flips the active flag, never deletes. Revoking an
    /// already revoked key re-saves the same state.
    pub async fn revoke_api_key(&self, id: Uuid) -> Result<(), AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await
            .map_err(AppError::Internal)?
            .ok_or(AppError::KeyNotFound)?;

        self.repository
            .set_active(record.id, false)
            .await
            .map_err(AppError::Internal)?;

        info!("API key revoked (id: {})", record.id);
        Ok(())
    }
}
