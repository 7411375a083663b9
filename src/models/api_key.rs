use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Default rate limit stored on new keys (requests per window).
/// Declared policy only; nothing enforces it yet.
pub const DEFAULT_RATE_LIMIT: i32 = 600;

/// A persisted API key record.
///
/// The `key` column holds the secret as issued. Records are never
/// hard-deleted; revocation flips `is_active` and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApiKey {
    pub id: Uuid,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub rate_limit: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub rate_limit: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    #[validate(length(min = 1, message = "le nom est requis"))]
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub rate_limit: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// What key-management responses expose: everything except the full secret.
/// Masking is presentation-level; the stored value itself is untouched.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeySummary {
    pub id: Uuid,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub rate_limit: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ApiKey> for ApiKeySummary {
    fn from(api_key: &ApiKey) -> Self {
        Self {
            id: api_key.id,
            key: mask_key(&api_key.key),
            name: api_key.name.clone(),
            description: api_key.description.clone(),
            is_active: api_key.is_active,
            rate_limit: api_key.rate_limit,
            expires_at: api_key.expires_at,
            created_at: api_key.created_at,
            updated_at: api_key.updated_at,
        }
    }
}

/// Keep the `ak_` prefix plus the first hex characters, drop the rest.
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(11).collect();
    format!("{}...", visible)
}
