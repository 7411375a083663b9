use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::api_key::{ApiKey, NewApiKey};

/// Persistence seam for API keys, implemented by all storage backends.
///
/// Failures here are infrastructure failures; the auth service maps an
/// absent record to its own typed errors.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + 'static {
    /// Persist a new key, filling in id and timestamps.
    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKey>;

    /// Look up a key by its secret value, restricted to active records.
    async fn find_active_by_key(&self, key: &str) -> Result<Option<ApiKey>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>>;

    /// All records, in no guaranteed order.
    async fn list(&self) -> Result<Vec<ApiKey>>;

    /// Flip the active flag and bump `updated_at`.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<()>;
}

pub mod memory;
pub mod postgres;
