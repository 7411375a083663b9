use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ApiKeyRepository;
use crate::models::api_key::{ApiKey, NewApiKey};

/// In-memory backend, used by the test suite and for credential-less local
/// runs. Mirrors the uniqueness constraint of the `api_keys` table.
#[derive(Default, Clone)]
pub struct InMemoryApiKeyRepository {
    records: Arc<RwLock<HashMap<Uuid, ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKey> {
        let mut records = self.records.write().await;

        if records.values().any(|existing| existing.key == new_key.key) {
            bail!("duplicate API key value");
        }

        let now = Utc::now();
        let api_key = ApiKey {
            id: Uuid::new_v4(),
            key: new_key.key,
            name: new_key.name,
            description: new_key.description,
            is_active: new_key.is_active,
            rate_limit: new_key.rate_limit,
            expires_at: new_key.expires_at,
            created_at: now,
            updated_at: now,
        };

        records.insert(api_key.id, api_key.clone());
        Ok(api_key)
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<ApiKey>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|record| record.key == key && record.is_active)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<ApiKey>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.is_active = active;
            record.updated_at = Utc::now();
        }
        Ok(())
    }
}
