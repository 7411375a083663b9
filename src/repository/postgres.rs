use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ApiKeyRepository;
use crate::models::api_key::{ApiKey, NewApiKey};

#[derive(Clone)]
pub struct PgApiKeyRepository {
    pool: PgPool,
}

impl PgApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PgApiKeyRepository {
    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKey> {
        let api_key = sqlx::query_as::<_, ApiKey>(
            "INSERT INTO api_keys (id, key, name, description, is_active, rate_limit, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, key, name, description, is_active, rate_limit, expires_at, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_key.key)
        .bind(&new_key.name)
        .bind(&new_key.description)
        .bind(new_key.is_active)
        .bind(new_key.rate_limit)
        .bind(new_key.expires_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert API key")?;

        Ok(api_key)
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<ApiKey>> {
        let api_key = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, description, is_active, rate_limit, expires_at, created_at, updated_at
             FROM api_keys
             WHERE key = $1 AND is_active = true",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up API key")?;

        Ok(api_key)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>> {
        let api_key = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, description, is_active, rate_limit, expires_at, created_at, updated_at
             FROM api_keys
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up API key by id")?;

        Ok(api_key)
    }

    async fn list(&self) -> Result<Vec<ApiKey>> {
        let api_keys = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, description, is_active, rate_limit, expires_at, created_at, updated_at
             FROM api_keys",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list API keys")?;

        Ok(api_keys)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<()> {
        sqlx::query("UPDATE api_keys SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .context("Failed to update API key")?;

        Ok(())
    }
}
