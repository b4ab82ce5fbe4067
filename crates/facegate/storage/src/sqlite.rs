//! SQLite adapter for facegate credential storage.
//!
//! Designed for on-device deployments where credentials must survive process
//! restart. The embedding is stored as JSON text; the single-row-per-user
//! invariant is enforced by the primary key and an `ON CONFLICT` upsert, so
//! a racing fetch observes the old or the new record, never a torn one.

use crate::traits::CredentialStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use facegate_types::{FaceCredential, UserId};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

/// SQLite-backed credential store adapter.
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Connect to SQLite and initialize required schema.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        Self::connect_with_options(database_url, 4, 5).await
    }

    /// Connect with explicit pool parameters.
    pub async fn connect_with_options(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Backend(format!("failed to connect sqlite: {e}")))?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create adapter from an existing pool.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS facegate_credentials (
                user_id TEXT PRIMARY KEY,
                embedding TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("schema init failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn upsert(&self, credential: FaceCredential) -> StoreResult<()> {
        let embedding = serde_json::to_string(&credential.embedding)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        sqlx::query(
            r#"
            INSERT INTO facegate_credentials (user_id, embedding, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                embedding = excluded.embedding,
                created_at = excluded.created_at
            "#,
        )
        .bind(credential.user_id.to_string())
        .bind(embedding)
        .bind(credential.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("upsert failed: {e}")))?;
        Ok(())
    }

    async fn fetch(&self, user_id: &UserId) -> StoreResult<Option<FaceCredential>> {
        let row = sqlx::query(
            r#"
            SELECT embedding, created_at
            FROM facegate_credentials
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("fetch failed: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let embedding: String = row
            .try_get("embedding")
            .map_err(|e| StoreError::Backend(format!("fetch failed: {e}")))?;
        let embedding: Vec<f32> = serde_json::from_str(&embedding)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| StoreError::Backend(format!("fetch failed: {e}")))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::Serialization(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Some(FaceCredential {
            user_id: user_id.clone(),
            embedding,
            created_at,
        }))
    }
}
