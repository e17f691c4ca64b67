//! Postgres-backed repository for the `names` table.

use super::store::{NameStore, StoreError};
use crate::domain::{NewRecord, Record, RecordId, RecordUpdate};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::debug;

/// Advisory lock key serializing concurrent schema creation.
const SCHEMA_LOCK_KEY: i64 = 0x6e61_6d65_73;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Repository for `names` rows over a shared connection pool.
///
/// Every call checks a connection out of the pool for the duration of one
/// statement (or one transaction) and hands it back on drop.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: PgPool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Repository { pool }
    }
}

fn record_from_row(row: &PgRow) -> Result<Record, sqlx::Error> {
    Ok(Record {
        id: RecordId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("createdAt")?,
    })
}

#[async_trait]
impl NameStore for Repository {
    async fn create_table(&self) -> Result<(), StoreError> {
        // Concurrent CREATE TABLE IF NOT EXISTS can still collide on the
        // pg_type unique index, so callers queue on an advisory lock.
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(&mut *tx).await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1 FROM names LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, "createdAt"
            FROM names
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    async fn insert(&self, record: &NewRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO names (name, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_batch(&self, updates: &[RecordUpdate]) -> Result<u64, StoreError> {
        if updates.is_empty() {
            return Ok(0);
        }

        let mut matched = 0u64;
        let mut tx = self.pool.begin().await?;

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE names
                SET email = $1, name = $2
                WHERE id = $3
                "#,
            )
            .bind(&update.email)
            .bind(&update.name)
            .bind(update.id.as_i32())
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                debug!(id = %update.id, "Update matched no row");
            }
            matched += result.rows_affected();
        }

        tx.commit().await?;
        Ok(matched)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM names WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
