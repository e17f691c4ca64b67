//! In-process store for testing without a database server.

use super::store::{NameStore, StoreError, TABLE_NAME};
use crate::domain::{NewRecord, Record, RecordId, RecordUpdate};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Table {
    rows: Vec<Record>,
    next_id: i32,
}

impl Table {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

/// Store that keeps the `names` table in memory.
///
/// Starts without a table, like a fresh database: reads fail with
/// `StoreError::MissingSchema` until `create_table` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Option<Table>>,
}

impl MemoryStore {
    /// Create a store with no `names` table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the table and all its rows.
    pub fn drop_table(&self) {
        *self.lock() = None;
    }

    /// Whether the table currently exists.
    pub fn has_table(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Table>> {
        // Rows are only mutated under the lock without awaiting, so a
        // poisoned lock still holds a consistent table.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl NameStore for MemoryStore {
    async fn create_table(&self) -> Result<(), StoreError> {
        let mut table = self.lock();
        if table.is_none() {
            *table = Some(Table::new());
        }
        Ok(())
    }

    async fn check(&self) -> Result<(), StoreError> {
        if self.has_table() {
            Ok(())
        } else {
            Err(StoreError::MissingSchema(TABLE_NAME))
        }
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let table = self.lock();
        let table = table.as_ref().ok_or(StoreError::MissingSchema(TABLE_NAME))?;
        Ok(table.rows.clone())
    }

    async fn insert(&self, record: &NewRecord) -> Result<bool, StoreError> {
        let mut table = self.lock();
        let table = table.as_mut().ok_or(StoreError::MissingSchema(TABLE_NAME))?;

        if table.rows.iter().any(|r| r.email == record.email) {
            return Ok(false);
        }

        let id = RecordId::new(table.next_id);
        table.next_id += 1;
        table.rows.push(Record {
            id,
            name: record.name.clone(),
            email: record.email.clone(),
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn update_batch(&self, updates: &[RecordUpdate]) -> Result<u64, StoreError> {
        let mut table = self.lock();
        let table = table.as_mut().ok_or(StoreError::MissingSchema(TABLE_NAME))?;

        // Staged on a copy so a conflict leaves every row untouched.
        let mut rows = table.rows.clone();
        let mut matched = 0u64;
        for update in updates {
            let Some(index) = rows.iter().position(|r| r.id == update.id) else {
                continue;
            };
            if rows
                .iter()
                .any(|r| r.id != update.id && r.email == update.email)
            {
                return Err(StoreError::Conflict(format!(
                    "email {} already belongs to another record",
                    update.email
                )));
            }
            rows[index].name = update.name.clone();
            rows[index].email = update.email.clone();
            matched += 1;
        }

        table.rows = rows;
        Ok(matched)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut table = self.lock();
        let table = table.as_mut().ok_or(StoreError::MissingSchema(TABLE_NAME))?;

        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok(table.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_table() -> MemoryStore {
        let store = MemoryStore::new();
        store.create_table().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_without_table_is_missing_schema() {
        let store = MemoryStore::new();
        let err = store.list().await.unwrap_err();
        assert!(err.is_missing_schema());
    }

    #[tokio::test]
    async fn test_create_table_keeps_existing_rows() {
        let store = store_with_table().await;
        store
            .insert(&NewRecord::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        store.create_table().await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_ignores_duplicate_email() {
        let store = store_with_table().await;

        assert!(store
            .insert(&NewRecord::new("Ada", "ada@example.com"))
            .await
            .unwrap());
        assert!(!store
            .insert(&NewRecord::new("Someone Else", "ada@example.com"))
            .await
            .unwrap());

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = store_with_table().await;
        store.insert(&NewRecord::new("A", "a@example.com")).await.unwrap();
        store.delete(RecordId::new(1)).await.unwrap();
        store.insert(&NewRecord::new("B", "b@example.com")).await.unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows[0].id, RecordId::new(2));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_ids_match_nothing() {
        let store = store_with_table().await;
        store.insert(&NewRecord::new("A", "a@example.com")).await.unwrap();

        let matched = store
            .update_batch(&[RecordUpdate {
                id: RecordId::new(99),
                name: "Z".to_string(),
                email: "z@example.com".to_string(),
            }])
            .await
            .unwrap();
        assert_eq!(matched, 0);
        assert!(!store.delete(RecordId::new(99)).await.unwrap());

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "a@example.com");
    }

    #[tokio::test]
    async fn test_update_batch_rejects_shared_email() {
        let store = store_with_table().await;
        store.insert(&NewRecord::new("A", "a@x.io")).await.unwrap();
        store.insert(&NewRecord::new("B", "b@x.io")).await.unwrap();
        let before = store.list().await.unwrap();

        let result = store
            .update_batch(&[
                RecordUpdate {
                    id: RecordId::new(1),
                    name: "A".to_string(),
                    email: "a2@x.io".to_string(),
                },
                RecordUpdate {
                    id: RecordId::new(2),
                    name: "B".to_string(),
                    email: "a2@x.io".to_string(),
                },
            ])
            .await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_batch_is_all_or_nothing() {
        let store = store_with_table().await;
        store.insert(&NewRecord::new("A", "a@x.io")).await.unwrap();
        store.insert(&NewRecord::new("B", "b@x.io")).await.unwrap();
        store.insert(&NewRecord::new("C", "c@x.io")).await.unwrap();
        let before = store.list().await.unwrap();

        // Second row collides with C's email, failing the batch.
        let result = store
            .update_batch(&[
                RecordUpdate {
                    id: RecordId::new(1),
                    name: "Changed".to_string(),
                    email: "changed@x.io".to_string(),
                },
                RecordUpdate {
                    id: RecordId::new(2),
                    name: "B".to_string(),
                    email: "c@x.io".to_string(),
                },
            ])
            .await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_batch_allows_swapping_through_free_email() {
        let store = store_with_table().await;
        store.insert(&NewRecord::new("A", "a@x.io")).await.unwrap();
        store.insert(&NewRecord::new("B", "b@x.io")).await.unwrap();

        let matched = store
            .update_batch(&[
                RecordUpdate {
                    id: RecordId::new(1),
                    name: "A".to_string(),
                    email: "a2@x.io".to_string(),
                },
                RecordUpdate {
                    id: RecordId::new(2),
                    name: "B".to_string(),
                    email: "a@x.io".to_string(),
                },
            ])
            .await
            .unwrap();
        assert_eq!(matched, 2);

        let emails: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.email)
            .collect();
        assert_eq!(emails, vec!["a2@x.io", "a@x.io"]);
    }

    #[tokio::test]
    async fn test_check_reports_missing_table() {
        let store = MemoryStore::new();
        assert!(store.check().await.unwrap_err().is_missing_schema());
        store.create_table().await.unwrap();
        assert!(store.check().await.is_ok());
    }

    #[tokio::test]
    async fn test_drop_table() {
        let store = store_with_table().await;
        assert!(store.has_table());
        store.drop_table();
        assert!(!store.has_table());
        assert!(store.delete(RecordId::new(1)).await.unwrap_err().is_missing_schema());
    }
}
