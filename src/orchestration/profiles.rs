//! Profile page operations: the read path with schema recovery, and the
//! write actions.

use crate::db::{Bootstrapper, NameStore, StoreError};
use crate::domain::{NewRecord, Record, RecordId, RecordUpdate};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for the profiles page.
///
/// Constructed once at startup and shared by every request handler.
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<dyn NameStore>,
    bootstrapper: Bootstrapper,
}

impl ProfileService {
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        let bootstrapper = Bootstrapper::new(store.clone());
        Self {
            store,
            bootstrapper,
        }
    }

    pub fn bootstrapper(&self) -> &Bootstrapper {
        &self.bootstrapper
    }

    /// List every record.
    ///
    /// If the table is missing, bootstrap it and retry exactly once. Any
    /// other failure, or a failure on the retry, is returned as is.
    pub async fn list(&self) -> Result<Vec<Record>, StoreError> {
        match self.store.list().await {
            Ok(records) => Ok(records),
            Err(err) if err.is_missing_schema() => {
                info!("Table does not exist, creating and seeding it now");
                self.bootstrapper.ensure_seeded().await?;
                self.store.list().await
            }
            Err(err) => Err(err),
        }
    }

    /// Whether the table is readable. Never bootstraps.
    pub async fn check(&self) -> Result<(), StoreError> {
        self.store.check().await
    }

    /// Insert a record. An existing email is silently kept as is.
    pub async fn create(&self, record: NewRecord) -> Result<(), StoreError> {
        let inserted = self.store.insert(&record).await?;
        if !inserted {
            debug!(email = %record.email, "Create ignored: email already present");
        }
        Ok(())
    }

    /// Apply an update batch in input order.
    pub async fn update(&self, updates: Vec<RecordUpdate>) -> Result<(), StoreError> {
        let matched = self.store.update_batch(&updates).await?;
        debug!(requested = updates.len(), matched, "Update batch applied");
        Ok(())
    }

    /// Delete a record by id. Unknown ids are not an error.
    pub async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let removed = self.store.delete(id).await?;
        debug!(%id, removed, "Delete applied");
        Ok(())
    }
}
