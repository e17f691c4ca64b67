//! Schema bootstrap: create the `names` table and insert the baseline rows.

use super::store::{NameStore, StoreError};
use crate::domain::baseline_records;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::info;

/// Outcome of one `ensure_seeded` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Seed inserts issued.
    pub attempted: usize,
    /// Seed inserts that created a row (the rest hit an existing email).
    pub inserted: usize,
}

/// Ensures the `names` table exists and holds the baseline records.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    store: Arc<dyn NameStore>,
}

impl Bootstrapper {
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        Self { store }
    }

    /// Create the table if absent, then insert each baseline record,
    /// ignoring email conflicts.
    ///
    /// Safe to run redundantly and concurrently: both steps are idempotent.
    ///
    /// # Errors
    /// Propagates the first store failure.
    pub async fn ensure_seeded(&self) -> Result<SeedReport, StoreError> {
        self.store.create_table().await?;
        info!("Created \"names\" table");

        let seeds = baseline_records();
        let results = try_join_all(seeds.iter().map(|seed| self.store.insert(seed))).await?;

        let report = SeedReport {
            attempted: results.len(),
            inserted: results.iter().filter(|inserted| **inserted).count(),
        };
        info!(
            inserted = report.inserted,
            "Seeded {} users", report.attempted
        );

        Ok(report)
    }
}
