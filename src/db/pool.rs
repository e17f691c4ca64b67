//! Postgres connection pool construction.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Maximum connections held by the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect a Postgres pool for the given connection string.
///
/// The pool is the only process-wide database handle. Callers own it and
/// are expected to `close()` it on shutdown.
///
/// # Errors
/// Returns an error if the initial connection cannot be established.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    info!(
        max_connections = DEFAULT_MAX_CONNECTIONS,
        "Postgres pool connected"
    );
    Ok(pool)
}
