//! Database module for Postgres operations.
//!
//! This module provides:
//! - Connection pool construction
//! - The `NameStore` trait and its error type
//! - `Repository`, the Postgres implementation
//! - `MemoryStore`, an in-process implementation for tests and local runs
//! - `Bootstrapper`, which creates and seeds the `names` table

pub mod bootstrap;
pub mod memory;
pub mod pool;
pub mod repo;
pub mod store;

pub use bootstrap::{Bootstrapper, SeedReport};
pub use memory::MemoryStore;
pub use pool::init_pool;
pub use repo::Repository;
pub use store::{NameStore, StoreError};
