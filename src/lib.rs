pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use db::{init_pool, Bootstrapper, MemoryStore, NameStore, Repository, StoreError};
pub use domain::{NewRecord, Record, RecordId, RecordUpdate};
pub use error::AppError;
pub use orchestration::ProfileService;
