//! Request-level orchestration over the store.

pub mod profiles;

pub use profiles::ProfileService;
