//! Domain types for the profiles table.
//!
//! - `Record`, `NewRecord`, `RecordUpdate` and the `RecordId` key
//! - The baseline seed set used by the bootstrapper

pub mod record;
pub mod seed;

pub use record::{NewRecord, Record, RecordId, RecordUpdate};
pub use seed::{baseline_records, BASELINE};
