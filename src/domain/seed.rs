//! Baseline rows inserted when the `names` table is bootstrapped.

use super::NewRecord;

/// Name and email of every baseline record, in insertion order.
pub const BASELINE: [(&str, &str); 3] = [
    ("Rohan", "rohan@tcl.com"),
    ("Rebecca", "rebecca@tcl.com"),
    ("Vivek", "vivek@gmail.com"),
];

/// The baseline records as insertable values.
pub fn baseline_records() -> Vec<NewRecord> {
    BASELINE
        .iter()
        .map(|(name, email)| NewRecord::new(*name, *email))
        .collect()
}
