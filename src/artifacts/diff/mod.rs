//! Change detection between two archives
//!
//! - `normalizer`: comparison keys that ignore fetch time and whitespace noise
//! - `archive_diff`: classification of every title as unchanged, changed, added or removed
//! - `change_filter`: selection of the change kinds a report shows
//!
//! Records are aligned by title through maps, so the result never depends on the order
//! in which either side lists its records.

pub mod archive_diff;
pub mod change_filter;
pub mod normalizer;
