//! Timestamped archives of snapshot records
//!
//! - `codec`: tar+gzip encoding and decoding of a whole archive
//! - `entry_name`: file names of records inside an archive
//! - `locator`: resolving a calendar date to an archive file
//! - `manifest`: the table of contents stored in every archive
//! - `timestamp`: the sortable timestamp that names an archive

pub mod codec;
pub mod entry_name;
pub mod locator;
pub mod manifest;
pub mod timestamp;
