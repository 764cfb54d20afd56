//! Command implementations
//!
//! Each command is an `impl Session` block:
//!
//! - `snapshot`: fetch the listed articles and write one archive
//! - `diffcheck`: compare today's archive with the one from N days ago
//! - `list`: show the archives in the output directory

pub mod diffcheck;
pub mod list;
pub mod snapshot;
