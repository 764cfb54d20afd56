//! Snapshot data structures and algorithms
//!
//! - `archive`: timestamped tar+gzip archives, their codec and locator
//! - `convert`: Wikipedia HTML to Markdown conversion
//! - `diff`: comparison keys and archive-to-archive change detection
//! - `fetch`: retrieval of pages over HTTP or from disk
//! - `input`: the article list a producing run starts from
//! - `snapshot`: article titles and snapshot records

pub mod archive;
pub mod convert;
pub mod diff;
pub mod fetch;
pub mod input;
pub mod snapshot;
