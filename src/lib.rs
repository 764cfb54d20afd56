//! Archive Wikipedia articles as Markdown and report how they change.
//!
//! Two binaries are built: `wikisnap` (`snapshot`, `diffcheck`, `list`) and a standalone
//! `diffcheck` taking the same arguments as `wikisnap diffcheck`. Scripts that ran
//! `wikisnap --input F --output-dir D` now run `wikisnap snapshot --input F --output-dir D`.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
