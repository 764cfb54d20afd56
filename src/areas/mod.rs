//! Runtime components
//!
//! - `archive_store`: the output directory holding archives
//! - `clock`: the run's notion of "now", overridable for reproducible runs
//! - `logging`: the stderr subscriber shared by both binaries
//! - `session`: one command invocation, tying the store, the clock and the report
//!   writer together

pub mod archive_store;
pub mod clock;
pub mod logging;
pub mod session;
