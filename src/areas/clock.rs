use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Overrides the current local time, formatted as `%Y-%m-%d %H:%M:%S`.
pub const NOW_ENV: &str = "WIKISNAP_NOW";
const NOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The local wall-clock time a run considers "now".
///
/// Captured once per run so that the archive name, the future-date cutoff and the
/// comparison dates all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: NaiveDateTime,
}

impl Clock {
    pub fn system() -> Self {
        Clock {
            now: Local::now().naive_local(),
        }
    }

    pub fn fixed(now: NaiveDateTime) -> Self {
        Clock { now }
    }

    /// Reads `WIKISNAP_NOW` when set, otherwise uses the system clock.
    pub fn load_from_env() -> anyhow::Result<Self> {
        match std::env::var(NOW_ENV) {
            Ok(value) => NaiveDateTime::parse_from_str(value.trim(), NOW_FORMAT)
                .map(Clock::fixed)
                .with_context(|| format!("{NOW_ENV} must look like 2025-01-15 10:00:00")),
            Err(_) => Ok(Clock::system()),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}
