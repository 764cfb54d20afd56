//! Archive timestamps
//!
//! An archive is named after the local wall-clock time of the run that produced it,
//! at second resolution: `2025-02-13_18-30-00.tar.gz`. The format is zero-padded and
//! ordered from year down to second, so sorting file names sorts archives
//! chronologically.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const ARCHIVE_EXTENSION: &str = ".tar.gz";
pub const ARCHIVE_NAME_REGEX: &str = r"^\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.tar\.gz$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchiveTimestamp(NaiveDateTime);

impl ArchiveTimestamp {
    /// Truncates to whole seconds, the resolution the file name can carry.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        let datetime = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map_err(|e| anyhow::anyhow!("invalid archive timestamp {value:?}: {e}"))?;

        Ok(Self(datetime))
    }

    /// Parses an archive file name such as `2025-02-13_18-30-00.tar.gz`.
    pub fn try_parse_file_name(file_name: &str) -> anyhow::Result<Self> {
        let stem = file_name
            .strip_suffix(ARCHIVE_EXTENSION)
            .ok_or_else(|| anyhow::anyhow!("not a {ARCHIVE_EXTENSION} file: {file_name}"))?;

        Self::try_parse(stem)
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}{ARCHIVE_EXTENSION}", self)
    }
}

impl std::fmt::Display for ArchiveTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}
