//! Error taxonomy and process exit statuses
//!
//! Everything that aborts a run is expressed as a [`SnapError`]. Internal code keeps
//! propagating `anyhow::Error` with context; the binary walks the error chain looking
//! for a `SnapError` to decide which [`ExitStatus`] to report.
//!
//! Per-article failures (`FetchError`, `ConvertError`) are not part of this enum: they
//! are contained by the producing run and only surface in its summary.

use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    /// Malformed, missing or empty article list, or an invalid argument
    #[error("{0}")]
    Input(String),

    /// No archive exists for the requested calendar date
    #[error("no archive found from {date}{}", .hint.as_deref().map(|h| format!(" ({h})")).unwrap_or_default())]
    ArchiveNotFound {
        date: NaiveDate,
        hint: Option<String>,
    },

    /// The directory holds no archive at all
    #[error("no archives found in {}", .0.display())]
    NoArchives(PathBuf),

    /// An archive exists but cannot be decoded
    #[error("corrupt archive {}: {reason}", .path.display())]
    CorruptArchive { path: PathBuf, reason: String },

    /// The producing run could not leave a complete archive behind
    #[error("failed to create archive: {0}")]
    ArchiveWrite(String),
}

impl SnapError {
    pub fn input(message: impl Into<String>) -> Self {
        SnapError::Input(message.into())
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SnapError::CorruptArchive {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn archive_write(message: impl Into<String>) -> Self {
        SnapError::ArchiveWrite(message.into())
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self {
            SnapError::Input(_) => ExitStatus::BadInput,
            SnapError::ArchiveNotFound { .. } | SnapError::NoArchives(_) => {
                ExitStatus::MissingArchive
            }
            SnapError::CorruptArchive { .. } => ExitStatus::CorruptArchive,
            SnapError::ArchiveWrite(_) => ExitStatus::ArchiveWriteFailure,
        }
    }
}

/// Process exit statuses. Both "no changes" and "changes found" are `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    BadInput = 1,
    MissingArchive = 2,
    ArchiveWriteFailure = 3,
    CorruptArchive = 4,
}

impl ExitStatus {
    /// Picks the status for an error chain; untyped failures count as bad input.
    pub fn from_error(error: &anyhow::Error) -> Self {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<SnapError>())
            .map(SnapError::exit_status)
            .unwrap_or(ExitStatus::BadInput)
    }

    /// Help and version requests print to stdout and succeed; every other clap error is
    /// a usage error.
    pub fn from_usage_error(error: &clap::Error) -> Self {
        if error.use_stderr() {
            ExitStatus::BadInput
        } else {
            ExitStatus::Success
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn exit_status_is_found_behind_context() {
        let error: anyhow::Result<()> = Err(SnapError::corrupt("a.tar.gz", "bad header"))
            .context("while loading the older archive");

        let error = error.unwrap_err();

        assert_eq!(ExitStatus::from_error(&error), ExitStatus::CorruptArchive);
    }

    #[test]
    fn untyped_errors_map_to_bad_input() {
        let error = anyhow::anyhow!("something else");

        assert_eq!(ExitStatus::from_error(&error), ExitStatus::BadInput);
    }

    #[test]
    fn usage_errors_map_to_bad_input_and_help_to_success() {
        let usage = clap::Error::new(clap::error::ErrorKind::UnknownArgument);
        let help = clap::Error::new(clap::error::ErrorKind::DisplayHelp);

        assert_eq!(ExitStatus::from_usage_error(&usage), ExitStatus::BadInput);
        assert_eq!(ExitStatus::from_usage_error(&help), ExitStatus::Success);
    }

    #[test]
    fn missing_archive_message_names_the_date() {
        let error = SnapError::ArchiveNotFound {
            date: NaiveDate::from_ymd_opt(2025, 2, 11).unwrap(),
            hint: Some("7 days ago".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "no archive found from 2025-02-11 (7 days ago)"
        );
        assert_eq!(error.exit_status().code(), 2);
    }
}
