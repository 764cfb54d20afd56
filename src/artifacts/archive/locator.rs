use crate::artifacts::archive::timestamp::{ARCHIVE_NAME_REGEX, ArchiveTimestamp};
use crate::errors::SnapError;
use anyhow::Context;
use chrono::NaiveDate;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An archive file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct ArchiveRef {
    pub created_at: ArchiveTimestamp,
    pub path: PathBuf,
}

/// Resolves calendar dates to archive files.
pub trait ArchiveLocator {
    /// All archives, oldest first.
    fn list(&self) -> anyhow::Result<Vec<ArchiveRef>>;

    /// The latest archive created on `target`.
    fn find(&self, target: NaiveDate) -> anyhow::Result<PathBuf> {
        self.list()?
            .into_iter()
            .filter(|archive| archive.created_at.date() == target)
            .max()
            .map(|archive| archive.path)
            .ok_or_else(|| {
                SnapError::ArchiveNotFound {
                    date: target,
                    hint: None,
                }
                .into()
            })
    }
}

/// Locates archives by scanning the file names of a single directory.
#[derive(Debug, Clone)]
pub struct DirectoryLocator {
    path: Box<Path>,
}

impl DirectoryLocator {
    pub fn new(path: Box<Path>) -> Self {
        DirectoryLocator { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArchiveLocator for DirectoryLocator {
    fn list(&self) -> anyhow::Result<Vec<ArchiveRef>> {
        let name_regex = regex::Regex::new(ARCHIVE_NAME_REGEX)
            .with_context(|| format!("invalid archive name regex: {ARCHIVE_NAME_REGEX}"))?;

        let mut archives = Vec::new();
        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| {
                format!("Unable to list archive directory {}", self.path.display())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };

            if !name_regex.is_match(file_name) {
                continue;
            }

            // names like 2025-02-30_... match the pattern but are not real dates
            if let Ok(created_at) = ArchiveTimestamp::try_parse_file_name(file_name) {
                archives.push(ArchiveRef::new(created_at, entry.into_path()));
            }
        }

        archives.sort();
        Ok(archives)
    }
}
