use crate::artifacts::archive::codec::{Archive, ArchiveCodec};
use crate::artifacts::archive::locator::{ArchiveLocator, ArchiveRef, DirectoryLocator};
use crate::artifacts::archive::timestamp::ArchiveTimestamp;
use crate::artifacts::snapshot::record::RecordSet;
use crate::errors::SnapError;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// The output directory: where producing runs write archives and comparison runs
/// look them up.
pub struct ArchiveStore {
    path: Box<Path>,
    codec: ArchiveCodec,
    locator: Box<dyn ArchiveLocator>,
}

impl ArchiveStore {
    pub fn new(path: Box<Path>) -> Self {
        let locator = Box::new(DirectoryLocator::new(path.clone()));
        Self::with_locator(path, locator)
    }

    pub fn with_locator(path: Box<Path>, locator: Box<dyn ArchiveLocator>) -> Self {
        ArchiveStore {
            path,
            codec: ArchiveCodec,
            locator,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a new archive, creating the directory first if needed.
    pub fn store(
        &self,
        records: &RecordSet,
        created_at: ArchiveTimestamp,
    ) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.path).map_err(|e| {
            SnapError::archive_write(format!(
                "Unable to create output directory {}: {e}",
                self.path.display()
            ))
        })?;

        self.codec.write(records, created_at, &self.path)
    }

    pub fn load(&self, archive_path: &Path) -> anyhow::Result<Archive> {
        self.codec.read(archive_path)
    }

    pub fn list(&self) -> anyhow::Result<Vec<ArchiveRef>> {
        self.locator.list()
    }

    /// Finds the archive of `date`, failing with a message that says which archive
    /// was being looked for.
    pub fn locate(&self, date: NaiveDate, hint: &str) -> anyhow::Result<PathBuf> {
        if self.list()?.is_empty() {
            return Err(SnapError::NoArchives(self.path.to_path_buf()).into());
        }

        self.locator.find(date).map_err(|e| match e.downcast::<SnapError>() {
            Ok(SnapError::ArchiveNotFound { date, .. }) => SnapError::ArchiveNotFound {
                date,
                hint: Some(hint.to_string()),
            }
            .into(),
            Ok(other) => other.into(),
            Err(e) => e,
        })
    }
}
