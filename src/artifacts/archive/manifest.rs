use crate::artifacts::archive::timestamp::{ArchiveTimestamp, TIMESTAMP_FORMAT};
use serde::{Deserialize, Serialize};

pub const MANIFEST_ENTRY_NAME: &str = "MANIFEST.json";

/// Table of contents stored next to the records of an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub created_at: String,
    pub generator: String,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub title: String,
    pub entry: String,
}

impl Manifest {
    pub fn new(created_at: ArchiveTimestamp, entries: Vec<ManifestEntry>) -> Self {
        Manifest {
            created_at: created_at.datetime().format(TIMESTAMP_FORMAT).to_string(),
            generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            entries,
        }
    }

    pub fn created_at(&self) -> anyhow::Result<ArchiveTimestamp> {
        ArchiveTimestamp::try_parse(&self.created_at)
    }
}
