//! Archive codec
//!
//! Archives are gzip-compressed tarballs named after their creation timestamp. Each
//! record becomes one `.md` entry (see [`SnapshotRecord::serialize`]) and a
//! `MANIFEST.json` entry lists what the archive holds.
//!
//! Writing is atomic: the whole tarball is encoded in memory, written to a temporary
//! file in the destination directory and renamed into place only once it is complete.
//!
//! Reading is strict. The manifest is the last entry, so an archive cut short is
//! missing it; its `(title, entry)` list must match the decoded records exactly and
//! an archive without records is rejected.

use crate::artifacts::archive::entry_name::{RECORD_EXTENSION, record_entry_name};
use crate::artifacts::archive::manifest::{MANIFEST_ENTRY_NAME, Manifest, ManifestEntry};
use crate::artifacts::archive::timestamp::ArchiveTimestamp;
use crate::artifacts::snapshot::record::{RecordSet, SnapshotRecord};
use crate::errors::SnapError;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use fake::rand;
use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const ENTRY_MODE: u32 = 0o644;

/// The decoded content of one archive file.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Archive {
    pub created_at: ArchiveTimestamp,
    pub records: RecordSet,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveCodec;

impl ArchiveCodec {
    /// Writes `records` as `<created_at>.tar.gz` under `destination_dir`.
    ///
    /// Fails with [`SnapError::ArchiveWrite`] when there is nothing to write, when a
    /// record cannot be encoded or when the file cannot be placed; no partial file is
    /// left behind in any of those cases.
    pub fn write(
        &self,
        records: &RecordSet,
        created_at: ArchiveTimestamp,
        destination_dir: &Path,
    ) -> anyhow::Result<PathBuf> {
        if records.is_empty() {
            return Err(SnapError::archive_write("no pages to archive").into());
        }

        let content = Self::encode(records, created_at)
            .map_err(|e| SnapError::archive_write(format!("{e:#}")))?;

        let archive_path = destination_dir.join(created_at.file_name());
        Self::place_atomically(&archive_path, &content)
            .map_err(|e| SnapError::archive_write(format!("{e:#}")))?;

        Ok(archive_path)
    }

    /// Reads an archive back into its timestamp and records.
    ///
    /// Every failure is reported as [`SnapError::CorruptArchive`].
    pub fn read(&self, archive_path: &Path) -> anyhow::Result<Archive> {
        Self::decode(archive_path)
            .map_err(|e| SnapError::corrupt(archive_path, format!("{e:#}")).into())
    }

    fn encode(records: &RecordSet, created_at: ArchiveTimestamp) -> anyhow::Result<Bytes> {
        let mtime = u64::try_from(created_at.datetime().and_utc().timestamp()).unwrap_or(0);
        let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut manifest_entries = Vec::with_capacity(records.len());

        for record in records.values() {
            let entry_name = record_entry_name(&record.title);
            let data = record
                .serialize()
                .with_context(|| format!("Unable to serialize {}", record.title))?;

            Self::append_entry(&mut builder, &entry_name, &data, mtime)?;
            manifest_entries.push(ManifestEntry {
                title: record.title.to_string(),
                entry: entry_name,
            });
        }

        let manifest = serde_json::to_vec_pretty(&Manifest::new(created_at, manifest_entries))
            .context("Unable to serialize archive manifest")?;
        Self::append_entry(&mut builder, MANIFEST_ENTRY_NAME, &manifest, mtime)?;

        let encoder = builder
            .into_inner()
            .context("Unable to finish archive entries")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("Unable to finish compressing archive")
    }

    fn append_entry<W: Write>(
        builder: &mut tar::Builder<W>,
        name: &str,
        data: &[u8],
        mtime: u64,
    ) -> anyhow::Result<()> {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(ENTRY_MODE);
        header.set_mtime(mtime);
        header.set_cksum();

        builder
            .append_data(&mut header, name, data)
            .with_context(|| format!("Unable to add {name} to archive"))
    }

    fn place_atomically(archive_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let archive_dir = archive_path
            .parent()
            .context(format!("Invalid archive path {}", archive_path.display()))?;
        let temp_path = archive_dir.join(Self::generate_temp_name());

        let result = Self::write_file(&temp_path, content).and_then(|_| {
            std::fs::rename(&temp_path, archive_path).context(format!(
                "Unable to rename archive to {}",
                archive_path.display()
            ))
        });

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }

        result
    }

    fn write_file(path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .context(format!("Unable to open archive file {}", path.display()))?;

        file.write_all(content)
            .context(format!("Unable to write archive file {}", path.display()))?;
        file.sync_all()
            .context(format!("Unable to flush archive file {}", path.display()))
    }

    fn generate_temp_name() -> String {
        format!(".tmp-archive-{}", rand::random::<u32>())
    }

    fn decode(archive_path: &Path) -> anyhow::Result<Archive> {
        let file_name = archive_path
            .file_name()
            .and_then(|name| name.to_str())
            .context("archive path has no file name")?;
        let created_at = ArchiveTimestamp::try_parse_file_name(file_name)?;

        let file = std::fs::File::open(archive_path).context("unable to open archive")?;
        let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));

        let mut records = Vec::new();
        let mut listed = BTreeSet::new();
        let mut manifest = None;

        for entry in archive.entries().context("unable to read archive entries")? {
            let mut entry = entry.context("unable to read archive entry")?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let entry_name = entry
                .path()
                .context("invalid entry path")?
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .with_context(|| format!("entry {entry_name} is not valid UTF-8 text"))?;

            if entry_name == MANIFEST_ENTRY_NAME {
                let parsed: Manifest =
                    serde_json::from_str(&content).context("invalid manifest")?;
                manifest = Some(parsed);
            } else if entry_name.ends_with(RECORD_EXTENSION) {
                let record = SnapshotRecord::deserialize(&content)
                    .with_context(|| format!("invalid entry {entry_name}"))?;
                listed.insert((record.title.to_string(), entry_name));
                records.push(record);
            }
        }

        // the manifest is written last, so a cut-off archive loses it first
        let manifest = manifest
            .with_context(|| format!("{MANIFEST_ENTRY_NAME} is missing (truncated archive?)"))?;
        if records.is_empty() {
            anyhow::bail!("archive holds no records");
        }
        Self::verify_manifest(&manifest, created_at, &listed)?;

        Ok(Archive::new(
            created_at,
            SnapshotRecord::collect_last_wins(records),
        ))
    }

    /// The manifest must carry the file name timestamp and list exactly the decoded
    /// `(title, entry name)` pairs.
    fn verify_manifest(
        manifest: &Manifest,
        created_at: ArchiveTimestamp,
        decoded: &BTreeSet<(String, String)>,
    ) -> anyhow::Result<()> {
        let manifest_created_at = manifest.created_at()?;
        if manifest_created_at != created_at {
            anyhow::bail!(
                "manifest timestamp {} does not match file name timestamp {}",
                manifest_created_at,
                created_at
            );
        }

        let expected = manifest
            .entries
            .iter()
            .map(|entry| (entry.title.clone(), entry.entry.clone()))
            .collect::<BTreeSet<_>>();

        if let Some((_, missing)) = expected.difference(decoded).next() {
            anyhow::bail!("manifest lists missing entry {missing}");
        }

        if let Some((_, unlisted)) = decoded.difference(&expected).next() {
            anyhow::bail!("entry {unlisted} is not listed in the manifest");
        }

        Ok(())
    }
}
