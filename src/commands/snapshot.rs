use crate::areas::session::Session;
use crate::artifacts::archive::timestamp::ArchiveTimestamp;
use crate::artifacts::convert::PageConverter;
use crate::artifacts::fetch::PageFetcher;
use crate::artifacts::input::article_list::{ArticleList, ArticleRequest};
use crate::artifacts::snapshot::article_title::ArticleTitle;
use crate::artifacts::snapshot::record::SnapshotRecord;
use crate::errors::SnapError;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a producing run did with every entry of the article list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub archive: Option<PathBuf>,
    pub archived: Vec<ArticleTitle>,
    pub skipped_future: Vec<ArticleTitle>,
    pub failed: Vec<(ArticleTitle, String)>,
    pub duplicates: Vec<ArticleTitle>,
}

impl Session {
    pub async fn snapshot(
        &self,
        input: &Path,
        fetcher: &dyn PageFetcher,
        converter: &dyn PageConverter,
    ) -> anyhow::Result<SnapshotSummary> {
        let list = ArticleList::load(input)?;
        let mut summary = SnapshotSummary {
            duplicates: list.duplicates().to_vec(),
            ..Default::default()
        };

        for title in list.duplicates() {
            warn!("Duplicate entry for {title}: keeping the last one");
        }

        let now = self.clock().now();
        let (due, future) = list.partition_due(now.date());

        for request in future {
            warn!(
                "Skipping (future date): {} ({})",
                request.title, request.requested_date
            );
            summary.skipped_future.push(request.title.clone());
        }

        let mut records = Vec::with_capacity(due.len());
        for request in due {
            match Self::capture(request, fetcher, converter).await {
                Ok(record) => {
                    info!("Converted: {}", request.title);
                    summary.archived.push(request.title.clone());
                    records.push(record);
                }
                Err(reason) => {
                    warn!("Skipping {}: {reason}", request.title);
                    summary.failed.push((request.title.clone(), reason));
                }
            }
        }

        if records.is_empty() {
            return Err(SnapError::archive_write(format!(
                "no pages were archived ({} failed, {} skipped for a future date)",
                summary.failed.len(),
                summary.skipped_future.len()
            ))
            .into());
        }

        let records = SnapshotRecord::collect_last_wins(records);
        let archive_path = self.store().store(&records, ArchiveTimestamp::new(now))?;

        writeln!(
            self.writer(),
            "Archive created: {} ({} pages)",
            archive_path.display(),
            records.len()
        )?;

        if !summary.failed.is_empty() || !summary.skipped_future.is_empty() {
            warn!(
                "{} archived, {} failed, {} skipped for a future date",
                summary.archived.len(),
                summary.failed.len(),
                summary.skipped_future.len()
            );
        }

        summary.archive = Some(archive_path);
        Ok(summary)
    }

    async fn capture(
        request: &ArticleRequest,
        fetcher: &dyn PageFetcher,
        converter: &dyn PageConverter,
    ) -> Result<SnapshotRecord, String> {
        info!("Fetching: {}", request.url);
        let html = fetcher.fetch(&request.url).await.map_err(|e| e.to_string())?;
        debug!("Fetched {} bytes for {}", html.len(), request.title);

        let body = converter
            .convert(&html, &request.title)
            .map_err(|e| e.to_string())?;

        Ok(SnapshotRecord::new(
            request.title.clone(),
            request.url.clone(),
            request.requested_date,
            body,
            Local::now().fixed_offset(),
        ))
    }
}
