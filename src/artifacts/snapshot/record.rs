//! Snapshot records and their on-disk text form
//!
//! A record is stored as a Markdown document with a front-matter header:
//!
//! ```text
//! ---
//! title: Hash table
//! url: https://en.wikipedia.org/wiki/Hash_table
//! requested_date: 2025-01-15
//! fetched_at: 2025-01-15T10:00:03.120+01:00
//! ---
//!
//! # Hash table
//! ...
//! ```
//!
//! The single blank line after the closing delimiter belongs to the format, not to the
//! body, which keeps serialization lossless.

use crate::artifacts::snapshot::article_title::ArticleTitle;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use derive_new::new;
use std::collections::BTreeMap;

const FRONT_MATTER_DELIMITER: &str = "---";
const DATE_FORMAT: &str = "%Y-%m-%d";

const TITLE_KEY: &str = "title";
const URL_KEY: &str = "url";
const REQUESTED_DATE_KEY: &str = "requested_date";
const FETCHED_AT_KEY: &str = "fetched_at";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SnapshotRecord {
    pub title: ArticleTitle,
    pub url: String,
    pub requested_date: NaiveDate,
    pub body: String,
    pub fetched_at: DateTime<FixedOffset>,
}

/// Records of one archive keyed by title.
pub type RecordSet = BTreeMap<ArticleTitle, SnapshotRecord>;

impl SnapshotRecord {
    /// Collects records into a [`RecordSet`]; a later record replaces an earlier one
    /// with the same title.
    pub fn collect_last_wins(records: impl IntoIterator<Item = SnapshotRecord>) -> RecordSet {
        records
            .into_iter()
            .map(|record| (record.title.clone(), record))
            .collect()
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        if self.url.contains(['\n', '\r']) {
            anyhow::bail!("url of {} spans multiple lines", self.title);
        }

        let mut content = String::with_capacity(self.body.len() + 256);
        content.push_str(FRONT_MATTER_DELIMITER);
        content.push('\n');
        content.push_str(&format!("{TITLE_KEY}: {}\n", self.title));
        content.push_str(&format!("{URL_KEY}: {}\n", self.url));
        content.push_str(&format!(
            "{REQUESTED_DATE_KEY}: {}\n",
            self.requested_date.format(DATE_FORMAT)
        ));
        content.push_str(&format!(
            "{FETCHED_AT_KEY}: {}\n",
            self.fetched_at.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        ));
        content.push_str(FRONT_MATTER_DELIMITER);
        content.push_str("\n\n");
        content.push_str(&self.body);

        Ok(content.into())
    }

    pub fn deserialize(content: &str) -> anyhow::Result<Self> {
        let (fields, body) = split_front_matter(content)?;

        let field = |key: &str| {
            fields
                .get(key)
                .copied()
                .with_context(|| format!("front matter is missing `{key}`"))
        };

        let title = ArticleTitle::try_parse(field(TITLE_KEY)?)?;
        let url = field(URL_KEY)?.to_string();
        let requested_date = NaiveDate::parse_from_str(field(REQUESTED_DATE_KEY)?, DATE_FORMAT)
            .with_context(|| format!("invalid {REQUESTED_DATE_KEY} for {title}"))?;
        let fetched_at = DateTime::parse_from_rfc3339(field(FETCHED_AT_KEY)?)
            .with_context(|| format!("invalid {FETCHED_AT_KEY} for {title}"))?;

        Ok(SnapshotRecord {
            title,
            url,
            requested_date,
            body: body.to_string(),
            fetched_at,
        })
    }
}

/// Splits a document into its front-matter fields and the body that follows.
fn split_front_matter(content: &str) -> anyhow::Result<(BTreeMap<&str, &str>, &str)> {
    let rest = content
        .strip_prefix(FRONT_MATTER_DELIMITER)
        .and_then(|rest| rest.strip_prefix('\n'))
        .context("document does not start with front matter")?;

    let mut fields = BTreeMap::new();
    let mut offset = 0;

    loop {
        let line_end = rest[offset..]
            .find('\n')
            .map(|i| offset + i)
            .context("front matter is not terminated")?;
        let line = &rest[offset..line_end];
        offset = line_end + 1;

        if line.trim_end() == FRONT_MATTER_DELIMITER {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim(), value.trim());
        }
    }

    let body = &rest[offset..];
    let body = body.strip_prefix('\n').unwrap_or(body);

    Ok((fields, body))
}
