//! Comparison keys
//!
//! Two snapshots of an article are considered equal when their comparison keys are
//! equal. The key covers the title, URL, requested date and body of a record; the fetch
//! time is left out because it changes on every run. Bodies are canonicalized first so
//! that re-fetch formatting noise (line endings, trailing spaces, extra blank lines)
//! does not register as a change.

use crate::artifacts::snapshot::record::SnapshotRecord;
use sha1::{Digest, Sha1};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparisonKey(String);

impl ComparisonKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn normalize(record: &SnapshotRecord) -> ComparisonKey {
    let body = normalize_body(&record.body);
    let requested_date = record.requested_date.format("%Y-%m-%d").to_string();

    let mut hasher = Sha1::new();
    for field in [
        record.title.as_str(),
        record.url.as_str(),
        requested_date.as_str(),
        body.as_str(),
    ] {
        // length prefix keeps field boundaries unambiguous
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }

    ComparisonKey(format!("{:x}", hasher.finalize()))
}

/// Canonical form of a Markdown body.
///
/// Line endings become `\n`, trailing horizontal whitespace is stripped, runs of blank
/// lines collapse into one and leading/trailing blank lines are dropped.
pub fn normalize_body(body: &str) -> String {
    let body = body.replace("\r\n", "\n").replace('\r', "\n");

    let mut normalized = String::with_capacity(body.len());
    let mut pending_blank = false;

    for line in body.lines().map(|line| line.trim_end_matches([' ', '\t'])) {
        if line.is_empty() {
            pending_blank = !normalized.is_empty();
            continue;
        }

        if !normalized.is_empty() {
            normalized.push('\n');
            if pending_blank {
                normalized.push('\n');
            }
        }
        normalized.push_str(line);
        pending_blank = false;
    }

    normalized
}
