use crate::artifacts::snapshot::article_title::ArticleTitle;
use sha1::{Digest, Sha1};

pub const RECORD_EXTENSION: &str = ".md";
const HASH_PREFIX_LENGTH: usize = 8;

/// File name of a record inside an archive, e.g. `hash_table_1f3a9c2e.md`.
///
/// The readable stem is lossy, so a short digest of the full title keeps names unique
/// for distinct titles.
pub fn record_entry_name(title: &ArticleTitle) -> String {
    let digest = format!("{:x}", Sha1::digest(title.as_str().as_bytes()));

    format!(
        "{}_{}{RECORD_EXTENSION}",
        sanitize_title(title.as_str()),
        &digest[..HASH_PREFIX_LENGTH]
    )
}

/// Lowercases and keeps alphanumeric runs joined by `_`.
pub fn sanitize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let parts = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

    if parts.is_empty() {
        "untitled".to_string()
    } else {
        parts.join("_")
    }
}
