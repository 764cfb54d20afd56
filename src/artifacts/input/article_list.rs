//! Article list parsing
//!
//! The input is a UTF-8 text file with one article per line:
//!
//! ```text
//! # title | url | requested date
//! Hash table | https://en.wikipedia.org/wiki/Hash_table | 2025-01-15
//! ```
//!
//! Blank lines and `#` comments are skipped. Anything else that does not parse is an
//! input error reported with its line number, before any page is fetched.

use crate::artifacts::snapshot::article_title::ArticleTitle;
use crate::errors::SnapError;
use chrono::NaiveDate;
use derive_new::new;
use std::collections::HashMap;
use std::path::Path;

const FIELD_DELIMITER: char = '|';
const COMMENT_PREFIX: char = '#';
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ArticleRequest {
    pub title: ArticleTitle,
    pub url: String,
    pub requested_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleList {
    entries: Vec<ArticleRequest>,
    duplicates: Vec<ArticleTitle>,
}

impl ArticleList {
    pub fn load(path: &Path) -> Result<Self, SnapError> {
        if !path.is_file() {
            return Err(SnapError::input(format!(
                "input file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SnapError::input(format!("unable to read input file {}: {e}", path.display()))
        })?;

        Self::parse(&content)
    }

    /// Parses the list; a title listed more than once keeps its last entry, at the
    /// position of that last occurrence.
    pub fn parse(content: &str) -> Result<Self, SnapError> {
        let parsed = content
            .lines()
            .enumerate()
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with(COMMENT_PREFIX)
            })
            .map(|(index, line)| Self::parse_line(index + 1, line))
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.is_empty() {
            return Err(SnapError::input("input file is empty"));
        }

        let last_index = parsed
            .iter()
            .enumerate()
            .map(|(index, request)| (request.title.clone(), index))
            .collect::<HashMap<_, _>>();

        let mut entries = Vec::with_capacity(last_index.len());
        let mut duplicates = Vec::new();
        for (index, request) in parsed.into_iter().enumerate() {
            if last_index[&request.title] == index {
                entries.push(request);
            } else {
                duplicates.push(request.title);
            }
        }

        Ok(ArticleList {
            entries,
            duplicates,
        })
    }

    fn parse_line(line_number: usize, line: &str) -> Result<ArticleRequest, SnapError> {
        let fields = line.split(FIELD_DELIMITER).map(str::trim).collect::<Vec<_>>();

        let [title, url, requested_date] = fields.as_slice() else {
            return Err(SnapError::input(format!(
                "line {line_number}: expected 3 fields separated by '{FIELD_DELIMITER}', found {}",
                fields.len()
            )));
        };

        let title = ArticleTitle::try_parse(title)
            .map_err(|e| SnapError::input(format!("line {line_number}: {e}")))?;

        if url.is_empty() {
            return Err(SnapError::input(format!(
                "line {line_number}: url cannot be empty"
            )));
        }

        let requested_date = NaiveDate::parse_from_str(requested_date, DATE_FORMAT)
            .map_err(|_| {
                SnapError::input(format!(
                    "line {line_number}: invalid date format: {requested_date}"
                ))
            })?;

        Ok(ArticleRequest::new(title, url.to_string(), requested_date))
    }

    pub fn entries(&self) -> &[ArticleRequest] {
        &self.entries
    }

    /// Titles whose earlier entries were superseded by a later line.
    pub fn duplicates(&self) -> &[ArticleTitle] {
        &self.duplicates
    }

    /// Splits entries into those due on `today` and those requested for a later date.
    pub fn partition_due(&self, today: NaiveDate) -> (Vec<&ArticleRequest>, Vec<&ArticleRequest>) {
        self.entries
            .iter()
            .partition(|request| request.requested_date <= today)
    }
}
