use crate::artifacts::diff::change_filter::ChangeFilter;
use crate::artifacts::diff::normalizer::{ComparisonKey, normalize};
use crate::artifacts::snapshot::article_title::ArticleTitle;
use crate::artifacts::snapshot::record::SnapshotRecord;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    Unchanged,
    Changed,
    Added,
    Removed,
}

impl ChangeKind {
    pub fn from_keys(old: Option<&ComparisonKey>, new: Option<&ComparisonKey>) -> Option<Self> {
        match (old, new) {
            (None, Some(_)) => Some(ChangeKind::Added),
            (Some(_), None) => Some(ChangeKind::Removed),
            (Some(old), Some(new)) if old == new => Some(ChangeKind::Unchanged),
            (Some(_), Some(_)) => Some(ChangeKind::Changed),
            (None, None) => None,
        }
    }

    pub fn matches_filter(&self, filter: ChangeFilter) -> bool {
        match self {
            ChangeKind::Unchanged => false,
            ChangeKind::Changed => filter.contains(ChangeFilter::CHANGED),
            ChangeKind::Added => filter.contains(ChangeFilter::ADDED),
            ChangeKind::Removed => filter.contains(ChangeFilter::REMOVED),
        }
    }

    /// The classification seen from the other side of the comparison.
    pub fn inverted(self) -> Self {
        match self {
            ChangeKind::Added => ChangeKind::Removed,
            ChangeKind::Removed => ChangeKind::Added,
            other => other,
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            ChangeKind::Unchanged => ' ',
            ChangeKind::Changed => 'M',
            ChangeKind::Added => 'A',
            ChangeKind::Removed => 'D',
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Changed => "changed",
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
        };
        write!(f, "{label}")
    }
}

pub type ChangeSet = BTreeMap<ArticleTitle, ChangeKind>;
type KeyMap = BTreeMap<ArticleTitle, ComparisonKey>;

/// Classification of every title present in either of two record sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveDiff {
    change_set: ChangeSet,
}

impl ArchiveDiff {
    /// Aligns `older` and `newer` by title. A title listed twice on one side keeps its
    /// last record.
    pub fn compare<'a>(
        older: impl IntoIterator<Item = &'a SnapshotRecord>,
        newer: impl IntoIterator<Item = &'a SnapshotRecord>,
    ) -> Self {
        let old_keys = Self::key_map(older);
        let new_keys = Self::key_map(newer);

        let titles = old_keys.keys().chain(new_keys.keys()).collect::<BTreeSet<_>>();

        let change_set = titles
            .into_iter()
            .filter_map(|title| {
                ChangeKind::from_keys(old_keys.get(title), new_keys.get(title))
                    .map(|kind| (title.clone(), kind))
            })
            .collect();

        ArchiveDiff { change_set }
    }

    fn key_map<'a>(records: impl IntoIterator<Item = &'a SnapshotRecord>) -> KeyMap {
        records
            .into_iter()
            .map(|record| (record.title.clone(), normalize(record)))
            .collect()
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.change_set
    }

    pub fn get(&self, title: &str) -> Option<ChangeKind> {
        self.change_set.get(title).copied()
    }

    pub fn titles_with(&self, kind: ChangeKind) -> impl Iterator<Item = &ArticleTitle> {
        self.change_set
            .iter()
            .filter(move |(_, k)| **k == kind)
            .map(|(title, _)| title)
    }

    pub fn changed(&self) -> impl Iterator<Item = &ArticleTitle> {
        self.titles_with(ChangeKind::Changed)
    }

    pub fn added(&self) -> impl Iterator<Item = &ArticleTitle> {
        self.titles_with(ChangeKind::Added)
    }

    pub fn removed(&self) -> impl Iterator<Item = &ArticleTitle> {
        self.titles_with(ChangeKind::Removed)
    }

    pub fn has_changes(&self) -> bool {
        self.change_set
            .values()
            .any(|kind| *kind != ChangeKind::Unchanged)
    }

    /// Whether any change survives `filter`.
    pub fn has_changes_matching(&self, filter: ChangeFilter) -> bool {
        self.change_set
            .values()
            .any(|kind| kind.matches_filter(filter))
    }
}
