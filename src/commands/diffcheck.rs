use crate::areas::session::Session;
use crate::artifacts::archive::codec::Archive;
use crate::artifacts::diff::archive_diff::{ArchiveDiff, ChangeKind};
use crate::artifacts::diff::change_filter::ChangeFilter;
use crate::errors::SnapError;
use chrono::Days;
use colored::{ColoredString, Colorize};
use tracing::{debug, info};

const REPORTED_KINDS: [ChangeKind; 3] =
    [ChangeKind::Changed, ChangeKind::Added, ChangeKind::Removed];

impl Session {
    /// Compares today's archive with the one from `days` days ago and prints the report.
    pub fn diffcheck(&self, days: u32, filter: ChangeFilter) -> anyhow::Result<ArchiveDiff> {
        if !self.path().is_dir() {
            return Err(SnapError::input(format!(
                "output directory not found: {}",
                self.path().display()
            ))
            .into());
        }

        let today = self.clock().today();
        let past = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| SnapError::input(format!("--days {days} reaches before year 1")))?;

        let older_path = self.store().locate(past, &format!("{days} days ago"))?;
        let newer_path = self
            .store()
            .locate(today, "today; run `wikisnap snapshot` first")?;

        info!(
            "Comparing: {} vs {}",
            newer_path.display(),
            older_path.display()
        );

        let older = self.store().load(&older_path)?;
        let newer = self.store().load(&newer_path)?;

        let diff = ArchiveDiff::compare(older.records.values(), newer.records.values());
        for (title, kind) in diff.changes() {
            debug!("{} {title} ({kind})", kind.status_char());
        }

        self.write_report(&diff, &older, &newer, days, filter)?;

        Ok(diff)
    }

    fn write_report(
        &self,
        diff: &ArchiveDiff,
        older: &Archive,
        newer: &Archive,
        days: u32,
        filter: ChangeFilter,
    ) -> anyhow::Result<()> {
        if !diff.has_changes_matching(filter) {
            writeln!(
                self.writer(),
                "No changes detected in any page over the last {days} days."
            )?;
            return Ok(());
        }

        let mut first_section = true;
        for kind in REPORTED_KINDS {
            if !kind.matches_filter(filter) {
                continue;
            }

            let titles = diff.titles_with(kind).collect::<Vec<_>>();
            if titles.is_empty() {
                continue;
            }

            if !first_section {
                writeln!(self.writer())?;
            }
            first_section = false;

            writeln!(
                self.writer(),
                "The following pages {} in the last {days} days:",
                Self::verb(kind)
            )?;
            writeln!(self.writer())?;

            for title in titles {
                let url = newer
                    .records
                    .get(title)
                    .or_else(|| older.records.get(title))
                    .map(|record| record.url.as_str())
                    .unwrap_or_default();

                if url.is_empty() {
                    writeln!(self.writer(), "  {} {title}", Self::marker(kind))?;
                } else {
                    writeln!(self.writer(), "  {} {title} ({url})", Self::marker(kind))?;
                }
            }
        }

        Ok(())
    }

    fn verb(kind: ChangeKind) -> &'static str {
        match kind {
            ChangeKind::Added => "were added",
            ChangeKind::Removed => "were removed",
            ChangeKind::Changed | ChangeKind::Unchanged => "changed",
        }
    }

    fn marker(kind: ChangeKind) -> ColoredString {
        match kind {
            ChangeKind::Added => "-".green(),
            ChangeKind::Removed => "-".red(),
            ChangeKind::Changed | ChangeKind::Unchanged => "-".yellow(),
        }
    }
}
