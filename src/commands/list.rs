use crate::areas::session::Session;
use crate::artifacts::archive::locator::ArchiveRef;
use crate::errors::SnapError;

const LISTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Session {
    /// Prints every archive of the output directory, oldest first.
    pub fn list(&self) -> anyhow::Result<Vec<ArchiveRef>> {
        if !self.path().is_dir() {
            return Err(SnapError::input(format!(
                "output directory not found: {}",
                self.path().display()
            ))
            .into());
        }

        let archives = self.store().list()?;
        for archive in &archives {
            writeln!(
                self.writer(),
                "{}  {}",
                archive.created_at.datetime().format(LISTED_FORMAT),
                archive.created_at.file_name()
            )?;
        }

        Ok(archives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{SharedBuffer, fixed_clock};
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileTouch, PathChild};
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_archives_oldest_first() {
        let dir = TempDir::new().unwrap();
        for name in [
            "2025-01-22_10-00-00.tar.gz",
            "2025-01-15_10-00-00.tar.gz",
            "README.md",
        ] {
            dir.child(name).touch().unwrap();
        }
        let output = SharedBuffer::default();
        let session = Session::new(
            dir.path(),
            Box::new(output.clone()),
            fixed_clock("2025-01-22 18:00:00"),
        );

        let archives = session.list().unwrap();

        assert_eq!(archives.len(), 2);
        assert_eq!(
            output.contents(),
            "2025-01-15 10:00:00  2025-01-15_10-00-00.tar.gz\n\
             2025-01-22 10:00:00  2025-01-22_10-00-00.tar.gz\n"
        );
    }
}
