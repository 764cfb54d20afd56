use crate::areas::archive_store::ArchiveStore;
use crate::areas::clock::Clock;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// One command invocation against an output directory.
///
/// Reports go to `writer` (stdout for the binary, a buffer in tests); diagnostics go
/// through `tracing`.
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    store: ArchiveStore,
    clock: Clock,
}

impl Session {
    pub fn new(output_dir: &Path, writer: Box<dyn std::io::Write>, clock: Clock) -> Self {
        Session {
            writer: RefCell::new(writer),
            store: ArchiveStore::new(output_dir.into()),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ArchiveStore {
        &self.store
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}
