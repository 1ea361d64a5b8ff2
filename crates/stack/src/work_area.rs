//! Scoped per-day scratch directory.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory owned by one acquisition attempt.
///
/// Nothing is created until a source asks for [`path`](Self::path), so
/// sources that read local files directly cost no filesystem work. Once
/// created, the directory and everything in it are deleted when the value
/// is dropped, whether the fetch succeeded, failed to decode, or was
/// skipped.
#[derive(Debug)]
pub struct WorkArea {
    root: Option<PathBuf>,
    dir: OnceCell<TempDir>,
}

impl WorkArea {
    /// A work area under `root`, or under the system temp directory when
    /// `root` is `None`.
    pub fn new(root: Option<&Path>) -> Self {
        Self {
            root: root.map(Path::to_path_buf),
            dir: OnceCell::new(),
        }
    }

    /// Path of the scratch directory, creating it on first call.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory cannot be created.
    pub fn path(&self) -> std::io::Result<&Path> {
        if let Some(dir) = self.dir.get() {
            return Ok(dir.path());
        }
        let mut builder = tempfile::Builder::new();
        builder.prefix("wd50-day-");
        let dir = match &self.root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(self.dir.get_or_init(|| dir).path())
    }

    /// Whether the scratch directory has been created.
    pub fn is_created(&self) -> bool {
        self.dir.get().is_some()
    }
}
