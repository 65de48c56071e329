//! Per-run isolated working directory

use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PREFIX: &str = "chartgen-";

/// Directory name for charts under the working directory
pub const CHART_HOME_DIR: &str = "chart";

/// Directory name for helm's config root under the working directory
pub const HELM_HOME_DIR: &str = ".helm";

/// A uniquely named temporary directory owned by a single inflation run
///
/// The directory and everything below it is removed when the value is dropped,
/// including during unwinding. Use [`WorkingDirectory::close`] to observe
/// removal errors instead of ignoring them.
#[derive(Debug)]
pub struct WorkingDirectory {
    dir: TempDir,
}

impl WorkingDirectory {
    /// Allocate a fresh directory under the system temp dir
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(PREFIX).tempdir()?;
        Ok(Self { dir })
    }

    /// Allocate a fresh directory under `parent`
    pub fn new_in(parent: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default helm home for this run
    pub fn helm_home(&self) -> PathBuf {
        self.path().join(HELM_HOME_DIR)
    }

    /// Recursively delete the directory, reporting failures
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}
