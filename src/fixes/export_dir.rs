//! Scratch directory that clang-tidy exports per-file fixes into.

use crate::error::{Result, TidyError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Owns the run's fix-export directory. Dropping it removes the directory;
/// [`close`](Self::close) does the same but reports failures.
#[derive(Debug)]
pub struct FixExportDir {
    dir: TempDir,
}

impl FixExportDir {
    /// Creates a fresh directory under the system temp location.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("tidyfan-fixes-")
            .tempdir()
            .map_err(|e| TidyError::io(e, std::env::temp_dir()))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Reserves a uniquely named, empty `.yaml` file inside the directory.
    /// The file stays on disk so clang-tidy can overwrite it.
    ///
    /// # Errors
    /// Returns error if the file cannot be created.
    pub fn new_fix_file(&self) -> Result<PathBuf> {
        reserve_fix_file(self.path())
    }

    /// Removes the directory and everything in it.
    ///
    /// # Errors
    /// Returns error if removal fails.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| TidyError::io(e, path))
    }
}

/// Creates a unique empty `.yaml` file in `dir` and returns its path.
///
/// # Errors
/// Returns error if the file cannot be created.
pub fn reserve_fix_file(dir: &Path) -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile_in(dir)
        .map_err(|e| TidyError::io(e, dir))?;
    let (_handle, path) = file.keep().map_err(|e| TidyError::io(e.error, dir))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_files_are_unique_and_kept() {
        let dir = FixExportDir::create().unwrap();
        let a = dir.new_fix_file().unwrap();
        let b = dir.new_fix_file().unwrap();
        assert_ne!(a, b);
        assert!(a.is_file());
        assert!(b.is_file());
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("yaml"));
        assert!(a.starts_with(dir.path()));
    }

    #[test]
    fn close_removes_directory() {
        let dir = FixExportDir::create().unwrap();
        let path = dir.path().to_path_buf();
        dir.new_fix_file().unwrap();
        dir.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_directory() {
        let path = {
            let dir = FixExportDir::create().unwrap();
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
