//! Output sink: persist rendered suites
//!
//! Files are always overwritten: regenerating a suite replaces the previous
//! file at the same path. Directories are created as needed. A failed write
//! leaves the in-memory [`RenderedSuite`] untouched so the caller can retry
//! elsewhere.

use crate::error::{Error, Result};
use crate::render::RenderedSuite;
use std::fs;
use std::path::{Path, PathBuf};

/// Path a suite is written to under `dir`
pub fn target_path(suite: &RenderedSuite, dir: &Path) -> PathBuf {
    dir.join(&suite.file_name)
}

/// Write a suite into `dir` under its derived file name
///
/// Creates `dir` and its parents when absent; overwrites any existing file.
pub fn persist(suite: &RenderedSuite, dir: &Path) -> Result<PathBuf> {
    let path = target_path(suite, dir);
    persist_as(suite, &path)?;
    Ok(path)
}

/// Write a suite to an explicit file path, overwriting it
pub fn persist_as(suite: &RenderedSuite, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &suite.source).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        framework = %suite.framework,
        bytes = suite.source.len(),
        "wrote suite"
    );
    Ok(())
}
