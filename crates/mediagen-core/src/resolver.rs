//! Artifact resolver
//!
//! The interactive agent has no programmatic channel to report where the
//! browser saved its download, so the resolver scans a well-known
//! downloads directory for the most recently modified file with the
//! expected extension and copies it to the job's canonical path. The scan
//! is inherently racy against concurrent writes by the browser; accepted,
//! since only one interactive job runs at a time.

use crate::error::GenerationError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Locates artifacts that backends left in an external directory.
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    downloads_dir: PathBuf,
}

impl ArtifactResolver {
    /// Create a resolver scanning the given downloads directory.
    #[inline]
    #[must_use]
    pub fn new(downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloads_dir: downloads_dir.into(),
        }
    }

    /// Directory this resolver scans.
    #[inline]
    #[must_use]
    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Find the most recently modified file with the given extension.
    ///
    /// Returns `Ok(None)` when the directory is missing, empty, or holds
    /// no matching file; ties on modification time break arbitrarily.
    pub fn locate(&self, expected_extension: &str) -> Result<Option<PathBuf>, GenerationError> {
        let entries = match fs::read_dir(&self.downloads_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %self.downloads_dir.display(), "downloads directory does not exist");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let mut newest: Option<(PathBuf, SystemTime)> = None;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(expected_extension));
            if !matches {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            if newest.as_ref().map_or(true, |(_, t)| modified >= *t) {
                newest = Some((path, modified));
            }
        }

        Ok(newest.map(|(path, _)| path))
    }

    /// Locate the newest matching download and copy (not move) it to
    /// `target_path`. Returns the copied size, or `Ok(None)` when nothing
    /// matched; the caller is expected to record a failed outcome with
    /// manual-fallback guidance in that case.
    pub fn resolve_into(
        &self,
        expected_extension: &str,
        target_path: &Path,
    ) -> Result<Option<u64>, GenerationError> {
        let Some(found) = self.locate(expected_extension)? else {
            return Ok(None);
        };

        let size = fs::copy(&found, target_path)?;
        tracing::info!(
            from = %found.display(),
            to = %target_path.display(),
            bytes = size,
            "resolved downloaded artifact"
        );
        Ok(Some(size))
    }
}
