//! Cache probing and the completion marker.
//!
//! A version's target directory counts as installed only once the marker
//! file exists inside it. Its content is a fixed layout stamp and is never
//! read back.

use crate::InstallError;
use std::path::{Path, PathBuf};

/// Name of the completion marker file.
pub const MARKER_FILE: &str = "installVersion";

/// Content written to the completion marker.
pub const MARKER_CONTENT: &str = "9";

/// Outcome of probing a target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// The completion marker is present.
    Installed,
    /// No marker, no directory, or the marker could not be inspected.
    Missing,
}

/// Path of the completion marker inside `target`.
pub fn marker_path(target: &Path) -> PathBuf {
    target.join(MARKER_FILE)
}

/// Check whether `target` holds a completed installation.
///
/// Filesystem errors are never surfaced; anything other than a confirmed
/// marker is [`CacheState::Missing`].
pub async fn probe(target: &Path) -> CacheState {
    match tokio::fs::try_exists(marker_path(target)).await {
        Ok(true) => CacheState::Installed,
        Ok(false) => CacheState::Missing,
        Err(e) => {
            tracing::debug!(dir = %target.display(), error = %e, "marker check failed");
            CacheState::Missing
        }
    }
}

/// Write the completion marker into `target`.
pub async fn write_marker(target: &Path) -> Result<(), InstallError> {
    let path = marker_path(target);
    tokio::fs::write(&path, MARKER_CONTENT)
        .await
        .map_err(|e| InstallError::io(path, e))
}
