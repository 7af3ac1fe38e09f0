//! PATH-based executable lookup with fallback locations.

use std::path::{Path, PathBuf};

/// System fallback paths to check if executable not found in PATH.
const FALLBACK_PATHS: &[&str] = &["/usr/local/bin", "/usr/bin"];

/// Find an executable by name.
///
/// Tries the system PATH via the `which` crate first, then common system
/// directories, then user-local bin directories under `home`.
pub(crate) fn find_executable(name: &str, home: Option<&Path>) -> Option<PathBuf> {
    if let Ok(path) = which::which(name) {
        return Some(path);
    }

    for dir in FALLBACK_PATHS {
        let path = PathBuf::from(dir).join(name);
        if path.exists() {
            return Some(path);
        }
    }

    let home = home?;
    [home.join(".local/bin").join(name), home.join("bin").join(name)]
        .into_iter()
        .find(|p| p.exists())
}
