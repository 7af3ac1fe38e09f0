//! Detection of the locally installed runtime.
//!
//! When no version is requested, headers are fetched for whatever runtime is
//! on the PATH. This module finds that runtime and reads its version.

use crate::detection::{check_version, find_executable, parse_version};
use crate::Flavor;
use semver::Version;
use std::path::{Path, PathBuf};

/// A runtime found on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// Path to the executable.
    pub path: PathBuf,

    /// Flavor of the executable that was found.
    pub flavor: Flavor,

    /// Version reported by `--version`.
    pub version: Version,
}

impl RuntimeInfo {
    /// The version as a tag, e.g. `v0.12.7`.
    ///
    /// ```rust
    /// use gyp_headers::{Flavor, RuntimeInfo};
    ///
    /// let info = RuntimeInfo {
    ///     path: "/usr/bin/node".into(),
    ///     flavor: Flavor::Node,
    ///     version: semver::Version::new(0, 12, 7),
    /// };
    /// assert_eq!(info.tag(), "v0.12.7");
    /// ```
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }
}

/// Typed error variants for detection failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DetectionError {
    /// No runtime executable was found.
    NotFound,

    /// Timed out while running `--version`.
    Timeout,

    /// Permission denied executing the runtime.
    PermissionDenied,

    /// Failed to parse the version output.
    VersionParseFailed,

    /// I/O error during detection (e.g., failed to execute command).
    IoError,
}

impl DetectionError {
    /// Human-readable description of the error.
    ///
    /// ```rust
    /// use gyp_headers::DetectionError;
    ///
    /// assert_eq!(DetectionError::Timeout.description(), "Detection timed out");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "No node or iojs executable found",
            Self::Timeout => "Detection timed out",
            Self::PermissionDenied => "Permission denied",
            Self::VersionParseFailed => "Failed to parse version",
            Self::IoError => "I/O error during detection",
        }
    }
}

/// Find the installed runtime.
///
/// Each flavor's executable is tried in order (`node`, then `iojs`); the
/// first one that answers `--version` with a parseable version wins. If an
/// executable exists but fails, that error is returned when no other flavor
/// succeeds.
pub async fn detect_runtime(home: Option<&Path>) -> Result<RuntimeInfo, DetectionError> {
    let mut last_error = DetectionError::NotFound;

    for flavor in Flavor::all() {
        let Some(path) = find_executable(flavor.executable_name(), home) else {
            continue;
        };
        match inspect_runtime(&path).await {
            Ok(info) => return Ok(info),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = e.description(), "runtime check failed");
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Read the version of a specific runtime executable.
///
/// The flavor is taken from the path: anything mentioning `iojs` is io.js.
pub async fn inspect_runtime(path: &Path) -> Result<RuntimeInfo, DetectionError> {
    let output = check_version(path).await?;
    let version = parse_version(&output)?;
    let flavor = if path.to_string_lossy().contains("iojs") {
        Flavor::Iojs
    } else {
        Flavor::Node
    };

    tracing::debug!(path = %path.display(), %version, %flavor, "detected runtime");
    Ok(RuntimeInfo {
        path: path.to_path_buf(),
        flavor,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_keeps_prerelease() {
        let info = RuntimeInfo {
            path: PathBuf::from("/opt/iojs/bin/iojs"),
            flavor: Flavor::Iojs,
            version: Version::parse("3.0.0-nightly20150601").unwrap(),
        };
        assert_eq!(info.tag(), "v3.0.0-nightly20150601");
    }

    #[test]
    fn test_descriptions_non_empty() {
        for e in [
            DetectionError::NotFound,
            DetectionError::Timeout,
            DetectionError::PermissionDenied,
            DetectionError::VersionParseFailed,
            DetectionError::IoError,
        ] {
            assert!(!e.description().is_empty());
        }
    }

    #[tokio::test]
    async fn test_inspect_missing_runtime() {
        let result = inspect_runtime(Path::new("/nonexistent/bin/node")).await;
        assert_eq!(result, Err(DetectionError::IoError));
    }

    #[tokio::test]
    async fn test_detect_runtime_is_well_formed() {
        // Passes whether or not a runtime is installed on the test machine.
        match detect_runtime(None).await {
            Ok(info) => {
                assert!(info.path.exists());
                assert!(info.tag().starts_with('v'));
            }
            Err(e) => assert!(!e.description().is_empty()),
        }
    }
}
