//! Error types for installation operations.
//!
//! Each variant includes an actionable fix suggestion to help users resolve
//! the issue.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while installing headers.
///
/// The first failure of any stage is returned as-is; nothing is retried and
/// partially written files are left in place.
///
/// # Example
///
/// ```rust
/// use gyp_headers::InstallError;
///
/// fn handle_error(error: InstallError) {
///     eprintln!("Installation failed: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// Connecting, reading the response body, or a non-success status.
    #[error("Network error fetching {url}: {message}")]
    Network {
        /// URL being fetched.
        url: String,
        /// Description of the network error.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The archive could not be decompressed or parsed as tar.
    #[error("Failed to unpack {url}: {message}")]
    Decompress {
        /// URL of the archive.
        url: String,
        /// Description of the decoding error.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Creating or writing a file failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Neither `HOME` nor `USERPROFILE` is set and no home directory is known.
    #[error("Could not determine the home directory")]
    NoHomeDirectory {
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// No version was given and no local runtime could be detected.
    #[error("Could not detect a local runtime: {message}")]
    RuntimeNotFound {
        /// Why detection failed.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// A background extraction task panicked or was cancelled.
    #[error("Background task failed: {message}")]
    Task {
        /// Description of the failure.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },
}

impl InstallError {
    /// Get an actionable suggestion for fixing this error.
    ///
    /// ```rust
    /// use gyp_headers::InstallError;
    ///
    /// let error = InstallError::NoHomeDirectory {
    ///     fix: "Set the HOME environment variable".to_string(),
    /// };
    /// assert!(error.fix_suggestion().contains("HOME"));
    /// ```
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::Network { fix, .. } => fix,
            Self::Decompress { fix, .. } => fix,
            Self::Io { fix, .. } => fix,
            Self::NoHomeDirectory { fix } => fix,
            Self::RuntimeNotFound { fix, .. } => fix,
            Self::Task { fix, .. } => fix,
        }
    }

    pub(crate) fn network(url: &str, message: impl Into<String>) -> Self {
        let mirror_hint = format!(
            "Check connectivity to {} or point {} / {} at a reachable mirror",
            url,
            crate::environment::NODE_MIRROR_VAR,
            crate::environment::IOJS_MIRROR_VAR
        );
        Self::Network {
            url: url.to_string(),
            message: message.into(),
            fix: mirror_hint,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let fix = if source.kind() == std::io::ErrorKind::PermissionDenied {
            format!("Make sure {} is writable", path.display())
        } else {
            "Check free disk space and that the cache directory is writable".to_string()
        };
        Self::Io { path, source, fix }
    }
}
