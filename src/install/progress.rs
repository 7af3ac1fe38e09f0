//! Progress reporting types for installation operations.
//!
//! The [`InstallProgress`] enum represents the log lines an installation
//! emits. Callers receive them through the callback passed to
//! [`install`](crate::install); that callback is the only intermediate
//! feedback an installation gives.

use crate::Arch;

/// Progress events during header installation.
///
/// # Example
///
/// ```rust
/// use gyp_headers::InstallProgress;
///
/// fn on_progress(progress: InstallProgress) {
///     eprintln!("{}", progress.message());
/// }
///
/// on_progress(InstallProgress::Ready { version: "v0.12.7".to_string() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProgress {
    /// The cache marker was found and `force` was not set.
    AlreadyFetched,

    /// The header archive download has started.
    FetchingHeaders {
        /// Archive URL.
        url: String,
    },

    /// A Windows import library download has started.
    FetchingWindowsLib {
        /// Architecture of the library.
        arch: Arch,
        /// Library URL.
        url: String,
    },

    /// Headers are in place; native builds for `version` can proceed.
    Ready {
        /// Tagged version that was installed.
        version: String,
    },
}

impl InstallProgress {
    /// Render this event as a log line.
    ///
    /// ```rust
    /// use gyp_headers::InstallProgress;
    ///
    /// let progress = InstallProgress::AlreadyFetched;
    /// assert_eq!(progress.message(), "Header files already fetched");
    /// ```
    pub fn message(&self) -> String {
        match self {
            Self::AlreadyFetched => "Header files already fetched".to_string(),
            Self::FetchingHeaders { url } => format!("Fetching header files from {}", url),
            Self::FetchingWindowsLib { arch, url } => {
                format!("Fetching windows {} lib from {}", arch, url)
            }
            Self::Ready { version } => format!("node-gyp should now work for {}", version),
        }
    }

    /// Check if this event marks a finished installation.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}
