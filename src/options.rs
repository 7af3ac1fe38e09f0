//! Installation options configuration.
//!
//! This module provides the [`InstallOptions`] struct describing what to
//! install. Every field left unset is inferred at install time.

use crate::Flavor;
use std::time::Duration;

/// Configuration options for a header installation.
///
/// # Default Behavior
///
/// With the defaults, headers are fetched for the runtime found on the
/// PATH, for the running platform, with the cache honored and a 5 minute
/// timeout on connecting and on each read.
///
/// # Example
///
/// ```rust
/// use gyp_headers::{Flavor, InstallOptions};
///
/// // Headers for the locally installed runtime
/// let opts = InstallOptions::default();
///
/// // A specific io.js release, even if already cached
/// let opts = InstallOptions {
///     version: Some("3.0.0".to_string()),
///     flavor: Some(Flavor::Iojs),
///     force: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Version to install, with or without the `v` prefix.
    ///
    /// Default: the version of the detected local runtime.
    pub version: Option<String>,

    /// Use the nightly channel.
    ///
    /// Default: inferred from `nightly` appearing in the version.
    pub nightly: Option<bool>,

    /// Distribution to fetch from.
    ///
    /// Default: inferred from the version, or from the local executable's
    /// path when no version is given.
    pub flavor: Option<Flavor>,

    /// Target platform (`linux`, `darwin`, `win32`, ...).
    ///
    /// Default: the platform of the supplied environment.
    pub platform: Option<String>,

    /// Re-download even if the cache marker is present.
    ///
    /// Default: `false`
    pub force: bool,

    /// Limit on connecting and on each read of a response body.
    ///
    /// A slow transfer is never cut off while bytes keep arriving.
    ///
    /// Default: 5 minutes
    pub timeout: Duration,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            version: None,
            nightly: None,
            flavor: None,
            platform: None,
            force: false,
            timeout: Duration::from_secs(300),
        }
    }
}

impl InstallOptions {
    /// The requested version, treating an empty string as absent.
    pub(crate) fn explicit_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }
}
