//! Download URL resolution.
//!
//! Pure functions turning a version, flavor and nightly flag (plus mirror
//! overrides from [`Environment`]) into the header archive URL and the two
//! Windows import library URLs. No validation is performed: malformed input
//! produces a malformed URL, and the download reports the failure.

use crate::{Environment, Flavor};
use std::path::Path;

/// Tag prefix carried by every normalized version.
pub const VERSION_PREFIX: char = 'v';

const NODE_DIST_URL: &str = "https://nodejs.org/dist/";
const IOJS_DIST_URL: &str = "https://iojs.org/dist/";
const IOJS_NIGHTLY_URL: &str = "https://iojs.org/download/nightly/";

/// Windows architecture an import library is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Arch {
    /// 32-bit x86.
    Ia32,
    /// 64-bit x86.
    X64,
}

impl Arch {
    /// Subdirectory of the target directory holding this architecture's libraries.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Ia32 => "ia32",
            Self::X64 => "x64",
        }
    }
}

/// Download location of one Windows import library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsLib {
    /// Architecture the library targets.
    pub arch: Arch,
    /// Where to download it from.
    pub url: String,
}

/// Every URL needed to install headers for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrls {
    /// Tagged version (`v` prefixed).
    pub version: String,
    /// Distribution the version was resolved against.
    pub flavor: Flavor,
    /// Whether the nightly channel was used.
    pub nightly: bool,
    /// Distribution base URL, always ending in `/`.
    pub base_url: String,
    /// Header tarball URL.
    pub archive_url: String,
    /// Import libraries, ia32 first then x64.
    pub windows_libs: [WindowsLib; 2],
}

impl ResolvedUrls {
    /// Build all URLs for a tagged version.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gyp_headers::{Environment, Flavor, ResolvedUrls};
    ///
    /// let urls = ResolvedUrls::resolve("v4.2.1", Flavor::Node, false, &Environment::default());
    /// assert_eq!(urls.archive_url, "https://nodejs.org/dist/v4.2.1/node-v4.2.1.tar.gz");
    /// assert_eq!(urls.windows_libs[1].url, "https://nodejs.org/dist/v4.2.1/x64/node.lib");
    /// ```
    pub fn resolve(version: &str, flavor: Flavor, nightly: bool, env: &Environment) -> Self {
        let base_url = base_url(flavor, nightly, env);
        let release = format!("{}{}/", base_url, version);
        let archive_url = format!("{}{}", release, flavor.archive_name(version));

        let windows_libs = match flavor {
            Flavor::Iojs => [
                WindowsLib {
                    arch: Arch::Ia32,
                    url: format!("{}win-x86/{}", release, flavor.lib_name()),
                },
                WindowsLib {
                    arch: Arch::X64,
                    url: format!("{}win-x64/{}", release, flavor.lib_name()),
                },
            ],
            // The 32-bit node.lib sits at the release root.
            Flavor::Node => [
                WindowsLib {
                    arch: Arch::Ia32,
                    url: format!("{}{}", release, flavor.lib_name()),
                },
                WindowsLib {
                    arch: Arch::X64,
                    url: format!("{}x64/{}", release, flavor.lib_name()),
                },
            ],
        };

        Self {
            version: version.to_string(),
            flavor,
            nightly,
            base_url,
            archive_url,
            windows_libs,
        }
    }
}

/// Prefix `version` with `v` unless it already starts with it.
///
/// ```rust
/// use gyp_headers::normalize_version;
///
/// assert_eq!(normalize_version("4.2.1"), "v4.2.1");
/// assert_eq!(normalize_version("v4.2.1"), "v4.2.1");
/// ```
pub fn normalize_version(version: &str) -> String {
    if version.starts_with(VERSION_PREFIX) {
        version.to_string()
    } else {
        format!("{}{}", VERSION_PREFIX, version)
    }
}

/// Whether a version names a nightly build.
pub fn infer_nightly(version: &str) -> bool {
    version.contains("nightly")
}

/// Guess the flavor when the caller did not say.
///
/// With an explicit tagged version, anything whose second character is not
/// `0` is taken to be io.js (io.js shipped 1.x–3.x while Node.js was still on
/// 0.x). Without one, the running executable's path decides. This is a rough
/// era heuristic, kept as-is because cached layouts depend on it.
pub fn infer_flavor(explicit_version: Option<&str>, exec_path: Option<&Path>) -> Flavor {
    let is_iojs = match explicit_version {
        Some(version) => version.chars().nth(1) != Some('0'),
        None => exec_path.is_some_and(|p| p.to_string_lossy().contains("iojs")),
    };
    if is_iojs {
        Flavor::Iojs
    } else {
        Flavor::Node
    }
}

/// Append a trailing `/` unless one is already present.
pub fn pad_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Distribution base URL, honoring mirror overrides.
pub fn base_url(flavor: Flavor, nightly: bool, env: &Environment) -> String {
    let url = match flavor {
        Flavor::Iojs => env.iojs_mirror.as_deref().unwrap_or(if nightly {
            IOJS_NIGHTLY_URL
        } else {
            IOJS_DIST_URL
        }),
        Flavor::Node => env.node_mirror.as_deref().unwrap_or(NODE_DIST_URL),
    };
    pad_url(url)
}
