//! Process environment captured as an explicit value.
//!
//! Resolution and cache probing read the home directory, the running
//! runtime's executable path, mirror overrides and the platform. Collecting
//! them into [`Environment`] lets callers and tests substitute any of them
//! without touching process-global state.

use std::path::{Path, PathBuf};

/// Environment variable overriding the io.js distribution base URL.
pub const IOJS_MIRROR_VAR: &str = "NVM_IOJS_ORG_MIRROR";

/// Environment variable overriding the Node.js distribution base URL.
pub const NODE_MIRROR_VAR: &str = "NVM_NODEJS_ORG_MIRROR";

/// Name of the cache folder created under the home directory.
pub const CACHE_DIR_NAME: &str = ".node-gyp";

/// Platform identifier for Windows, in the runtime's own naming.
pub const WINDOWS_PLATFORM: &str = "win32";

/// Snapshot of everything the installer reads from the outside world.
///
/// # Example
///
/// ```rust
/// use gyp_headers::Environment;
///
/// let env = Environment {
///     home_dir: Some("/home/dev".into()),
///     node_mirror: Some("https://mirror.example/node".to_string()),
///     ..Environment::default()
/// };
/// assert_eq!(
///     env.target_dir("v4.2.1").unwrap(),
///     std::path::Path::new("/home/dev/.node-gyp/4.2.1")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// Home directory under which the cache folder lives.
    pub home_dir: Option<PathBuf>,

    /// Path of the runtime executable, used for flavor inference when no
    /// version is supplied.
    pub exec_path: Option<PathBuf>,

    /// Override for the io.js base URL (stable and nightly).
    pub iojs_mirror: Option<String>,

    /// Override for the Node.js base URL.
    pub node_mirror: Option<String>,

    /// Platform identifier (`linux`, `darwin`, `win32`, ...).
    pub platform: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            home_dir: None,
            exec_path: None,
            iojs_mirror: None,
            node_mirror: None,
            platform: current_platform().to_string(),
        }
    }
}

impl Environment {
    /// Read the environment of the current process.
    ///
    /// `HOME` wins over `USERPROFILE`; if neither is set the platform's
    /// notion of a home directory is used. Empty variables count as unset.
    /// The executable path is left empty; the installer fills it in from
    /// runtime detection when it needs it.
    pub fn from_process() -> Self {
        let home_dir = non_empty_var("HOME")
            .or_else(|| non_empty_var("USERPROFILE"))
            .map(PathBuf::from)
            .or_else(dirs::home_dir);

        Self {
            home_dir,
            exec_path: None,
            iojs_mirror: non_empty_var(IOJS_MIRROR_VAR),
            node_mirror: non_empty_var(NODE_MIRROR_VAR),
            platform: current_platform().to_string(),
        }
    }

    /// Cache directory for a tagged version: `<home>/.node-gyp/<version without v>`.
    ///
    /// Returns `None` when no home directory is known.
    pub fn target_dir(&self, version: &str) -> Option<PathBuf> {
        let home = self.home_dir.as_deref()?;
        Some(cache_root(home).join(version.strip_prefix('v').unwrap_or(version)))
    }
}

/// The cache root under a home directory.
pub fn cache_root(home: &Path) -> PathBuf {
    home.join(CACHE_DIR_NAME)
}

/// Platform identifier of the running process in the runtime's naming.
///
/// See [`platform_name`] for the mapping.
pub fn current_platform() -> &'static str {
    platform_name(std::env::consts::OS)
}

/// Translate a Rust `target_os` name into the runtime's platform name.
///
/// Only `win32` changes installer behavior; the rest is cosmetic.
pub fn platform_name(os: &str) -> &str {
    match os {
        "windows" => WINDOWS_PLATFORM,
        "macos" => "darwin",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_dir_strips_prefix() {
        let env = Environment {
            home_dir: Some(PathBuf::from("/home/u")),
            ..Default::default()
        };
        assert_eq!(
            env.target_dir("v0.12.7").unwrap(),
            PathBuf::from("/home/u/.node-gyp/0.12.7")
        );
    }

    #[test]
    fn test_target_dir_without_prefix() {
        let env = Environment {
            home_dir: Some(PathBuf::from("/home/u")),
            ..Default::default()
        };
        assert_eq!(
            env.target_dir("5.0.0").unwrap(),
            PathBuf::from("/home/u/.node-gyp/5.0.0")
        );
    }

    #[test]
    fn test_target_dir_without_home() {
        let env = Environment::default();
        assert!(env.target_dir("v1.0.0").is_none());
    }

    #[test]
    fn test_current_platform_naming() {
        let platform = current_platform();
        assert_ne!(platform, "windows");
        assert_ne!(platform, "macos");
        if cfg!(target_os = "linux") {
            assert_eq!(platform, "linux");
        }
    }

    #[test]
    fn test_platform_name_mapping() {
        assert_eq!(platform_name("windows"), "win32");
        assert_eq!(platform_name("macos"), "darwin");
        assert_eq!(platform_name("solaris"), "sunos");
        assert_eq!(platform_name("illumos"), "sunos");
        assert_eq!(platform_name("freebsd"), "freebsd");
    }

    #[test]
    fn test_default_uses_current_platform() {
        assert_eq!(Environment::default().platform, current_platform());
    }
}
