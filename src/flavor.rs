//! Runtime flavor enum identifying the two historical distributions.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Which runtime distribution a version belongs to.
///
/// Node.js and io.js publish headers from different hosts with different
/// archive and import library names. The flavor decides the URL shape and
/// file names used during installation.
///
/// # Example
///
/// ```rust
/// use gyp_headers::Flavor;
///
/// for flavor in Flavor::all() {
///     println!("{}: {}", flavor.display_name(), flavor.executable_name());
/// }
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Flavor {
    /// The classic Node.js distribution (nodejs.org).
    Node,
    /// The io.js distribution (iojs.org).
    Iojs,
}

impl Flavor {
    /// The executable name of the runtime.
    ///
    /// Also used as the archive and import library stem.
    ///
    /// ```rust
    /// use gyp_headers::Flavor;
    ///
    /// assert_eq!(Flavor::Node.executable_name(), "node");
    /// assert_eq!(Flavor::Iojs.executable_name(), "iojs");
    /// ```
    pub fn executable_name(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Iojs => "iojs",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Node => "Node.js",
            Self::Iojs => "io.js",
        }
    }

    /// File name of the header tarball for a tagged version.
    ///
    /// ```rust
    /// use gyp_headers::Flavor;
    ///
    /// assert_eq!(Flavor::Node.archive_name("v0.12.7"), "node-v0.12.7.tar.gz");
    /// assert_eq!(Flavor::Iojs.archive_name("v3.0.0"), "iojs-v3.0.0.tar.gz");
    /// ```
    pub fn archive_name(&self, version: &str) -> String {
        format!("{}-{}.tar.gz", self.executable_name(), version)
    }

    /// File name of the Windows import library this distribution publishes.
    pub fn lib_name(&self) -> &'static str {
        match self {
            Self::Node => "node.lib",
            Self::Iojs => "iojs.lib",
        }
    }

    /// Iterator over both flavors.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
