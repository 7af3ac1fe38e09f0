//! Version output parsing with regex extraction.

use crate::DetectionError;
use regex::Regex;
use semver::Version;

/// Parse a runtime version from `--version` output.
///
/// Handles the formats printed by both runtimes, with or without the tag
/// prefix, and keeps pre-release suffixes such as nightly stamps:
///
/// - `v0.12.7` -> 0.12.7
/// - `v3.0.0-nightly20150601abc` -> 3.0.0-nightly20150601abc
/// - `4.2.1\n` -> 4.2.1
pub(crate) fn parse_version(output: &str) -> Result<Version, DetectionError> {
    let re = Regex::new(r"v?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?)")
        .map_err(|_| DetectionError::VersionParseFailed)?;

    let caps = re
        .captures(output)
        .ok_or(DetectionError::VersionParseFailed)?;
    let version_str = caps
        .get(1)
        .ok_or(DetectionError::VersionParseFailed)?
        .as_str();
    Version::parse(version_str).map_err(|_| DetectionError::VersionParseFailed)
}
