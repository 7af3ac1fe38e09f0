//! Runtime detection submodule.
//!
//! Internal helpers used to find the locally installed runtime when the
//! caller does not name a version:
//!
//! - `find_executable`: PATH-based executable lookup with fallbacks
//! - `check_version`: async `--version` run with a timeout
//! - `parse_version`: regex-based version extraction from CLI output

mod parser;
mod path_finder;
mod version;

pub(crate) use parser::parse_version;
pub(crate) use path_finder::find_executable;
pub(crate) use version::check_version;
