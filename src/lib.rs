//! # gyp-headers
//!
//! Fetch and cache the development headers that native Node.js / io.js
//! addons compile against.
//!
//! Headers for a version are downloaded once into
//! `~/.node-gyp/<version>/` and reused afterwards. On Windows the
//! `node.lib` / `iojs.lib` import libraries for ia32 and x64 are fetched too.
//!
//! ## Features
//!
//! - `install()` ensures headers are present for one version
//! - `ResolvedUrls` derives distribution URLs, honoring
//!   `NVM_NODEJS_ORG_MIRROR` and `NVM_IOJS_ORG_MIRROR`
//! - `detect_runtime()` finds the local runtime used when no version is given
//! - `Transport` lets the download layer be replaced, e.g. in tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use gyp_headers::{install, InstallOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let options = InstallOptions {
//!         version: Some("0.12.7".to_string()),
//!         ..Default::default()
//!     };
//!     match install(options, |progress| println!("{}", progress.message())).await {
//!         Ok(()) => println!("headers ready"),
//!         Err(e) => eprintln!("{}: {}", e, e.fix_suggestion()),
//!     }
//! }
//! ```

mod detection;
pub mod environment;
mod flavor;
pub mod install;
mod options;
pub mod resolve;
mod runtime;

pub use environment::Environment;
pub use flavor::Flavor;
pub use install::{install, install_with, InstallError, InstallProgress, Transport};
pub use options::InstallOptions;
pub use resolve::{normalize_version, Arch, ResolvedUrls, WindowsLib};
pub use runtime::{detect_runtime, inspect_runtime, DetectionError, RuntimeInfo};
