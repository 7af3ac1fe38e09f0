//! Header installation.
//!
//! This module fetches the development headers for a runtime version into
//! `~/.node-gyp/<version>`, plus the import libraries on Windows, and marks
//! the directory complete. Use [`install`] for the process environment or
//! [`install_with`] to inject an [`Environment`](crate::Environment) and
//! [`Transport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use gyp_headers::{install, InstallOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let result = install(InstallOptions::default(), |p| eprintln!("{}", p.message())).await;
//!     if let Err(e) = result {
//!         eprintln!("{} ({})", e, e.fix_suggestion());
//!     }
//! }
//! ```

pub mod archive;
pub mod cache;
mod errors;
mod executor;
pub mod fanout;
mod progress;
pub mod transport;
pub mod windows;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::InstallError;
pub use executor::{install, install_with};
pub use progress::InstallProgress;
pub use transport::{ByteStream, HttpTransport, Transport};
