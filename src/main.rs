//! `node-gyp-install`: fetch headers for a runtime version from the command line.

use clap::Parser;
use gyp_headers::{install, Flavor, InstallOptions};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Download and cache the headers native addons build against.
#[derive(Debug, Parser)]
#[command(name = "node-gyp-install", about)]
struct Cli {
    /// Version to install (defaults to the local runtime's version).
    #[arg(short, long)]
    version: Option<String>,

    /// Fetch from the io.js distribution.
    #[arg(long, conflicts_with = "node")]
    iojs: bool,

    /// Fetch from the Node.js distribution.
    #[arg(long)]
    node: bool,

    /// Use the nightly channel (inferred from the version by default).
    #[arg(long)]
    nightly: bool,

    /// Target platform, e.g. `win32` to also fetch import libraries.
    #[arg(short, long)]
    platform: Option<String>,

    /// Download even if headers are already cached.
    #[arg(short, long)]
    force: bool,

    /// Connect and read timeout in seconds.
    #[arg(long, default_value_t = 300)]
    timeout: u64,

    /// Do not print progress.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_options(self) -> InstallOptions {
        let flavor = match (self.iojs, self.node) {
            (true, _) => Some(Flavor::Iojs),
            (_, true) => Some(Flavor::Node),
            _ => None,
        };
        InstallOptions {
            version: self.version,
            nightly: self.nightly.then_some(true),
            flavor,
            platform: self.platform,
            force: self.force,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    let result = install(cli.into_options(), move |progress| {
        if !quiet {
            eprintln!("{}", progress.message());
        }
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("  fix: {}", e.fix_suggestion());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_infer_everything() {
        let opts = Cli::parse_from(["node-gyp-install"]).into_options();
        assert!(opts.version.is_none());
        assert!(opts.flavor.is_none());
        assert!(opts.nightly.is_none());
        assert!(!opts.force);
        assert_eq!(opts.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_flags_map_to_options() {
        let opts = Cli::parse_from([
            "node-gyp-install",
            "--version",
            "3.0.0",
            "--iojs",
            "--nightly",
            "--platform",
            "win32",
            "--force",
        ])
        .into_options();
        assert_eq!(opts.version.as_deref(), Some("3.0.0"));
        assert_eq!(opts.flavor, Some(Flavor::Iojs));
        assert_eq!(opts.nightly, Some(true));
        assert_eq!(opts.platform.as_deref(), Some("win32"));
        assert!(opts.force);
    }

    #[test]
    fn test_iojs_and_node_conflict() {
        let result = Cli::try_parse_from(["node-gyp-install", "--iojs", "--node"]);
        assert!(result.is_err());
    }
}
