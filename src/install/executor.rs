//! Installation execution.
//!
//! This module provides the [`install`] entry point. An installation runs
//! these steps strictly in order, stopping at the first error:
//!
//! 1. Resolve version, flavor, nightly flag and URLs
//! 2. Probe the cache marker (done unless `force`)
//! 3. Stream the header archive into the target directory
//! 4. Fetch the Windows import libraries (Windows only)
//! 5. Write the completion marker

use crate::install::cache::{probe, write_marker, CacheState};
use crate::install::transport::{HttpTransport, Transport};
use crate::install::{archive, windows};
use crate::resolve::{infer_flavor, infer_nightly, normalize_version};
use crate::runtime::{detect_runtime, inspect_runtime};
use crate::{Environment, InstallError, InstallOptions, InstallProgress, ResolvedUrls};

/// Install headers for the requested version.
///
/// Reads the process environment and downloads over HTTPS. Progress is
/// reported through `on_progress`; pass `|_| {}` to stay silent.
///
/// # Returns
///
/// - `Ok(())` once headers are present (fetched now or already cached)
/// - `Err(InstallError)` with an actionable fix suggestion if any step failed
///
/// # Example
///
/// ```rust,no_run
/// use gyp_headers::{install, InstallOptions};
///
/// #[tokio::main]
/// async fn main() {
///     let options = InstallOptions {
///         version: Some("0.12.7".to_string()),
///         ..Default::default()
///     };
///     match install(options, |p| eprintln!("{}", p.message())).await {
///         Ok(()) => println!("Headers ready"),
///         Err(e) => println!("Failed: {}. Fix: {}", e, e.fix_suggestion()),
///     }
/// }
/// ```
pub async fn install<F>(options: InstallOptions, on_progress: F) -> Result<(), InstallError>
where
    F: Fn(InstallProgress) + Send + Sync,
{
    let transport = HttpTransport::new(options.timeout)?;
    install_with(options, &Environment::from_process(), &transport, on_progress).await
}

/// Install headers using an explicit environment and transport.
///
/// This is what [`install`] calls after capturing the process environment.
pub async fn install_with<F>(
    options: InstallOptions,
    env: &Environment,
    transport: &dyn Transport,
    on_progress: F,
) -> Result<(), InstallError>
where
    F: Fn(InstallProgress) + Send + Sync,
{
    let urls = resolve_request(&options, env).await?;
    let version = urls.version.clone();
    let target = env.target_dir(&version).ok_or_else(|| InstallError::NoHomeDirectory {
        fix: "Set the HOME (or USERPROFILE) environment variable".to_string(),
    })?;
    let platform = options.platform.as_deref().unwrap_or(&env.platform);

    tracing::info!(
        %version,
        flavor = %urls.flavor,
        nightly = urls.nightly,
        dir = %target.display(),
        "installing headers"
    );

    if probe(&target).await == CacheState::Installed && !options.force {
        on_progress(InstallProgress::AlreadyFetched);
        on_progress(InstallProgress::Ready { version });
        return Ok(());
    }

    on_progress(InstallProgress::FetchingHeaders {
        url: urls.archive_url.clone(),
    });
    archive::fetch_headers(transport, &urls.archive_url, &target).await?;

    windows::fetch_windows_libs(transport, &urls.windows_libs, &target, platform, &on_progress)
        .await?;

    write_marker(&target).await?;
    on_progress(InstallProgress::Ready { version });
    Ok(())
}

/// Work out version, flavor and nightly flag, then build the URLs.
///
/// The local runtime is only consulted when no version is given.
async fn resolve_request(
    options: &InstallOptions,
    env: &Environment,
) -> Result<ResolvedUrls, InstallError> {
    let explicit = options.explicit_version();

    let (version, exec_path) = match explicit {
        Some(v) => (normalize_version(v), env.exec_path.clone()),
        None => {
            let detected = match &env.exec_path {
                Some(path) => inspect_runtime(path).await,
                None => detect_runtime(env.home_dir.as_deref()).await,
            }
            .map_err(|e| InstallError::RuntimeNotFound {
                message: e.description().to_string(),
                fix: "Install Node.js or pass an explicit version".to_string(),
            })?;
            let exec_path = env.exec_path.clone().unwrap_or_else(|| detected.path.clone());
            (detected.tag(), Some(exec_path))
        }
    };

    let nightly = options.nightly.unwrap_or_else(|| infer_nightly(&version));
    let flavor = options.flavor.unwrap_or_else(|| {
        infer_flavor(explicit.map(|_| version.as_str()), exec_path.as_deref())
    });

    Ok(ResolvedUrls::resolve(&version, flavor, nightly, env))
}
