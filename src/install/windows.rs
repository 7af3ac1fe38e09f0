//! Windows import library download.
//!
//! Native addons on Windows link against `node.lib` (or `iojs.lib`). Both
//! architectures are fetched concurrently and each library is stored under
//! both names, so build tooling expecting either finds it.

use crate::install::fanout::fan_out;
use crate::install::transport::Transport;
use crate::{Flavor, InstallError, InstallProgress, WindowsLib};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};

/// Fetch the Windows import libraries into `target` when `platform` is Windows.
///
/// Does nothing (and makes no request) on other platforms. On Windows both
/// downloads run concurrently; the step succeeds only if both do, and the
/// first error is returned.
pub async fn fetch_windows_libs(
    transport: &dyn Transport,
    libs: &[WindowsLib],
    target: &Path,
    platform: &str,
    on_progress: &(dyn Fn(InstallProgress) + Send + Sync),
) -> Result<(), InstallError> {
    if platform != crate::environment::WINDOWS_PLATFORM {
        return Ok(());
    }

    try_join_all(
        libs.iter()
            .map(|lib| fetch_lib(transport, lib, target, on_progress)),
    )
    .await?;
    Ok(())
}

/// Destination files for one architecture: `<target>/<arch>/node.lib` and `iojs.lib`.
pub fn lib_destinations(target: &Path, lib: &WindowsLib) -> Vec<PathBuf> {
    let dir = target.join(lib.arch.dir_name());
    Flavor::all().map(|f| dir.join(f.lib_name())).collect()
}

async fn fetch_lib(
    transport: &dyn Transport,
    lib: &WindowsLib,
    target: &Path,
    on_progress: &(dyn Fn(InstallProgress) + Send + Sync),
) -> Result<(), InstallError> {
    let dir = target.join(lib.arch.dir_name());
    on_progress(InstallProgress::FetchingWindowsLib {
        arch: lib.arch,
        url: lib.url.clone(),
    });

    // A failure here shows up as a write error below.
    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        tracing::debug!(dir = %dir.display(), error = %e, "could not create lib directory");
    }

    let body = transport.get(&lib.url).await?;
    fan_out(body, &lib.url, &lib_destinations(target, lib)).await?;
    Ok(())
}
