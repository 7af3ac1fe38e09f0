//! Header archive fetch-and-filter pipeline.
//!
//! The response body is streamed through gunzip and a tar reader on a
//! blocking thread. Only `.h` and `.gypi` entries are written, with the
//! archive's top-level folder stripped from every path. Regular files are
//! copied; symlinks and hard links are recreated as long as they stay
//! inside the target directory.

use crate::install::transport::{ByteStream, Transport};
use crate::InstallError;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tokio_util::io::{StreamReader, SyncIoBridge};

/// Extensions of the files kept from the archive. Matching is case sensitive.
const HEADER_EXTENSIONS: &[&str] = &[".gypi", ".h"];

/// Download the archive at `url` and extract its headers into `target`.
///
/// The first failure of any stage (request, decompression, tar parsing,
/// file writes) is returned. Files already written are left in place.
pub async fn fetch_headers(
    transport: &dyn Transport,
    url: &str,
    target: &Path,
) -> Result<usize, InstallError> {
    let body = transport.get(url).await?;
    unpack_stream(body, url, target).await
}

/// Extract headers from a gzip tar byte stream into `target`.
///
/// Returns the number of files written.
pub async fn unpack_stream(
    body: ByteStream,
    url: &str,
    target: &Path,
) -> Result<usize, InstallError> {
    let reader = SyncIoBridge::new(StreamReader::new(body));
    let url = url.to_string();
    let target = target.to_path_buf();

    tokio::task::spawn_blocking(move || unpack_headers(reader, &url, &target))
        .await
        .map_err(|e| InstallError::Task {
            message: e.to_string(),
            fix: "Retry the installation".to_string(),
        })?
}

/// Whether an archive entry name is a header worth keeping.
pub fn is_header(name: &str) -> bool {
    HEADER_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Drop the first path component.
///
/// Returns `None` when nothing is left, or when the remainder could escape
/// the extraction directory (`..`, absolute or prefixed components).
pub fn strip_first_component(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;

    let rest: PathBuf = components.as_path().to_path_buf();
    let safe = rest
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if rest.as_os_str().is_empty() || !safe {
        return None;
    }
    Some(rest)
}

fn unpack_headers<R: Read>(reader: R, url: &str, target: &Path) -> Result<usize, InstallError> {
    std::fs::create_dir_all(target).map_err(|e| InstallError::io(target, e))?;

    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let entries = archive.entries().map_err(|e| decode_error(url, &e))?;

    let mut written = 0;
    for entry in entries {
        let mut entry = entry.map_err(|e| decode_error(url, &e))?;
        let name = entry
            .path()
            .map_err(|e| decode_error(url, &e))?
            .into_owned();

        if !is_header(&name.to_string_lossy()) {
            continue;
        }
        let kind = entry.header().entry_type();
        if !(kind.is_file() || kind.is_symlink() || kind.is_hard_link()) {
            tracing::debug!(entry = %name.display(), "skipping non-file header entry");
            continue;
        }
        let Some(relative) = strip_first_component(&name) else {
            tracing::debug!(entry = %name.display(), "skipping entry outside the archive root");
            continue;
        };
        let dest = target.join(&relative);

        if kind.is_file() {
            // Headers are small; buffering keeps read and write failures apart.
            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(|e| decode_error(url, &e))?;
            create_parent(&dest)?;
            std::fs::write(&dest, &contents).map_err(|e| InstallError::io(&dest, e))?;
        } else {
            let Some(link) = entry
                .link_name()
                .map_err(|e| decode_error(url, &e))?
                .map(|l| l.into_owned())
            else {
                tracing::debug!(entry = %name.display(), "skipping link without a target");
                continue;
            };

            if kind.is_symlink() {
                if !symlink_stays_inside(&relative, &link) {
                    tracing::debug!(entry = %name.display(), link = %link.display(), "skipping symlink leaving the target");
                    continue;
                }
                create_parent(&dest)?;
                remove_existing(&dest);
                entry.unpack(&dest).map_err(|e| InstallError::io(&dest, e))?;
            } else {
                // Hard link names are archive paths, rooted like entry names.
                let Some(source) = strip_first_component(&link) else {
                    tracing::debug!(entry = %name.display(), link = %link.display(), "skipping hard link leaving the target");
                    continue;
                };
                create_parent(&dest)?;
                remove_existing(&dest);
                std::fs::hard_link(target.join(source), &dest)
                    .map_err(|e| InstallError::io(&dest, e))?;
            }
        }
        written += 1;
    }

    tracing::debug!(url, written, "extracted header files");
    Ok(written)
}

/// Whether a symlink at `relative` pointing to `link` resolves inside the
/// extraction directory. Absolute targets never do.
fn symlink_stays_inside(relative: &Path, link: &Path) -> bool {
    let base = relative.parent().unwrap_or(Path::new(""));
    let mut depth = 0usize;
    for component in base.components().chain(link.components()) {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

fn create_parent(dest: &Path) -> Result<(), InstallError> {
    match dest.parent() {
        Some(parent) => std::fs::create_dir_all(parent).map_err(|e| InstallError::io(parent, e)),
        None => Ok(()),
    }
}

// Links cannot be created over an existing file, e.g. on a forced re-fetch.
fn remove_existing(dest: &Path) {
    if std::fs::symlink_metadata(dest).is_ok() {
        if let Err(e) = std::fs::remove_file(dest) {
            tracing::debug!(path = %dest.display(), error = %e, "could not replace existing file");
        }
    }
}

fn decode_error(url: &str, error: &std::io::Error) -> InstallError {
    InstallError::Decompress {
        url: url.to_string(),
        message: error.to_string(),
        fix: "Make sure the URL serves a .tar.gz archive and retry; interrupted downloads are not resumed".to_string(),
    }
}
