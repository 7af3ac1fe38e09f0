//! Writing one byte stream to several files at once.

use crate::install::transport::ByteStream;
use crate::InstallError;
use futures::future::try_join_all;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Copy `body` into every file in `destinations`.
///
/// Each chunk is written to all destinations before the next chunk is
/// pulled, so every file sees the same bytes. Any read or write error fails
/// the whole copy; files may then be partially written. Returns the number
/// of bytes copied.
pub async fn fan_out(
    mut body: ByteStream,
    url: &str,
    destinations: &[PathBuf],
) -> Result<u64, InstallError> {
    if destinations.is_empty() {
        return Err(InstallError::io(
            PathBuf::new(),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no fan-out destinations"),
        ));
    }

    let mut files = try_join_all(destinations.iter().map(|path| async move {
        File::create(path)
            .await
            .map_err(|e| InstallError::io(path, e))
    }))
    .await?;

    let mut copied = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| InstallError::network(url, e.to_string()))?;
        try_join_all(
            files
                .iter_mut()
                .zip(destinations)
                .map(|(file, path)| write_chunk(file, path, &chunk)),
        )
        .await?;
        copied += chunk.len() as u64;
    }

    try_join_all(files.iter_mut().zip(destinations).map(|(file, path)| async move {
        file.flush().await.map_err(|e| InstallError::io(path, e))
    }))
    .await?;

    tracing::debug!(url, copied, count = destinations.len(), "fan-out complete");
    Ok(copied)
}

async fn write_chunk(file: &mut File, path: &Path, chunk: &[u8]) -> Result<(), InstallError> {
    file.write_all(chunk)
        .await
        .map_err(|e| InstallError::io(path, e))
}
