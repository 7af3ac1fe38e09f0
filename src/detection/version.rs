//! Async version check with timeout.

use crate::DetectionError;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Timeout for version check execution.
const VERSION_TIMEOUT: Duration = Duration::from_secs(2);

/// Run `<path> --version` and capture its output.
///
/// Stdout is preferred; stderr is used when stdout is empty. Errors:
/// - `Timeout` if the command takes longer than 2 seconds
/// - `PermissionDenied` if the executable cannot be run due to permissions
/// - `IoError` for other I/O failures or non-zero exit codes
/// - `VersionParseFailed` if output is not valid UTF-8
pub(crate) async fn check_version(path: &Path) -> Result<String, DetectionError> {
    let output = timeout(
        VERSION_TIMEOUT,
        Command::new(path).arg("--version").kill_on_drop(true).output(),
    )
    .await
    .map_err(|_| DetectionError::Timeout)?
    .map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            DetectionError::PermissionDenied
        } else {
            DetectionError::IoError
        }
    })?;

    if !output.status.success() {
        return Err(DetectionError::IoError);
    }

    let out = if !output.stdout.is_empty() {
        output.stdout
    } else {
        output.stderr
    };

    String::from_utf8(out).map_err(|_| DetectionError::VersionParseFailed)
}
