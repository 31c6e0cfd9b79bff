//! Git clone strategy.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::retrieval::RetrievalError;

/// Recursively clone `url` into a subdirectory of `destination`.
///
/// Runs with inherited stdio so git's own progress output streams to the
/// terminal as the clone proceeds.
pub async fn clone_repository(url: &str, destination: &Path) -> Result<(), RetrievalError> {
    // Check git availability before cloning.
    let check = Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    if !check.map(|s| s.success()).unwrap_or(false) {
        return Err(RetrievalError::CloneFailed {
            url: url.to_string(),
            reason: "git not found on PATH".to_string(),
        });
    }

    tracing::info!("Cloning {} into {}", url, destination.display());

    let status = Command::new("git")
        .current_dir(destination)
        .args(["clone", "--progress", "--recursive"])
        .arg(url)
        .status()
        .await
        .map_err(|e| RetrievalError::CloneFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(RetrievalError::CloneFailed {
            url: url.to_string(),
            reason: format!("git exited with {status}"),
        });
    }

    Ok(())
}
