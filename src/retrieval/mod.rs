//! Retrieval dispatcher: routes one resolved job to its format strategy.
//!
//! Execution is strictly sequential; callers run jobs one at a time and keep
//! going when an individual job fails, so one bad URL in a batch does not
//! abort the rest.

pub mod archive;
pub mod fetch;
pub mod git;

use std::path::PathBuf;

use crate::registry::record::FileFormat;
use crate::registry::resolver::RetrievalJob;

/// Error type for retrieval strategies, reported per job.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Clone failed for {url}: {reason}")]
    CloneFailed { url: String, reason: String },

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to extract {archive}: {reason}")]
    ExtractFailed { archive: PathBuf, reason: String },

    #[error("Unsupported file format '{0}'")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Execute one retrieval job. Creates the destination directory if absent;
/// safe to re-run against a destination that already holds earlier results.
pub async fn dispatch(job: &RetrievalJob) -> Result<(), RetrievalError> {
    tokio::fs::create_dir_all(&job.destination).await?;

    match &job.format {
        FileFormat::Git => git::clone_repository(&job.url, &job.destination).await,
        FileFormat::Zip | FileFormat::TarGz => archive::fetch_and_extract(job).await,
        FileFormat::Yaml => {
            // Verbatim fetch, no extraction. Overwrites, so a registry
            // self-update always lands the fresh document.
            let target = job.destination.join(fetch::filename_from_url(&job.url)?);
            fetch::download_to_file(&job.url, &target).await
        }
        FileFormat::Unknown(other) => Err(RetrievalError::UnsupportedFormat(other.clone())),
    }
}
