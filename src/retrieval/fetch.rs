//! HTTP download primitives shared by the retrieval strategies.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::retrieval::RetrievalError;

/// The last path segment of a URL, used to name downloaded files.
pub fn filename_from_url(url: &str) -> Result<String, RetrievalError> {
    let name = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .split(['?', '#'])
        .next()
        .unwrap_or("");

    if name.is_empty() {
        return Err(RetrievalError::DownloadFailed {
            url: url.to_string(),
            reason: "URL has no filename component".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Stream a remote file to `target`, overwriting it. Blocks until the
/// transfer completes or errors; there is no timeout or retry here.
pub async fn download_to_file(url: &str, target: &Path) -> Result<(), RetrievalError> {
    tracing::info!("Downloading {} to {}", url, target.display());

    let mut response = reqwest::get(url)
        .await
        .map_err(|e| RetrievalError::DownloadFailed {
            url: url.to_string(),
            reason: format!("request failed: {e}"),
        })?
        .error_for_status()
        .map_err(|e| RetrievalError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let mut file = tokio::fs::File::create(target).await?;
    let mut downloaded: u64 = 0;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| RetrievalError::DownloadFailed {
            url: url.to_string(),
            reason: format!("failed to read body: {e}"),
        })?
    {
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        tracing::debug!("{downloaded} bytes received");
    }

    file.flush().await?;
    tracing::info!("Downloaded {downloaded} bytes to {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_path_segment() {
        assert_eq!(
            filename_from_url("http://example.org/files/poe.zip").unwrap(),
            "poe.zip"
        );
        assert_eq!(
            filename_from_url("http://example.org/c.tar.gz?token=abc").unwrap(),
            "c.tar.gz"
        );
        assert_eq!(
            filename_from_url("http://example.org/corpus-list.yaml/").unwrap(),
            "corpus-list.yaml"
        );
    }

    #[test]
    fn url_without_filename_is_rejected() {
        assert!(filename_from_url("").is_err());
        assert!(filename_from_url("/").is_err());
    }
}
