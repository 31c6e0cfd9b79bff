//! Archive strategy: download once, extract in place, remove the archive.
//!
//! The download step is skipped when a same-named file already exists at the
//! destination, so re-running a failed or interrupted job never re-fetches.
//! The archive is removed only after a successful extraction; an extraction
//! failure leaves it on disk for diagnosis.

use std::path::Path;

use flate2::read::GzDecoder;

use crate::registry::record::FileFormat;
use crate::registry::resolver::RetrievalJob;
use crate::retrieval::{RetrievalError, fetch};

pub async fn fetch_and_extract(job: &RetrievalJob) -> Result<(), RetrievalError> {
    let filename = fetch::filename_from_url(&job.url)?;
    let archive_path = job.destination.join(&filename);

    if archive_path.exists() {
        tracing::info!(
            "{} already present, skipping download",
            archive_path.display()
        );
    } else {
        fetch::download_to_file(&job.url, &archive_path).await?;
    }

    match &job.format {
        FileFormat::Zip => extract_zip(&archive_path, &job.destination)?,
        FileFormat::TarGz => extract_tar_gz(&archive_path, &job.destination)?,
        other => return Err(RetrievalError::UnsupportedFormat(other.to_string())),
    }

    tokio::fs::remove_file(&archive_path).await?;
    tracing::info!("Removed archive {}", archive_path.display());
    Ok(())
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<(), RetrievalError> {
    tracing::info!("Unzipping {}", archive_path.display());
    let file = std::fs::File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| extract_err(archive_path, &e))?;
    archive
        .extract(destination)
        .map_err(|e| extract_err(archive_path, &e))
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<(), RetrievalError> {
    tracing::info!("Untarring {}", archive_path.display());
    let file = std::fs::File::open(archive_path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(false);
    archive
        .unpack(destination)
        .map_err(|e| extract_err(archive_path, &e))
}

fn extract_err(archive: &Path, err: &dyn std::fmt::Display) -> RetrievalError {
    RetrievalError::ExtractFailed {
        archive: archive.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;
    use std::path::PathBuf;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    fn write_test_zip(path: &Path, entry_name: &str, content: &[u8]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file(entry_name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
        writer.finish().unwrap();
    }

    fn write_test_tar_gz(path: &Path, entry_name: &str, content: &[u8]) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        {
            let mut builder = tar::Builder::new(&mut encoder);
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, entry_name, content).unwrap();
            builder.finish().unwrap();
        }
        let bytes = encoder.finish().unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    fn zip_job(destination: PathBuf) -> RetrievalJob {
        RetrievalJob {
            url: "http://example.org/poe.zip".to_string(),
            format: FileFormat::Zip,
            destination,
        }
    }

    #[test]
    fn extracts_zip_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("c.zip");
        write_test_zip(&archive, "poems/raven.txt", b"Once upon a midnight dreary");

        extract_zip(&archive, tmp.path()).unwrap();
        let extracted = std::fs::read_to_string(tmp.path().join("poems/raven.txt")).unwrap();
        assert_eq!(extracted, "Once upon a midnight dreary");
    }

    #[test]
    fn extracts_tar_gz_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("c.tar.gz");
        write_test_tar_gz(&archive, "tales/usher.txt", b"During the whole of a dull day");

        extract_tar_gz(&archive, tmp.path()).unwrap();
        let extracted = std::fs::read_to_string(tmp.path().join("tales/usher.txt")).unwrap();
        assert_eq!(extracted, "During the whole of a dull day");
    }

    #[test]
    fn corrupt_zip_is_an_extract_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("broken.zip");
        std::fs::write(&archive, b"this is not a zip file").unwrap();

        let result = extract_zip(&archive, tmp.path());
        assert!(matches!(
            result,
            Err(RetrievalError::ExtractFailed { .. })
        ));
    }

    #[tokio::test]
    async fn present_archive_is_extracted_then_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let job = zip_job(tmp.path().to_path_buf());

        // Archive already at the destination: no fetch happens.
        let archive = tmp.path().join("poe.zip");
        write_test_zip(&archive, "poe/poems.txt", b"Annabel Lee");

        fetch_and_extract(&job).await.unwrap();

        assert!(tmp.path().join("poe/poems.txt").is_file());
        assert!(!archive.exists(), "archive should be removed after success");
    }

    #[tokio::test]
    async fn redispatch_over_extracted_content_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let job = zip_job(tmp.path().to_path_buf());
        let archive = tmp.path().join("poe.zip");

        write_test_zip(&archive, "poe/poems.txt", b"Annabel Lee");
        fetch_and_extract(&job).await.unwrap();

        // Same job again, extracted content already present.
        write_test_zip(&archive, "poe/poems.txt", b"Annabel Lee");
        fetch_and_extract(&job).await.unwrap();

        assert!(tmp.path().join("poe/poems.txt").is_file());
    }

    #[tokio::test]
    async fn failed_extraction_preserves_the_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let job = zip_job(tmp.path().to_path_buf());

        let archive = tmp.path().join("poe.zip");
        std::fs::write(&archive, b"corrupt").unwrap();

        let result = fetch_and_extract(&job).await;
        assert!(matches!(
            result,
            Err(RetrievalError::ExtractFailed { .. })
        ));
        assert!(archive.exists(), "archive must be kept for diagnosis");
    }
}
