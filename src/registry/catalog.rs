//! Registry catalog: locates and loads the corpus-list document, validates it,
//! and answers filter/lookup queries over the loaded records.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::registry::record::{CorpusRecord, FileFormat, FilterField};
use crate::registry::resolver::RetrievalJob;
use crate::retrieval;

/// Filename of the cached registry document in the data directory.
pub const REGISTRY_FILENAME: &str = "corpus-list.yaml";

/// Location of the packaged registry document relative to the repo root.
const PACKAGED_RELATIVE: &str = "corpus-list/corpus-list.yaml";

/// Error type for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(
        "Couldn't find a corpus list: no packaged copy, no cached copy at {cached}, and the remote fetch failed ({reason})"
    )]
    Unavailable { cached: PathBuf, reason: String },

    #[error("Couldn't parse the corpus list from {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Couldn't find corpus '{0}'. Are you sure you have the right shortname?")]
    ShortnameNotFound(String),

    #[error(
        "There are {} markup types in this corpus: {}. Specify which one you want with --markup.",
        .available.len(),
        .available.join(", ")
    )]
    AmbiguousMarkup { available: Vec<String> },

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The loaded corpus registry, in document order.
#[derive(Debug, Clone)]
pub struct Registry {
    records: Vec<CorpusRecord>,
    source: PathBuf,
}

impl Registry {
    /// Load the registry document, trying in order: the packaged copy, the
    /// cached copy in the data directory, a fresh fetch from the configured
    /// remote URL (persisted to the data directory for future runs).
    pub async fn load(config: &Config) -> Result<Self, RegistryError> {
        if let Some(path) = find_packaged() {
            tracing::debug!("Loading packaged corpus list from {}", path.display());
            return Self::load_file(&path);
        }

        let cached = config.data_dir.join(REGISTRY_FILENAME);
        if cached.is_file() {
            tracing::debug!("Loading cached corpus list from {}", cached.display());
            return Self::load_file(&cached);
        }

        tracing::info!(
            "No local corpus list found, fetching from {}",
            config.registry_url
        );
        match Self::update(config).await {
            Ok(path) => Self::load_file(&path),
            Err(e) => Err(RegistryError::Unavailable {
                cached,
                reason: e.to_string(),
            }),
        }
    }

    /// Fetch the registry document from the remote URL and overwrite the
    /// cached copy, unconditionally. Returns the path of the cached copy.
    ///
    /// The fetch runs through the `yaml` retrieval strategy.
    pub async fn update(config: &Config) -> Result<PathBuf, RegistryError> {
        let job = RetrievalJob {
            url: config.registry_url.clone(),
            format: FileFormat::Yaml,
            destination: config.data_dir.clone(),
        };
        retrieval::dispatch(&job)
            .await
            .map_err(|e| RegistryError::DownloadFailed {
                url: config.registry_url.clone(),
                reason: e.to_string(),
            })?;

        // The yaml strategy names the file after the URL's last segment; the
        // cache location is fixed, so move the fetched file there if needed.
        let fetched = job.destination.join(
            retrieval::fetch::filename_from_url(&config.registry_url).map_err(|e| {
                RegistryError::DownloadFailed {
                    url: config.registry_url.clone(),
                    reason: e.to_string(),
                }
            })?,
        );
        let cached = config.data_dir.join(REGISTRY_FILENAME);
        if fetched != cached {
            tokio::fs::rename(&fetched, &cached).await?;
        }
        Ok(cached)
    }

    /// Parse a registry document from disk and validate its shape.
    pub fn load_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let records: Vec<CorpusRecord> =
            serde_yaml::from_str(&content).map_err(|e| RegistryError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Shortnames are the primary lookup key and must be unique.
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.shortname.as_str()) {
                return Err(RegistryError::Malformed {
                    path: path.to_path_buf(),
                    reason: format!("duplicate shortname '{}'", record.shortname),
                });
            }
        }

        Ok(Self {
            records,
            source: path.to_path_buf(),
        })
    }

    /// All records, in document order.
    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    /// Path the registry was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Get one record by shortname.
    pub fn lookup(&self, shortname: &str) -> Result<&CorpusRecord, RegistryError> {
        self.records
            .iter()
            .find(|r| r.shortname == shortname)
            .ok_or_else(|| RegistryError::ShortnameNotFound(shortname.to_string()))
    }
}

/// Keep the records whose `field` contains any of `values` (case-sensitive
/// substring match). Records without the field are dropped. Apply repeatedly
/// on different fields to narrow by intersection.
pub fn filter_by<'a>(
    records: &[&'a CorpusRecord],
    field: FilterField,
    values: &[String],
) -> Vec<&'a CorpusRecord> {
    records
        .iter()
        .copied()
        .filter(|r| {
            r.field(field)
                .is_some_and(|tags| values.iter().any(|v| tags.contains(v.as_str())))
        })
        .collect()
}

/// Find the packaged corpus-list document by searching relative to the
/// current directory, the executable, and `CARGO_MANIFEST_DIR`. Returns
/// `None` when the binary is installed without the packaged document.
fn find_packaged() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(PACKAGED_RELATIVE);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        // Walk up 3 levels: exe dir, target/release -> target, -> repo root
        let mut dir = Some(parent);
        for _ in 0..3 {
            if let Some(d) = dir {
                let candidate = d.join(PACKAGED_RELATIVE);
                if candidate.is_file() {
                    return Some(candidate);
                }
                dir = d.parent();
            }
        }
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidate = manifest_dir.join(PACKAGED_RELATIVE);
    if candidate.is_file() {
        return Some(candidate);
    }

    None
}
