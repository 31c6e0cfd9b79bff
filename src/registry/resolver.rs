//! Resolves a corpus record plus an optional markup selector into the
//! concrete retrieval jobs the dispatcher executes.

use std::path::{Path, PathBuf};

use crate::registry::catalog::RegistryError;
use crate::registry::record::{CorpusRecord, FileFormat, TextSource, TextVariant};

/// One resolved unit of retrieval work. Created here, consumed immediately
/// by [`crate::retrieval::dispatch`]; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalJob {
    pub url: String,
    pub format: FileFormat,
    pub destination: PathBuf,
}

/// Resolve `record.text` into an ordered list of retrieval jobs.
///
/// A corpus with several markup variants requires a selector naming at least
/// one of them; the error lists the available tags so the user can retry.
/// For single-variant corpora a supplied selector is ignored rather than
/// rejected, so `--markup` can be passed uniformly across downloads.
pub fn resolve(
    record: &CorpusRecord,
    markup: Option<&[String]>,
    destination: &Path,
) -> Result<Vec<RetrievalJob>, RegistryError> {
    match &record.text {
        TextSource::Variants(variants) => {
            let selected = match markup {
                Some(tags) if !tags.is_empty() => tags,
                _ => {
                    return Err(RegistryError::AmbiguousMarkup {
                        available: variants.iter().map(|v| v.markup.clone()).collect(),
                    });
                }
            };

            let jobs: Vec<RetrievalJob> = variants
                .iter()
                .filter(|v| selected.iter().any(|tag| *tag == v.markup))
                .flat_map(|v| jobs_for_variant(v, destination))
                .collect();

            if jobs.is_empty() {
                tracing::warn!(
                    "No markup type in corpus '{}' matches {:?}; available: {}",
                    record.shortname,
                    selected,
                    variants
                        .iter()
                        .map(|v| v.markup.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            Ok(jobs)
        }
        TextSource::Mirrored(variant) | TextSource::Single(variant) => {
            if markup.is_some() {
                tracing::debug!(
                    "Corpus '{}' has a single markup type; ignoring --markup",
                    record.shortname
                );
            }
            Ok(jobs_for_variant(variant, destination))
        }
    }
}

fn jobs_for_variant(variant: &TextVariant, destination: &Path) -> Vec<RetrievalJob> {
    variant
        .url
        .urls()
        .into_iter()
        .map(|url| RetrievalJob {
            url: url.to_string(),
            format: variant.file_format.clone(),
            destination: destination.to_path_buf(),
        })
        .collect()
}
