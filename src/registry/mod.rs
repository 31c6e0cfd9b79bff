//! Corpus registry: the corpus-list document, its in-memory index, and the
//! resolution of records into retrieval jobs.
//!
//! ```text
//! corpus-list.yaml --> Registry --> resolve() --> RetrievalJob --> retrieval::dispatch()
//! ```

pub mod catalog;
pub mod record;
pub mod resolver;

pub use catalog::{REGISTRY_FILENAME, Registry, RegistryError, filter_by};
pub use record::{CorpusRecord, FileFormat, FilterField, TextSource, TextVariant, UrlList};
pub use resolver::{RetrievalJob, resolve};
