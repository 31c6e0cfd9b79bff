//! Data model for corpus-list records.
//!
//! The registry document is a YAML sequence of corpus records. Each record's
//! `text` field comes in one of three shapes, normalized into [`TextSource`]
//! once at deserialization time so the rest of the crate never inspects raw
//! document structure.

use std::fmt;

use serde::Deserialize;

/// Retrieval strategy selector for one text variant.
///
/// Formats outside the supported set are carried through as [`Unknown`] and
/// rejected per job at dispatch time, so one bad entry cannot poison loading
/// the rest of the registry.
///
/// [`Unknown`]: FileFormat::Unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    Git,
    Zip,
    TarGz,
    Yaml,
    Unknown(String),
}

impl FileFormat {
    pub fn as_str(&self) -> &str {
        match self {
            FileFormat::Git => "git",
            FileFormat::Zip => "zip",
            FileFormat::TarGz => "tar.gz",
            FileFormat::Yaml => "yaml",
            FileFormat::Unknown(other) => other,
        }
    }
}

impl From<&str> for FileFormat {
    fn from(s: &str) -> Self {
        match s {
            "git" => FileFormat::Git,
            "zip" => FileFormat::Zip,
            "tar.gz" => FileFormat::TarGz,
            "yaml" => FileFormat::Yaml,
            other => FileFormat::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FileFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(FileFormat::from(s.as_str()))
    }
}

/// A variant's `url` field: a single location or a list of mirrors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UrlList {
    One(String),
    Many(Vec<String>),
}

impl UrlList {
    pub fn urls(&self) -> Vec<&str> {
        match self {
            UrlList::One(url) => vec![url.as_str()],
            UrlList::Many(urls) => urls.iter().map(String::as_str).collect(),
        }
    }
}

/// One retrievable artifact: a markup type plus where to fetch it from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextVariant {
    pub markup: String,

    #[serde(rename = "file-format")]
    pub file_format: FileFormat,

    pub url: UrlList,
}

/// The `text` field of a corpus record, as a three-case tagged union.
///
/// Decided once when the document is parsed:
/// - a YAML sequence becomes [`Variants`] (markup disambiguation required),
/// - a mapping whose `url` is a list becomes [`Mirrored`],
/// - a mapping with a single `url` becomes [`Single`].
///
/// [`Variants`]: TextSource::Variants
/// [`Mirrored`]: TextSource::Mirrored
/// [`Single`]: TextSource::Single
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTextSource")]
pub enum TextSource {
    Single(TextVariant),
    Mirrored(TextVariant),
    Variants(Vec<TextVariant>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTextSource {
    Many(Vec<TextVariant>),
    One(TextVariant),
}

impl From<RawTextSource> for TextSource {
    fn from(raw: RawTextSource) -> Self {
        match raw {
            RawTextSource::Many(variants) => TextSource::Variants(variants),
            RawTextSource::One(variant) => match variant.url {
                UrlList::One(_) => TextSource::Single(variant),
                UrlList::Many(_) => TextSource::Mirrored(variant),
            },
        }
    }
}

impl TextSource {
    /// Every variant this source carries, regardless of shape.
    pub fn all_variants(&self) -> Vec<&TextVariant> {
        match self {
            TextSource::Single(v) | TextSource::Mirrored(v) => vec![v],
            TextSource::Variants(vs) => vs.iter().collect(),
        }
    }
}

/// Record fields the `list` command can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Centuries,
    Categories,
    Languages,
}

/// One entry in the corpus registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorpusRecord {
    /// Unique lookup key within the registry.
    pub shortname: String,

    pub title: String,

    /// Comma-delimited tag strings; an absent field never matches a filter.
    #[serde(default)]
    pub centuries: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,

    pub text: TextSource,
}

impl CorpusRecord {
    pub fn field(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Centuries => self.centuries.as_deref(),
            FilterField::Categories => self.categories.as_deref(),
            FilterField::Languages => self.languages.as_deref(),
        }
    }
}
