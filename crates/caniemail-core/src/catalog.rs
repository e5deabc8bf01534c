//! The static feature dataset.
//!
//! A [`Catalog`] is decoded once from the dataset JSON and then only read.
//! Features are kept in dataset order; every title index derived from the
//! catalog preserves that order.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::logging::targets;
use crate::{Error, Result};

/// Support codes keyed by client version (e.g. `"2023-06" → "a #1"`).
pub type VersionTable = BTreeMap<String, String>;

/// Version tables keyed by platform.
pub type PlatformTable = BTreeMap<String, VersionTable>;

/// Platform tables keyed by provider.
pub type Stats = BTreeMap<String, PlatformTable>;

/// Feature category as reported by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Css,
    Html,
    Image,
    #[serde(other)]
    Other,
}

/// One named compatibility fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Unique display name; doubles as the classification key.
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    /// Provider → platform → version → support code.
    #[serde(default)]
    pub stats: Stats,
    /// Footnote texts keyed by number.
    #[serde(default, rename = "notes_by_num")]
    pub notes_by_number: Option<BTreeMap<u32, String>>,
}

impl Feature {
    /// The platform table for a client's provider.
    ///
    /// `None` means the provider does not appear in this feature's stats at all.
    pub fn provider_stats(&self, client: Client) -> Option<&PlatformTable> {
        self.stats.get(client.provider())
    }

    /// The version table for a client, if the dataset covers it.
    pub fn support_table(&self, client: Client) -> Option<&VersionTable> {
        self.provider_stats(client)
            .and_then(|platforms| platforms.get(client.platform()))
    }

    /// Look up the text of a footnote.
    pub fn note(&self, number: u32) -> Option<&str> {
        self.notes_by_number
            .as_ref()
            .and_then(|notes| notes.get(&number))
            .map(String::as_str)
    }
}

/// Raw dataset envelope.
#[derive(Debug, Clone, Deserialize)]
struct Dataset {
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    last_update_date: Option<String>,
    data: Vec<Feature>,
}

/// The immutable feature catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    features: Vec<Feature>,
    by_title: HashMap<String, usize>,
    api_version: Option<String>,
    last_update_date: Option<String>,
}

impl Catalog {
    /// Build a catalog from already decoded features.
    pub fn new(features: Vec<Feature>) -> Result<Self> {
        let mut by_title = HashMap::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            if by_title.insert(feature.title.clone(), index).is_some() {
                return Err(Error::DuplicateTitle {
                    title: feature.title.clone(),
                });
            }
        }

        tracing::debug!(target: targets::CATALOG, features = features.len(), "catalog loaded");

        Ok(Self {
            features,
            by_title,
            api_version: None,
            last_update_date: None,
        })
    }

    /// Decode a catalog from dataset JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_dataset(serde_json::from_str(json)?)
    }

    /// Decode a catalog from dataset JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_dataset(serde_json::from_slice(bytes)?)
    }

    /// Read and decode a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_slice(&bytes)
    }

    fn from_dataset(dataset: Dataset) -> Result<Self> {
        let mut catalog = Self::new(dataset.data)?;
        catalog.api_version = dataset.api_version;
        catalog.last_update_date = dataset.last_update_date;
        Ok(catalog)
    }

    /// Look up a feature by title.
    pub fn get(&self, title: &str) -> Option<&Feature> {
        self.by_title.get(title).map(|&index| &self.features[index])
    }

    /// Check whether a title exists.
    pub fn contains(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    /// Iterate over all features in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Iterate over the titles of one category, in dataset order.
    pub fn titles(&self, category: Category) -> impl Iterator<Item = &str> + Clone {
        self.features
            .iter()
            .filter(move |feature| feature.category == category)
            .map(|feature| feature.title.as_str())
    }

    /// Get the number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Dataset API version, when the envelope carries one.
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Dataset update timestamp, when the envelope carries one.
    pub fn last_update_date(&self) -> Option<&str> {
        self.last_update_date.as_deref()
    }
}
