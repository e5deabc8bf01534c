//! Error types for the compatibility engine.

use std::path::PathBuf;

use crate::client::Client;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the engine.
///
/// Every variant here is a dataset-integrity or configuration problem. Expected
/// misses (a client without a version entry for a feature, an offset that does
/// not resolve) never surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The feature dataset could not be decoded.
    #[error("Failed to decode feature dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    /// The feature dataset could not be read from disk.
    #[error("Failed to read feature dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two features in the dataset share a title.
    #[error("Duplicate feature title '{title}' in dataset")]
    DuplicateTitle { title: String },

    /// A title does not fit the naming convention of the index classifying it.
    #[error("Title '{title}' is not valid for the {index} index: {message}")]
    InvalidTitle {
        index: &'static str,
        title: String,
        message: String,
    },

    /// A title produced by an index does not resolve to a feature.
    #[error("Feature \"{title}\" not found.")]
    UnknownFeature { title: String },

    /// A client's provider is missing from a feature's support table.
    #[error("Feature \"{title}\" not found on \"{client}\".")]
    UnknownClient { title: String, client: Client },

    /// A string does not name a known email client.
    #[error("Unknown email client '{0}'")]
    UnknownClientName(String),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a title classification error.
    pub fn invalid_title(
        index: &'static str,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidTitle {
            index,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-feature error.
    pub fn unknown_feature(title: impl Into<String>) -> Self {
        Self::UnknownFeature {
            title: title.into(),
        }
    }

    /// Create an unknown-client error.
    pub fn unknown_client(title: impl Into<String>, client: Client) -> Self {
        Self::UnknownClient {
            title: title.into(),
            client,
        }
    }
}
