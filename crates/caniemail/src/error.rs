//! Error types for the checker front-end.

/// Result type alias for check operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while checking a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error raised by the compatibility engine.
    #[error(transparent)]
    Core(#[from] caniemail_core::Error),

    /// A selector could not be parsed.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A client pattern is not a valid glob.
    #[error("Invalid client pattern '{pattern}': {message}")]
    InvalidClientPattern { pattern: String, message: String },

    /// No known client matched the given patterns.
    #[error("No email clients match {patterns:?}")]
    NoMatchingClients { patterns: Vec<String> },

    /// Neither a stylesheet nor a document was given.
    #[error("Please provide either `css` or `html`")]
    MissingInput,
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
