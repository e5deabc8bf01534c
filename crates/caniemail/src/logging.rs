//! Log targets for the parsers and the check entry point.
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("caniemail::css=warn,caniemail_core=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Client pattern expansion.
    pub const CLIENTS: &str = "caniemail::clients";
    /// Stylesheet, selector and inline style parsing.
    pub const CSS: &str = "caniemail::css";
    /// HTML parsing.
    pub const HTML: &str = "caniemail::html";
    /// The check entry point.
    pub const CHECK: &str = "caniemail::check";
}
