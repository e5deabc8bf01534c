//! Logging facilities.
//!
//! The engine uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("caniemail_core::css=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Dataset loading and index construction.
    pub const CATALOG: &str = "caniemail_core::catalog";
    /// Feature support resolution.
    pub const CHECK: &str = "caniemail_core::check";
    /// Stylesheet walking.
    pub const CSS: &str = "caniemail_core::css";
    /// DOM walking.
    pub const HTML: &str = "caniemail_core::html";
}
