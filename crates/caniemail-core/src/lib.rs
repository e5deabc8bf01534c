//! Email client compatibility engine.
//!
//! This crate decides, for a matrix of email clients, which CSS and HTML
//! features used in a document are unsupported or only partially supported,
//! and where in the source they occur:
//!
//! - **Catalog**: the static per-client support dataset ([`Catalog`])
//! - **Title indexes**: feature titles classified by syntax category
//!   ([`titles`])
//! - **Support resolution**: a version table reduced to a tri-state verdict
//!   ([`support`])
//! - **Locations**: offsets to line/column, and remapping of positions found
//!   in nested fragments ([`location`])
//! - **Walkers**: stylesheet and document traversal ([`check`])
//! - **Issues**: per-client collection, grouping and sorting ([`issues`])
//!
//! Parsing is left to front-ends, which build the trees in [`ast`].
//!
//! # Example
//!
//! ```ignore
//! use caniemail_core::prelude::*;
//!
//! let engine = Engine::new(Catalog::from_path("caniemail.json")?)?;
//!
//! let mut issues = Issues::new();
//! engine.check_stylesheet(&stylesheet, &[Client::GmailDesktopWebmail], None, &mut issues)?;
//!
//! for group in sort_issues(group_issues(&issues.errors)) {
//!     println!("{}: {:?}", group.issue.title, group.clients);
//! }
//! ```

pub mod ast;
pub mod catalog;
pub mod check;
pub mod client;
pub mod engine;
pub mod issues;
pub mod location;
pub mod logging;
pub mod support;
pub mod titles;

mod error;

pub use catalog::{Catalog, Category, Feature};
pub use client::Client;
pub use engine::{Engine, FeatureInfo, FeatureReport};
pub use error::{Error, Result};
pub use issues::{
    format_issue, group_issues, sort_issues, FeatureIssue, FormattedIssue, IssueGroup, IssueKind,
    IssueMap, Issues,
};
pub use location::{LocationIndex, Point, Position};
pub use support::{Support, SupportVerdict};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::ast::{
        Attribute, CssRule, Declaration, Document, Element, Node, Selector, SelectorComponent,
        Stylesheet,
    };
    pub use crate::check::InlineStyleParser;
    pub use crate::{
        format_issue, group_issues, sort_issues, Catalog, Client, Engine, FeatureIssue,
        IssueGroup, IssueKind, Issues, Point, Position, Support,
    };
}
