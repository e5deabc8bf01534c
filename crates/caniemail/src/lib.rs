//! Check HTML emails and stylesheets against email client support data.
//!
//! This crate parses CSS and HTML and runs them through the
//! [`caniemail_core`] engine:
//!
//! - **Parsers**: stylesheets, selectors, `style` attributes and lenient
//!   HTML ([`parser`])
//! - **Clients**: glob patterns such as `gmail.*` or `*.ios` ([`clients`])
//! - **Checking**: one call from source text to located issues ([`check`])
//!
//! # Example
//!
//! ```ignore
//! use caniemail::prelude::*;
//!
//! let engine = Engine::new(Catalog::from_path("caniemail.json")?)?;
//! let options = CheckOptions::new(["gmail.*", "outlook.windows"])
//!     .html(r#"<div style="display: flex">Hello</div>"#);
//!
//! let result = check(&engine, &options)?;
//! for group in result.errors() {
//!     println!("{} ({:?})", group.issue.title, group.clients);
//! }
//! ```

pub mod clients;
pub mod logging;
pub mod parser;

mod error;

use serde::Serialize;

pub use caniemail_core::{
    format_issue, group_issues, sort_issues, Catalog, Client, Engine, FeatureInfo, FeatureIssue,
    FeatureReport, FormattedIssue, IssueGroup, IssueKind, Issues, Point, Position, Support,
};
pub use clients::expand_clients;
pub use error::{Error, Result};
pub use parser::{parse_css, parse_html, parse_selector_list, InlineParser, ParsedHtml};

use logging::targets;

/// Input of one check pass.
///
/// At least one of `css` and `html` must be given. When both are, both are
/// checked into the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Client names or globs, e.g. `gmail.android`, `outlook.*`, `*.ios`.
    pub clients: Vec<String>,
    /// A standalone stylesheet.
    pub css: Option<String>,
    /// An HTML document.
    pub html: Option<String>,
}

impl CheckOptions {
    /// Create options for the given client patterns.
    pub fn new<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clients: clients.into_iter().map(Into::into).collect(),
            css: None,
            html: None,
        }
    }

    /// Set the stylesheet to check.
    pub fn css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Set the document to check.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// Outcome of one check pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub issues: Issues,
    /// `true` when no client lacks support for any feature used.
    pub success: bool,
}

impl CheckResult {
    /// Errors grouped across clients and sorted by position.
    pub fn errors(&self) -> Vec<IssueGroup> {
        sort_issues(group_issues(&self.issues.errors))
    }

    /// Warnings grouped across clients and sorted by position.
    pub fn warnings(&self) -> Vec<IssueGroup> {
        sort_issues(group_issues(&self.issues.warnings))
    }

    /// Every issue rendered as a message per client, errors first.
    pub fn formatted(&self) -> Vec<FormattedIssue> {
        let errors = self.issues.errors.iter().map(|entry| (entry, IssueKind::Error));
        let warnings = self.issues.warnings.iter().map(|entry| (entry, IssueKind::Warning));

        errors
            .chain(warnings)
            .flat_map(|((client, issues), kind)| {
                issues
                    .iter()
                    .map(move |issue| format_issue(client, issue, kind))
            })
            .collect()
    }
}

/// Check a stylesheet and/or document against the selected clients.
///
/// The standalone stylesheet is checked first, then every `<style>` block of
/// the document (positions remapped into the document) and finally the
/// document's elements, attributes and `style` attributes.
///
/// # Errors
///
/// - [`Error::MissingInput`] if neither `css` nor `html` is given or both are
///   empty
/// - [`Error::InvalidClientPattern`] / [`Error::NoMatchingClients`] for bad
///   client patterns
/// - [`Error::Core`] if the dataset is inconsistent with a matched title
pub fn check(engine: &Engine, options: &CheckOptions) -> Result<CheckResult> {
    let css = options.css.as_deref().filter(|css| !css.is_empty());
    let html = options.html.as_deref().filter(|html| !html.is_empty());
    if css.is_none() && html.is_none() {
        return Err(Error::MissingInput);
    }

    let clients = expand_clients(options.clients.as_slice())?;
    let mut issues = Issues::new();

    if let Some(css) = css {
        let stylesheet = parse_css(css);
        engine.check_stylesheet(&stylesheet, &clients, None, &mut issues)?;
    }

    if let Some(html) = html {
        let parsed = parse_html(html);
        for embedded in &parsed.stylesheets {
            engine.check_stylesheet(&embedded.stylesheet, &clients, embedded.offset, &mut issues)?;
        }
        engine.check_document(&parsed.document, html, &clients, &InlineParser, &mut issues)?;
    }

    let success = issues.errors.is_empty();
    tracing::debug!(
        target: targets::CHECK,
        clients = clients.len(),
        errors = issues.errors.total(),
        warnings = issues.warnings.total(),
        success,
        "check finished"
    );

    Ok(CheckResult { issues, success })
}

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::{
        check, expand_clients, CheckOptions, CheckResult, Error, InlineParser, Result,
    };
    pub use caniemail_core::prelude::*;
}
