//! The compatibility engine.

use serde::Serialize;

use crate::ast::{Document, Stylesheet};
use crate::catalog::Catalog;
use crate::check::{self, FeatureChecker, InlineStyleParser};
use crate::client::Client;
use crate::issues::{ClientMap, Issues};
use crate::location::Point;
use crate::logging::targets;
use crate::support::{self, Support};
use crate::Result;
use crate::titles::TitleIndexes;

/// An immutable catalog together with every index derived from it.
///
/// Building an engine classifies every title once. The engine is then only
/// read, so one instance can serve any number of concurrent check passes.
///
/// # Example
///
/// ```ignore
/// let engine = Engine::new(Catalog::from_path("caniemail.json")?)?;
///
/// let mut issues = Issues::new();
/// engine.check_stylesheet(&stylesheet, &[Client::GmailIos], None, &mut issues)?;
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    titles: TitleIndexes,
}

impl Engine {
    /// Build the indexes for a catalog.
    pub fn new(catalog: Catalog) -> Result<Self> {
        let titles = TitleIndexes::build(&catalog)?;
        Ok(Self { catalog, titles })
    }

    /// The feature catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The title indexes.
    pub fn titles(&self) -> &TitleIndexes {
        &self.titles
    }

    /// Check a stylesheet.
    ///
    /// `offset` is where the stylesheet text starts in its enclosing
    /// document, for stylesheets extracted from `<style>` elements.
    pub fn check_stylesheet(
        &self,
        stylesheet: &Stylesheet,
        clients: &[Client],
        offset: Option<Point>,
        issues: &mut Issues,
    ) -> Result<()> {
        tracing::debug!(
            target: targets::CSS,
            rules = stylesheet.len(),
            clients = clients.len(),
            "checking stylesheet"
        );

        let mut checker = FeatureChecker::new(&self.catalog, clients, issues);
        check::check_stylesheet(&mut checker, &self.titles, stylesheet, offset)
    }

    /// Check a document parsed from `source`.
    pub fn check_document(
        &self,
        document: &Document,
        source: &str,
        clients: &[Client],
        inline: &dyn InlineStyleParser,
        issues: &mut Issues,
    ) -> Result<()> {
        tracing::debug!(target: targets::HTML, clients = clients.len(), "checking document");

        let mut checker = FeatureChecker::new(&self.catalog, clients, issues);
        check::check_document(&mut checker, &self.titles, document, source, inline)
    }

    /// Report the support of every feature for every client.
    ///
    /// Clients the dataset has no entry for are left out of a feature's
    /// report.
    pub fn all_features(&self, clients: &[Client]) -> FeatureReport {
        let mut report = FeatureReport::default();

        for feature in self.catalog.iter() {
            for &client in clients {
                let Some(verdict) = support::resolve_for(feature, client) else {
                    continue;
                };

                let info = FeatureInfo {
                    title: feature.title.clone(),
                    notes: check::note_texts(feature, &verdict, client),
                    support: verdict.support,
                    url: feature.url.clone(),
                };

                match verdict.support {
                    Support::None => report.unsupported.push(client, info),
                    Support::Full | Support::Partial => report.supported.push(client, info),
                }
            }
        }

        report
    }
}

/// Support of one feature for one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureInfo {
    pub title: String,
    pub notes: Vec<String>,
    pub support: Support,
    pub url: String,
}

/// Every feature split by whether a client supports it at least partially.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureReport {
    pub supported: ClientMap<FeatureInfo>,
    pub unsupported: ClientMap<FeatureInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_shareable() {
        assert_send_sync::<Engine>();
    }

    #[test]
    fn all_features_splits_support() {
        let engine = Engine::new(fixtures::catalog()).unwrap();
        let report = engine.all_features(&[Client::OutlookWindows]);

        let unsupported = report.unsupported.get(Client::OutlookWindows).unwrap();
        let flex = unsupported.iter().find(|info| info.title == "flex-direction").unwrap();
        assert_eq!(flex.url, "https://www.caniemail.com/features/css-flex-direction/");
        assert_eq!(flex.support, Support::None);

        let supported = report.supported.get(Client::OutlookWindows).unwrap();
        let width = supported.iter().find(|info| info.title == "width").unwrap();
        assert_eq!(width.support, Support::Partial);
        assert_eq!(width.notes, ["Not supported on `<body>` and `<span>` elements."]);

        assert_eq!(unsupported.len() + supported.len(), engine.catalog().len());
    }

    #[test]
    fn all_features_skips_missing_platforms() {
        let engine = Engine::new(fixtures::catalog()).unwrap();
        let report = engine.all_features(&[Client::OutlookWindowsMail]);

        let total = report.supported.total() + report.unsupported.total();
        assert_eq!(total, engine.catalog().len() - 1);
    }
}
