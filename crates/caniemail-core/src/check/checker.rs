//! Feature checking against the client matrix.

use crate::catalog::{Catalog, Feature};
use crate::client::Client;
use crate::issues::{FeatureIssue, Issues};
use crate::location::Position;
use crate::logging::targets;
use crate::support::{self, Support, SupportVerdict};
use crate::{Error, Result};

/// Resolves matched titles for every client and records the issues.
///
/// One checker lives for one check pass; it borrows the pass's [`Issues`]
/// mutably and everything else immutably.
pub struct FeatureChecker<'a> {
    catalog: &'a Catalog,
    clients: &'a [Client],
    issues: &'a mut Issues,
}

impl<'a> FeatureChecker<'a> {
    /// Create a checker for a client list.
    pub fn new(catalog: &'a Catalog, clients: &'a [Client], issues: &'a mut Issues) -> Self {
        Self {
            catalog,
            clients,
            issues,
        }
    }

    /// The clients being checked.
    pub fn clients(&self) -> &[Client] {
        self.clients
    }

    /// Check titles at a position.
    ///
    /// An unknown title, or a client whose provider is missing from a
    /// feature's stats, means the dataset and the indexes disagree and aborts
    /// the pass. A provider without an entry for the client's platform is
    /// skipped.
    pub fn check(&mut self, titles: &[&str], position: Option<&Position>) -> Result<()> {
        for &title in titles {
            let feature = self
                .catalog
                .get(title)
                .ok_or_else(|| Error::unknown_feature(title))?;

            for &client in self.clients {
                let platforms = feature
                    .provider_stats(client)
                    .ok_or_else(|| Error::unknown_client(title, client))?;

                let Some(verdict) = platforms.get(client.platform()).and_then(support::resolve)
                else {
                    tracing::trace!(target: targets::CHECK, title, %client, "no support data, skipped");
                    continue;
                };

                if verdict.support == Support::Full {
                    continue;
                }

                tracing::debug!(
                    target: targets::CHECK,
                    title,
                    %client,
                    support = %verdict.support,
                    "feature issue"
                );

                self.issues.record(
                    client,
                    FeatureIssue {
                        title: title.to_string(),
                        notes: note_texts(feature, &verdict, client),
                        position: position.cloned(),
                        support: verdict.support,
                    },
                );
            }
        }

        Ok(())
    }
}

/// Footnote texts for a verdict, in footnote order.
pub(crate) fn note_texts(feature: &Feature, verdict: &SupportVerdict, client: Client) -> Vec<String> {
    verdict
        .notes()
        .iter()
        .filter_map(|&number| {
            let note = feature.note(number);
            if note.is_none() {
                tracing::warn!(
                    target: targets::CHECK,
                    title = %feature.title,
                    %client,
                    number,
                    "missing footnote text"
                );
            }
            note.map(str::to_string)
        })
        .collect()
}
