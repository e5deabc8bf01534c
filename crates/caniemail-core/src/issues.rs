//! Issue collection, grouping and presentation.

use std::collections::HashMap;

use serde::Serialize;

use crate::client::Client;
use crate::location::Position;
use crate::support::Support;

/// One unsupported or partially supported feature occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureIssue {
    pub title: String,
    /// Footnote texts, in footnote order.
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub support: Support,
}

/// Per-client sequences, keyed in client insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClientMap<T> {
    entries: Vec<(Client, Vec<T>)>,
}

impl<T> Default for ClientMap<T> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<T> ClientMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a client's sequence.
    pub fn push(&mut self, client: Client, value: T) {
        match self.entries.iter_mut().find(|(c, _)| *c == client) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((client, vec![value])),
        }
    }

    /// Get a client's sequence.
    pub fn get(&self, client: Client) -> Option<&[T]> {
        self.entries
            .iter()
            .find(|(c, _)| *c == client)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate over clients and their sequences, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Client, &[T])> {
        self.entries
            .iter()
            .map(|(client, values)| (*client, values.as_slice()))
    }

    /// Clients with at least one entry, in insertion order.
    pub fn clients(&self) -> impl Iterator<Item = Client> + '_ {
        self.entries.iter().map(|(client, _)| *client)
    }

    /// Get the number of clients with entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no client has entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of values across clients.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }
}

/// Issues per client.
pub type IssueMap = ClientMap<FeatureIssue>;

/// Errors (no support) and warnings (partial support) of one check pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Issues {
    pub errors: IssueMap,
    pub warnings: IssueMap,
}

impl Issues {
    /// Create an empty issue set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue under the map matching its support level.
    ///
    /// Fully supported features are not issues and are dropped.
    pub fn record(&mut self, client: Client, issue: FeatureIssue) {
        match issue.support {
            Support::None => self.errors.push(client, issue),
            Support::Partial => self.warnings.push(client, issue),
            Support::Full => {}
        }
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Which map an issue came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
}

/// An issue shared by every client that reported it at the same place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueGroup {
    pub issue: FeatureIssue,
    pub clients: Vec<Client>,
}

impl IssueGroup {
    /// Start line and column; grouped issues always carry a position.
    fn start(&self) -> (u32, u32) {
        self.issue
            .position
            .as_ref()
            .map(|position| (position.start.line, position.start.column))
            .unwrap_or_default()
    }
}

/// Merge issues reported at the same start point for the same title.
///
/// Unpositioned issues are dropped. Groups keep first-seen order and clients
/// are appended in encounter order.
pub fn group_issues(issues: &IssueMap) -> Vec<IssueGroup> {
    let mut groups: Vec<IssueGroup> = vec![];
    let mut by_key: HashMap<(u32, u32, &str), usize> = HashMap::new();

    for (client, client_issues) in issues.iter() {
        for issue in client_issues {
            let Some(position) = &issue.position else {
                continue;
            };

            let key = (position.start.line, position.start.column, issue.title.as_str());
            match by_key.get(&key) {
                Some(&index) => groups[index].clients.push(client),
                None => {
                    by_key.insert(key, groups.len());
                    groups.push(IssueGroup {
                        issue: issue.clone(),
                        clients: vec![client],
                    });
                }
            }
        }
    }

    groups
}

/// Sort groups by start line, then start column.
///
/// The sort is stable: groups at the same point keep their relative order.
pub fn sort_issues(mut groups: Vec<IssueGroup>) -> Vec<IssueGroup> {
    groups.sort_by_key(IssueGroup::start);
    groups
}

/// A human-readable rendering of one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedIssue {
    pub message: String,
    pub notes: Vec<String>,
}

/// Render an issue for one client.
pub fn format_issue(client: Client, issue: &FeatureIssue, kind: IssueKind) -> FormattedIssue {
    let title = &issue.title;
    let message = match kind {
        IssueKind::Error => format!("`{title}` is not supported by `{client}`"),
        IssueKind::Warning => format!("`{title}` is only partially supported by `{client}`"),
    };
    let notes = issue
        .notes
        .iter()
        .map(|note| format!("Note about `{title}` support for `{client}`: {note}"))
        .collect();

    FormattedIssue { message, notes }
}
