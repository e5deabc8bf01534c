//! Client pattern expansion.
//!
//! Patterns are globs over `provider.platform` names: `*`, `gmail.*`,
//! `*.ios` or a single exact client such as `outlook.windows`.

use caniemail_core::Client;
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{Error, Result};

/// Expand client patterns into the matching clients.
///
/// Every client appears at most once, in [`Client::ALL`] order regardless
/// of pattern order.
///
/// # Errors
///
/// Returns [`Error::InvalidClientPattern`] for a malformed glob and
/// [`Error::NoMatchingClients`] if nothing matched.
///
/// # Example
///
/// ```ignore
/// let clients = expand_clients(&["gmail.*", "*.ios"])?;
/// assert_eq!(clients[0], Client::AppleMailIos);
/// ```
pub fn expand_clients<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Client>> {
    let set = build_globset(patterns)?;

    let clients: Vec<Client> = Client::ALL
        .into_iter()
        .filter(|client| set.is_match(client.as_str()))
        .collect();

    if clients.is_empty() {
        return Err(Error::NoMatchingClients {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
        });
    }

    tracing::debug!(
        target: crate::logging::targets::CLIENTS,
        patterns = patterns.len(),
        clients = clients.len(),
        "expanded client patterns"
    );

    Ok(clients)
}

fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|e| Error::InvalidClientPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| Error::InvalidClientPattern {
        pattern: patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
        message: e.to_string(),
    })
}
