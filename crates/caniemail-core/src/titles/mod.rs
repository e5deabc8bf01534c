//! Title indexes.
//!
//! Feature titles in the dataset follow loose naming conventions
//! (`@media`, `calc()`, `rem unit`, `<video> element`, ...). Each index
//! classifies the titles of one category into a typed value that a walker can
//! match against parsed source constructs.
//!
//! Indexes are pure functions of the [`Catalog`] and keep catalog order, so
//! matching titles are always reported in dataset order.

mod css;
mod html;
mod selector;

pub use css::{CssTitles, UnitPattern};
pub use html::{ElementAttributeMatcher, HtmlTitles};
pub use selector::{SelectorDetector, SelectorTitles};

use crate::catalog::{Catalog, Category};
use crate::Result;

/// Ordered `(title, value)` entries for one syntax category.
#[derive(Debug, Clone)]
pub struct TitleIndex<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for TitleIndex<T> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<T> TitleIndex<T> {
    /// Classify titles with `classify`, keeping the ones it accepts.
    ///
    /// The classifier returns `Ok(None)` for titles outside the index and an
    /// error for titles that look like they belong but cannot be decoded.
    pub fn build<'a, I, F>(titles: I, mut classify: F) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(&str) -> Result<Option<T>>,
    {
        let mut entries = vec![];
        for title in titles {
            if let Some(value) = classify(title)? {
                entries.push((title.to_string(), value));
            }
        }
        Ok(Self { entries })
    }

    /// Look up the value classified for a title.
    pub fn get(&self, title: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == title)
            .map(|(_, value)| value)
    }

    /// Iterate over indexed titles.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(title, _)| title.as_str())
    }

    /// Iterate over `(title, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(title, value)| (title.as_str(), value))
    }

    /// Titles whose value satisfies `predicate`, in index order.
    pub fn matching(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, value)| predicate(value))
            .map(|(title, _)| title.as_str())
            .collect()
    }

    /// Get the number of indexed titles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every title index derived from one catalog.
#[derive(Debug, Clone)]
pub struct TitleIndexes {
    pub css: CssTitles,
    pub selectors: SelectorTitles,
    pub html: HtmlTitles,
}

impl TitleIndexes {
    /// Build all indexes.
    pub fn build(catalog: &Catalog) -> Result<Self> {
        let indexes = Self {
            css: CssTitles::build(catalog.titles(Category::Css))?,
            selectors: SelectorTitles::build(catalog.titles(Category::Css)),
            html: HtmlTitles::build(catalog.titles(Category::Html))?,
        };

        tracing::debug!(
            target: crate::logging::targets::CATALOG,
            properties = indexes.css.properties.len(),
            selectors = indexes.selectors.detectors.len(),
            elements = indexes.html.elements.len(),
            "title indexes built"
        );

        Ok(indexes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_keeps_order_and_skips_unclassified() {
        let index = TitleIndex::build(["b unit", "a", "c unit"], |title| {
            Ok(title.strip_suffix(" unit").map(str::to_string))
        })
        .unwrap();

        assert_eq!(index.titles().collect::<Vec<_>>(), ["b unit", "c unit"]);
        assert_eq!(index.get("c unit").map(String::as_str), Some("c"));
        assert_eq!(index.get("a"), None);
    }

    #[test]
    fn build_propagates_errors() {
        let result = TitleIndex::<()>::build(["bad"], |title| {
            Err(crate::Error::invalid_title("test", title, "rejected"))
        });

        assert!(result.is_err());
    }

    #[test]
    fn matching_filters_by_value() {
        let index = TitleIndex::build(["one", "two", "three"], |title| Ok(Some(title.len()))).unwrap();

        assert_eq!(index.matching(|len| *len == 3), ["one", "two"]);
        assert!(index.matching(|len| *len == 4).is_empty());
    }

    #[test]
    fn builds_from_fixture_catalog() {
        let catalog = crate::catalog::fixtures::catalog();
        let indexes = TitleIndexes::build(&catalog).unwrap();

        assert!(!indexes.css.properties.is_empty());
        assert_eq!(indexes.selectors.detectors.len(), 11);
        assert!(!indexes.html.elements.is_empty());
    }
}
