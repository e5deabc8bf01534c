//! Selector title indexes.

use super::TitleIndex;
use crate::ast::{Combinator, Selector, SelectorComponent};

/// Predicate over the parsed selector list of one rule.
pub type SelectorDetector = fn(&[Selector]) -> bool;

/// Structural selector features, keyed by dataset title.
const DETECTORS: [(&str, SelectorDetector); 11] = [
    ("Adjacent sibling combinator", |selectors| {
        any_component(selectors, |c| {
            *c == SelectorComponent::Combinator(Combinator::AdjacentSibling)
        })
    }),
    ("Attribute selector", |selectors| {
        any_component(selectors, |c| {
            matches!(c, SelectorComponent::Attribute { name, .. } if name != "id" && name != "class")
        })
    }),
    ("Chaining selectors", |selectors| {
        selectors.iter().any(|selector| {
            selector
                .compounds()
                .any(|compound| compound.iter().filter(|c| c.is_class()).count() >= 2)
        })
    }),
    ("Child combinator", |selectors| {
        any_component(selectors, |c| {
            *c == SelectorComponent::Combinator(Combinator::Child)
        })
    }),
    ("Class selector", |selectors| {
        any_component(selectors, SelectorComponent::is_class)
    }),
    ("Descendant combinator", |selectors| {
        any_component(selectors, |c| {
            *c == SelectorComponent::Combinator(Combinator::Descendant)
        })
    }),
    ("General sibling combinator", |selectors| {
        any_component(selectors, |c| {
            *c == SelectorComponent::Combinator(Combinator::GeneralSibling)
        })
    }),
    ("Grouping selectors", |selectors| selectors.len() >= 2),
    ("ID selector", |selectors| {
        any_component(selectors, SelectorComponent::is_id)
    }),
    ("Type selector", |selectors| {
        any_component(selectors, |c| matches!(c, SelectorComponent::Tag(_)))
    }),
    ("Universal selector *", |selectors| {
        any_component(selectors, |c| *c == SelectorComponent::Universal)
    }),
];

fn any_component(selectors: &[Selector], predicate: impl Fn(&SelectorComponent) -> bool) -> bool {
    selectors
        .iter()
        .any(|selector| selector.components.iter().any(&predicate))
}

/// Indexes over selector-related CSS titles.
#[derive(Debug, Clone)]
pub struct SelectorTitles {
    /// `:hover` → `:hover`.
    pub pseudo: TitleIndex<String>,
    /// Structural features present in the catalog.
    pub detectors: TitleIndex<SelectorDetector>,
}

impl SelectorTitles {
    /// Classify selector titles.
    pub fn build<'a>(titles: impl IntoIterator<Item = &'a str> + Clone) -> Self {
        // Neither classifier can fail.
        let pseudo = titles
            .clone()
            .into_iter()
            .filter(|title| title.starts_with(':'))
            .map(|title| (title.to_string(), title.to_string()))
            .collect();
        let detectors = titles
            .into_iter()
            .filter_map(|title| {
                DETECTORS
                    .iter()
                    .find(|(name, _)| *name == title)
                    .map(|&(_, detector)| (title.to_string(), detector))
            })
            .collect();

        Self {
            pseudo: TitleIndex { entries: pseudo },
            detectors: TitleIndex { entries: detectors },
        }
    }

    /// Pseudo-selector titles occurring in a raw selector.
    pub fn matching_pseudo(&self, selector: &str) -> Vec<&str> {
        self.pseudo.matching(|pseudo| selector.contains(pseudo.as_str()))
    }

    /// Structural feature titles detected in a rule's selector list.
    pub fn matching_detectors(&self, selectors: &[Selector]) -> Vec<&str> {
        self.detectors.matching(|detector| detector(selectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AttributeOperator;
    use crate::catalog::{fixtures, Category};

    fn titles() -> SelectorTitles {
        let catalog = fixtures::catalog();
        SelectorTitles::build(catalog.titles(Category::Css))
    }

    fn selector(components: Vec<SelectorComponent>) -> Selector {
        Selector::new("", components)
    }

    fn class(name: &str) -> SelectorComponent {
        SelectorComponent::Class(name.to_string())
    }

    #[test]
    fn keeps_only_catalog_titles() {
        let titles = SelectorTitles::build(["Class selector", "width", ":hover"]);

        assert_eq!(titles.detectors.titles().collect::<Vec<_>>(), ["Class selector"]);
        assert_eq!(titles.pseudo.titles().collect::<Vec<_>>(), [":hover"]);
    }

    #[test]
    fn matches_pseudo_by_substring() {
        let titles = titles();

        assert_eq!(titles.matching_pseudo("a:hover"), [":hover"]);
        assert_eq!(titles.matching_pseudo("li:first-child:hover"), [":hover", ":first-child"]);
        assert!(titles.matching_pseudo("a").is_empty());
    }

    #[test]
    fn detects_compound_features() {
        let titles = titles();

        // div > a#linkId[href="x"].link
        let selectors = [selector(vec![
            SelectorComponent::Tag("div".into()),
            SelectorComponent::Combinator(Combinator::Child),
            SelectorComponent::Tag("a".into()),
            SelectorComponent::Id("linkId".into()),
            SelectorComponent::Attribute {
                name: "href".into(),
                operator: Some(AttributeOperator::Equals),
                value: Some("x".into()),
            },
            class("link"),
        ])];

        assert_eq!(
            titles.matching_detectors(&selectors),
            ["Attribute selector", "Child combinator", "Class selector", "ID selector", "Type selector"]
        );
    }

    #[test]
    fn chaining_needs_two_classes_in_one_compound() {
        let titles = titles();

        let chained = [selector(vec![class("a"), class("b")])];
        assert!(titles.matching_detectors(&chained).contains(&"Chaining selectors"));

        let descendant = [selector(vec![
            class("a"),
            SelectorComponent::Combinator(Combinator::Descendant),
            class("b"),
        ])];
        let matched = titles.matching_detectors(&descendant);
        assert!(!matched.contains(&"Chaining selectors"));
        assert!(matched.contains(&"Descendant combinator"));
    }

    #[test]
    fn class_attribute_is_not_an_attribute_selector() {
        let titles = titles();

        let selectors = [selector(vec![SelectorComponent::Attribute {
            name: "class".into(),
            operator: Some(AttributeOperator::Includes),
            value: Some("a".into()),
        }])];

        assert_eq!(titles.matching_detectors(&selectors), ["Class selector"]);
    }

    #[test]
    fn grouping_counts_selectors() {
        let titles = titles();

        let grouped = [
            selector(vec![SelectorComponent::Universal]),
            selector(vec![
                SelectorComponent::Tag("p".into()),
                SelectorComponent::Combinator(Combinator::GeneralSibling),
                SelectorComponent::Tag("p".into()),
                SelectorComponent::Combinator(Combinator::AdjacentSibling),
                SelectorComponent::Tag("p".into()),
            ]),
        ];

        assert_eq!(
            titles.matching_detectors(&grouped),
            [
                "Adjacent sibling combinator",
                "General sibling combinator",
                "Grouping selectors",
                "Type selector",
                "Universal selector *",
            ]
        );
    }
}
