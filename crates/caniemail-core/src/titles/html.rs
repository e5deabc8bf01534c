//! HTML title indexes: elements, attributes and element/attribute pairs.

use regex::Regex;

use super::TitleIndex;
use crate::ast::Element;
use crate::{Error, Result};

/// Titles that describe an attribute-value shape rather than a literal tag.
const ELEMENT_PREDICATES: [(&str, fn(&Element) -> bool); 2] = [
    ("Anchor links", |element| {
        element.name == "a" && has_value(element, "href", |href| href.starts_with('#'))
    }),
    ("mailto: links", |element| {
        element.name == "a" && has_value(element, "href", |href| href.starts_with("mailto:"))
    }),
];

fn has_value(element: &Element, attribute: &str, predicate: impl Fn(&str) -> bool) -> bool {
    element
        .attribute(attribute)
        .is_some_and(|attr| predicate(attr.value.trim()))
}

/// Matcher for an element/attribute pair title.
#[derive(Debug, Clone)]
pub enum ElementAttributeMatcher {
    /// `<tag attr>` or `<tag attr="value">`.
    Literal {
        tag: String,
        attribute: String,
        value: Option<String>,
    },
    /// A named shape such as `Anchor links`.
    Predicate(fn(&Element) -> bool),
}

impl ElementAttributeMatcher {
    /// Check an element against this matcher.
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Literal {
                tag,
                attribute,
                value,
            } => {
                *tag == element.name
                    && element.attribute(attribute).is_some_and(|attr| match value {
                        Some(expected) => attr.value.eq_ignore_ascii_case(expected),
                        None => true,
                    })
            }
            Self::Predicate(predicate) => predicate(element),
        }
    }
}

/// Indexes over the HTML-category titles.
#[derive(Debug, Clone)]
pub struct HtmlTitles {
    /// `<h1> to <h6> elements` → `[h1, ..., h6]`.
    pub elements: TitleIndex<Vec<String>>,
    /// `srcset and sizes attributes` → `[srcset, sizes]`.
    pub attributes: TitleIndex<Vec<String>>,
    /// `<input type="checkbox">` → literal matcher.
    pub element_attributes: TitleIndex<ElementAttributeMatcher>,
}

impl HtmlTitles {
    /// Classify HTML titles.
    pub fn build<'a>(titles: impl IntoIterator<Item = &'a str> + Clone) -> Result<Self> {
        let tag = compile(r"<([a-z][a-z0-9]*)>")?;
        let heading_range = compile(r"<h([1-6])> to <h([1-6])>")?;
        let attribute_name = compile(r"^[a-z][a-z0-9-]*$")?;
        let literal_pair =
            compile(r#"^<([a-z][a-z0-9]*)\s+([a-z][a-z0-9-]*)(?:="([^"]*)")?>$"#)?;

        Ok(Self {
            elements: TitleIndex::build(titles.clone(), |title| {
                Ok(classify_elements(&tag, &heading_range, title))
            })?,
            attributes: TitleIndex::build(titles.clone(), |title| {
                classify_attributes(&attribute_name, title)
            })?,
            element_attributes: TitleIndex::build(titles, |title| {
                Ok(classify_element_attribute(&literal_pair, title))
            })?,
        })
    }

    /// Element titles covering a tag name.
    pub fn matching_elements(&self, tag: &str) -> Vec<&str> {
        self.elements.matching(|tags| tags.iter().any(|t| t == tag))
    }

    /// Attribute titles covering any of the given attribute names.
    pub fn matching_attributes(&self, names: &[&str]) -> Vec<&str> {
        self.attributes
            .matching(|attributes| attributes.iter().any(|a| names.contains(&a.as_str())))
    }

    /// Element/attribute pair titles matching an element.
    pub fn matching_element_attributes(&self, element: &Element) -> Vec<&str> {
        self.element_attributes
            .matching(|matcher| matcher.matches(element))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::invalid_title("html", pattern, e.to_string()))
}

fn classify_elements(tag: &Regex, heading_range: &Regex, title: &str) -> Option<Vec<String>> {
    if let Some(caps) = heading_range.captures(title) {
        let from: u8 = caps[1].parse().ok()?;
        let to: u8 = caps[2].parse().ok()?;
        return Some((from.min(to)..=from.max(to)).map(|n| format!("h{n}")).collect());
    }

    let tags: Vec<String> = tag
        .captures_iter(title)
        .map(|caps| caps[1].to_string())
        .collect();

    (!tags.is_empty()).then_some(tags)
}

fn classify_attributes(attribute_name: &Regex, title: &str) -> Result<Option<Vec<String>>> {
    let Some(list) = title
        .strip_suffix(" attributes")
        .or_else(|| title.strip_suffix(" attribute"))
    else {
        return Ok(None);
    };

    list.split(", ")
        .flat_map(|part| part.split(" and "))
        .map(|name| {
            let name = name.trim();
            if attribute_name.is_match(name) {
                Ok(name.to_string())
            } else {
                Err(Error::invalid_title(
                    "attribute",
                    title,
                    format!("'{name}' is not an attribute name"),
                ))
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn classify_element_attribute(literal_pair: &Regex, title: &str) -> Option<ElementAttributeMatcher> {
    if let Some(&(_, predicate)) = ELEMENT_PREDICATES.iter().find(|(name, _)| *name == title) {
        return Some(ElementAttributeMatcher::Predicate(predicate));
    }

    literal_pair
        .captures(title)
        .map(|caps| ElementAttributeMatcher::Literal {
            tag: caps[1].to_string(),
            attribute: caps[2].to_string(),
            value: caps.get(3).map(|value| value.as_str().to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fixtures, Category};

    fn titles() -> HtmlTitles {
        let catalog = fixtures::catalog();
        HtmlTitles::build(catalog.titles(Category::Html)).unwrap()
    }

    #[test]
    fn classifies_elements() {
        let titles = titles();

        assert_eq!(titles.matching_elements("video"), ["<video> element"]);
        assert_eq!(titles.matching_elements("h4"), ["<h1> to <h6> elements"]);
        assert!(titles.matching_elements("h7").is_empty());
        assert!(titles.matching_elements("span").is_empty());
        assert!(titles.elements.get("<input type=\"checkbox\">").is_none());
    }

    #[test]
    fn classifies_attributes() {
        let titles = titles();

        assert_eq!(
            titles.attributes.get("srcset and sizes attributes").unwrap(),
            &["srcset", "sizes"]
        );
        assert_eq!(titles.matching_attributes(&["class", "sizes"]), ["srcset and sizes attributes"]);
        assert_eq!(titles.matching_attributes(&["lang", "width"]), ["width attribute", "lang attribute"]);
    }

    #[test]
    fn splits_attribute_lists() {
        let titles = HtmlTitles::build(["align, valign and bgcolor attributes"]).unwrap();

        assert_eq!(
            titles.attributes.get("align, valign and bgcolor attributes").unwrap(),
            &["align", "valign", "bgcolor"]
        );
    }

    #[test]
    fn invalid_attribute_name_is_fatal() {
        let result = HtmlTitles::build(["Some thing attribute"]);

        assert!(matches!(
            result,
            Err(Error::InvalidTitle { index: "attribute", .. })
        ));
    }

    #[test]
    fn matches_literal_pairs() {
        let titles = titles();

        let checkbox = Element::new("input").with_attribute("type", "checkbox");
        assert_eq!(titles.matching_element_attributes(&checkbox), ["<input type=\"checkbox\">"]);

        let text = Element::new("input").with_attribute("type", "text");
        assert!(titles.matching_element_attributes(&text).is_empty());
    }

    #[test]
    fn matches_link_shapes() {
        let titles = titles();

        let anchor = Element::new("a").with_attribute("href", "#header");
        assert_eq!(titles.matching_element_attributes(&anchor), ["Anchor links"]);

        let mailto = Element::new("a").with_attribute("href", "mailto:hi@example.com");
        assert_eq!(titles.matching_element_attributes(&mailto), ["mailto: links"]);

        let external = Element::new("a").with_attribute("href", "https://example.com");
        assert!(titles.matching_element_attributes(&external).is_empty());

        let div = Element::new("div").with_attribute("href", "#header");
        assert!(titles.matching_element_attributes(&div).is_empty());
    }
}
