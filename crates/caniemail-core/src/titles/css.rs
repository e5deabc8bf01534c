//! CSS title indexes: at-rules, functions, keywords, properties,
//! property/value pairs and units.

use std::collections::HashSet;

use regex::Regex;

use super::TitleIndex;
use crate::{Error, Result};

const CUSTOM_PROPERTIES: &str = "CSS Variables (Custom Properties)";
const INSET_PROPERTIES: &str = "left, right, top, bottom";

/// Precompiled matcher for one unit title.
#[derive(Debug, Clone)]
pub struct UnitPattern {
    pub unit: String,
    regex: Regex,
}

impl UnitPattern {
    fn new(title: &str, unit: &str) -> Result<Self> {
        // `initial` is a keyword rather than a suffix, so it must stand alone.
        let pattern = if unit == "initial" {
            r"\binitial\b".to_string()
        } else {
            format!(r"\d{}", regex::escape(unit))
        };

        let regex = Regex::new(&pattern)
            .map_err(|e| Error::invalid_title("unit", title, e.to_string()))?;

        Ok(Self {
            unit: unit.to_string(),
            regex,
        })
    }

    /// Check whether a declaration value uses this unit.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Indexes over the CSS-category titles.
#[derive(Debug, Clone)]
pub struct CssTitles {
    /// `@media` → `media`.
    pub at_rules: TitleIndex<String>,
    /// `calc()` → `calc`.
    pub functions: TitleIndex<String>,
    /// `inherit keyword` → `inherit`.
    pub keywords: TitleIndex<String>,
    /// `margin-inline-start property` → `[margin-inline-start]`.
    pub properties: TitleIndex<Vec<String>>,
    /// `display:flex` → `(display, flex)`.
    pub property_values: TitleIndex<(String, String)>,
    /// `rem unit` → matcher for `\drem`.
    pub units: TitleIndex<UnitPattern>,
    function_call: Regex,
}

impl CssTitles {
    /// Classify CSS titles.
    pub fn build<'a>(titles: impl IntoIterator<Item = &'a str> + Clone) -> Result<Self> {
        let function_title = compile(r"([a-z-]+)\(\)")?;
        let property_name = compile(r"^[a-z-]+$")?;
        let property_value = compile(r"([a-z-]+):\s*([a-z-]+)")?;

        Ok(Self {
            at_rules: TitleIndex::build(titles.clone(), |title| {
                Ok(title.strip_prefix('@').map(str::to_string))
            })?,
            functions: TitleIndex::build(titles.clone(), |title| {
                classify_function(&function_title, title)
            })?,
            keywords: TitleIndex::build(titles.clone(), |title| {
                Ok(title.strip_suffix(" keyword").map(str::to_string))
            })?,
            properties: TitleIndex::build(titles.clone(), |title| {
                Ok(classify_property(&property_name, title))
            })?,
            property_values: TitleIndex::build(titles.clone(), |title| {
                Ok(property_value
                    .captures(title)
                    .map(|caps| (caps[1].to_string(), caps[2].to_string())))
            })?,
            units: TitleIndex::build(titles, |title| {
                title
                    .strip_suffix(" unit")
                    .map(|unit| UnitPattern::new(title, unit))
                    .transpose()
            })?,
            function_call: compile(r"([a-z-]+)\(")?,
        })
    }

    /// At-rule titles for the keywords seen in a stylesheet.
    pub fn matching_at_rules(&self, keywords: &[&str]) -> Vec<&str> {
        self.at_rules
            .matching(|keyword| keywords.contains(&keyword.as_str()))
    }

    /// Function titles for every `name(` call in a value.
    ///
    /// Each function name is claimed by the first title that maps to it.
    pub fn matching_functions(&self, value: &str) -> Vec<&str> {
        let mut called: HashSet<&str> = self
            .function_call
            .captures_iter(value)
            .filter_map(|caps| caps.get(1))
            .map(|name| name.as_str())
            .collect();

        self.functions
            .matching(|name| called.remove(name.as_str()))
    }

    /// Keyword titles whose keyword occurs in a value.
    pub fn matching_keywords(&self, value: &str) -> Vec<&str> {
        self.keywords
            .matching(|keyword| value.contains(keyword.as_str()))
    }

    /// Property titles covering a property name.
    pub fn matching_properties(&self, property: &str) -> Vec<&str> {
        self.properties
            .matching(|names| names.iter().any(|name| name.eq_ignore_ascii_case(property)))
    }

    /// Property/value pair titles for a declaration.
    pub fn matching_property_values(&self, property: &str, value: &str) -> Vec<&str> {
        let value = value.trim();
        self.property_values
            .matching(|(name, expected)| name.eq_ignore_ascii_case(property) && expected == value)
    }

    /// Unit titles whose unit is used in a value.
    pub fn matching_units(&self, value: &str) -> Vec<&str> {
        self.units.matching(|pattern| pattern.is_match(value))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::invalid_title("css", pattern, e.to_string()))
}

fn classify_function(function_title: &Regex, title: &str) -> Result<Option<String>> {
    if title.starts_with(':') {
        return Ok(None);
    }
    if title == CUSTOM_PROPERTIES {
        return Ok(Some("var".to_string()));
    }
    if !title.contains("()") {
        return Ok(None);
    }

    match function_title.captures(title) {
        Some(caps) => Ok(Some(caps[1].to_string())),
        None => Err(Error::invalid_title(
            "function",
            title,
            "could not determine the function name",
        )),
    }
}

fn classify_property(property_name: &Regex, title: &str) -> Option<Vec<String>> {
    if title == INSET_PROPERTIES {
        return Some(
            ["left", "right", "top", "bottom"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        );
    }

    let trimmed = title.trim();
    let trimmed = trimmed.strip_suffix(" shorthand").unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(" property").unwrap_or(trimmed);

    property_name
        .is_match(trimmed)
        .then(|| vec![trimmed.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fixtures, Category};

    fn titles() -> CssTitles {
        let catalog = fixtures::catalog();
        CssTitles::build(catalog.titles(Category::Css)).unwrap()
    }

    #[test]
    fn classifies_at_rules() {
        let titles = titles();

        assert_eq!(titles.at_rules.get("@font-face").map(String::as_str), Some("font-face"));
        assert_eq!(titles.matching_at_rules(&["media", "import"]), ["@media", "@import"]);
        assert!(titles.matching_at_rules(&["keyframes"]).is_empty());
    }

    #[test]
    fn classifies_functions() {
        let titles = titles();

        assert_eq!(titles.functions.get("calc()").map(String::as_str), Some("calc"));
        assert_eq!(titles.functions.get(CUSTOM_PROPERTIES).map(String::as_str), Some("var"));
        assert_eq!(titles.functions.get(":hover"), None);

        assert_eq!(titles.matching_functions("calc(100% - var(--gap))"), ["calc()", CUSTOM_PROPERTIES]);
        assert!(titles.matching_functions("calc").is_empty());
    }

    #[test]
    fn unnamed_function_title_is_fatal() {
        let result = CssTitles::build(["Math () functions"]);

        assert!(matches!(
            result,
            Err(Error::InvalidTitle { index: "function", .. })
        ));
    }

    #[test]
    fn classifies_properties() {
        let titles = titles();

        assert_eq!(titles.matching_properties("flex-direction"), ["flex-direction"]);
        assert_eq!(titles.matching_properties("margin-inline-start"), ["margin-inline-start property"]);
        assert_eq!(titles.matching_properties("top"), [INSET_PROPERTIES]);
        assert!(titles.matching_properties("flex").is_empty());
        assert!(titles.properties.get("display:flex").is_none());
        assert!(titles.properties.get("!important").is_none());
    }

    #[test]
    fn shorthand_suffix_is_stripped() {
        let titles = CssTitles::build(["  border shorthand "]).unwrap();

        assert_eq!(titles.matching_properties("border"), ["  border shorthand "]);
    }

    #[test]
    fn matches_property_value_pairs() {
        let titles = titles();

        assert_eq!(titles.matching_property_values("display", " flex "), ["display:flex"]);
        assert!(titles.matching_property_values("display", "inline-flex").is_empty());
        assert!(titles.matching_property_values("position", "flex").is_empty());
    }

    #[test]
    fn property_names_ignore_case() {
        let titles = titles();

        assert_eq!(titles.matching_properties("FLEX-Direction"), ["flex-direction"]);
        assert_eq!(titles.matching_property_values("DISPLAY", "flex"), ["display:flex"]);
    }

    #[test]
    fn matches_keywords_by_substring() {
        let titles = titles();

        assert_eq!(titles.matching_keywords("inherit"), ["inherit keyword"]);
        assert!(titles.matching_keywords("red").is_empty());
    }

    #[test]
    fn matches_units_after_digits() {
        let titles = titles();

        assert_eq!(titles.matching_units("1rem"), ["rem unit"]);
        assert_eq!(titles.matching_units("0 50vw"), ["vw unit"]);
        assert!(titles.matching_units("rem").is_empty());
    }

    #[test]
    fn initial_unit_is_a_whole_word() {
        let titles = CssTitles::build(["initial unit"]).unwrap();

        assert_eq!(titles.matching_units("initial"), ["initial unit"]);
        assert!(titles.matching_units("initialize").is_empty());
    }
}
