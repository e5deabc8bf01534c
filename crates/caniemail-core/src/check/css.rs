//! Stylesheet walking.

use super::FeatureChecker;
use crate::ast::{CssRule, Declaration, Selector, Stylesheet};
use crate::location::{adjust_position, Point, Position};
use crate::logging::targets;
use crate::titles::{CssTitles, SelectorTitles, TitleIndexes};
use crate::Result;

/// At-rule keywords the walker reports on.
pub const AT_RULES: [&str; 12] = [
    "charset",
    "custom-media",
    "document",
    "font-face",
    "host",
    "import",
    "keyframes",
    "keyframe",
    "media",
    "namespace",
    "page",
    "supports",
];

/// Check every top-level rule of a stylesheet.
///
/// `offset` is the point in the enclosing document where the stylesheet text
/// starts; `None` when the stylesheet is the document. At-rules are collected
/// over the whole stylesheet and checked once, without a position.
pub fn check_stylesheet(
    checker: &mut FeatureChecker<'_>,
    titles: &TitleIndexes,
    stylesheet: &Stylesheet,
    offset: Option<Point>,
) -> Result<()> {
    let mut at_rules: Vec<&str> = vec![];

    for rule in &stylesheet.rules {
        match rule {
            CssRule::Style(rule) => {
                check_declarations(checker, &titles.css, rule.declarations(), offset)?;
                check_selectors(
                    checker,
                    &titles.selectors,
                    &rule.selectors,
                    rule.position.as_ref(),
                    offset,
                )?;
            }
            CssRule::AtRule(rule) if AT_RULES.contains(&rule.name.as_str()) => {
                at_rules.push(&rule.name);
            }
            CssRule::AtRule(rule) => {
                tracing::trace!(target: targets::CSS, name = %rule.name, "at-rule ignored");
            }
            CssRule::Comment(_) => {}
        }
    }

    let matched = titles.css.matching_at_rules(&at_rules);
    checker.check(&matched, None)
}

/// Check declarations at their own positions, remapped by `offset`.
///
/// Property titles come first, then value-derived titles (functions,
/// keywords, units), then property/value pairs.
pub fn check_declarations<'d>(
    checker: &mut FeatureChecker<'_>,
    titles: &CssTitles,
    declarations: impl IntoIterator<Item = &'d Declaration>,
    offset: Option<Point>,
) -> Result<()> {
    for declaration in declarations {
        let position = adjust_position(declaration.position.as_ref(), offset);
        let position = position.as_ref();
        let property = declaration.property.as_str();

        checker.check(&titles.matching_properties(property), position)?;

        if let Some(value) = &declaration.value {
            checker.check(&titles.matching_functions(value), position)?;
            checker.check(&titles.matching_keywords(value), position)?;
            checker.check(&titles.matching_units(value), position)?;
            checker.check(&titles.matching_property_values(property, value), position)?;
        }
    }

    Ok(())
}

/// Check a rule's selector list at the rule position.
///
/// Pseudo-selectors are matched per raw selector; structural features are
/// detected once on the whole list.
pub fn check_selectors(
    checker: &mut FeatureChecker<'_>,
    titles: &SelectorTitles,
    selectors: &[Selector],
    position: Option<&Position>,
    offset: Option<Point>,
) -> Result<()> {
    let position = adjust_position(position, offset);

    for selector in selectors {
        checker.check(&titles.matching_pseudo(&selector.text), position.as_ref())?;
    }
    checker.check(&titles.matching_detectors(selectors), position.as_ref())
}
