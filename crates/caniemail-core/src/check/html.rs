//! Document walking.

use super::{check_declarations, FeatureChecker};
use crate::ast::{Attribute, Declaration, Document, Element, Node};
use crate::location::{LocationIndex, Position};
use crate::logging::targets;
use crate::titles::TitleIndexes;
use crate::Result;

/// Parser for the declaration list of a `style` attribute.
///
/// Positions on the returned declarations are ignored; inline issues are
/// located at the owning element.
pub trait InlineStyleParser {
    /// Parse an attribute value into declarations.
    fn parse_inline(&self, style: &str) -> Vec<Declaration>;
}

/// Check every element of a document.
///
/// `source` is the text the document was parsed from; element offsets are
/// resolved against it.
pub fn check_document(
    checker: &mut FeatureChecker<'_>,
    titles: &TitleIndexes,
    document: &Document,
    source: &str,
    inline: &dyn InlineStyleParser,
) -> Result<()> {
    let mut walker = HtmlWalker {
        checker,
        titles,
        index: LocationIndex::new(source),
        inline,
    };

    walker.visit(&document.children)
}

struct HtmlWalker<'w, 'a> {
    checker: &'w mut FeatureChecker<'a>,
    titles: &'w TitleIndexes,
    index: LocationIndex,
    inline: &'w dyn InlineStyleParser,
}

impl HtmlWalker<'_, '_> {
    fn visit(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            match node {
                Node::Element(element) => self.check_element(element)?,
                Node::Style(style) => self.check_element(&style.element)?,
                Node::Text(_) | Node::Comment(_) | Node::Doctype(_) => {}
            }
        }
        Ok(())
    }

    fn check_element(&mut self, element: &Element) -> Result<()> {
        let position = self.element_position(element);
        let position = position.as_ref();
        let html = &self.titles.html;

        tracing::trace!(target: targets::HTML, tag = %element.name, "element");

        self.checker
            .check(&html.matching_elements(&element.name), position)?;

        if !element.attributes.is_empty() {
            let names: Vec<&str> = element
                .attributes
                .iter()
                .map(|attr| attr.name.as_str())
                .collect();

            self.checker
                .check(&html.matching_attributes(&names), position)?;
            self.checker
                .check(&html.matching_element_attributes(element), position)?;

            if let Some(style) = element.attribute("style") {
                self.check_inline_style(style, position)?;
            }
        }

        self.visit(&element.children)
    }

    fn element_position(&self, element: &Element) -> Option<Position> {
        if let Some(position) = &element.position {
            return Some(position.clone());
        }
        self.index.span(element.start?, element.end?)
    }

    /// Check a `style` attribute through the declaration path.
    ///
    /// Every declaration is reported at the element's own position.
    fn check_inline_style(&mut self, style: &Attribute, element: Option<&Position>) -> Result<()> {
        let declarations = self.inline.parse_inline(&style.value);
        if declarations.is_empty() {
            return Ok(());
        }

        let declarations: Vec<Declaration> = declarations
            .into_iter()
            .map(|declaration| declaration.with_position(element.cloned()))
            .collect();

        check_declarations(self.checker, &self.titles.css, &declarations, None)
    }
}
