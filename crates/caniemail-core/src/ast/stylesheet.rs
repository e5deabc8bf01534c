//! Stylesheet tree.

use crate::ast::Selector;
use crate::location::Position;

/// A parsed stylesheet.
///
/// Positions are relative to the text the stylesheet was parsed from; the
/// walker remaps them when that text was extracted from a larger document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of top-level rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A top-level or nested stylesheet rule.
#[derive(Debug, Clone, PartialEq)]
pub enum CssRule {
    /// A qualified rule: `selectors { declarations }`.
    Style(StyleRule),
    /// An at-rule: `@name prelude;` or `@name prelude { ... }`.
    AtRule(AtRule),
    /// A comment between rules.
    Comment(Comment),
}

/// A qualified rule.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Comma-separated selectors, in source order.
    pub selectors: Vec<Selector>,
    pub declarations: Vec<DeclarationItem>,
    pub position: Option<Position>,
}

impl StyleRule {
    /// Iterate over declarations, skipping comments.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter_map(|item| match item {
            DeclarationItem::Declaration(declaration) => Some(declaration),
            DeclarationItem::Comment(_) => None,
        })
    }
}

/// An at-rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Lowercase keyword without `@` or vendor prefix (e.g. `keyframes`).
    pub name: String,
    /// Vendor prefix that was stripped from the keyword (e.g. `-webkit-`).
    pub vendor: Option<String>,
    pub prelude: String,
    /// Nested rules for block at-rules such as `@media` and `@keyframes`.
    pub rules: Vec<CssRule>,
    /// Declarations for block at-rules such as `@font-face` and `@page`.
    pub declarations: Vec<DeclarationItem>,
    pub position: Option<Position>,
}

/// An entry in a declaration block.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationItem {
    Declaration(Declaration),
    Comment(Comment),
}

/// A `property: value` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name as written.
    pub property: String,
    /// Trimmed value text, `None` when the declaration has no value.
    pub value: Option<String>,
    pub position: Option<Position>,
}

impl Declaration {
    /// Create an unpositioned declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            property: property.into(),
            value: (!value.is_empty()).then_some(value),
            position: None,
        }
    }

    /// Attach a position.
    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

/// A comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub position: Option<Position>,
}
