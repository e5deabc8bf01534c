//! `style` attribute parsing.

use caniemail_core::ast::{Declaration, DeclarationItem};
use caniemail_core::check::InlineStyleParser;
use caniemail_core::LocationIndex;
use cssparser::{Parser, ParserInput};

use super::css_parser::parse_declaration_list;

/// Parse a `style` attribute value into its declarations.
///
/// Positions are relative to the value: line 1, column 1 is its first
/// character.
pub fn parse_inline_declarations(style: &str) -> Vec<Declaration> {
    let index = LocationIndex::new(style);
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);

    parse_declaration_list(&mut parser, &index)
        .into_iter()
        .filter_map(|item| match item {
            DeclarationItem::Declaration(declaration) => Some(declaration),
            DeclarationItem::Comment(_) => None,
        })
        .collect()
}

/// The [`InlineStyleParser`] used by [`crate::check`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineParser;

impl InlineStyleParser for InlineParser {
    fn parse_inline(&self, style: &str) -> Vec<Declaration> {
        parse_inline_declarations(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caniemail_core::{Point, Position};

    #[test]
    fn positions_are_relative_to_the_value() {
        let declarations = InlineParser.parse_inline("width: 1px; display: flex");

        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].property, "width");
        assert_eq!(
            declarations[0].position,
            Some(Position::new(Point::new(1, 1), Point::new(1, 10)))
        );
        assert_eq!(declarations[1].value.as_deref(), Some("flex"));
        assert_eq!(
            declarations[1].position,
            Some(Position::new(Point::new(1, 13), Point::new(1, 25)))
        );
    }

    #[test]
    fn empty_and_comment_only_values() {
        assert!(parse_inline_declarations("").is_empty());
        assert!(parse_inline_declarations(" ; /* none */ ").is_empty());
    }

    #[test]
    fn important_is_part_of_the_value() {
        let declarations = parse_inline_declarations("color: red !important;");
        assert_eq!(declarations[0].value.as_deref(), Some("red !important"));
    }
}
