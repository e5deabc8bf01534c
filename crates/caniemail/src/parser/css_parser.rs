//! Stylesheet parser built on the `cssparser` tokenizer.
//!
//! The parser is lenient: a rule or declaration that fails to parse is
//! logged and skipped, and parsing resumes at the next rule. Every node
//! carries a position resolved from its byte offsets, with inclusive end
//! points.

use caniemail_core::ast::{
    AtRule, Comment, CssRule, Declaration, DeclarationItem, Selector, StyleRule, Stylesheet,
};
use caniemail_core::{LocationIndex, Position};
use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use super::parse_selector_list;
use crate::logging::targets;

/// How the preludes of qualified rules in a block are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorMode {
    /// Parse preludes as selector lists.
    Parsed,
    /// Keep preludes as raw comma-separated text (`@keyframes` stops).
    Raw,
}

/// Parse a stylesheet.
///
/// Comments between rules, at-rules and qualified rules are kept in source
/// order. Block bodies of `@media`, `@supports` and similar conditional rules
/// are parsed into nested rules, `@font-face` and `@page` bodies into
/// declarations, and `@keyframes` stops into rules with unparsed selectors.
///
/// # Error Recovery
///
/// Parsing never fails. A selector list that cannot be parsed is kept as raw
/// text with no components; a malformed declaration is skipped up to the
/// next `;`. Both are logged via `tracing::warn!`.
///
/// # Example
///
/// ```ignore
/// let stylesheet = parse_css(".test { flex-direction: column; }");
/// assert_eq!(stylesheet.len(), 1);
/// ```
pub fn parse_css(css: &str) -> Stylesheet {
    let index = LocationIndex::new(css);
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let rules = parse_rule_list(&mut parser, &index, SelectorMode::Parsed);

    tracing::debug!(target: targets::CSS, rules = rules.len(), "parsed stylesheet");
    Stylesheet { rules }
}

fn parse_rule_list<'i>(
    parser: &mut Parser<'i, '_>,
    index: &LocationIndex,
    mode: SelectorMode,
) -> Vec<CssRule> {
    let mut rules = vec![];

    loop {
        let state = parser.state();
        let start = parser.position().byte_index();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) | Token::CDO | Token::CDC | Token::Semicolon => {}
            Token::Comment(text) => rules.push(CssRule::Comment(Comment {
                text: text.to_string(),
                position: span(index, start, parser.position().byte_index()),
            })),
            Token::AtKeyword(keyword) => {
                rules.push(CssRule::AtRule(parse_at_rule(parser, index, &keyword, start)));
            }
            _ => {
                parser.reset(&state);
                match parse_style_rule(parser, index, mode, start) {
                    Ok(rule) => rules.push(CssRule::Style(rule)),
                    Err(e) => {
                        tracing::warn!(target: targets::CSS, offset = start, "CSS parse error: {:?}", e.kind);
                    }
                }
            }
        }
    }

    rules
}

/// Parse a qualified rule: `selectors { declarations }`.
fn parse_style_rule<'i>(
    parser: &mut Parser<'i, '_>,
    index: &LocationIndex,
    mode: SelectorMode,
    start: usize,
) -> Result<StyleRule, CssParseError<'i, ()>> {
    let prelude =
        parser.parse_until_before::<_, _, ()>(Delimiter::CurlyBracketBlock, slice_rest)?;

    let token = parser.next().cloned();
    match token {
        Ok(Token::CurlyBracketBlock) => {}
        Ok(token) => return Err(parser.new_unexpected_token_error(token)),
        Err(e) => return Err(e.into()),
    }

    let declarations = parser
        .parse_nested_block::<_, _, ()>(|block| Ok(parse_declaration_list(block, index)))?;

    let selectors = match mode {
        SelectorMode::Raw => raw_selectors(prelude),
        SelectorMode::Parsed => parse_selector_list(prelude).unwrap_or_else(|e| {
            tracing::warn!(target: targets::CSS, "{e}");
            raw_selectors(prelude)
        }),
    };

    Ok(StyleRule {
        selectors,
        declarations,
        position: span(index, start, parser.position().byte_index()),
    })
}

/// Parse an at-rule after its keyword token.
fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    index: &LocationIndex,
    keyword: &str,
    start: usize,
) -> AtRule {
    let keyword = keyword.to_ascii_lowercase();
    let (vendor, name) = split_vendor_prefix(&keyword);

    let prelude = parser
        .parse_until_before::<_, _, ()>(
            Delimiter::CurlyBracketBlock | Delimiter::Semicolon,
            slice_rest,
        )
        .map(|prelude| prelude.trim().to_string())
        .unwrap_or_default();

    let mut rule = AtRule {
        name: name.to_string(),
        vendor: vendor.map(str::to_string),
        prelude,
        rules: vec![],
        declarations: vec![],
        position: None,
    };

    if matches!(parser.next(), Ok(Token::CurlyBracketBlock)) {
        match name {
            "media" | "supports" | "document" | "container" | "layer" | "host" => {
                rule.rules = parser
                    .parse_nested_block::<_, _, ()>(|block| {
                        Ok(parse_rule_list(block, index, SelectorMode::Parsed))
                    })
                    .unwrap_or_default();
            }
            "keyframes" => {
                rule.rules = parser
                    .parse_nested_block::<_, _, ()>(|block| {
                        Ok(parse_rule_list(block, index, SelectorMode::Raw))
                    })
                    .unwrap_or_default();
            }
            "font-face" | "page" | "viewport" | "counter-style" => {
                rule.declarations = parser
                    .parse_nested_block::<_, _, ()>(|block| {
                        Ok(parse_declaration_list(block, index))
                    })
                    .unwrap_or_default();
            }
            // The next token read skips the unread block.
            _ => {}
        }
    }

    rule.position = span(index, start, parser.position().byte_index());
    rule
}

/// Parse the contents of a declaration block.
///
/// Also used for `style` attribute values, which are a bare declaration
/// list.
pub(crate) fn parse_declaration_list<'i>(
    parser: &mut Parser<'i, '_>,
    index: &LocationIndex,
) -> Vec<DeclarationItem> {
    let mut items = vec![];

    loop {
        let start = parser.position().byte_index();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) | Token::Semicolon => {}
            Token::Comment(text) => items.push(DeclarationItem::Comment(Comment {
                text: text.to_string(),
                position: span(index, start, parser.position().byte_index()),
            })),
            Token::Ident(property) => match parse_declaration_value(parser) {
                Ok((value, end)) => items.push(DeclarationItem::Declaration(Declaration {
                    property: property.to_string(),
                    value,
                    position: index.span(start, end),
                })),
                Err(e) => {
                    tracing::warn!(
                        target: targets::CSS,
                        property = %property,
                        "skipping declaration: {:?}",
                        e.kind
                    );
                }
            },
            token => {
                tracing::warn!(target: targets::CSS, offset = start, "unexpected token in declaration block: {:?}", token);
                let _ = parser.parse_until_after::<_, _, ()>(Delimiter::Semicolon, consume_all);
            }
        }
    }

    items
}

/// Parse `: value` through the next `;`.
///
/// Returns the trimmed value and the offset of its last byte, or of the
/// colon when the value is empty.
fn parse_declaration_value<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<(Option<String>, usize), CssParseError<'i, ()>> {
    parser.parse_until_after(Delimiter::Semicolon, |p| -> Result<_, CssParseError<'i, ()>> {
        p.expect_colon()?;
        let value_start = p.position().byte_index();
        let raw = slice_rest::<()>(p)?;

        let value = raw.trim();
        let end = if value.is_empty() {
            value_start - 1
        } else {
            value_start + raw.trim_end().len() - 1
        };

        Ok(((!value.is_empty()).then(|| value.to_string()), end))
    })
}

/// Consume the rest of the current block or delimited range.
fn consume_all<'i, E>(parser: &mut Parser<'i, '_>) -> Result<(), CssParseError<'i, E>> {
    while parser.next_including_whitespace_and_comments().is_ok() {}
    Ok(())
}

/// Consume the rest of the current range and return its source text.
fn slice_rest<'i, E>(parser: &mut Parser<'i, '_>) -> Result<&'i str, CssParseError<'i, E>> {
    let start = parser.position();
    consume_all(parser)?;
    Ok(parser.slice_from(start))
}

fn raw_selectors(prelude: &str) -> Vec<Selector> {
    prelude
        .split(',')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| Selector::new(text, vec![]))
        .collect()
}

/// Split `-webkit-keyframes` into `-webkit-` and `keyframes`.
fn split_vendor_prefix(keyword: &str) -> (Option<&str>, &str) {
    if let Some(rest) = keyword.strip_prefix('-') {
        if let Some(dash) = rest.find('-') {
            let split = dash + 2;
            return (Some(&keyword[..split]), &keyword[split..]);
        }
    }
    (None, keyword)
}

/// Position of the byte range `[start, end)`.
fn span(index: &LocationIndex, start: usize, end: usize) -> Option<Position> {
    index.span(start, end.saturating_sub(1).max(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use caniemail_core::ast::SelectorComponent;
    use caniemail_core::Point;

    fn style(rule: &CssRule) -> &StyleRule {
        match rule {
            CssRule::Style(rule) => rule,
            other => panic!("expected style rule, got {other:?}"),
        }
    }

    fn at_rule(rule: &CssRule) -> &AtRule {
        match rule {
            CssRule::AtRule(rule) => rule,
            other => panic!("expected at-rule, got {other:?}"),
        }
    }

    fn pos(start: (u32, u32), end: (u32, u32)) -> Option<Position> {
        Some(Position::new(Point::new(start.0, start.1), Point::new(end.0, end.1)))
    }

    #[test]
    fn parse_simple_rule() {
        let stylesheet = parse_css(".test { flex-direction: column; }");
        assert_eq!(stylesheet.len(), 1);

        let rule = style(&stylesheet.rules[0]);
        assert_eq!(rule.selectors.len(), 1);
        assert_eq!(rule.selectors[0].text, ".test");
        assert_eq!(rule.selectors[0].components, [SelectorComponent::Class("test".into())]);
        assert_eq!(rule.position, pos((1, 1), (1, 33)));

        let declarations: Vec<_> = rule.declarations().collect();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].property, "flex-direction");
        assert_eq!(declarations[0].value.as_deref(), Some("column"));
        assert_eq!(declarations[0].position, pos((1, 9), (1, 30)));
    }

    #[test]
    fn multi_line_positions() {
        let stylesheet = parse_css("p {\n  color: red;\n}");
        let rule = style(&stylesheet.rules[0]);

        assert_eq!(rule.position, pos((1, 1), (3, 1)));
        let declaration = rule.declarations().next().unwrap();
        assert_eq!(declaration.position, pos((2, 3), (2, 12)));
    }

    #[test]
    fn parse_comments_and_at_rules() {
        let css = "/* head */\n@media screen and (max-width: 600px) {\n  .a { color: red }\n}\n@import url(x.css);\np, h1 > span { margin: 0 }";
        let stylesheet = parse_css(css);
        assert_eq!(stylesheet.len(), 4);

        match &stylesheet.rules[0] {
            CssRule::Comment(comment) => {
                assert_eq!(comment.text, " head ");
                assert_eq!(comment.position, pos((1, 1), (1, 10)));
            }
            other => panic!("expected comment, got {other:?}"),
        }

        let media = at_rule(&stylesheet.rules[1]);
        assert_eq!(media.name, "media");
        assert_eq!(media.prelude, "screen and (max-width: 600px)");
        assert_eq!(media.rules.len(), 1);
        assert_eq!(style(&media.rules[0]).selectors[0].text, ".a");
        assert_eq!(media.position, pos((2, 1), (4, 1)));

        let import = at_rule(&stylesheet.rules[2]);
        assert_eq!(import.name, "import");
        assert_eq!(import.prelude, "url(x.css)");
        assert!(import.rules.is_empty());

        let rule = style(&stylesheet.rules[3]);
        let texts: Vec<_> = rule.selectors.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["p", "h1 > span"]);
    }

    #[test]
    fn vendor_prefixed_keyframes() {
        let stylesheet =
            parse_css("@-webkit-keyframes pulse { from { opacity: 0 } 50% { opacity: 1 } }");
        let keyframes = at_rule(&stylesheet.rules[0]);

        assert_eq!(keyframes.name, "keyframes");
        assert_eq!(keyframes.vendor.as_deref(), Some("-webkit-"));
        assert_eq!(keyframes.prelude, "pulse");

        let stops: Vec<_> = keyframes
            .rules
            .iter()
            .map(|rule| style(rule).selectors[0].clone())
            .collect();
        assert_eq!(stops, [Selector::new("from", vec![]), Selector::new("50%", vec![])]);
    }

    #[test]
    fn font_face_keeps_declarations() {
        let stylesheet = parse_css("@font-face { font-family: Foo; src: url(foo.woff) }");
        let font_face = at_rule(&stylesheet.rules[0]);

        let properties: Vec<_> = font_face
            .declarations
            .iter()
            .filter_map(|item| match item {
                DeclarationItem::Declaration(d) => Some(d.property.as_str()),
                DeclarationItem::Comment(_) => None,
            })
            .collect();
        assert_eq!(properties, ["font-family", "src"]);
    }

    #[test]
    fn malformed_declarations_are_skipped() {
        let stylesheet = parse_css("p { color red; width: 1px; height:; }");
        let rule = style(&stylesheet.rules[0]);

        let declarations: Vec<_> = rule.declarations().collect();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].property, "width");
        assert_eq!(declarations[1].property, "height");
        assert_eq!(declarations[1].value, None);
    }

    #[test]
    fn unparseable_selector_is_kept_raw() {
        let stylesheet = parse_css("a!b, c { color: red }");
        let rule = style(&stylesheet.rules[0]);

        assert_eq!(rule.selectors, [Selector::new("a!b", vec![]), Selector::new("c", vec![])]);
        assert_eq!(rule.declarations().count(), 1);
    }

    #[test]
    fn declaration_comments_are_kept() {
        let stylesheet = parse_css("p { /* note */ color: red }");
        let rule = style(&stylesheet.rules[0]);

        assert!(matches!(&rule.declarations[0], DeclarationItem::Comment(c) if c.text == " note "));
        assert_eq!(rule.declarations().count(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(parse_css("").is_empty());
        assert!(parse_css("  \n ").is_empty());
    }

    #[test]
    fn vendor_prefix_split() {
        assert_eq!(split_vendor_prefix("-moz-document"), (Some("-moz-"), "document"));
        assert_eq!(split_vendor_prefix("media"), (None, "media"));
        assert_eq!(split_vendor_prefix("-odd"), (None, "-odd"));
    }
}
