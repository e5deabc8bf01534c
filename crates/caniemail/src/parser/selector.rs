//! Selector list parsing.

use caniemail_core::ast::{AttributeOperator, Combinator, Selector, SelectorComponent};
use cssparser::{Delimiter, ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, Token};

use crate::{Error, Result};

type SelectorResult<'i, T> = std::result::Result<T, CssParseError<'i, String>>;

/// Parse a comma-separated selector list into structured selectors.
///
/// Each selector keeps its trimmed source text next to the component
/// sequence. Whitespace between compound selectors becomes a descendant
/// combinator.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] naming the first selector that could not
/// be parsed.
///
/// # Example
///
/// ```ignore
/// let selectors = parse_selector_list("div > a.link, p")?;
/// assert_eq!(selectors.len(), 2);
/// ```
pub fn parse_selector_list(text: &str) -> Result<Vec<Selector>> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut selectors = vec![];

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let start = parser.position();
        let result = parser.parse_until_before(Delimiter::Comma, parse_components);
        let raw = parser.slice_from(start).trim();

        match result {
            Ok(components) => selectors.push(Selector::new(raw, components)),
            Err(e) => return Err(Error::invalid_selector(raw, describe(e))),
        }

        // Comma or end of input
        if parser.next().is_err() {
            break;
        }
    }

    Ok(selectors)
}

fn describe(error: CssParseError<'_, String>) -> String {
    match error.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(kind) => format!("{kind:?}"),
    }
}

/// Parse one complex selector.
fn parse_components<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, Vec<SelectorComponent>> {
    let mut components: Vec<SelectorComponent> = vec![];
    let mut saw_space = false;

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        let component = match token {
            Token::WhiteSpace(_) => {
                saw_space = true;
                continue;
            }
            Token::Delim('>') => {
                push_combinator(parser, &mut components, Combinator::Child)?;
                saw_space = false;
                continue;
            }
            Token::Delim('+') => {
                push_combinator(parser, &mut components, Combinator::AdjacentSibling)?;
                saw_space = false;
                continue;
            }
            Token::Delim('~') => {
                push_combinator(parser, &mut components, Combinator::GeneralSibling)?;
                saw_space = false;
                continue;
            }
            Token::Ident(name) => SelectorComponent::Tag(name.to_ascii_lowercase()),
            Token::Delim('*') => SelectorComponent::Universal,
            Token::Delim('.') => {
                let token = parser.next_including_whitespace()?.clone();
                match token {
                    Token::Ident(name) => SelectorComponent::Class(name.to_string()),
                    token => return Err(parser.new_unexpected_token_error(token)),
                }
            }
            Token::IDHash(name) => SelectorComponent::Id(name.to_string()),
            Token::SquareBracketBlock => parser.parse_nested_block(parse_attribute)?,
            Token::Colon => parse_pseudo(parser)?,
            token => return Err(parser.new_unexpected_token_error(token)),
        };

        let after_combinator = matches!(components.last(), Some(SelectorComponent::Combinator(_)));
        if saw_space && !components.is_empty() && !after_combinator {
            components.push(SelectorComponent::Combinator(Combinator::Descendant));
        }
        saw_space = false;
        components.push(component);
    }

    match components.last() {
        None => Err(parser.new_custom_error("empty selector".to_string())),
        Some(SelectorComponent::Combinator(combinator)) => {
            Err(parser.new_custom_error(format!("selector ends with combinator '{combinator}'")))
        }
        Some(_) => Ok(components),
    }
}

fn push_combinator<'i>(
    parser: &Parser<'i, '_>,
    components: &mut Vec<SelectorComponent>,
    combinator: Combinator,
) -> SelectorResult<'i, ()> {
    match components.last() {
        None | Some(SelectorComponent::Combinator(_)) => Err(parser
            .new_custom_error(format!("unexpected combinator '{combinator}'"))),
        Some(_) => {
            components.push(SelectorComponent::Combinator(combinator));
            Ok(())
        }
    }
}

/// Parse the inside of `[...]`.
fn parse_attribute<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, SelectorComponent> {
    let name = parser.expect_ident()?.to_ascii_lowercase();

    let operator = match parser.next() {
        Ok(t) => t.clone(),
        Err(_) => {
            return Ok(SelectorComponent::Attribute {
                name,
                operator: None,
                value: None,
            });
        }
    };

    let operator = match operator {
        Token::Delim('=') => AttributeOperator::Equals,
        Token::IncludeMatch => AttributeOperator::Includes,
        Token::DashMatch => AttributeOperator::DashMatch,
        Token::PrefixMatch => AttributeOperator::Prefix,
        Token::SuffixMatch => AttributeOperator::Suffix,
        Token::SubstringMatch => AttributeOperator::Substring,
        token => return Err(parser.new_unexpected_token_error(token)),
    };

    let token = parser.next()?.clone();
    let value = match token {
        Token::Ident(value) | Token::QuotedString(value) => value.to_string(),
        token => return Err(parser.new_unexpected_token_error(token)),
    };

    // Case-sensitivity flags (`i`, `s`) are accepted and dropped.
    while parser.next().is_ok() {}

    Ok(SelectorComponent::Attribute {
        name,
        operator: Some(operator),
        value: Some(value),
    })
}

/// Parse a pseudo-class or pseudo-element after its first colon.
fn parse_pseudo<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, SelectorComponent> {
    let token = parser.next_including_whitespace()?.clone();
    match token {
        Token::Colon => {
            let token = parser.next_including_whitespace()?.clone();
            match token {
                Token::Ident(name) => {
                    Ok(SelectorComponent::PseudoElement(name.to_ascii_lowercase()))
                }
                Token::Function(name) => {
                    parser.parse_nested_block(|p| {
                        while p.next().is_ok() {}
                        Ok::<_, CssParseError<'i, String>>(())
                    })?;
                    Ok(SelectorComponent::PseudoElement(name.to_ascii_lowercase()))
                }
                token => Err(parser.new_unexpected_token_error(token)),
            }
        }
        Token::Ident(name) => Ok(SelectorComponent::PseudoClass {
            name: name.to_ascii_lowercase(),
            argument: None,
        }),
        Token::Function(name) => {
            let argument = parser.parse_nested_block(|p| {
                let start = p.position();
                while p.next_including_whitespace_and_comments().is_ok() {}
                Ok::<_, CssParseError<'i, String>>(p.slice_from(start).trim().to_string())
            })?;
            Ok(SelectorComponent::PseudoClass {
                name: name.to_ascii_lowercase(),
                argument: Some(argument),
            })
        }
        token => Err(parser.new_unexpected_token_error(token)),
    }
}
