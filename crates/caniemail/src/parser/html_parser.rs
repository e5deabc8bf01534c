//! Lenient HTML parsing on top of the `quick-xml` reader.
//!
//! The reader is configured for HTML rather than XML: end names are not
//! checked, unmatched end tags are allowed and attributes may be unquoted or
//! valueless. Tree construction adds what the reader leaves out: void
//! elements never take children, an end tag closes every element opened
//! after its match, and `<style>`/`<script>` bodies are read as raw text.

use caniemail_core::ast::{Attribute, Document, Element, Node, StyleElement, Stylesheet, Text};
use caniemail_core::{LocationIndex, Point};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::parse_css;
use crate::logging::targets;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: [&str; 15] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// A parsed document and the stylesheets embedded in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHtml {
    pub document: Document,
    /// One entry per `<style>` element, in document order.
    pub stylesheets: Vec<EmbeddedStylesheet>,
}

/// The parsed body of one `<style>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedStylesheet {
    pub stylesheet: Stylesheet,
    /// Where the body starts in the document, for remapping positions.
    pub offset: Option<Point>,
}

/// Parse an HTML document.
///
/// Elements carry their byte range in `html` (end inclusive) and attributes
/// the byte offset of their name. Parsing never fails: on a syntax error the
/// reader stops, a warning is logged and every open element is closed at the
/// end of the input.
///
/// # Example
///
/// ```ignore
/// let parsed = parse_html("<style>.a { color: red }</style><p class=\"a\">Hi</p>");
/// assert_eq!(parsed.stylesheets.len(), 1);
/// ```
pub fn parse_html(html: &str) -> ParsedHtml {
    let document = parse_document(html);
    let index = LocationIndex::new(html);

    let stylesheets = document
        .style_elements()
        .into_iter()
        .map(|style| EmbeddedStylesheet {
            stylesheet: parse_css(&style.text),
            offset: style.text_offset.and_then(|offset| index.locate(offset)),
        })
        .collect();

    ParsedHtml {
        document,
        stylesheets,
    }
}

fn parse_document(html: &str) -> Document {
    let mut tree = TreeBuilder::default();
    let last = html.len().saturating_sub(1);

    // The reader is restarted after every raw text element; `base` is where
    // its input begins in `html`.
    let mut base = 0;
    let mut reader = html_reader(html);

    loop {
        let start = base + position(&reader);
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(target: targets::HTML, offset = start, "HTML parse stopped: {e}");
                break;
            }
        };
        let end = (base + position(&reader)).saturating_sub(1);

        match event {
            Event::Start(ref e) => {
                let mut element = element_from_tag(e, start);

                if matches!(element.name.as_str(), "style" | "script") {
                    let text_offset = end + 1;
                    match find_end_tag(html, text_offset, &element.name) {
                        Some((close_start, close_end)) => {
                            element.end = Some(close_end);
                            tree.append_raw_text(element, &html[text_offset..close_start], text_offset);
                            base = close_end + 1;
                            reader = html_reader(&html[base..]);
                        }
                        None => {
                            tracing::warn!(
                                target: targets::HTML,
                                offset = start,
                                tag = %element.name,
                                "unclosed raw text element"
                            );
                            element.end = Some(last);
                            tree.append_raw_text(element, &html[text_offset..], text_offset);
                            break;
                        }
                    }
                } else if is_void(&element.name) {
                    element.end = Some(end);
                    tree.append(Node::Element(element));
                } else {
                    tree.open(element);
                }
            }
            Event::Empty(ref e) => {
                let mut element = element_from_tag(e, start);
                element.end = Some(end);
                if element.name == "style" {
                    tree.append(Node::Style(StyleElement {
                        element,
                        text: String::new(),
                        text_offset: None,
                    }));
                } else {
                    tree.append(Node::Element(element));
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                tree.close(&name, start, end);
            }
            Event::Text(ref text) => {
                let data = match text.unescape() {
                    Ok(data) => data.into_owned(),
                    Err(_) => String::from_utf8_lossy(text).into_owned(),
                };
                tree.append(Node::Text(Text {
                    data,
                    start: Some(start),
                }));
            }
            Event::CData(ref data) => tree.append(Node::Text(Text {
                data: String::from_utf8_lossy(data).into_owned(),
                start: Some(start),
            })),
            Event::Comment(ref text) => tree.append(Node::Comment(Text {
                data: String::from_utf8_lossy(text).into_owned(),
                start: Some(start),
            })),
            Event::DocType(ref text) => tree.append(Node::Doctype(Text {
                data: String::from_utf8_lossy(text).trim().to_string(),
                start: Some(start),
            })),
            Event::Decl(_) | Event::PI(_) => {}
            Event::Eof => break,
        }
    }

    tree.finish(last)
}

fn html_reader(input: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.expand_empty_elements = false;
    config.check_comments = false;
    reader
}

fn position<R>(reader: &Reader<R>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

/// Find the end tag closing a raw text element whose body starts at `from`.
///
/// Returns the offsets of its `<` and `>`. Tag names match case-insensitively.
fn find_end_tag(html: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let rest = html.get(from..)?.to_ascii_lowercase();
    let needle = format!("</{name}");
    let mut search = 0;

    while let Some(found) = rest[search..].find(&needle) {
        let at = search + found;
        let after = at + needle.len();
        match rest.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || matches!(b, b'>' | b'/') => {
                let close = rest[after..].find('>')?;
                return Some((from + at, from + after + close));
            }
            Some(_) => search = after,
            None => return None,
        }
    }

    None
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Build an element from a start tag found at byte `offset`.
fn element_from_tag(tag: &BytesStart<'_>, offset: usize) -> Element {
    let name = String::from_utf8_lossy(tag.name().as_ref()).to_ascii_lowercase();
    let mut element = Element::new(name);
    element.start = Some(offset);

    // Offsets are relative to the tag content, which starts after '<'.
    let mut offsets = attribute_name_offsets(tag);

    let mut attributes = tag.html_attributes();
    attributes.with_checks(false);

    for attr in attributes.flatten() {
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        let name_offset = offsets
            .iter_mut()
            .find(|(scanned, slot)| *scanned == name && slot.is_some())
            .and_then(|(_, slot)| slot.take())
            .map(|relative| offset + 1 + relative);

        element.attributes.push(Attribute {
            name,
            value,
            offset: name_offset,
        });
    }

    element
}

/// Scan a tag's content for attribute names and their offsets in it.
///
/// Quote-aware, so `=` or spaces inside quoted values are not mistaken for
/// attribute boundaries.
fn attribute_name_offsets(tag: &[u8]) -> Vec<(String, Option<usize>)> {
    let mut offsets = vec![];
    let mut i = tag
        .iter()
        .position(|b| b.is_ascii_whitespace() || *b == b'/')
        .unwrap_or(tag.len());

    while i < tag.len() {
        if tag[i].is_ascii_whitespace() || tag[i] == b'/' {
            i += 1;
            continue;
        }

        let name_start = i;
        while i < tag.len() && !tag[i].is_ascii_whitespace() && !matches!(tag[i], b'=' | b'/') {
            i += 1;
        }
        if i > name_start {
            let name = String::from_utf8_lossy(&tag[name_start..i]).to_ascii_lowercase();
            offsets.push((name, Some(name_start)));
        }

        while i < tag.len() && tag[i].is_ascii_whitespace() {
            i += 1;
        }
        if tag.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < tag.len() && tag[i].is_ascii_whitespace() {
            i += 1;
        }

        match tag.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                i += 1;
                while i < tag.len() && tag[i] != quote {
                    i += 1;
                }
                i += 1;
            }
            _ => {
                while i < tag.len() && !tag[i].is_ascii_whitespace() {
                    i += 1;
                }
            }
        }
    }

    offsets
}

/// Stack-based tree construction.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    /// Add a node to the innermost open element.
    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    /// Append a `<style>` or `<script>` element with its raw body.
    fn append_raw_text(&mut self, element: Element, text: &str, text_offset: usize) {
        if element.name == "style" {
            self.append(Node::Style(StyleElement {
                element,
                text: text.to_string(),
                text_offset: Some(text_offset),
            }));
            return;
        }

        let mut element = element;
        if !text.is_empty() {
            element.children.push(Node::Text(Text {
                data: text.to_string(),
                start: Some(text_offset),
            }));
        }
        self.append(Node::Element(element));
    }

    /// Close the innermost open element named `name`.
    ///
    /// Elements opened after it are closed just before the end tag. An end
    /// tag without an open match is ignored.
    fn close(&mut self, name: &str, tag_start: usize, end: usize) {
        let Some(depth) = self.open.iter().rposition(|element| element.name == name) else {
            tracing::trace!(target: targets::HTML, tag = name, "ignoring stray end tag");
            return;
        };

        while self.open.len() > depth + 1 {
            if let Some(mut element) = self.open.pop() {
                element.end = Some(tag_start.saturating_sub(1));
                self.append(Node::Element(element));
            }
        }

        if let Some(mut element) = self.open.pop() {
            element.end = Some(end);
            self.append(Node::Element(element));
        }
    }

    /// Close every open element at `end` and return the document.
    fn finish(mut self, end: usize) -> Document {
        while let Some(mut element) = self.open.pop() {
            element.end = Some(end);
            self.append(Node::Element(element));
        }
        Document {
            children: self.root,
        }
    }
}
