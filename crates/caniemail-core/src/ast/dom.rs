//! Document tree.

use crate::location::Position;

/// A parsed HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over every `<style>` element in document order.
    pub fn style_elements(&self) -> Vec<&StyleElement> {
        let mut found = vec![];
        collect_styles(&self.children, &mut found);
        found
    }
}

fn collect_styles<'a>(nodes: &'a [Node], found: &mut Vec<&'a StyleElement>) {
    for node in nodes {
        match node {
            Node::Style(style) => found.push(style),
            Node::Element(element) => collect_styles(&element.children, found),
            Node::Text(_) | Node::Comment(_) | Node::Doctype(_) => {}
        }
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// A `<style>` element together with its raw stylesheet text.
    Style(StyleElement),
    Text(Text),
    Comment(Text),
    Doctype(Text),
}

/// An element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Byte offset of the opening `<`.
    pub start: Option<usize>,
    /// Byte offset of the last character of the element (inclusive).
    pub end: Option<usize>,
    /// Position supplied directly by the parser, if any.
    pub position: Option<Position>,
}

impl Element {
    /// Create an element without attributes or location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set the byte range covered by the element.
    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Unescaped value; empty for valueless attributes.
    pub value: String,
    /// Byte offset of the attribute name.
    pub offset: Option<usize>,
}

impl Attribute {
    /// Create an attribute without location.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            offset: None,
        }
    }
}

/// A `<style>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleElement {
    pub element: Element,
    /// Raw stylesheet text.
    pub text: String,
    /// Byte offset of the first character of `text`.
    pub text_offset: Option<usize>,
}

/// Character data (text, comment or doctype body).
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub data: String,
    pub start: Option<usize>,
}
