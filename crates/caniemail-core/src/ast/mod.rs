//! Parsed source trees consumed by the checkers.
//!
//! The engine does not parse CSS or HTML itself. Front-ends produce these
//! trees, with byte offsets or resolved positions attached, and hand them to
//! the walkers in [`crate::check`].

mod dom;
mod selector;
mod stylesheet;

pub use dom::{Attribute, Document, Element, Node, StyleElement, Text};
pub use selector::{AttributeOperator, Combinator, Selector, SelectorComponent};
pub use stylesheet::{AtRule, Comment, CssRule, Declaration, DeclarationItem, StyleRule, Stylesheet};
