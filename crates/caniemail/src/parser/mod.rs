//! CSS and HTML parsers producing the engine's source trees.
//!
//! - [`parse_css`]: stylesheets, lenient, with positions
//! - [`parse_selector_list`]: selector lists into structured components
//! - [`InlineParser`]: `style` attribute values
//! - [`parse_html`]: documents with byte offsets and their `<style>` blocks

mod css_parser;
mod html_parser;
mod inline;
mod selector;

pub use css_parser::parse_css;
pub use html_parser::{parse_html, EmbeddedStylesheet, ParsedHtml};
pub use inline::{parse_inline_declarations, InlineParser};
pub use selector::parse_selector_list;
