//! Tree walkers.
//!
//! The walkers match parsed constructs against the title indexes and hand
//! the matched titles to a [`FeatureChecker`], which resolves them for each
//! client and records the resulting issues.

mod checker;
mod css;
mod html;

pub use checker::FeatureChecker;
pub use css::{check_declarations, check_selectors, check_stylesheet, AT_RULES};
pub use html::{check_document, InlineStyleParser};

pub(crate) use checker::note_texts;
