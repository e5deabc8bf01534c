//! Structured selector components.

use std::fmt;

/// One comma-separated selector with its parsed component sequence.
///
/// `components` is empty when the selector text could not be parsed; the raw
/// text is still usable for substring matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub text: String,
    pub components: Vec<SelectorComponent>,
}

impl Selector {
    /// Create a selector from raw text and components.
    pub fn new(text: impl Into<String>, components: Vec<SelectorComponent>) -> Self {
        Self {
            text: text.into(),
            components,
        }
    }

    /// Iterate over compound selectors (runs of components between combinators).
    pub fn compounds(&self) -> impl Iterator<Item = &[SelectorComponent]> {
        self.components
            .split(|component| matches!(component, SelectorComponent::Combinator(_)))
    }
}

/// A single selector component, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorComponent {
    /// Type selector (`div`), lowercase.
    Tag(String),
    /// Universal selector (`*`).
    Universal,
    /// Class selector (`.name`).
    Class(String),
    /// ID selector (`#name`).
    Id(String),
    /// Attribute selector (`[name]`, `[name="value"]`).
    Attribute {
        name: String,
        operator: Option<AttributeOperator>,
        value: Option<String>,
    },
    /// Pseudo-class (`:hover`, `:nth-child(2n)`).
    PseudoClass {
        name: String,
        argument: Option<String>,
    },
    /// Pseudo-element (`::before`).
    PseudoElement(String),
    /// Combinator between two compound selectors.
    Combinator(Combinator),
}

impl SelectorComponent {
    /// Whether this component targets the `class` attribute.
    pub fn is_class(&self) -> bool {
        match self {
            Self::Class(_) => true,
            Self::Attribute { name, .. } => name == "class",
            _ => false,
        }
    }

    /// Whether this component targets the `id` attribute.
    pub fn is_id(&self) -> bool {
        match self {
            Self::Id(_) => true,
            Self::Attribute { name, .. } => name == "id",
            _ => false,
        }
    }
}

/// Combinators between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant (whitespace).
    Descendant,
    /// Direct child (`>`).
    Child,
    /// Adjacent sibling (`+`).
    AdjacentSibling,
    /// General sibling (`~`).
    GeneralSibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Descendant => write!(f, " "),
            Combinator::Child => write!(f, ">"),
            Combinator::AdjacentSibling => write!(f, "+"),
            Combinator::GeneralSibling => write!(f, "~"),
        }
    }
}

/// Attribute selector operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}
