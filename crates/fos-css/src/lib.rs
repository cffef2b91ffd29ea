//! fOS CSS
//!
//! Selector parsing and matching against the fOS DOM, plus inline
//! `style` attribute parsing.

mod parser;
mod selectors;
mod query;
mod inline_style;

pub use parser::SelectorParser;
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    PseudoClass, SelectorComponent, SelectorList, match_component,
};
pub use query::{closest, matches, query_selector, query_selector_all};
pub use inline_style::InlineStyle;

/// Parse a selector list such as `"[id]:not(button, [tabindex])"`
pub fn parse_selector(text: &str) -> Result<SelectorList, CssError> {
    SelectorParser::new(text).parse()
}

/// CSS error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Empty selector")]
    EmptySelector,

    #[error("Unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { offset: usize, ch: char },

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Unsupported selector: {0}")]
    Unsupported(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },
}
