//! Inline `style` attribute parsing using lightningcss

use lightningcss::properties::Property;
use lightningcss::properties::display::{Display, DisplayKeyword, Visibility};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleAttribute};

use crate::CssError;

/// Declarations of a `style="..."` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    /// (property name, serialized value), in source order
    pub declarations: Vec<(String, String)>,
    display_none: bool,
    visibility_hidden: bool,
}

impl InlineStyle {
    /// Parse the value of a `style` attribute
    pub fn parse(text: &str) -> Result<Self, CssError> {
        let attr = StyleAttribute::parse(text, ParserOptions::default())
            .map_err(|e| CssError::ParseError {
                line: e.loc.map(|l| l.line).unwrap_or(0),
                message: e.kind.to_string(),
            })?;

        let mut style = InlineStyle::default();
        let block = &attr.declarations;

        // Important declarations win, so apply them last
        for property in block.declarations.iter().chain(block.important_declarations.iter()) {
            style.apply(property);
        }
        Ok(style)
    }

    /// Parse leniently: invalid input yields an empty style
    pub fn parse_lenient(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            tracing::debug!("Ignoring unparsable style attribute: {}", err);
            Self::default()
        })
    }

    fn apply(&mut self, property: &Property) {
        match property {
            Property::Display(display) => {
                self.display_none = matches!(display, Display::Keyword(DisplayKeyword::None));
            }
            Property::Visibility(visibility) => {
                self.visibility_hidden = !matches!(visibility, Visibility::Visible);
            }
            _ => {}
        }

        let name = property.property_id().name().to_string();
        match property.value_to_css_string(PrinterOptions::default()) {
            Ok(value) => self.declarations.push((name, value)),
            Err(err) => tracing::debug!("Could not serialize {}: {:?}", name, err),
        }
    }

    /// `display: none`
    pub fn is_display_none(&self) -> bool {
        self.display_none
    }

    /// `visibility: hidden` or `visibility: collapse`
    pub fn is_visibility_hidden(&self) -> bool {
        self.visibility_hidden
    }

    /// Last declared value for a property
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations.iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_none() {
        let style = InlineStyle::parse("color: red; display: none").unwrap();
        assert!(style.is_display_none());
        assert!(!style.is_visibility_hidden());
        assert!(style.get("color").is_some());
    }

    #[test]
    fn test_later_display_overrides() {
        let style = InlineStyle::parse("display: none; display: block").unwrap();
        assert!(!style.is_display_none());
    }

    #[test]
    fn test_visibility_hidden() {
        let style = InlineStyle::parse("visibility: hidden").unwrap();
        assert!(style.is_visibility_hidden());
        assert!(!style.is_display_none());
    }

    #[test]
    fn test_lenient_empty() {
        let style = InlineStyle::parse_lenient("");
        assert!(style.declarations.is_empty());
        assert!(!style.is_display_none());
    }
}
