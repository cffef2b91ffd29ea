//! Selector Model and Matching
//!
//! Selector lists, compound selectors, attribute selectors and the
//! logical/structural pseudo-classes, matched right-to-left against the DOM.

use fos_dom::{DomTree, NodeId};

/// Comma-separated list of complex selectors. Matches if any entry matches.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Check whether an element matches any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.is_element(node) && self.selectors.iter().any(|s| s.matches(tree, node))
    }
}

/// Relationship between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Compound selectors joined by combinators, e.g. `nav > a.skip`
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    /// Compound selectors, left to right
    pub compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    pub combinators: Vec<Combinator>,
}

impl ComplexSelector {
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, node, n - 1),
        }
    }

    fn matches_at(&self, tree: &DomTree, node: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(tree, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        let prev = idx - 1;
        match self.combinators[prev] {
            Combinator::Child => tree.parent(node)
                .filter(|&p| tree.is_element(p))
                .is_some_and(|p| self.matches_at(tree, p, prev)),
            Combinator::Descendant => tree.ancestors(node)
                .filter(|&a| tree.is_element(a))
                .any(|a| self.matches_at(tree, a, prev)),
            Combinator::NextSibling => tree.prev_element_sibling(node)
                .is_some_and(|s| self.matches_at(tree, s, prev)),
            Combinator::SubsequentSibling => {
                std::iter::successors(tree.prev_element_sibling(node), |&s| tree.prev_element_sibling(s))
                    .any(|s| self.matches_at(tree, s, prev))
            }
        }
    }
}

/// Sequence of simple selectors with no combinator, e.g. `a[href].skip`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.components.iter().all(|c| match_component(c, tree, node))
    }
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :not(), :first-child, etc.
    PseudoClass(PseudoClass),
}

/// Pseudo-class type
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Logical pseudo-classes
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),

    // Tree-structural pseudo-classes
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,

    // Element state
    Link,
    Enabled,
    Disabled,
    Checked,
}

impl PseudoClass {
    /// Look up an argument-less pseudo-class by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "root" => Some(Self::Root),
            "empty" => Some(Self::Empty),
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "only-child" => Some(Self::OnlyChild),
            "link" | "any-link" => Some(Self::Link),
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            "checked" => Some(Self::Checked),
            _ => None,
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Presence selector `[name]`
    pub fn exists(name: &str) -> Self {
        Self { name: name.to_ascii_lowercase(), matcher: None, case_insensitive: false }
    }

    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(val)) = (&self.matcher, value) else {
            // [attr] only checks existence
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| if self.case_insensitive { s.to_lowercase() } else { s.to_string() };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && val.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty prefix/suffix/substring never match
            AttributeMatcher::Prefix(expected) => !expected.is_empty() && val.starts_with(&fold(expected)),
            AttributeMatcher::Suffix(expected) => !expected.is_empty() && val.ends_with(&fold(expected)),
            AttributeMatcher::Substring(expected) => !expected.is_empty() && val.contains(&fold(expected)),
        }
    }
}

/// Match a selector component against an element
pub fn match_component(component: &SelectorComponent, tree: &DomTree, node: NodeId) -> bool {
    match component {
        SelectorComponent::Universal => tree.is_element(node),
        SelectorComponent::Type(tag) => tree.tag_name(node).is_some_and(|t| t.eq_ignore_ascii_case(tag)),
        SelectorComponent::Id(id) => tree.element_id(node) == Some(id.as_str()),
        SelectorComponent::Class(class) => tree.has_class(node, class),
        SelectorComponent::Attribute(attr) => attr.matches(tree.get_attribute(node, &attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, tree, node),
    }
}

const FORM_CONTROLS: &[&str] = &["button", "input", "select", "textarea", "optgroup", "option", "fieldset"];

/// Match a pseudo-class against an element
fn match_pseudo_class(pseudo: &PseudoClass, tree: &DomTree, node: NodeId) -> bool {
    match pseudo {
        PseudoClass::Not(list) => tree.is_element(node) && !list.matches(tree, node),
        PseudoClass::Is(list) | PseudoClass::Where(list) => list.matches(tree, node),

        PseudoClass::Root => tree.parent(node) == Some(tree.root()) && tree.is_element(node),
        PseudoClass::Empty => tree.children(node).all(|(_, c)| !c.is_element() && !c.is_text()),
        PseudoClass::FirstChild => tree.is_element(node) && tree.prev_element_sibling(node).is_none(),
        PseudoClass::LastChild => tree.is_element(node) && tree.next_element_sibling(node).is_none(),
        PseudoClass::OnlyChild => {
            tree.is_element(node)
                && tree.prev_element_sibling(node).is_none()
                && tree.next_element_sibling(node).is_none()
        }

        PseudoClass::Link => {
            matches!(tree.tag_name(node), Some("a" | "area")) && tree.has_attribute(node, "href")
        }
        PseudoClass::Disabled => {
            tree.tag_name(node).is_some_and(|t| FORM_CONTROLS.contains(&t))
                && tree.has_attribute(node, "disabled")
        }
        PseudoClass::Enabled => {
            tree.tag_name(node).is_some_and(|t| FORM_CONTROLS.contains(&t))
                && !tree.has_attribute(node, "disabled")
        }
        PseudoClass::Checked => match tree.tag_name(node) {
            Some("input") => tree.has_attribute(node, "checked"),
            Some("option") => tree.has_attribute(node, "selected"),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, matcher: AttributeMatcher, ci: bool) -> AttributeSelector {
        AttributeSelector { name: name.to_string(), matcher: Some(matcher), case_insensitive: ci }
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = attr("contenteditable", AttributeMatcher::Exact("true".into()), false);

        assert!(sel.matches(Some("true")));
        assert!(!sel.matches(Some("TRUE")));
        assert!(!sel.matches(Some("")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_case_insensitive() {
        let sel = attr("contenteditable", AttributeMatcher::Exact("true".into()), true);
        assert!(sel.matches(Some("TRUE")));
    }

    #[test]
    fn test_attribute_selector_exists() {
        let sel = AttributeSelector::exists("ID");
        assert_eq!(sel.name, "id");
        assert!(sel.matches(Some("")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_prefix() {
        let sel = attr("href", AttributeMatcher::Prefix("#".into()), false);

        assert!(sel.matches(Some("#skip1")));
        assert!(!sel.matches(Some("/page#skip1")));
        assert!(!attr("href", AttributeMatcher::Prefix(String::new()), false).matches(Some("x")));
    }

    #[test]
    fn test_attribute_selector_lists() {
        let contains = attr("class", AttributeMatcher::Contains("skip".into()), false);
        assert!(contains.matches(Some("visually-hidden skip")));
        assert!(!contains.matches(Some("skipper")));

        let dash = attr("lang", AttributeMatcher::DashMatch("en".into()), false);
        assert!(dash.matches(Some("en-GB")));
        assert!(!dash.matches(Some("english")));
    }

    #[test]
    fn test_pseudo_class_names() {
        assert_eq!(PseudoClass::from_name("First-Child"), Some(PseudoClass::FirstChild));
        assert_eq!(PseudoClass::from_name("hover"), None);
    }
}
