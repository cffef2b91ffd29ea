//! Focus Management
//!
//! Focusability rules, sequential (Tab) navigation order and skip links.

use fos_dom::{DomTree, NodeId};

/// Parsed `tabindex` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative value: focusable, but skipped by sequential navigation
    Programmatic(i32),
    /// Zero or positive: part of the sequential order
    Sequential(i32),
}

impl TabIndex {
    /// Parse with the HTML rules for signed integers: leading whitespace and
    /// trailing garbage are allowed, at least one digit is required.
    pub fn parse(value: &str) -> Option<Self> {
        let s = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let end = digits.bytes().take_while(u8::is_ascii_digit).count();
        if end == 0 {
            return None;
        }
        let magnitude: i64 = digits[..end].parse().ok()?;
        let n = i32::try_from(if negative { -magnitude } else { magnitude }).ok()?;
        Some(if n < 0 { Self::Programmatic(n) } else { Self::Sequential(n) })
    }

    /// Tab index declared on an element, ignoring invalid values
    pub fn of(tree: &DomTree, node: NodeId) -> Option<Self> {
        tree.get_attribute(node, "tabindex").and_then(Self::parse)
    }

    pub fn value(&self) -> i32 {
        match *self {
            Self::Programmatic(n) | Self::Sequential(n) => n,
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

const FORM_CONTROLS: &[&str] = &["button", "input", "select", "textarea"];

/// Whether a form control is disabled
pub fn is_disabled(tree: &DomTree, node: NodeId) -> bool {
    tree.tag_name(node).is_some_and(|t| FORM_CONTROLS.contains(&t))
        && tree.has_attribute(node, "disabled")
}

/// Elements focusable without a `tabindex`: links and areas with a
/// destination, enabled form controls, iframes, editing hosts, `summary`
/// and media with controls.
pub fn is_natively_focusable(tree: &DomTree, node: NodeId) -> bool {
    (has_native_focus_tag(tree, node) && !is_disabled(tree, node)) || is_editing_host(tree, node)
}

/// Same family as [`is_natively_focusable`], disabled controls included
pub fn is_interactive(tree: &DomTree, node: NodeId) -> bool {
    has_native_focus_tag(tree, node) || is_editing_host(tree, node)
}

fn has_native_focus_tag(tree: &DomTree, node: NodeId) -> bool {
    match tree.tag_name(node) {
        Some("a" | "area") => tree.has_attribute(node, "href"),
        Some("input") => !tree.get_attribute(node, "type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
        Some("button" | "select" | "textarea" | "iframe" | "summary") => true,
        Some("audio" | "video") => tree.has_attribute(node, "controls"),
        _ => false,
    }
}

fn is_editing_host(tree: &DomTree, node: NodeId) -> bool {
    tree.get_attribute(node, "contenteditable").is_some_and(|v| {
        v.is_empty() || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("plaintext-only")
    })
}

/// Whether an element can receive focus at all (programmatically or by Tab)
pub fn is_focusable(tree: &DomTree, node: NodeId) -> bool {
    if !tree.is_element(node) || is_disabled(tree, node) {
        return false;
    }
    TabIndex::of(tree, node).is_some() || is_natively_focusable(tree, node)
}

/// Effective sequential index: the declared tabindex, or 0 for natively
/// focusable elements without one
fn sequential_index(tree: &DomTree, node: NodeId) -> Option<i32> {
    if is_disabled(tree, node) {
        return None;
    }
    match TabIndex::of(tree, node) {
        Some(TabIndex::Sequential(n)) => Some(n),
        Some(TabIndex::Programmatic(_)) => None,
        None => is_natively_focusable(tree, node).then_some(0),
    }
}

/// Sequential focus navigation order under `root`: positive tabindex values
/// first in ascending order, then everything else in document order.
pub fn sequential_focus_order(tree: &DomTree, root: NodeId) -> Vec<NodeId> {
    let mut positive = Vec::new();
    let mut natural = Vec::new();
    for node in tree.descendants(root) {
        match sequential_index(tree, node) {
            Some(0) => natural.push(node),
            Some(n) => positive.push((n, node)),
            None => {}
        }
    }
    // Stable sort keeps document order among equal values
    positive.sort_by_key(|&(n, _)| n);
    positive.into_iter().map(|(_, node)| node).chain(natural).collect()
}

/// Focus manager
///
/// Tracks the focused element and walks a sequential focus order. When the
/// focused element is not part of the order (e.g. a `tabindex="-1"` jump
/// target), navigation continues from its position in the document.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<NodeId>,
    focus_order: Vec<NodeId>,
}

impl FocusManager {
    pub fn new() -> Self { Self::default() }

    /// Set focus order
    pub fn set_focus_order(&mut self, order: Vec<NodeId>) {
        self.focus_order = order;
    }

    pub fn focus_order(&self) -> &[NodeId] {
        &self.focus_order
    }

    /// Focus element
    pub fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    /// Get focused element
    pub fn get_focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus next element, wrapping at the end
    pub fn focus_next(&mut self, tree: &DomTree) -> Option<NodeId> {
        if self.focus_order.is_empty() {
            return self.focused;
        }

        let next = match self.focused {
            Some(current) => match self.focus_order.iter().position(|&id| id == current) {
                Some(p) => self.focus_order.get(p + 1).copied(),
                None => self.first_after(tree, current),
            },
            None => None,
        };

        self.focused = next.or_else(|| self.focus_order.first().copied());
        self.focused
    }

    /// Focus previous element, wrapping at the start
    pub fn focus_prev(&mut self, tree: &DomTree) -> Option<NodeId> {
        if self.focus_order.is_empty() {
            return self.focused;
        }

        let prev = match self.focused {
            Some(current) => match self.focus_order.iter().position(|&id| id == current) {
                Some(p) => p.checked_sub(1).and_then(|p| self.focus_order.get(p).copied()),
                None => self.last_before(tree, current),
            },
            None => None,
        };

        self.focused = prev.or_else(|| self.focus_order.last().copied());
        self.focused
    }

    /// First element of the order that follows `node` in document order
    fn first_after(&self, tree: &DomTree, node: NodeId) -> Option<NodeId> {
        tree.descendants(tree.root())
            .skip_while(|&n| n != node)
            .skip(1)
            .find(|n| self.focus_order.contains(n))
    }

    /// Last element of the order that precedes `node` in document order
    fn last_before(&self, tree: &DomTree, node: NodeId) -> Option<NodeId> {
        tree.descendants(tree.root())
            .take_while(|&n| n != node)
            .filter(|n| self.focus_order.contains(n))
            .last()
    }

    /// Blur current focus
    pub fn blur(&mut self) {
        self.focused = None;
    }
}

/// In-page link pointing at a fragment (`<a href="#main">`)
#[derive(Debug, Clone, PartialEq)]
pub struct SkipLink {
    pub link: NodeId,
    pub label: String,
    /// Raw fragment, without the leading `#`
    pub target_id: String,
}

impl SkipLink {
    /// Collect all same-page fragment links under `root`, in document order
    pub fn collect(tree: &DomTree, root: NodeId) -> Vec<SkipLink> {
        tree.descendants(root)
            .filter(|&n| tree.tag_name(n) == Some("a"))
            .filter_map(|n| {
                let href = tree.get_attribute(n, "href")?;
                let target = href.strip_prefix('#').filter(|t| !t.is_empty())?;
                Some(SkipLink {
                    link: n,
                    label: tree.text_content(n).split_whitespace().collect::<Vec<_>>().join(" "),
                    target_id: target.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(tags: &[(&str, Vec<(&str, &str)>)]) -> (DomTree, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(tree.root(), body).unwrap();
        let mut ids = Vec::new();
        for (tag, attrs) in tags {
            let el = tree.create_element(tag);
            for (k, v) in attrs.iter() {
                tree.set_attribute(el, k, v).unwrap();
            }
            tree.append_child(body, el).unwrap();
            ids.push(el);
        }
        (tree, ids)
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(TabIndex::parse("-1"), Some(TabIndex::Programmatic(-1)));
        assert_eq!(TabIndex::parse("0"), Some(TabIndex::Sequential(0)));
        assert_eq!(TabIndex::parse("  5"), Some(TabIndex::Sequential(5)));
        assert_eq!(TabIndex::parse("+3"), Some(TabIndex::Sequential(3)));
        assert_eq!(TabIndex::parse("2px"), Some(TabIndex::Sequential(2)));
        assert_eq!(TabIndex::parse(""), None);
        assert_eq!(TabIndex::parse("abc"), None);
        assert_eq!(TabIndex::parse("-"), None);
        assert_eq!(TabIndex::parse("99999999999"), None);
        assert!(!TabIndex::parse("-1").unwrap().is_sequential());
    }

    #[test]
    fn test_natively_focusable() {
        let (tree, ids) = tree_with(&[
            ("a", vec![("href", "#x")]),
            ("a", vec![]),
            ("input", vec![("type", "hidden")]),
            ("button", vec![("disabled", "")]),
            ("div", vec![("contenteditable", "")]),
            ("div", vec![("contenteditable", "false")]),
            ("video", vec![("controls", "")]),
            ("summary", vec![]),
        ]);
        let got: Vec<bool> = ids.iter().map(|&n| is_natively_focusable(&tree, n)).collect();
        assert_eq!(got, vec![true, false, false, false, true, false, true, true]);

        // Disabled controls still belong to the interactive family
        let interactive: Vec<bool> = ids.iter().map(|&n| is_interactive(&tree, n)).collect();
        assert_eq!(interactive, vec![true, false, false, true, true, false, true, true]);
    }

    #[test]
    fn test_sequential_order() {
        let (tree, ids) = tree_with(&[
            ("button", vec![]),
            ("div", vec![("tabindex", "2")]),
            ("a", vec![("href", "/")]),
            ("div", vec![("tabindex", "-1")]),
            ("div", vec![("tabindex", "1")]),
            ("div", vec![("tabindex", "0")]),
        ]);
        assert_eq!(
            sequential_focus_order(&tree, tree.root()),
            vec![ids[4], ids[1], ids[0], ids[2], ids[5]]
        );
        assert!(is_focusable(&tree, ids[3]));
    }

    #[test]
    fn test_focus_manager_wraps() {
        let (tree, ids) = tree_with(&[("button", vec![]), ("button", vec![]), ("button", vec![])]);
        let mut fm = FocusManager::new();
        fm.set_focus_order(ids.clone());

        assert_eq!(fm.focus_next(&tree), Some(ids[0]));
        assert_eq!(fm.focus_next(&tree), Some(ids[1]));
        assert_eq!(fm.focus_prev(&tree), Some(ids[0]));
        assert_eq!(fm.focus_prev(&tree), Some(ids[2]));
        assert_eq!(fm.focus_next(&tree), Some(ids[0]));
    }

    #[test]
    fn test_focus_manager_continues_from_jump_target() {
        let (tree, ids) = tree_with(&[
            ("a", vec![("href", "#t")]),
            ("div", vec![("tabindex", "-1")]),
            ("button", vec![]),
        ]);
        let mut fm = FocusManager::new();
        fm.set_focus_order(sequential_focus_order(&tree, tree.root()));
        fm.focus(ids[1]);

        assert_eq!(fm.focus_next(&tree), Some(ids[2]));
        fm.focus(ids[1]);
        assert_eq!(fm.focus_prev(&tree), Some(ids[0]));
    }

    #[test]
    fn test_skip_links() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let label = tree.create_text("  Skip to\n main ");
        let other = tree.create_element("a");
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, label).unwrap();
        tree.append_child(tree.root(), other).unwrap();
        tree.set_attribute(a, "href", "#main").unwrap();
        tree.set_attribute(other, "href", "/about#team").unwrap();

        let links = SkipLink::collect(&tree, tree.root());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "Skip to main");
        assert_eq!(links[0].target_id, "main");
    }
}
