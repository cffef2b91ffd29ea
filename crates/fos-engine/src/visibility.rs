//! Visibility
//!
//! Whether an element would be rendered, from the `hidden` attribute and
//! inline `style` declarations of the element and its ancestors.
//!
//! - `hidden` or `display: none` on the element or any ancestor → not rendered
//! - `visibility: hidden` → laid out but not painted (inherited, nearest wins)

use fos_css::InlineStyle;
use fos_dom::{DomTree, NodeId};

/// Visibility state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Element is rendered.
    #[default]
    Visible,

    /// Element has `visibility: hidden` (layout but no paint).
    Hidden,

    /// Element or an ancestor is `hidden` / `display: none` (no layout, no paint).
    DisplayNone,
}

impl VisibilityState {
    /// Should we run layout for this element?
    #[inline]
    pub fn should_layout(&self) -> bool {
        !matches!(self, VisibilityState::DisplayNone)
    }

    /// Should we paint this element?
    #[inline]
    pub fn should_paint(&self) -> bool {
        matches!(self, VisibilityState::Visible)
    }
}

/// Compute the visibility of an element. Non-elements are never visible.
pub fn visibility_of(tree: &DomTree, node: NodeId) -> VisibilityState {
    if !tree.is_element(node) {
        return VisibilityState::DisplayNone;
    }

    let mut visibility: Option<bool> = None;
    for id in std::iter::once(node).chain(tree.ancestors(node)) {
        if !tree.is_element(id) {
            continue;
        }
        if tree.has_attribute(id, "hidden") {
            return VisibilityState::DisplayNone;
        }
        let Some(style) = tree.get_attribute(id, "style") else {
            continue;
        };
        let style = InlineStyle::parse_lenient(style);
        if style.is_display_none() {
            return VisibilityState::DisplayNone;
        }
        if visibility.is_none() && style.get("visibility").is_some() {
            visibility = Some(!style.is_visibility_hidden());
        }
    }

    match visibility {
        Some(false) => VisibilityState::Hidden,
        _ => VisibilityState::Visible,
    }
}
