//! Fragment navigation: resolve the target named by `#fragment`, make it
//! focusable if needed, and restore it once it loses focus.

use std::borrow::Cow;

use fos_dom::{Document, DomTree, NodeId};
use percent_encoding::percent_decode_str;

use super::config::JumperConfig;
use crate::focus::is_interactive;

/// Result of handling a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// Empty, undecodable, or outside the allowed character set
    Invalid,
    /// No element with that id
    NotFound,
    /// Interactive element or author-declared `tabindex`; left to the
    /// browser's default handling
    DefaultHandling(NodeId),
    /// Target carries the jump-target marker and the host focuses it.
    /// `added` is set when this navigation wrote the `tabindex`; only then
    /// does the host call [`cleanup_after_blur`] once it loses focus.
    Focus { target: NodeId, added: bool },
}

impl FragmentOutcome {
    pub fn target(&self) -> Option<NodeId> {
        match *self {
            Self::DefaultHandling(n) | Self::Focus { target: n, .. } => Some(n),
            Self::Invalid | Self::NotFound => None,
        }
    }
}

/// Strip a leading `#` and percent-decode as UTF-8
pub fn decode_fragment(raw: &str) -> Option<String> {
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }
    percent_decode_str(raw).decode_utf8().ok().map(Cow::into_owned)
}

/// Letters and digits of any script, plus `- _ : .`
pub fn is_safe_fragment(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Resolve the fragment target and prepare it for focus
pub fn handle_fragment(document: &mut Document, config: &JumperConfig, raw: &str) -> FragmentOutcome {
    let Some(id) = decode_fragment(raw).filter(|id| is_safe_fragment(id)) else {
        tracing::trace!("Ignoring fragment {:?}", raw);
        return FragmentOutcome::Invalid;
    };
    let Some(target) = document.get_element_by_id(&id) else {
        return FragmentOutcome::NotFound;
    };

    let tree = document.tree_mut();
    if is_interactive(tree, target) {
        return FragmentOutcome::DefaultHandling(target);
    }
    if tree.has_attribute(target, "tabindex") {
        // Tagged by the load scan or an earlier jump: whoever added it owns it
        return if tree.is_jump_target(target) {
            FragmentOutcome::Focus { target, added: false }
        } else {
            FragmentOutcome::DefaultHandling(target)
        };
    }

    let prepared = tree.set_attribute(target, "tabindex", &config.tabindex_value)
        .and_then(|_| tree.set_jump_target(target, true));
    match prepared {
        Ok(()) => {
            tracing::debug!("Prepared #{} for fragment focus", id);
            FragmentOutcome::Focus { target, added: true }
        }
        Err(err) => {
            tracing::warn!("Could not prepare #{} for focus: {}", id, err);
            FragmentOutcome::DefaultHandling(target)
        }
    }
}

/// Remove the `tabindex` the utility added. Elements without the marker are
/// never touched. Returns whether anything was removed.
pub fn cleanup_after_blur(tree: &mut DomTree, node: NodeId) -> bool {
    if !tree.is_jump_target(node) {
        return false;
    }
    let restored = tree.remove_attribute(node, "tabindex")
        .and_then(|_| tree.set_jump_target(node, false));
    match restored {
        Ok(()) => {
            tracing::debug!("Restored #{} after blur", tree.element_id(node).unwrap_or(""));
            true
        }
        Err(err) => {
            tracing::warn!("Could not restore element after blur: {}", err);
            false
        }
    }
}
