//! DOM query helpers (querySelector / querySelectorAll / matches / closest)

use fos_dom::{DomTree, NodeId};

use crate::selectors::SelectorList;

/// All elements under `scope` (exclusive) matching `selectors`, in document order
pub fn query_selector_all(tree: &DomTree, scope: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
    let found: Vec<NodeId> = tree.descendants(scope)
        .filter(|&id| selectors.matches(tree, id))
        .collect();
    tracing::trace!("query_selector_all matched {} elements", found.len());
    found
}

/// First element under `scope` matching `selectors`
pub fn query_selector(tree: &DomTree, scope: NodeId, selectors: &SelectorList) -> Option<NodeId> {
    tree.descendants(scope).find(|&id| selectors.matches(tree, id))
}

/// Element.matches
pub fn matches(tree: &DomTree, node: NodeId, selectors: &SelectorList) -> bool {
    selectors.matches(tree, node)
}

/// Element.closest: the node itself or its nearest matching ancestor
pub fn closest(tree: &DomTree, node: NodeId, selectors: &SelectorList) -> Option<NodeId> {
    std::iter::once(node)
        .chain(tree.ancestors(node))
        .find(|&id| selectors.matches(tree, id))
}
