//! Which elements become jump targets

use fos_css::{SelectorList, parse_selector};
use fos_dom::{DomTree, NodeId};

use crate::JumperError;

/// Elements with an id that are neither natively interactive nor carry an
/// explicit `tabindex`
pub const DEFAULT_SELECTOR: &str = "[id]:not(a[href], area[href], button, iframe, input, select, textarea, [contentEditable='true'], [tabindex])";

/// The default selector, parsed
pub fn default_selector() -> Result<SelectorList, JumperError> {
    compile(DEFAULT_SELECTOR)
}

pub(crate) fn compile(selector: &str) -> Result<SelectorList, JumperError> {
    parse_selector(selector).map_err(|source| JumperError::InvalidSelector {
        selector: selector.to_string(),
        source,
    })
}

/// Native form of [`DEFAULT_SELECTOR`].
///
/// Any `id` qualifies, whatever characters it contains.
pub fn is_jump_target(tree: &DomTree, node: NodeId) -> bool {
    let Some(tag) = tree.tag_name(node) else {
        return false;
    };
    if !tree.has_attribute(node, "id") || tree.has_attribute(node, "tabindex") {
        return false;
    }
    let interactive = match tag {
        "a" | "area" => tree.has_attribute(node, "href"),
        "button" | "iframe" | "input" | "select" | "textarea" => true,
        _ => false,
    };
    !interactive && tree.get_attribute(node, "contenteditable") != Some("true")
}
