//! DOM Tree (arena-based allocation)

use std::borrow::Cow;

use crate::{
    DOMTokenList, DomError, DomResult, ElementData, InternedString, Node, NodeId, QualName,
    StringInterner,
};

/// Namespace used for elements and attributes created from HTML
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Arena-based DOM tree for memory efficiency
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (including the document node)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached HTML element. Tag names are ASCII-lowercased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let ns = self.interner.intern(HTML_NAMESPACE);
        let local = self.interner.intern(&html_lowercase(tag));
        self.push(Node::element(QualName::new(ns, local)))
    }

    /// Create a detached element with an explicit qualified name
    pub fn create_element_qualified(&mut self, name: QualName) -> NodeId {
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(Node::doctype(name, public_id.to_string(), system_id.to_string()))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child must be detached; moving attached nodes is not supported.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if parent == child {
            return Err(DomError::HierarchyRequest);
        }
        let child_node = self.get(child).ok_or(DomError::NotFound)?;
        if child_node.parent.is_valid() || child == self.root() {
            return Err(DomError::HierarchyRequest);
        }
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if parent_node.as_text().is_some() {
            return Err(DomError::InvalidNodeType);
        }

        let last = parent_node.last_child;
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        let node = &mut self.nodes[child.index()];
        node.parent = parent;
        node.prev_sibling = last;
        node.next_sibling = NodeId::NONE;
        Ok(child)
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Iterate over all descendants of `id` in document (preorder) order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let first = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Descendants { tree: self, root: id, next: first }
    }

    /// Iterate over ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Previous sibling that is an element
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.prev_sibling;
        while cur.is_valid() {
            let node = self.get(cur)?;
            if node.is_element() {
                return Some(cur);
            }
            cur = node.prev_sibling;
        }
        None
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.next_sibling;
        while cur.is_valid() {
            let node = self.get(cur)?;
            if node.is_element() {
                return Some(cur);
            }
            cur = node.next_sibling;
        }
        None
    }

    /// Element data for `id`
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for `id`
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Check if a node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Local tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.resolve(e.name.local))
    }

    /// The element's `id` attribute
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.id.map(|s| self.resolve(s))
    }

    /// Get an attribute value. Names match ASCII case-insensitively.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let key = self.interner.lookup(&html_lowercase(name))?;
        self.element(id)?.get_attr(key)
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.interner
            .lookup(&html_lowercase(name))
            .zip(self.element(id))
            .is_some_and(|(key, elem)| elem.has_attr(key))
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<Option<String>> {
        let lowered = html_lowercase(name);
        let ns = self.interner.intern("");
        let local = self.interner.intern(&lowered);
        let id_cache = match &*lowered {
            "id" => Some(self.interner.intern(value)),
            _ => None,
        };
        let classes = match &*lowered {
            "class" => Some(
                value.split_ascii_whitespace()
                    .map(|c| self.interner.intern(c))
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        };

        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        let old = elem.set_attr(QualName::new(ns, local), value.to_string());
        if id_cache.is_some() {
            elem.id = id_cache;
        }
        if let Some(classes) = classes {
            elem.classes = classes;
        }
        Ok(old)
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let lowered = html_lowercase(name);
        let key = self.interner.lookup(&lowered);
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        let Some(key) = key else {
            return Ok(None);
        };
        let old = elem.remove_attr(key);
        if old.is_some() {
            match &*lowered {
                "id" => elem.id = None,
                "class" => elem.classes.clear(),
                _ => {}
            }
        }
        Ok(old)
    }

    /// Class list of an element
    pub fn class_list(&self, id: NodeId) -> DOMTokenList {
        DOMTokenList::from_string(self.get_attribute(id, "class").unwrap_or(""))
    }

    /// Check if an element carries a class token
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        let Some(key) = self.interner.lookup(class) else {
            return false;
        };
        self.element(id).is_some_and(|e| e.classes.contains(&key))
    }

    /// Add a class token. Returns true if the token was not present before.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        if !DOMTokenList::is_valid_token(class) {
            return Err(DomError::InvalidToken(class.to_string()));
        }
        let mut list = self.class_list(id);
        if list.contains(class) {
            return Ok(false);
        }
        list.add(&[class]);
        self.set_attribute(id, "class", &list.value())?;
        Ok(true)
    }

    /// Remove a class token. Returns true if the token was present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        let mut list = self.class_list(id);
        if !list.contains(class) {
            return Ok(false);
        }
        list.remove(&[class]);
        self.set_attribute(id, "class", &list.value())?;
        Ok(true)
    }

    /// Whether the jump-target marker is set on an element
    pub fn is_jump_target(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.jump_target)
    }

    /// Set or clear the jump-target marker
    pub fn set_jump_target(&mut self, id: NodeId, value: bool) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        elem.jump_target = value;
        Ok(())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.get(n).and_then(Node::as_text))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase ASCII letters only, leaving other characters untouched
fn html_lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Preorder iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a next sibling exists, stopping at the root
            let mut cur = current;
            loop {
                if cur == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cur) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cur = n.parent;
                if !cur.is_valid() || cur == self.root {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("SPAN");
        let p = tree.create_element("p");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, span).unwrap();
        tree.append_child(tree.root(), p).unwrap();
        (tree, div, span, p)
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, div, span, p) = sample();
        let order: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![div, span, p]);
        let inner: Vec<_> = tree.descendants(div).collect();
        assert_eq!(inner, vec![span]);
    }

    #[test]
    fn test_tag_lowercased() {
        let (tree, _, span, _) = sample();
        assert_eq!(tree.tag_name(span), Some("span"));
    }

    #[test]
    fn test_append_rejects_attached() {
        let (mut tree, div, span, _) = sample();
        assert_eq!(tree.append_child(div, span), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(div, div), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_attribute_case_insensitive() {
        let (mut tree, div, _, _) = sample();
        tree.set_attribute(div, "contentEditable", "true").unwrap();
        assert_eq!(tree.get_attribute(div, "contenteditable"), Some("true"));
        assert!(tree.has_attribute(div, "CONTENTEDITABLE"));
    }

    #[test]
    fn test_id_cache_follows_attribute() {
        let (mut tree, div, _, _) = sample();
        tree.set_attribute(div, "id", "café").unwrap();
        assert_eq!(tree.element_id(div), Some("café"));
        tree.remove_attribute(div, "id").unwrap();
        assert_eq!(tree.element_id(div), None);
    }

    #[test]
    fn test_class_helpers() {
        let (mut tree, div, _, _) = sample();
        assert!(tree.add_class(div, "has-jumper").unwrap());
        assert!(!tree.add_class(div, "has-jumper").unwrap());
        assert!(tree.has_class(div, "has-jumper"));
        assert!(tree.remove_class(div, "has-jumper").unwrap());
        assert!(!tree.has_class(div, "has-jumper"));
        assert!(matches!(tree.add_class(div, "two words"), Err(DomError::InvalidToken(_))));
    }

    #[test]
    fn test_sibling_navigation() {
        let (mut tree, div, _, p) = sample();
        let text = tree.create_text("between");
        let section = tree.create_element("section");
        tree.append_child(tree.root(), text).unwrap();
        tree.append_child(tree.root(), section).unwrap();
        assert_eq!(tree.next_element_sibling(div), Some(p));
        assert_eq!(tree.next_element_sibling(p), Some(section));
        assert_eq!(tree.prev_element_sibling(section), Some(p));
        assert_eq!(tree.prev_element_sibling(div), None);
    }
}
