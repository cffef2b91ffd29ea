//! Document - High-level document API

use crate::{DomResult, DomTree, Node, NodeId};

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Parser still running
    #[default]
    Loading,
    /// Structure parsed, `DOMContentLoaded` fired
    Interactive,
    /// All subresources loaded
    Complete,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Interactive => "interactive",
            Self::Complete => "complete",
        }
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Currently focused element (None means the body has focus)
    active_element: Option<NodeId>,
    ready_state: ReadyState,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let html = doc.tree.create_element("html");
        let head = doc.tree.create_element("head");
        let body = doc.tree.create_element("body");
        // Fresh detached nodes cannot violate the hierarchy
        let _ = doc.tree.append_child(NodeId::ROOT, html);
        let _ = doc.tree.append_child(html, head);
        let _ = doc.tree.append_child(html, body);
        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            active_element: None,
            ready_state: ReadyState::Loading,
        }
    }

    /// Locate html/head/body after the tree has been built
    pub fn finalize(&mut self) {
        self.html_element = self.tree.children(NodeId::ROOT)
            .find(|(_, n)| self.is_tag(n, "html"))
            .map(|(id, _)| id)
            .unwrap_or(NodeId::NONE);

        let mut head = NodeId::NONE;
        let mut body = NodeId::NONE;
        if self.html_element.is_valid() {
            for (id, node) in self.tree.children(self.html_element) {
                if !head.is_valid() && self.is_tag(node, "head") {
                    head = id;
                } else if !body.is_valid() && self.is_tag(node, "body") {
                    body = id;
                }
            }
        }
        self.head_element = head;
        self.body_element = body;
    }

    fn is_tag(&self, node: &Node, tag: &str) -> bool {
        node.as_element()
            .is_some_and(|e| self.tree.resolve(e.name.local) == tag)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Replace the document URL (same-document navigation)
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree.children(self.head_element)
            .find(|(_, n)| self.is_tag(n, "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        Some(self.html_element).filter(|id| id.is_valid())
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        Some(self.head_element).filter(|id| id.is_valid())
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        Some(self.body_element).filter(|id| id.is_valid())
    }

    /// First element in document order whose id matches exactly
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let target = self.tree.interner().lookup(id)?;
        self.tree.descendants(NodeId::ROOT)
            .find(|&n| self.tree.element(n).is_some_and(|e| e.id == Some(target)))
    }

    /// Currently focused element, if any element other than the body has focus
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Record the focused element. Event dispatch is the caller's concern.
    pub fn set_active_element(&mut self, node: Option<NodeId>) -> DomResult<()> {
        if let Some(id) = node {
            if !self.tree.is_element(id) {
                return Err(crate::DomError::InvalidNodeType);
            }
        }
        self.active_element = node;
        Ok(())
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
