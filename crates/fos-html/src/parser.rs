//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our arena DOM.

use std::io::Read;

use fos_dom::{Document, DomTree, NodeId, QualName};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        self.build(&dom, url)
    }

    /// Parse UTF-8 HTML from a reader
    pub fn parse_reader<R: Read>(&self, mut reader: R, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML stream: {}", url);
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut reader)?;
        Ok(self.build(&dom, url))
    }

    fn build(&self, dom: &RcDom, url: &str) -> Document {
        let mut document = Document::empty(url);
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);

        // Find html, head, body elements
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node (and its subtree) to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let id = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                return;
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                tree.create_doctype(name, public_id, system_id)
            }
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let ns = tree.interner_mut().intern(&name.ns);
                let local = tree.interner_mut().intern(&name.local);
                let id = tree.create_element_qualified(QualName::new(ns, local));

                for attr in attrs.borrow().iter() {
                    // set_attribute keeps the id/class caches in sync
                    if let Err(err) = tree.set_attribute(id, &attr.name.local, &attr.value) {
                        tracing::warn!("Dropping attribute {}: {}", &*attr.name.local, err);
                    }
                }
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        if let Err(err) = tree.append_child(parent, id) {
            tracing::warn!("Failed to attach parsed node: {}", err);
            return;
        }

        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<div id=\"main\"><span>Text</span></div>";
        let doc = HtmlParser::new().parse(html);

        // Even fragments get wrapped in html/head/body by html5ever
        let main = doc.get_element_by_id("main").unwrap();
        assert_eq!(doc.tree().parent(main), doc.body());
    }

    #[test]
    fn test_parse_reader() {
        let html = "<p id=\"x\">reader</p>".as_bytes();
        let doc = HtmlParser::new().parse_reader(html, "file:///x.html").unwrap();
        assert_eq!(doc.url(), "file:///x.html");
        assert!(doc.get_element_by_id("x").is_some());
    }
}
