//! Comprehensive tests for fos-html
//!
//! Parsing into the arena DOM and serializing back out.

use fos_html::{Document, HtmlParser, HtmlSerializer, get_outer_html};

fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

#[test]
fn test_parse_minimal_html() {
    let doc = parse("");
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
    // html5ever always synthesizes html/head/body
    assert!(doc.body().is_some());
}

#[test]
fn test_parse_nested_structure() {
    let html = r#"
        <html>
            <head>
                <title>Test Page</title>
            </head>
            <body>
                <div id="container">
                    <h1 id="title">Welcome</h1>
                    <ul>
                        <li>Item 1</li>
                        <li>Item 2</li>
                    </ul>
                </div>
            </body>
        </html>
    "#;

    let doc = parse(html);
    assert_eq!(doc.title(), "Test Page");
    let container = doc.get_element_by_id("container").unwrap();
    let title = doc.get_element_by_id("title").unwrap();
    assert_eq!(doc.tree().parent(title), Some(container));
}

#[test]
fn test_attribute_names_are_lowercased() {
    let doc = parse(r#"<div id="ed" contentEditable="true" TabIndex="0"></div>"#);
    let ed = doc.get_element_by_id("ed").unwrap();
    assert_eq!(doc.tree().get_attribute(ed, "contenteditable"), Some("true"));
    assert_eq!(doc.tree().get_attribute(ed, "tabindex"), Some("0"));
}

#[test]
fn test_class_cache_from_markup() {
    let doc = parse(r##"<a id="s" class="skip visually-hidden" href="#main">Skip</a>"##);
    let link = doc.get_element_by_id("s").unwrap();
    assert!(doc.tree().has_class(link, "skip"));
    assert!(doc.tree().has_class(link, "visually-hidden"));
    assert!(!doc.tree().has_class(link, "main"));
}

#[test]
fn test_unicode_ids_survive_parsing() {
    let html = r#"
        <section id="测试">cjk</section>
        <section id="café">accent</section>
        <section id="🚀emoji">emoji</section>
        <section id="привет">cyrillic</section>
    "#;
    let doc = parse(html);
    for id in ["测试", "café", "🚀emoji", "привет"] {
        assert!(doc.get_element_by_id(id).is_some(), "missing #{id}");
    }
}

#[test]
fn test_serialize_document_roundtrip_shape() {
    let doc = parse("<!DOCTYPE html><html><head></head><body><main id=\"m\">x</main></body></html>");
    let out = HtmlSerializer::new().serialize_document(doc.tree());
    assert_eq!(
        out,
        "<!DOCTYPE html><html><head></head><body><main id=\"m\">x</main></body></html>"
    );
}

#[test]
fn test_outer_html_after_mutation() {
    let mut doc = parse("<div id=\"skip1\">Target</div>");
    let div = doc.get_element_by_id("skip1").unwrap();
    doc.tree_mut().set_attribute(div, "tabindex", "-1").unwrap();
    assert_eq!(
        get_outer_html(doc.tree(), div),
        r#"<div id="skip1" tabindex="-1">Target</div>"#
    );
}
