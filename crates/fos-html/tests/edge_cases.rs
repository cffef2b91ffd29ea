//! Edge case tests for fos-html
//!
//! Malformed content and unusual attribute shapes.

use fos_html::HtmlParser;

#[test]
fn test_parse_null_bytes() {
    let doc = HtmlParser::new().parse("Hello\0World");
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_unclosed_tags() {
    let doc = HtmlParser::new().parse("<div id=\"a\"><p id=\"b\"><span id=\"c\">text");
    let a = doc.get_element_by_id("a").unwrap();
    let c = doc.get_element_by_id("c").unwrap();
    assert!(doc.tree().ancestors(c).any(|n| n == a));
}

#[test]
fn test_empty_id_attribute_is_kept() {
    let doc = HtmlParser::new().parse("<div id=\"\">empty</div>");
    let body = doc.body().unwrap();
    let div = doc.tree().children(body).map(|(id, _)| id).next().unwrap();
    assert_eq!(doc.tree().get_attribute(div, "id"), Some(""));
    assert_eq!(doc.get_element_by_id(""), None);
}

#[test]
fn test_duplicate_attributes_first_wins() {
    let doc = HtmlParser::new().parse("<div id=\"first\" id=\"second\"></div>");
    assert!(doc.get_element_by_id("first").is_some());
    assert!(doc.get_element_by_id("second").is_none());
}

#[test]
fn test_id_with_punctuation() {
    let doc = HtmlParser::new().parse("<div id=\"a.b:c[d]\"></div>");
    assert!(doc.get_element_by_id("a.b:c[d]").is_some());
}
