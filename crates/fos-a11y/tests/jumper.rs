//! Jumper tests against parsed documents

use fos_a11y::jumper::{DEFAULT_SELECTOR, default_selector, is_jump_target};
use fos_a11y::{Jumper, JumperConfig, JumperOverrides};
use fos_css::query_selector_all;
use fos_dom::{Document, NodeId};
use fos_html::HtmlParser;
use serde_json::json;

const SAMPLE: &str = r##"
<!DOCTYPE html>
<html>
<head><title>Sample</title></head>
<body>
    <a id="skip-link" href="#skip1">Skip to content</a>
    <header id="banner"><nav id="nav"><a href="/">Home</a></nav></header>
    <div id="skip0" tabindex="-1">Pre-existing</div>
    <div id="skip1">Main</div>
    <div id="positive" tabindex="2">Positive</div>
    <div id="zero" tabindex="0">Zero</div>
    <button id="skip9">Button</button>
    <input id="field">
    <select id="choice"><option>1</option></select>
    <textarea id="notes"></textarea>
    <iframe id="frame"></iframe>
    <map><area id="hotspot" href="#skip1"></map>
    <div id="editor" contenteditable="true"></div>
    <h2 id="测试">CJK</h2>
    <h2 id="😀">Emoji</h2>
    <h2 id="café">Accented</h2>
    <h2 id="привет">Cyrillic</h2>
    <p>No id</p>
</body>
</html>
"##;

fn sample() -> Document {
    HtmlParser::new().parse(SAMPLE)
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap_or_else(|| panic!("missing #{}", id))
}

fn tabindex<'a>(doc: &'a Document, id: &str) -> Option<&'a str> {
    doc.tree().get_attribute(by_id(doc, id), "tabindex")
}

/// (id, tabindex) of every element carrying an id, in document order
fn snapshot(doc: &Document) -> Vec<(String, Option<String>)> {
    let tree = doc.tree();
    tree.descendants(tree.root())
        .filter_map(|n| {
            let id = tree.element_id(n)?;
            Some((id.to_string(), tree.get_attribute(n, "tabindex").map(str::to_string)))
        })
        .collect()
}

#[test]
fn scenario_a_plain_div_tagged_button_untouched() {
    let mut doc = sample();
    Jumper::default().initialize(&mut doc, None);

    assert_eq!(tabindex(&doc, "skip1"), Some("-1"));
    assert_eq!(tabindex(&doc, "skip9"), None);
}

#[test]
fn scenario_b_existing_tabindex_survives_two_passes() {
    let mut doc = sample();
    let jumper = Jumper::default();
    jumper.initialize(&mut doc, None);
    assert_eq!(tabindex(&doc, "skip0"), Some("-1"));
    jumper.initialize(&mut doc, None);
    assert_eq!(tabindex(&doc, "skip0"), Some("-1"));
    assert!(!doc.tree().is_jump_target(by_id(&doc, "skip0")));
}

#[test]
fn scenario_d_custom_configuration() {
    let mut doc = sample();
    let config = JumperConfig::from_json(&json!({ "bodyClass": "custom-jumper", "tabindexValue": "0" }));
    let jumper = Jumper::new(config);
    jumper.initialize(&mut doc, None);

    let body = doc.body().unwrap();
    assert!(doc.tree().has_class(body, "custom-jumper"));
    assert!(!doc.tree().has_class(body, "has-jumper"));
    assert_eq!(tabindex(&doc, "skip1"), Some("0"));
    assert_eq!(tabindex(&doc, "banner"), Some("0"));
    assert!(jumper.api().is_active(&doc));
}

#[test]
fn idempotent() {
    let mut once = sample();
    Jumper::default().initialize(&mut once, None);

    let mut twice = sample();
    Jumper::default().initialize(&mut twice, None);
    let second = Jumper::default().initialize(&mut twice, None);

    assert_eq!(snapshot(&once), snapshot(&twice));
    assert!(second.tagged.is_empty());
    assert_eq!(twice.tree().class_list(twice.body().unwrap()).value(), "has-jumper");
}

#[test]
fn never_interferes_with_focusable_or_declared_elements() {
    let before = sample();
    let mut after = sample();
    Jumper::default().initialize(&mut after, None);

    let untouched = [
        "skip-link", "skip0", "positive", "zero", "skip9", "field", "choice", "notes", "frame",
        "hotspot", "editor",
    ];
    for id in untouched {
        assert_eq!(tabindex(&before, id), tabindex(&after, id), "#{} changed", id);
    }
}

#[test]
fn covers_every_eligible_element() {
    let mut doc = sample();
    let report = Jumper::default().initialize(&mut doc, None);

    let tagged_ids: Vec<&str> = report.tagged.iter()
        .filter_map(|&n| doc.tree().element_id(n))
        .collect();
    assert_eq!(
        tagged_ids,
        vec!["banner", "nav", "skip1", "测试", "😀", "café", "привет"]
    );
    for &n in &report.tagged {
        assert_eq!(doc.tree().get_attribute(n, "tabindex"), Some("-1"));
        assert!(doc.tree().is_jump_target(n));
    }
}

#[test]
fn unicode_ids_tagged_like_ascii() {
    let mut doc = sample();
    Jumper::default().initialize(&mut doc, None);
    for id in ["测试", "😀", "café", "привет"] {
        assert_eq!(tabindex(&doc, id), tabindex(&doc, "skip1"), "#{}", id);
    }
}

#[test]
fn marker_class_present_before_tagging() {
    // The query only matches if the class was already written
    let mut doc = sample();
    let config = JumperConfig::default()
        .with_overrides(&JumperOverrides::new().selector(".has-jumper [id]:not([tabindex], a, button, input, select, textarea, iframe, area, [contenteditable])"));
    let report = Jumper::new(config).initialize(&mut doc, None);

    assert!(report.tagged.contains(&by_id(&doc, "skip1")));
    assert!(report.warnings.is_empty());
}

#[test]
fn predicate_agrees_with_default_selector() {
    let doc = sample();
    let tree = doc.tree();
    let selected = query_selector_all(tree, tree.root(), &default_selector().unwrap());
    let predicate: Vec<NodeId> = tree.descendants(tree.root())
        .filter(|&n| is_jump_target(tree, n))
        .collect();
    assert_eq!(selected, predicate);
    assert!(JumperConfig::default().selector == DEFAULT_SELECTOR);
}

#[test]
fn unknown_config_keys_ignored() {
    let config = JumperConfig::from_json(&json!({ "colour": "red", "bodyClass": 7 }));
    assert_eq!(config, JumperConfig::default());

    let mut doc = sample();
    let report = Jumper::new(config).initialize(&mut doc, None);
    assert!(report.warnings.is_empty());
    assert!(!report.tagged.is_empty());
}

#[test]
fn fragment_navigation_round_trip() {
    let mut doc = HtmlParser::new().parse(r#"<main id="main">x</main><div id="kept" tabindex="0"></div>"#);
    let jumper = Jumper::default();

    let outcome = jumper.handle_fragment(&mut doc, "#main");
    let main = by_id(&doc, "main");
    assert_eq!(outcome, fos_a11y::FragmentOutcome::Focus { target: main, added: true });
    assert_eq!(tabindex(&doc, "main"), Some("-1"));

    assert!(fos_a11y::jumper::cleanup_after_blur(doc.tree_mut(), main));
    assert_eq!(tabindex(&doc, "main"), None);

    let kept = jumper.handle_fragment(&mut doc, "kept");
    assert_eq!(kept, fos_a11y::FragmentOutcome::DefaultHandling(by_id(&doc, "kept")));
    assert_eq!(tabindex(&doc, "kept"), Some("0"));
}
