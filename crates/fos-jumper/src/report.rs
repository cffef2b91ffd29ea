//! JSON summary of a processed page

use fos_a11y::jumper::marks;
use fos_a11y::{InitTimings, JumperConfig, SkipLink, is_focusable};
use fos_engine::Page;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub url: String,
    pub title: String,
    pub version: &'static str,
    /// Marker class present on the body
    pub active: bool,
    pub config: JumperConfig,
    /// Ids of elements the utility made focusable
    pub tagged: Vec<String>,
    pub skip_links: Vec<SkipLinkReport>,
    pub active_element: Option<String>,
    pub timings: Option<InitTimings>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipLinkReport {
    pub label: String,
    pub target: String,
    /// An element with that id exists
    pub resolves: bool,
    /// The target can receive focus
    pub focusable: bool,
}

impl Report {
    pub fn from_page(page: &Page, config: &JumperConfig) -> Self {
        let document = page.document();
        let tree = document.tree();

        let tagged = tree.descendants(tree.root())
            .filter(|&n| tree.is_jump_target(n))
            .map(|n| tree.element_id(n).unwrap_or("").to_string())
            .collect();

        let skip_links = SkipLink::collect(tree, tree.root())
            .into_iter()
            .map(|link| {
                let target = fos_a11y::jumper::decode_fragment(&link.target_id)
                    .and_then(|id| document.get_element_by_id(&id));
                SkipLinkReport {
                    label: link.label,
                    target: link.target_id,
                    resolves: target.is_some(),
                    focusable: target.is_some_and(|t| is_focusable(tree, t)),
                }
            })
            .collect();

        let jumper = page.jumper();
        Self {
            url: page.url().to_string(),
            title: page.title(),
            version: fos_a11y::jumper::VERSION,
            active: jumper.is_some_and(|api| api.is_active()),
            config: jumper.map(|api| api.get_config()).unwrap_or_else(|| config.clone()),
            tagged,
            skip_links,
            active_element: page.active_element()
                .and_then(|n| tree.element_id(n))
                .map(str::to_string),
            timings: timings(page),
        }
    }
}

fn timings(page: &Page) -> Option<InitTimings> {
    let latest = |name| page.timeline().get_entries_by_name(name).last().map(|e| e.duration);
    Some(InitTimings {
        query_ms: latest(marks::QUERY)?,
        total_ms: latest(marks::TOTAL)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_a11y::JumperOverrides;

    const PAGE: &str = r##"
        <html><head><title>Report</title></head><body>
            <a href="#main">Skip to content</a>
            <a href="#gone">Broken</a>
            <a href="#go">To the button</a>
            <main id="main">Main</main>
            <div id="kept" tabindex="0">Kept</div>
            <button id="go">Go</button>
        </body></html>
    "##;

    fn processed(config: JumperConfig) -> Page {
        let mut page = Page::from_html("https://example.test/", PAGE).unwrap();
        page.install_jumper(config.clone());
        page.finish_parsing();
        page
    }

    #[test]
    fn test_report_lists_tagged_and_links() {
        let config = JumperConfig::default();
        let report = Report::from_page(&processed(config.clone()), &config);

        assert_eq!(report.title, "Report");
        assert!(report.active);
        assert_eq!(report.tagged, vec!["main"]);
        assert_eq!(report.active_element, None);
        assert!(report.timings.is_none());

        let links: Vec<(&str, bool, bool)> = report.skip_links.iter()
            .map(|l| (l.target.as_str(), l.resolves, l.focusable))
            .collect();
        assert_eq!(links, vec![("main", true, true), ("gone", false, false), ("go", true, true)]);
        assert_eq!(report.skip_links[0].label, "Skip to content");
    }

    #[test]
    fn test_report_timings_when_instrumented() {
        let config = JumperConfig::default().with_overrides(&JumperOverrides::new().enable_instrumentation(true));
        let report = Report::from_page(&processed(config.clone()), &config);
        let timings = report.timings.unwrap();
        assert!(timings.total_ms >= timings.query_ms);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let config = JumperConfig::default();
        let value = serde_json::to_value(Report::from_page(&processed(config.clone()), &config)).unwrap();
        assert_eq!(value["config"]["bodyClass"], "has-jumper");
        assert_eq!(value["skipLinks"][0]["target"], "main");
        assert_eq!(value["version"], "1.0.0");
    }
}
