//! Initialization pass: mark the body, then tag every eligible element

use fos_devtools::PerformanceTimeline;
use fos_dom::{Document, NodeId};
use serde::Serialize;

use super::api::JumperApi;
use super::config::JumperConfig;
use super::eligibility::compile;
use super::fragment::{FragmentOutcome, handle_fragment};
use super::marks;
use crate::JumperError;
use crate::focus::is_interactive;

/// What an initialization pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitReport {
    /// Element that received the marker class
    pub container: Option<NodeId>,
    /// Elements that received `tabindex` and the jump-target marker
    pub tagged: Vec<NodeId>,
    /// Matches left alone because they already declare `tabindex` or are
    /// interactive elements (disabled or not)
    pub skipped_existing: usize,
    /// Swallowed failures
    pub warnings: Vec<String>,
    pub timings: Option<InitTimings>,
}

/// Durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitTimings {
    pub query_ms: f64,
    pub total_ms: f64,
}

/// The utility, bound to one effective configuration
#[derive(Debug, Clone, Default)]
pub struct Jumper {
    config: JumperConfig,
}

impl Jumper {
    pub fn new(config: JumperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JumperConfig {
        &self.config
    }

    /// Runtime API snapshot for this configuration
    pub fn api(&self) -> JumperApi {
        JumperApi::new(self.config.clone())
    }

    /// Run the load pass. Never fails: errors are logged and reported as
    /// warnings, and whatever was tagged before the fault stays tagged.
    pub fn initialize(
        &self,
        document: &mut Document,
        timeline: Option<&mut PerformanceTimeline>,
    ) -> InitReport {
        let mut timeline = timeline.filter(|_| self.config.enable_instrumentation);
        let mut report = InitReport::default();

        if let Some(t) = timeline.as_deref_mut() {
            t.mark(marks::START);
        }

        // The marker class goes on before any tabindex is written
        match self.mark_container(document) {
            Ok(container) => report.container = Some(container),
            Err(err) => {
                tracing::warn!("Jumper could not mark the document: {}", err);
                report.warnings.push(err.to_string());
                return report;
            }
        }

        if let Err(err) = self.scan(document, &mut report, timeline.as_deref_mut()) {
            tracing::warn!("Jumper scan failed: {}", err);
            report.warnings.push(err.to_string());
        }

        if let Some(t) = timeline {
            t.mark(marks::COMPLETE);
            report.timings = record_measures(t);
        }

        tracing::info!(
            "Jumper initialized: {} tagged, {} left unchanged",
            report.tagged.len(),
            report.skipped_existing
        );
        report
    }

    /// Resolve and focus-prepare the element named by a fragment
    pub fn handle_fragment(&self, document: &mut Document, fragment: &str) -> FragmentOutcome {
        handle_fragment(document, &self.config, fragment)
    }

    fn mark_container(&self, document: &mut Document) -> Result<NodeId, JumperError> {
        let container = document.body()
            .or_else(|| document.document_element())
            .ok_or(JumperError::MissingContainer)?;
        document.tree_mut().add_class(container, &self.config.body_class)?;
        Ok(container)
    }

    fn scan(
        &self,
        document: &mut Document,
        report: &mut InitReport,
        timeline: Option<&mut PerformanceTimeline>,
    ) -> Result<(), JumperError> {
        let selector = compile(&self.config.selector)?;
        let tree = document.tree_mut();
        let matches = fos_css::query_selector_all(tree, tree.root(), &selector);

        if let Some(t) = timeline {
            t.mark(marks::QUERY_COMPLETE);
        }

        for node in matches {
            if tree.has_attribute(node, "tabindex") || is_interactive(tree, node) {
                tracing::debug!("Leaving #{} unchanged", tree.element_id(node).unwrap_or(""));
                report.skipped_existing += 1;
                continue;
            }
            tree.set_attribute(node, "tabindex", &self.config.tabindex_value)?;
            tree.set_jump_target(node, true)?;
            tracing::debug!("Tagged #{} as jump target", tree.element_id(node).unwrap_or(""));
            report.tagged.push(node);
        }
        Ok(())
    }
}

fn record_measures(timeline: &mut PerformanceTimeline) -> Option<InitTimings> {
    let query = timeline.measure(marks::QUERY, marks::START, Some(marks::QUERY_COMPLETE))
        .map(|e| e.duration);
    let total = timeline.measure(marks::TOTAL, marks::START, Some(marks::COMPLETE))
        .map(|e| e.duration);
    match (query, total) {
        (Ok(query_ms), Ok(total_ms)) => Some(InitTimings { query_ms, total_ms }),
        (query, total) => {
            for err in [query.err(), total.err()].into_iter().flatten() {
                tracing::debug!("Jumper timing incomplete: {}", err);
            }
            None
        }
    }
}
