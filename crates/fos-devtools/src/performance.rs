//! Performance Timeline
//!
//! User timing marks and measures with a monotonic clock. Times are in
//! milliseconds relative to the timeline's origin.

use std::time::Instant;

use serde::Serialize;

use crate::DevtoolsError;

/// Performance entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub name: String,
    pub entry_type: EntryType,
    pub start_time: f64,
    pub duration: f64,
}

/// Entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Mark,
    Measure,
}

/// Performance timeline
#[derive(Debug, Clone)]
pub struct PerformanceTimeline {
    origin: Instant,
    entries: Vec<PerformanceEntry>,
    max_entries: usize,
}

impl Default for PerformanceTimeline {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            entries: Vec::new(),
            max_entries: 1000,
        }
    }
}

impl PerformanceTimeline {
    pub fn new() -> Self { Self::default() }

    /// Milliseconds since the timeline was created
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Add performance mark
    pub fn mark(&mut self, name: &str) -> &PerformanceEntry {
        let entry = PerformanceEntry {
            name: name.to_string(),
            entry_type: EntryType::Mark,
            start_time: self.now(),
            duration: 0.0,
        };
        tracing::trace!("performance.mark({}) at {:.3}ms", name, entry.start_time);
        self.add_entry(entry)
    }

    /// Add performance measure between two marks. The most recent mark with
    /// a given name is used; a missing end mark means "now".
    pub fn measure(
        &mut self,
        name: &str,
        start_mark: &str,
        end_mark: Option<&str>,
    ) -> Result<&PerformanceEntry, DevtoolsError> {
        let start = self.latest_mark(start_mark)
            .ok_or_else(|| DevtoolsError::UnknownMark(start_mark.to_string()))?;

        let end = match end_mark {
            Some(em) => self.latest_mark(em)
                .ok_or_else(|| DevtoolsError::UnknownMark(em.to_string()))?,
            None => self.now(),
        };

        let entry = PerformanceEntry {
            name: name.to_string(),
            entry_type: EntryType::Measure,
            start_time: start,
            duration: (end - start).max(0.0),
        };
        tracing::trace!("performance.measure({}) = {:.3}ms", name, entry.duration);
        Ok(self.add_entry(entry))
    }

    fn latest_mark(&self, name: &str) -> Option<f64> {
        self.entries.iter()
            .rev()
            .find(|e| e.entry_type == EntryType::Mark && e.name == name)
            .map(|e| e.start_time)
    }

    fn add_entry(&mut self, entry: PerformanceEntry) -> &PerformanceEntry {
        if self.entries.len() >= self.max_entries {
            self.entries.remove(0);
        }
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// All entries in recording order
    pub fn get_entries(&self) -> &[PerformanceEntry] {
        &self.entries
    }

    /// Get entries by name
    pub fn get_entries_by_name(&self, name: &str) -> Vec<&PerformanceEntry> {
        self.entries.iter().filter(|e| e.name == name).collect()
    }

    /// Get entries by type
    pub fn get_entries_by_type(&self, entry_type: EntryType) -> Vec<&PerformanceEntry> {
        self.entries.iter()
            .filter(|e| e.entry_type == entry_type)
            .collect()
    }

    /// Clear marks
    pub fn clear_marks(&mut self, name: Option<&str>) {
        self.clear(EntryType::Mark, name);
    }

    /// Clear measures
    pub fn clear_measures(&mut self, name: Option<&str>) {
        self.clear(EntryType::Measure, name);
    }

    fn clear(&mut self, entry_type: EntryType, name: Option<&str>) {
        self.entries.retain(|e| e.entry_type != entry_type || name.is_some_and(|n| e.name != n));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_mark() {
        let mut timeline = PerformanceTimeline::new();

        timeline.mark("start");
        timeline.mark("end");
        let total = timeline.measure("total", "start", Some("end")).unwrap().clone();

        assert_eq!(timeline.get_entries_by_type(EntryType::Mark).len(), 2);
        assert_eq!(timeline.get_entries_by_type(EntryType::Measure).len(), 1);
        assert!(total.duration >= 0.0);
        assert_eq!(total.start_time, timeline.get_entries_by_name("start")[0].start_time);
    }

    #[test]
    fn test_measure_unknown_mark() {
        let mut timeline = PerformanceTimeline::new();
        timeline.mark("start");
        assert_eq!(
            timeline.measure("m", "missing", None).unwrap_err(),
            DevtoolsError::UnknownMark("missing".into())
        );
        assert_eq!(
            timeline.measure("m", "start", Some("nope")).unwrap_err(),
            DevtoolsError::UnknownMark("nope".into())
        );
        assert!(timeline.measure("m", "start", None).is_ok());
    }

    #[test]
    fn test_marks_are_monotonic() {
        let mut timeline = PerformanceTimeline::new();
        let a = timeline.mark("a").start_time;
        let b = timeline.mark("b").start_time;
        assert!(b >= a);
    }

    #[test]
    fn test_clear_marks_by_name() {
        let mut timeline = PerformanceTimeline::new();
        timeline.mark("a");
        timeline.mark("b");
        timeline.measure("ab", "a", Some("b")).unwrap();

        timeline.clear_marks(Some("a"));
        assert!(timeline.get_entries_by_name("a").is_empty());
        assert_eq!(timeline.get_entries_by_name("b").len(), 1);
        assert_eq!(timeline.get_entries_by_name("ab").len(), 1);

        timeline.clear_marks(None);
        assert!(timeline.get_entries_by_type(EntryType::Mark).is_empty());
        assert_eq!(timeline.get_entries().len(), 1);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let mut timeline = PerformanceTimeline::new();
        let json = serde_json::to_value(timeline.mark("x")).unwrap();
        assert_eq!(json["entryType"], "mark");
        assert_eq!(json["name"], "x");
    }
}
