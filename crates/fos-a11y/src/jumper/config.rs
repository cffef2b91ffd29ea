//! Jumper configuration
//!
//! Built once from defaults overlaid with caller input and never mutated
//! afterwards. Loose JSON input is merged leniently: unknown keys and
//! malformed values are ignored.

use std::str::FromStr;

use fos_dom::DOMTokenList;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DEFAULT_BODY_CLASS, DEFAULT_SELECTOR, DEFAULT_TABINDEX};
use crate::focus::TabIndex;

/// When the utility acts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumperMode {
    /// Tag the whole document once it is loaded
    #[default]
    Static,
    /// Tag on load, then resolve and focus the fragment target on every
    /// hash change, restoring it on blur
    Navigate,
}

impl FromStr for JumperMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "navigate" => Ok(Self::Navigate),
            other => Err(format!("unknown mode '{}', expected 'static' or 'navigate'", other)),
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JumperConfig {
    /// Selector describing jump targets
    pub selector: String,
    /// Marker class added to the body
    pub body_class: String,
    /// Value written to `tabindex`
    pub tabindex_value: String,
    /// Record timing marks around initialization
    pub enable_instrumentation: bool,
    pub mode: JumperMode,
}

impl Default for JumperConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            body_class: DEFAULT_BODY_CLASS.to_string(),
            tabindex_value: DEFAULT_TABINDEX.to_string(),
            enable_instrumentation: false,
            mode: JumperMode::Static,
        }
    }
}

impl JumperConfig {
    /// Defaults overlaid with a loose JSON record
    pub fn from_json(value: &Value) -> Self {
        Self::default().merge_json(value)
    }

    /// Overlay a loose JSON record. Aliases are applied before canonical
    /// keys, so `tabindexValue` wins over `tabindex` when both are given.
    pub fn merge_json(&self, value: &Value) -> Self {
        let mut merged = self.clone();
        let Some(record) = value.as_object() else {
            if !value.is_null() {
                tracing::debug!("Ignoring non-object jumper config: {}", value);
            }
            return merged;
        };

        for (key, v) in record {
            let applied = match key.as_str() {
                "selector" => v.as_str().and_then(valid_selector).map(|s| merged.selector = s),
                "bodyClass" => v.as_str().and_then(valid_class).map(|c| merged.body_class = c),
                "mode" => v.as_str()
                    .and_then(|s| s.parse::<JumperMode>().ok())
                    .map(|m| merged.mode = m),
                k if is_aliased(k) => continue,
                _ => {
                    tracing::trace!("Ignoring unknown jumper config key '{}'", key);
                    continue;
                }
            };
            if applied.is_none() {
                tracing::debug!("Ignoring malformed jumper config value {}={}", key, v);
            }
        }

        for key in ["tabindex", "tabindexValue"] {
            if let Some(v) = record.get(key) {
                match tabindex_from_json(v) {
                    Some(t) => merged.tabindex_value = t,
                    None => tracing::debug!("Ignoring malformed jumper config value {}={}", key, v),
                }
            }
        }

        for key in ["enablePerformanceMarks", "enableInstrumentation"] {
            if let Some(v) = record.get(key) {
                match v.as_bool() {
                    Some(b) => merged.enable_instrumentation = b,
                    None => tracing::debug!("Ignoring malformed jumper config value {}={}", key, v),
                }
            }
        }

        merged
    }

    /// Overlay typed overrides, with the same validation as JSON input
    pub fn with_overrides(&self, overrides: &JumperOverrides) -> Self {
        let mut merged = self.clone();
        if let Some(s) = overrides.selector.as_deref().and_then(valid_selector) {
            merged.selector = s;
        }
        if let Some(c) = overrides.body_class.as_deref().and_then(valid_class) {
            merged.body_class = c;
        }
        if let Some(t) = overrides.tabindex_value.as_deref().and_then(valid_tabindex) {
            merged.tabindex_value = t;
        }
        if let Some(b) = overrides.enable_instrumentation {
            merged.enable_instrumentation = b;
        }
        if let Some(m) = overrides.mode {
            merged.mode = m;
        }
        merged
    }

    pub fn uses_default_selector(&self) -> bool {
        self.selector == DEFAULT_SELECTOR
    }
}

fn is_aliased(key: &str) -> bool {
    matches!(key, "tabindexValue" | "tabindex" | "enableInstrumentation" | "enablePerformanceMarks")
}

fn valid_selector(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn valid_class(s: &str) -> Option<String> {
    DOMTokenList::is_valid_token(s).then(|| s.to_string())
}

fn valid_tabindex(s: &str) -> Option<String> {
    let s = s.trim();
    TabIndex::parse(s).map(|_| s.to_string())
}

fn tabindex_from_json(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => valid_tabindex(s),
        Value::Number(n) => n.as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(|n| n.to_string()),
        _ => None,
    }
}

/// Typed partial configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JumperOverrides {
    pub selector: Option<String>,
    pub body_class: Option<String>,
    pub tabindex_value: Option<String>,
    pub enable_instrumentation: Option<bool>,
    pub mode: Option<JumperMode>,
}

impl JumperOverrides {
    pub fn new() -> Self { Self::default() }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = Some(class.into());
        self
    }

    pub fn tabindex_value(mut self, value: impl Into<String>) -> Self {
        self.tabindex_value = Some(value.into());
        self
    }

    pub fn enable_instrumentation(mut self, enabled: bool) -> Self {
        self.enable_instrumentation = Some(enabled);
        self
    }

    pub fn mode(mut self, mode: JumperMode) -> Self {
        self.mode = Some(mode);
        self
    }
}
