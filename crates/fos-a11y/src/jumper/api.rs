//! Read-only runtime API
//!
//! Installed once into the page's global scope. External code queries it
//! instead of inspecting DOM internals.

use fos_dom::Document;

use super::VERSION;
use super::config::JumperConfig;

/// Capability object exposing `isActive()`, `getConfig()` and the version.
///
/// The snapshot cannot be changed after construction:
///
/// ```compile_fail
/// let mut api = fos_a11y::JumperApi::new(Default::default());
/// api.config.body_class = "other".into();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JumperApi {
    /// Configuration snapshot taken at initialization
    config: JumperConfig,
}

impl JumperApi {
    pub fn new(config: JumperConfig) -> Self {
        Self { config }
    }

    /// Whether the body currently carries the marker class. Reads the live
    /// document, so removing the class externally flips this to false.
    pub fn is_active(&self, document: &Document) -> bool {
        document.body()
            .or_else(|| document.document_element())
            .is_some_and(|c| document.tree().has_class(c, &self.config.body_class))
    }

    /// Copy of the effective configuration
    pub fn get_config(&self) -> JumperConfig {
        self.config.clone()
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }
}
