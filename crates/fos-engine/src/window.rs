//! Window global scope

use std::collections::HashMap;

use fos_a11y::JumperApi;

/// Value installed on `window`
#[derive(Debug, Clone, PartialEq)]
pub enum Global {
    Jumper(JumperApi),
    Value(serde_json::Value),
}

/// Global scope of a page
#[derive(Debug, Default)]
pub struct Window {
    globals: HashMap<String, Global>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a global, returning the one it replaced
    pub fn set(&mut self, name: &str, value: Global) -> Option<Global> {
        tracing::trace!("window.{} installed", name);
        self.globals.insert(name.to_string(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Global> {
        self.globals.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Global> {
        self.globals.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    /// Jumper API installed under `name`, if any
    pub fn jumper_api(&self, name: &str) -> Option<&JumperApi> {
        match self.globals.get(name)? {
            Global::Jumper(api) => Some(api),
            Global::Value(_) => None,
        }
    }
}
