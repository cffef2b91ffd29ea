//! DOM Events
//!
//! Lifecycle, navigation, focus and input events.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    // Document lifecycle
    DOMContentLoaded,
    ReadyStateChange,
    Load,

    // Same-document navigation
    HashChange,

    // Focus
    Focus,
    Blur,
    FocusIn,
    FocusOut,

    // Input
    Click,
    KeyDown,
}

impl DomEventType {
    /// Event name as exposed to scripts
    pub fn name(&self) -> &'static str {
        match self {
            Self::DOMContentLoaded => "DOMContentLoaded",
            Self::ReadyStateChange => "readystatechange",
            Self::Load => "load",
            Self::HashChange => "hashchange",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::Click => "click",
            Self::KeyDown => "keydown",
        }
    }

    /// Whether the event bubbles by default
    pub fn bubbles(&self) -> bool {
        !matches!(self, Self::Focus | Self::Blur | Self::Load | Self::HashChange | Self::ReadyStateChange)
    }
}

/// Old and new URL carried by `hashchange`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChangeDetail {
    pub old_url: String,
    pub new_url: String,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub related_target: Option<NodeId>,
    pub hash_change: Option<HashChangeDetail>,
    pub key: Option<String>,
    pub bubbles: bool,
    pub cancelable: bool,
    pub timestamp: f64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    /// Create a plain event of the given type
    pub fn new(event_type: DomEventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            related_target: None,
            hash_change: None,
            key: None,
            bubbles: event_type.bubbles(),
            cancelable: matches!(event_type, DomEventType::Click | DomEventType::KeyDown),
            timestamp: 0.0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create DOMContentLoaded event
    pub fn content_loaded() -> Self {
        Self::new(DomEventType::DOMContentLoaded, NodeId::ROOT)
    }

    /// Create readystatechange event
    pub fn ready_state_change() -> Self {
        Self::new(DomEventType::ReadyStateChange, NodeId::ROOT)
    }

    /// Create hashchange event (targets the window, represented by the document)
    pub fn hash_change(old_url: &str, new_url: &str) -> Self {
        let mut event = Self::new(DomEventType::HashChange, NodeId::ROOT);
        event.hash_change = Some(HashChangeDetail {
            old_url: old_url.to_string(),
            new_url: new_url.to_string(),
        });
        event
    }

    /// Create a focus-family event. `related` is the element losing or gaining focus.
    pub fn focus_event(event_type: DomEventType, target: NodeId, related: Option<NodeId>) -> Self {
        let mut event = Self::new(event_type, target);
        event.related_target = related;
        event
    }

    /// Create keydown event
    pub fn key_down(target: NodeId, key: &str) -> Self {
        let mut event = Self::new(DomEventType::KeyDown, target);
        event.key = Some(key.to_string());
        event
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_change_event() {
        let event = DomEvent::hash_change("http://localhost/#a", "http://localhost/#b");

        assert_eq!(event.event_type, DomEventType::HashChange);
        assert!(!event.bubbles);
        let detail = event.hash_change.unwrap();
        assert_eq!(detail.new_url, "http://localhost/#b");
    }

    #[test]
    fn test_focus_does_not_bubble() {
        let focus = DomEvent::focus_event(DomEventType::Focus, NodeId(5), None);
        let focus_in = DomEvent::focus_event(DomEventType::FocusIn, NodeId(5), None);
        assert!(!focus.bubbles);
        assert!(focus_in.bubbles);
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut loaded = DomEvent::content_loaded();
        loaded.prevent_default();
        assert!(!loaded.is_default_prevented());

        let mut key = DomEvent::key_down(NodeId(3), "Enter");
        key.prevent_default();
        assert!(key.is_default_prevented());
    }
}
