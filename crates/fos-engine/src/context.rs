//! Page state shared with event listeners

use std::collections::VecDeque;

use fos_a11y::{FocusManager, is_focusable};
use fos_devtools::PerformanceTimeline;
use fos_dom::{Document, DomEvent, DomEventType, NodeId};
use url::Url;

use crate::events::{ListenerTarget, PendingListener};
use crate::visibility::visibility_of;
use crate::window::Window;

/// Everything a listener may touch: document, window, timeline, focus and
/// the event queue. Listeners registered from here are attached after the
/// current dispatch step.
pub struct PageContext {
    pub(crate) url: Url,
    pub(crate) document: Document,
    pub(crate) window: Window,
    pub(crate) timeline: PerformanceTimeline,
    pub(crate) focus: FocusManager,
    pub(crate) queue: VecDeque<DomEvent>,
    pub(crate) pending: Vec<PendingListener>,
}

impl PageContext {
    pub(crate) fn new(url: Url, document: Document) -> Self {
        Self {
            url,
            document,
            window: Window::new(),
            timeline: PerformanceTimeline::new(),
            focus: FocusManager::new(),
            queue: VecDeque::new(),
            pending: Vec::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn timeline(&self) -> &PerformanceTimeline {
        &self.timeline
    }

    /// Document and timeline borrowed together
    pub fn document_and_timeline(&mut self) -> (&mut Document, &mut PerformanceTimeline) {
        (&mut self.document, &mut self.timeline)
    }

    /// Queue an event for serial dispatch
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.queue.push_back(event);
    }

    pub fn add_event_listener(
        &mut self,
        event_type: DomEventType,
        target: ListenerTarget,
        listener: impl FnMut(&mut PageContext, &DomEvent) + 'static,
    ) {
        self.pending.push(PendingListener { event_type, target, once: false, listener: Box::new(listener) });
    }

    /// Listener removed after its first invocation
    pub fn add_once_listener(
        &mut self,
        event_type: DomEventType,
        target: ListenerTarget,
        listener: impl FnMut(&mut PageContext, &DomEvent) + 'static,
    ) {
        self.pending.push(PendingListener { event_type, target, once: true, listener: Box::new(listener) });
    }

    /// Whether an element is rendered
    pub fn is_visible(&self, node: NodeId) -> bool {
        visibility_of(self.document.tree(), node).should_paint()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.document.active_element()
    }

    /// Move focus to `node`. Fails for elements that are not focusable or
    /// not rendered. Focus events are queued.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let tree = self.document.tree();
        if !is_focusable(tree, node) || !self.is_visible(node) {
            tracing::debug!("Refusing focus on non-focusable node {:?}", node);
            return false;
        }
        let old = self.document.active_element();
        if old == Some(node) {
            return true;
        }
        if self.document.set_active_element(Some(node)).is_err() {
            return false;
        }
        self.focus.focus(node);

        if let Some(old) = old {
            self.queue.push_back(DomEvent::focus_event(DomEventType::Blur, old, Some(node)));
            self.queue.push_back(DomEvent::focus_event(DomEventType::FocusOut, old, Some(node)));
        }
        self.queue.push_back(DomEvent::focus_event(DomEventType::Focus, node, old));
        self.queue.push_back(DomEvent::focus_event(DomEventType::FocusIn, node, old));
        true
    }

    /// Drop focus back to the body. Returns the element that lost focus.
    pub fn blur(&mut self) -> Option<NodeId> {
        let old = self.document.active_element()?;
        // Clearing focus cannot fail
        let _ = self.document.set_active_element(None);
        self.queue.push_back(DomEvent::focus_event(DomEventType::Blur, old, None));
        self.queue.push_back(DomEvent::focus_event(DomEventType::FocusOut, old, None));
        Some(old)
    }
}
