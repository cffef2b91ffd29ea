//! Page - Represents a loaded web page
//!
//! Owns the document, URL and global scope, delivers events serially, and
//! simulates the keyboard and link activation.

use std::io::Read;

use fos_a11y::jumper::decode_fragment;
use fos_a11y::sequential_focus_order;
use fos_devtools::PerformanceTimeline;
use fos_dom::{Document, DomEvent, DomEventType, NodeId, ReadyState};
use fos_html::HtmlParser;
use url::Url;

use crate::PageError;
use crate::context::PageContext;
use crate::events::{ListenerId, ListenerRegistry, ListenerTarget, is_window_event};
use crate::window::Window;

/// Upper bound on events handled by one `run_until_idle` call
const MAX_EVENTS_PER_RUN: usize = 10_000;

/// A loaded web page
pub struct Page {
    pub(crate) ctx: PageContext,
    listeners: ListenerRegistry,
}

impl Page {
    /// Parse a page. The document stays `loading` until [`Page::finish_parsing`].
    pub fn from_html(url: &str, html: &str) -> Result<Self, PageError> {
        let url = Url::parse(url)?;
        let document = HtmlParser::new().parse_with_url(html, url.as_str());
        Ok(Self::with_document(url, document))
    }

    /// Parse a page from UTF-8 bytes
    pub fn from_reader<R: Read>(url: &str, reader: R) -> Result<Self, PageError> {
        let url = Url::parse(url)?;
        let document = HtmlParser::new().parse_reader(reader, url.as_str())?;
        Ok(Self::with_document(url, document))
    }

    fn with_document(url: Url, mut document: Document) -> Self {
        document.set_ready_state(ReadyState::Loading);
        tracing::info!("Loaded page {} ({} nodes)", url, document.tree().len());
        Self {
            ctx: PageContext::new(url, document),
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.ctx.url
    }

    pub fn document(&self) -> &Document {
        &self.ctx.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.ctx.document
    }

    pub fn window(&self) -> &Window {
        &self.ctx.window
    }

    pub fn timeline(&self) -> &PerformanceTimeline {
        &self.ctx.timeline
    }

    /// Get the page title
    pub fn title(&self) -> String {
        self.ctx.document.title()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ctx.document.ready_state()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.ctx.document.active_element()
    }

    /// Whether an element is rendered
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.ctx.is_visible(node)
    }

    pub fn add_event_listener(
        &mut self,
        event_type: DomEventType,
        target: ListenerTarget,
        listener: impl FnMut(&mut PageContext, &DomEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(event_type, target, false, Box::new(listener))
    }

    /// Listener removed after its first invocation
    pub fn add_once_listener(
        &mut self,
        event_type: DomEventType,
        target: ListenerTarget,
        listener: impl FnMut(&mut PageContext, &DomEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(event_type, target, true, Box::new(listener))
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Queue an event. Delivered by [`Page::run_until_idle`].
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.ctx.dispatch_event(event);
    }

    /// Run `f` with the listener-facing context, then drain the queue
    pub fn with_context<T>(&mut self, f: impl FnOnce(&mut PageContext) -> T) -> T {
        let result = f(&mut self.ctx);
        self.listeners.extend(std::mem::take(&mut self.ctx.pending));
        self.run_until_idle();
        result
    }

    /// Finish loading: `interactive` + `DOMContentLoaded`, scroll to the
    /// URL fragment, then `complete` + `load`.
    pub fn finish_parsing(&mut self) {
        if self.ready_state() != ReadyState::Loading {
            return;
        }

        self.ctx.document.set_ready_state(ReadyState::Interactive);
        self.ctx.dispatch_event(DomEvent::ready_state_change());
        self.ctx.dispatch_event(DomEvent::content_loaded());
        self.run_until_idle();

        self.scroll_to_fragment();
        self.run_until_idle();

        self.ctx.document.set_ready_state(ReadyState::Complete);
        self.ctx.dispatch_event(DomEvent::ready_state_change());
        self.ctx.dispatch_event(DomEvent::new(DomEventType::Load, NodeId::ROOT));
        self.run_until_idle();
    }

    /// Deliver queued events in order, including any they cause.
    /// Returns the number of events delivered.
    pub fn run_until_idle(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.ctx.queue.pop_front() {
            if delivered == MAX_EVENTS_PER_RUN {
                tracing::warn!("Event queue did not settle; dropping {} events", self.ctx.queue.len() + 1);
                self.ctx.queue.clear();
                break;
            }
            self.deliver(event);
            delivered += 1;
        }
        delivered
    }

    fn deliver(&mut self, mut event: DomEvent) {
        event.timestamp = self.ctx.timeline.now();
        tracing::trace!("Dispatching {} to {:?}", event.event_type.name(), event.target);

        for target in self.propagation_path(&event) {
            for id in self.listeners.matching(event.event_type, target) {
                let Some((mut listener, once)) = self.listeners.take(id) else {
                    continue;
                };
                listener(&mut self.ctx, &event);
                if !once {
                    self.listeners.restore(id, listener);
                }
                self.listeners.extend(std::mem::take(&mut self.ctx.pending));
            }
        }
    }

    /// Target first, then ancestors and the window for bubbling events
    fn propagation_path(&self, event: &DomEvent) -> Vec<ListenerTarget> {
        if is_window_event(event.event_type) {
            return vec![ListenerTarget::Window];
        }
        let mut path = vec![ListenerTarget::Node(event.target)];
        if event.bubbles {
            path.extend(self.ctx.document.tree().ancestors(event.target).map(ListenerTarget::Node));
            path.push(ListenerTarget::Window);
        }
        path
    }

    /// Focus an element. Returns false if it cannot take focus.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let focused = self.ctx.focus(node);
        self.run_until_idle();
        focused
    }

    /// Remove focus from the active element
    pub fn blur(&mut self) -> Option<NodeId> {
        let blurred = self.ctx.blur();
        self.run_until_idle();
        blurred
    }

    /// Tab: move to the next element in sequential focus order
    pub fn press_tab(&mut self) -> Option<NodeId> {
        self.sequential_navigation(false)
    }

    /// Shift+Tab: move to the previous element in sequential focus order
    pub fn press_shift_tab(&mut self) -> Option<NodeId> {
        self.sequential_navigation(true)
    }

    fn sequential_navigation(&mut self, backwards: bool) -> Option<NodeId> {
        let key_target = self.key_target();
        self.ctx.dispatch_event(DomEvent::key_down(key_target, "Tab"));
        self.run_until_idle();

        let tree = self.ctx.document.tree();
        let order: Vec<NodeId> = sequential_focus_order(tree, tree.root())
            .into_iter()
            .filter(|&n| self.ctx.is_visible(n))
            .collect();
        self.ctx.focus.set_focus_order(order);
        if let Some(active) = self.ctx.document.active_element() {
            self.ctx.focus.focus(active);
        }

        let tree = self.ctx.document.tree();
        let next = if backwards {
            self.ctx.focus.focus_prev(tree)
        } else {
            self.ctx.focus.focus_next(tree)
        };
        if let Some(node) = next {
            self.ctx.focus(node);
        }
        self.run_until_idle();
        self.active_element()
    }

    /// Enter: activates the focused link
    pub fn press_enter(&mut self) -> Result<(), PageError> {
        let key_target = self.key_target();
        self.ctx.dispatch_event(DomEvent::key_down(key_target, "Enter"));
        self.run_until_idle();

        match self.active_element() {
            Some(node) if self.is_link(node) => self.activate_link(node),
            _ => Ok(()),
        }
    }

    /// Click an element; clicking a link follows it
    pub fn click(&mut self, node: NodeId) -> Result<(), PageError> {
        self.ctx.dispatch_event(DomEvent::new(DomEventType::Click, node));
        self.run_until_idle();

        let tree = self.ctx.document.tree();
        let link = std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|&n| self.is_link(n));
        match link {
            Some(link) => self.activate_link(link),
            None => Ok(()),
        }
    }

    fn key_target(&self) -> NodeId {
        self.active_element()
            .or_else(|| self.ctx.document.body())
            .unwrap_or(NodeId::ROOT)
    }

    fn is_link(&self, node: NodeId) -> bool {
        let tree = self.ctx.document.tree();
        matches!(tree.tag_name(node), Some("a" | "area")) && tree.has_attribute(node, "href")
    }

    /// Follow a link. Same-document links navigate to their fragment; other
    /// destinations are outside a single page and only logged.
    fn activate_link(&mut self, link: NodeId) -> Result<(), PageError> {
        let Some(href) = self.ctx.document.tree().get_attribute(link, "href") else {
            return Ok(());
        };
        let destination = self.ctx.url.join(href)?;

        if !same_document(&self.ctx.url, &destination) {
            tracing::info!("Ignoring navigation away from the page to {}", destination);
            return Ok(());
        }
        match destination.fragment() {
            Some(fragment) => {
                let fragment = fragment.to_string();
                self.navigate_to_fragment(&fragment);
            }
            None => tracing::debug!("Link to the current document without a fragment"),
        }
        Ok(())
    }

    /// Same-document navigation: update the URL, scroll to (and if possible
    /// focus) the target, then fire `hashchange` if the fragment changed.
    pub fn navigate_to_fragment(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let old = self.ctx.url.clone();
        let mut new = old.clone();
        new.set_fragment(Some(fragment));

        tracing::debug!("Navigating to {}", new);
        self.ctx.document.set_url(new.as_str());
        self.ctx.url = new.clone();
        self.scroll_to_fragment();

        if new != old {
            self.ctx.dispatch_event(DomEvent::hash_change(old.as_str(), new.as_str()));
        }
        self.run_until_idle();
    }

    /// Default action for the URL fragment. A focusable target receives
    /// focus; otherwise focus resets and Tab continues from the target.
    fn scroll_to_fragment(&mut self) {
        let target = self.ctx.url.fragment()
            .and_then(decode_fragment)
            .and_then(|id| self.ctx.document.get_element_by_id(&id));
        let Some(target) = target else {
            return;
        };

        if !self.ctx.focus(target) {
            self.ctx.blur();
            self.ctx.focus.focus(target);
        }
    }
}

fn same_document(a: &Url, b: &Url) -> bool {
    let mut a = a.clone();
    let mut b = b.clone();
    a.set_fragment(None);
    b.set_fragment(None);
    a == b
}
