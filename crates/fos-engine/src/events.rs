//! Event listener registry

use fos_dom::{DomEvent, DomEventType, NodeId};

use crate::context::PageContext;

/// Listener handle, used for removal
pub type ListenerId = u64;

/// Event listener callback
pub type Listener = Box<dyn FnMut(&mut PageContext, &DomEvent)>;

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    /// An element, or the document itself (`NodeId::ROOT`)
    Node(NodeId),
}

impl ListenerTarget {
    pub fn document() -> Self {
        Self::Node(NodeId::ROOT)
    }
}

/// Events that target the window rather than a node
pub fn is_window_event(event_type: DomEventType) -> bool {
    matches!(event_type, DomEventType::HashChange | DomEventType::Load)
}

pub(crate) struct Registration {
    pub id: ListenerId,
    pub event_type: DomEventType,
    pub target: ListenerTarget,
    pub once: bool,
    /// Taken out while the listener runs
    pub listener: Option<Listener>,
}

/// Registered listeners, in registration order
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    registrations: Vec<Registration>,
    next_id: ListenerId,
}

impl ListenerRegistry {
    pub fn add(
        &mut self,
        event_type: DomEventType,
        target: ListenerTarget,
        once: bool,
        listener: Listener,
    ) -> ListenerId {
        self.next_id += 1;
        let id = self.next_id;
        self.registrations.push(Registration {
            id,
            event_type,
            target,
            once,
            listener: Some(listener),
        });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Listeners registered for an event at one point of the propagation path
    pub fn matching(&self, event_type: DomEventType, target: ListenerTarget) -> Vec<ListenerId> {
        self.registrations.iter()
            .filter(|r| r.event_type == event_type && r.target == target)
            .map(|r| r.id)
            .collect()
    }

    /// Take a listener out to run it. One-shot listeners are removed.
    pub fn take(&mut self, id: ListenerId) -> Option<(Listener, bool)> {
        let idx = self.registrations.iter().position(|r| r.id == id)?;
        let once = self.registrations[idx].once;
        if once {
            let reg = self.registrations.remove(idx);
            return reg.listener.map(|l| (l, true));
        }
        self.registrations[idx].listener.take().map(|l| (l, false))
    }

    /// Put a persistent listener back after it ran
    pub fn restore(&mut self, id: ListenerId, listener: Listener) {
        if let Some(reg) = self.registrations.iter_mut().find(|r| r.id == id) {
            reg.listener = Some(listener);
        }
    }

    pub fn extend(&mut self, pending: Vec<PendingListener>) {
        for p in pending {
            self.add(p.event_type, p.target, p.once, p.listener);
        }
    }
}

/// Listener registered from inside another listener, attached once the
/// current dispatch step finishes
pub struct PendingListener {
    pub event_type: DomEventType,
    pub target: ListenerTarget,
    pub once: bool,
    pub listener: Listener,
}
