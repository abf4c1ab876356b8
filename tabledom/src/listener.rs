//! Listener registry.
//!
//! Listeners are plain registrations: the document records who listens
//! for what, and [`Document::dispatch`](crate::Document::dispatch) turns a
//! mouse event into [`Delivery`] values that the host routes to the owner.
//! Owners keep the returned [`ListenerId`] and unbind it on teardown.

use crate::event::MouseEventKind;
use crate::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ListenerScope {
    /// Every event of the kind, wherever it happens.
    Document,
    /// Events hitting a descendant of `scope` that matches `selector`.
    /// The delivery targets the closest matching ancestor of the hit element.
    Delegate { scope: String, selector: Selector },
}

impl ListenerScope {
    pub fn delegate(scope: impl Into<String>, selector: Selector) -> Self {
        Self::Delegate {
            scope: scope.into(),
            selector,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listener {
    pub id: ListenerId,
    pub scope: ListenerScope,
    pub kind: MouseEventKind,
}

/// A dispatched event for one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub listener: ListenerId,
    /// Delegate target. Always `None` for document listeners.
    pub target: Option<String>,
}

#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, scope: ListenerScope, kind: MouseEventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        log::trace!("[listeners] bind {:?} {:?} -> {:?}", kind, scope, id);
        self.entries.push(Listener { id, scope, kind });
        id
    }

    /// Remove a listener. Unbinding an unknown or already removed id is a no-op.
    pub fn unbind(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        let removed = self.entries.len() != before;
        if removed {
            log::trace!("[listeners] unbind {:?}", id);
        }
        removed
    }

    pub fn is_bound(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Listeners in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.entries.iter()
    }
}
