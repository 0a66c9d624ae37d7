//! Listener Registry
//!
//! Per-(target, kind) listener lists with capture/once options. Dispatch
//! snapshots a phase's listeners before invoking any of them, so listeners
//! registered while an event is in flight do not see that event.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use formdata_dom::NodeId;

use crate::{Event, EventKind, Page};

/// Listener identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Listener callback
pub type ListenerCallback = Rc<RefCell<dyn FnMut(&mut Page, &mut Event)>>;

/// Listener options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    /// Run during the capture phase instead of target/bubble
    pub capture: bool,
    /// Remove after the first invocation
    pub once: bool,
}

struct Listener {
    id: HandlerId,
    options: ListenerOptions,
    callback: ListenerCallback,
}

/// Dispatch phase a snapshot is taken for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Capture,
    Target,
    Bubble,
}

/// Registry of listeners by target and event kind
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<(NodeId, EventKind), Vec<Listener>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns its id for later removal
    pub fn add(
        &mut self,
        target: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        callback: ListenerCallback,
    ) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.listeners
            .entry((target, kind))
            .or_default()
            .push(Listener {
                id,
                options,
                callback,
            });
        id
    }

    /// Remove a listener by id
    pub fn remove(&mut self, target: NodeId, kind: &EventKind, id: HandlerId) -> bool {
        let Some(list) = self.listeners.get_mut(&(target, kind.clone())) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| l.id != id);
        list.len() < before
    }

    /// Number of listeners registered for a target and kind
    pub fn count(&self, target: NodeId, kind: &EventKind) -> usize {
        self.listeners
            .get(&(target, kind.clone()))
            .map_or(0, |l| l.len())
    }

    /// Snapshot the listeners applicable to one phase at one target,
    /// in registration order.
    pub(crate) fn snapshot(
        &self,
        target: NodeId,
        kind: &EventKind,
        phase: Phase,
    ) -> Vec<(HandlerId, bool, ListenerCallback)> {
        self.listeners
            .get(&(target, kind.clone()))
            .map(|list| {
                list.iter()
                    .filter(|l| match phase {
                        Phase::Capture => l.options.capture,
                        Phase::Bubble => !l.options.capture,
                        Phase::Target => true,
                    })
                    .map(|l| (l.id, l.options.once, l.callback.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop `once` listeners that have fired
    pub(crate) fn remove_fired_once(
        &mut self,
        target: NodeId,
        kind: &EventKind,
        fired: &[HandlerId],
    ) {
        if let Some(list) = self.listeners.get_mut(&(target, kind.clone())) {
            list.retain(|l| !l.options.once || !fired.contains(&l.id));
        }
    }
}
