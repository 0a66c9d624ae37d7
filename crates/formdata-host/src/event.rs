//! Events
//!
//! The host event value: kind, propagation flags, and the optional
//! form-data payload carried to listeners.

use std::cell::RefCell;
use std::rc::Rc;

use formdata_dom::NodeId;

use crate::FormDataMap;

/// Event kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Form submission request
    Submit,
    /// Form data collection, fired before the real submission
    FormData,
    /// Host- or test-defined kind
    Custom(String),
}

/// A dispatched event
pub struct Event {
    /// Event kind
    pub kind: EventKind,
    /// The node the event was dispatched on
    pub target: NodeId,
    /// The node whose listeners are currently running
    pub current_target: Option<NodeId>,
    /// Whether the event travels back up after the target phase
    pub bubbles: bool,
    /// Whether `prevent_default` has any effect
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_stopped: bool,
    form_data: Option<Rc<RefCell<dyn FormDataMap>>>,
}

impl Event {
    /// Create an event
    pub fn new(kind: EventKind, target: NodeId, bubbles: bool, cancelable: bool) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
            immediate_stopped: false,
            form_data: None,
        }
    }

    /// Create a submit event (bubbling, cancelable)
    pub fn submit(target: NodeId) -> Self {
        Self::new(EventKind::Submit, target, true, true)
    }

    /// Attach a form-data payload
    pub fn with_form_data(mut self, map: Rc<RefCell<dyn FormDataMap>>) -> Self {
        self.form_data = Some(map);
        self
    }

    /// The form-data payload, if this event carries one
    pub fn form_data(&self) -> Option<Rc<RefCell<dyn FormDataMap>>> {
        self.form_data.clone()
    }

    /// Prevent the default action (honored only for cancelable events)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation to further targets
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip remaining listeners on the current target
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_stopped = true;
    }

    /// Check if default was prevented
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn immediate_stopped(&self) -> bool {
        self.immediate_stopped
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("bubbles", &self.bubbles)
            .field("cancelable", &self.cancelable)
            .field("default_prevented", &self.default_prevented)
            .field("has_form_data", &self.form_data.is_some())
            .finish()
    }
}
