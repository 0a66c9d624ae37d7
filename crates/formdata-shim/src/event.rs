//! Formdata Notification
//!
//! The event carrying the mutable mapping to listeners. On hosts where
//! event subclassing works the typed notification is used; elsewhere a
//! plain event gets the payload attached. Same protocol either way.

use std::cell::RefCell;
use std::rc::Rc;

use formdata_dom::NodeId;
use formdata_host::{Event, EventKind, FormDataMap};

use crate::HostCapabilities;

/// Typed formdata notification: always bubbles, carries the mapping
pub struct FormDataEvent(Event);

impl FormDataEvent {
    /// Create a notification for `form` carrying `map`
    pub fn new(form: NodeId, map: Rc<RefCell<dyn FormDataMap>>, cancelable: bool) -> Self {
        Self(Event::new(EventKind::FormData, form, true, cancelable).with_form_data(map))
    }

    /// Unwrap into the host event for dispatch
    pub fn into_event(self) -> Event {
        self.0
    }
}

/// Build the notification the way the host supports
pub fn formdata_event(
    caps: &HostCapabilities,
    form: NodeId,
    map: Rc<RefCell<dyn FormDataMap>>,
) -> Event {
    let cancelable = caps.cancelable_events;
    if caps.custom_event_subclassing {
        FormDataEvent::new(form, map, cancelable).into_event()
    } else {
        // identity fallback: a plain event with the payload attached
        Event::new(EventKind::FormData, form, true, cancelable).with_form_data(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormData;
    use formdata_host::{HostFeatures, Page};

    fn payload() -> Rc<RefCell<dyn FormDataMap>> {
        Rc::new(RefCell::new(FormData::new()))
    }

    #[test]
    fn test_notification_bubbles_and_carries_payload() {
        let caps = HostCapabilities::detect(&Page::new());
        let ev = formdata_event(&caps, NodeId::NONE, payload());
        assert_eq!(ev.kind, EventKind::FormData);
        assert!(ev.bubbles);
        assert!(ev.cancelable);
        assert!(ev.form_data().is_some());
    }

    #[test]
    fn test_plain_event_fallback_keeps_payload() {
        let page = Page::with_features(HostFeatures {
            event_subclassing: false,
            ..HostFeatures::default()
        });
        let caps = HostCapabilities::detect(&page);
        let ev = formdata_event(&caps, NodeId::NONE, payload());
        assert_eq!(ev.kind, EventKind::FormData);
        assert!(ev.form_data().is_some());
    }

    #[test]
    fn test_cancelability_follows_host() {
        let page = Page::with_features(HostFeatures {
            cancelable_events: false,
            ..HostFeatures::default()
        });
        let caps = HostCapabilities::detect(&page);
        let ev = formdata_event(&caps, NodeId::NONE, payload());
        assert!(!ev.cancelable);
    }
}
