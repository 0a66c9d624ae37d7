//! Host Feature Detection
//!
//! Resolved once, before anything is installed. The interceptor and the
//! mapping have independent gates: a host may carry a usable mapping yet
//! lack the submission notification, or the other way around.

use formdata_host::Page;

/// What the shim found the host already provides
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    /// Host dispatches its own formdata notification
    pub native_formdata_event: bool,
    /// Host exposes a settable per-form formdata handler slot
    pub native_formdata_slot: bool,
    /// Host ships a compatible multi-valued mapping
    pub native_mapping: bool,
    /// Subclassed event values keep their identity through dispatch;
    /// when false the notification is delivered as a plain event with
    /// an attached payload
    pub custom_event_subclassing: bool,
    /// Host honors cancelation on dispatched events
    pub cancelable_events: bool,
}

impl HostCapabilities {
    /// Probe the host once
    pub fn detect(page: &Page) -> Self {
        let features = page.features();
        let caps = Self {
            native_formdata_event: features.formdata_event,
            native_formdata_slot: features.formdata_slot,
            native_mapping: features.mapping,
            custom_event_subclassing: features.event_subclassing,
            cancelable_events: features.cancelable_events,
        };
        tracing::debug!(?caps, "host capabilities resolved");
        caps
    }

    /// Whether the submission interceptor must be installed
    pub fn needs_interceptor(&self) -> bool {
        !(self.native_formdata_event && self.native_formdata_slot)
    }

    /// Whether the shim mapping must be exposed
    pub fn needs_mapping(&self) -> bool {
        !self.native_mapping
    }
}
