//! Submission Interceptor
//!
//! The process-wide registration step: one capture-phase submit hook on
//! the document plus the programmatic-submit override, both routing into
//! the same protocol: snapshot the form, dispatch the notification,
//! replay the real submission, revert the tree.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use formdata_dom::{is_form, NodeId, SubmitError};
use formdata_host::{Event, EventKind, HandlerId, ListenerCallback, ListenerOptions, Page};

use crate::{formdata_event, HostCapabilities, ObservingFormData};

/// What `Shim::install` ended up doing on this host
#[derive(Debug)]
pub struct Installation {
    /// Submission interception is active
    pub interceptor_installed: bool,
    /// The shim mapping is the one the host surface hands out
    pub mapping_installed: bool,
    /// The document-level capture hook, when interception is active
    pub capture_handler: Option<HandlerId>,
}

/// The installed shim: capability record plus the per-form handler slots
pub struct Shim {
    caps: HostCapabilities,
    installation: Installation,
    onformdata: HashMap<NodeId, HandlerId>,
}

impl Shim {
    /// Install into a page. Feature-detects first; on a host that already
    /// dispatches the notification and exposes the handler slot, nothing
    /// is intercepted. The mapping gate is independent of the
    /// interceptor's. The capture hook stays registered for the page's
    /// lifetime; there is no teardown.
    pub fn install(page: &mut Page) -> Self {
        let caps = HostCapabilities::detect(page);
        let mapping_installed = caps.needs_mapping();
        if mapping_installed {
            tracing::debug!("exposing shim mapping implementation");
        }

        if !caps.needs_interceptor() {
            tracing::debug!("host dispatches formdata natively; interceptor skipped");
            return Self {
                caps,
                installation: Installation {
                    interceptor_installed: false,
                    mapping_installed,
                    capture_handler: None,
                },
                onformdata: HashMap::new(),
            };
        }

        let hook_caps = caps.clone();
        let capture_handler = page.add_event_listener(
            page.document(),
            EventKind::Submit,
            ListenerOptions {
                capture: true,
                once: false,
            },
            Rc::new(RefCell::new(move |page: &mut Page, ev: &mut Event| {
                let target = ev.target;
                if !is_form(page.tree(), target) {
                    return;
                }
                ev.prevent_default();
                ev.stop_immediate_propagation();
                if let Err(err) = fire_formdata_and_submit(page, target, &hook_caps) {
                    page.report_submit_error(err);
                }
            })),
        );

        let override_caps = caps.clone();
        page.set_submit_override(Rc::new(RefCell::new(
            move |page: &mut Page, form: NodeId| fire_formdata_and_submit(page, form, &override_caps),
        )));

        tracing::debug!("submission interceptor installed");
        Self {
            caps,
            installation: Installation {
                interceptor_installed: true,
                mapping_installed,
                capture_handler: Some(capture_handler),
            },
            onformdata: HashMap::new(),
        }
    }

    /// What install did
    pub fn installation(&self) -> &Installation {
        &self.installation
    }

    /// The capabilities resolved at install time
    pub fn capabilities(&self) -> &HostCapabilities {
        &self.caps
    }

    /// Set or clear a form's single-slot formdata handler. Setting
    /// replaces the previous slot listener; listeners registered through
    /// `add_event_listener` are unaffected and may coexist.
    pub fn set_onformdata(
        &mut self,
        page: &mut Page,
        form: NodeId,
        listener: Option<ListenerCallback>,
    ) {
        if let Some(old) = self.onformdata.remove(&form) {
            page.remove_event_listener(form, &EventKind::FormData, old);
        }
        if let Some(listener) = listener {
            let id = page.add_event_listener(
                form,
                EventKind::FormData,
                ListenerOptions::default(),
                listener,
            );
            self.onformdata.insert(form, id);
        }
    }

    /// The handler currently occupying a form's slot
    pub fn onformdata(&self, form: NodeId) -> Option<HandlerId> {
        self.onformdata.get(&form).copied()
    }
}

/// One submission attempt: snapshot, notify, submit, revert.
///
/// The revert runs whatever happens in between: listener cancelation
/// skips the real submission but never the cleanup, and a submission
/// failure is returned only after the tree is restored.
pub fn fire_formdata_and_submit(
    page: &mut Page,
    form: NodeId,
    caps: &HostCapabilities,
) -> Result<(), SubmitError> {
    tracing::debug!("collecting form data snapshot");
    let observing = Rc::new(RefCell::new(ObservingFormData::from_form(page.tree(), form)));

    let mut event = formdata_event(caps, form, observing.clone());
    let proceed = page.dispatch_event(&mut event);

    let result = if proceed {
        page.native_submit(form)
    } else {
        tracing::debug!("formdata notification canceled; skipping submission");
        Ok(())
    };

    observing.borrow_mut().reset(page.tree_mut());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdata_host::{callback, HostFeatures};

    fn page_with_form() -> (Page, NodeId) {
        let mut page = Page::new();
        let root = page.document();
        let form = page.tree_mut().create_element("form");
        page.tree_mut().append_child(root, form);
        (page, form)
    }

    #[test]
    fn test_install_on_default_host() {
        let mut page = Page::new();
        let shim = Shim::install(&mut page);
        assert!(shim.installation().interceptor_installed);
        assert!(shim.installation().mapping_installed);
        assert!(shim.installation().capture_handler.is_some());
        assert!(page.has_submit_override());
    }

    #[test]
    fn test_install_skipped_on_native_host() {
        let mut page = Page::with_features(HostFeatures {
            formdata_event: true,
            formdata_slot: true,
            mapping: true,
            ..HostFeatures::default()
        });
        let shim = Shim::install(&mut page);
        assert!(!shim.installation().interceptor_installed);
        assert!(!shim.installation().mapping_installed);
        assert!(!page.has_submit_override());
        assert_eq!(page.listener_count(page.document(), &EventKind::Submit), 0);
    }

    #[test]
    fn test_mapping_gate_is_independent() {
        let mut page = Page::with_features(HostFeatures {
            formdata_event: true,
            formdata_slot: true,
            mapping: false,
            ..HostFeatures::default()
        });
        let shim = Shim::install(&mut page);
        assert!(!shim.installation().interceptor_installed);
        assert!(shim.installation().mapping_installed);
    }

    #[test]
    fn test_onformdata_slot_replaces() {
        let (mut page, form) = page_with_form();
        let mut shim = Shim::install(&mut page);

        shim.set_onformdata(&mut page, form, Some(callback(|_, _| {})));
        shim.set_onformdata(&mut page, form, Some(callback(|_, _| {})));
        assert_eq!(page.listener_count(form, &EventKind::FormData), 1);

        // the generic mechanism is unaffected by the slot
        page.add_event_listener(
            form,
            EventKind::FormData,
            ListenerOptions::default(),
            callback(|_, _| {}),
        );
        shim.set_onformdata(&mut page, form, Some(callback(|_, _| {})));
        assert_eq!(page.listener_count(form, &EventKind::FormData), 2);
    }

    #[test]
    fn test_onformdata_slot_clears() {
        let (mut page, form) = page_with_form();
        let mut shim = Shim::install(&mut page);

        shim.set_onformdata(&mut page, form, Some(callback(|_, _| {})));
        assert!(shim.onformdata(form).is_some());

        shim.set_onformdata(&mut page, form, None);
        assert!(shim.onformdata(form).is_none());
        assert_eq!(page.listener_count(form, &EventKind::FormData), 0);
    }
}
