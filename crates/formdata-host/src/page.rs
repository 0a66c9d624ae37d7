//! Page
//!
//! The integration surface the shim installs into: one live tree, the
//! listener registry, the programmatic-submit override slot, and the log
//! of native submissions.

use std::cell::RefCell;
use std::rc::Rc;

use formdata_dom::{build_submission, DomTree, NodeId, SubmitError, SubmitRecord};

use crate::listeners::Phase;
use crate::{Event, EventKind, HandlerId, ListenerCallback, ListenerOptions, ListenerRegistry};

/// Programmatic-submit override. Installed once by a shim; the host calls
/// it instead of its own native submission.
pub type SubmitHook = Rc<RefCell<dyn FnMut(&mut Page, NodeId) -> Result<(), SubmitError>>>;

/// Wrap a closure as a listener callback
pub fn callback(f: impl FnMut(&mut Page, &mut Event) + 'static) -> ListenerCallback {
    Rc::new(RefCell::new(f))
}

/// What the host natively provides. A shim consults this once, before
/// installing anything.
#[derive(Debug, Clone)]
pub struct HostFeatures {
    /// A native formdata notification is dispatched before submission
    pub formdata_event: bool,
    /// A native settable per-form formdata handler slot exists
    pub formdata_slot: bool,
    /// A native multi-valued mapping implementation exists
    pub mapping: bool,
    /// Subclassed event values survive dispatch with their identity
    pub event_subclassing: bool,
    /// Events honor cancelation
    pub cancelable_events: bool,
}

impl Default for HostFeatures {
    fn default() -> Self {
        // The host this shim exists for: no formdata support, but event
        // subclassing and cancelation both work.
        Self {
            formdata_event: false,
            formdata_slot: false,
            mapping: false,
            event_subclassing: true,
            cancelable_events: true,
        }
    }
}

/// A live page: tree, listeners, submission end
pub struct Page {
    tree: DomTree,
    listeners: ListenerRegistry,
    features: HostFeatures,
    submit_override: Option<SubmitHook>,
    submissions: Vec<SubmitRecord>,
    pending_submit_error: Option<SubmitError>,
}

impl Page {
    /// Create an empty page with default host features
    pub fn new() -> Self {
        Self::with_features(HostFeatures::default())
    }

    /// Create an empty page advertising the given host features
    pub fn with_features(features: HostFeatures) -> Self {
        Self {
            tree: DomTree::new(),
            listeners: ListenerRegistry::new(),
            features,
            submit_override: None,
            submissions: Vec::new(),
            pending_submit_error: None,
        }
    }

    /// The tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The tree, mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The document root
    pub fn document(&self) -> NodeId {
        self.tree.root()
    }

    /// Advertised host features
    pub fn features(&self) -> &HostFeatures {
        &self.features
    }

    // === Listeners ===

    /// Register an event listener
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        callback: ListenerCallback,
    ) -> HandlerId {
        self.listeners.add(target, kind, options, callback)
    }

    /// Remove an event listener
    pub fn remove_event_listener(
        &mut self,
        target: NodeId,
        kind: &EventKind,
        id: HandlerId,
    ) -> bool {
        self.listeners.remove(target, kind, id)
    }

    /// Number of listeners registered for a target and kind
    pub fn listener_count(&self, target: NodeId, kind: &EventKind) -> usize {
        self.listeners.count(target, kind)
    }

    /// Dispatch an event through capture, target, and bubble phases.
    ///
    /// Listeners run synchronously, in registration order per target.
    /// Returns `true` when the default action should proceed.
    pub fn dispatch_event(&mut self, event: &mut Event) -> bool {
        tracing::debug!(kind = ?event.kind, "dispatching event");
        let target = event.target;
        // ancestors() yields parent..root; capture walks it reversed
        let path: Vec<NodeId> = self.tree.ancestors(target).collect();

        let mut halted = false;
        for &node in path.iter().rev() {
            self.run_listeners(node, event, Phase::Capture);
            if event.propagation_stopped() {
                halted = true;
                break;
            }
        }
        if !halted {
            self.run_listeners(target, event, Phase::Target);
            if !event.propagation_stopped() && event.bubbles {
                for &node in &path {
                    self.run_listeners(node, event, Phase::Bubble);
                    if event.propagation_stopped() {
                        break;
                    }
                }
            }
        }

        event.current_target = None;
        !event.default_prevented()
    }

    fn run_listeners(&mut self, node: NodeId, event: &mut Event, phase: Phase) {
        let snapshot = self.listeners.snapshot(node, &event.kind, phase);
        if snapshot.is_empty() {
            return;
        }
        event.current_target = Some(node);
        let mut fired = Vec::new();
        for (id, _once, cb) in &snapshot {
            fired.push(*id);
            let mut f = cb.borrow_mut();
            (&mut *f)(self, event);
            if event.immediate_stopped() {
                break;
            }
        }
        self.listeners.remove_fired_once(node, &event.kind, &fired);
    }

    // === Submission ===

    /// Programmatic submission. Routed through the override when one is
    /// installed; the bare native behavior otherwise. Does not fire a
    /// submit event.
    pub fn submit(&mut self, form: NodeId) -> Result<(), SubmitError> {
        if let Some(hook) = self.submit_override.clone() {
            tracing::debug!("programmatic submit routed through override");
            let mut hook = hook.borrow_mut();
            return (&mut *hook)(self, form);
        }
        self.native_submit(form)
    }

    /// User-initiated submission: dispatch a cancelable submit event, then
    /// perform the native submission unless a listener prevented it.
    pub fn raise_submit(&mut self, target: NodeId) -> Result<(), SubmitError> {
        let mut event = Event::submit(target);
        let proceed = self.dispatch_event(&mut event);
        if let Some(err) = self.pending_submit_error.take() {
            return Err(err);
        }
        if proceed {
            self.native_submit(target)
        } else {
            Ok(())
        }
    }

    /// The host's own submission behavior: build and record the payload
    pub fn native_submit(&mut self, form: NodeId) -> Result<(), SubmitError> {
        let record = build_submission(&self.tree, form)?;
        tracing::debug!(body = %record.body, "native submission");
        self.submissions.push(record);
        Ok(())
    }

    /// Install the programmatic-submit override; returns the previous one
    pub fn set_submit_override(&mut self, hook: SubmitHook) -> Option<SubmitHook> {
        self.submit_override.replace(hook)
    }

    /// Whether a submit override is installed
    pub fn has_submit_override(&self) -> bool {
        self.submit_override.is_some()
    }

    /// Surface a submission failure raised inside listener dispatch; the
    /// in-flight `raise_submit` returns it to the caller unchanged.
    pub fn report_submit_error(&mut self, err: SubmitError) {
        self.pending_submit_error = Some(err);
    }

    /// Native submissions performed so far, oldest first
    pub fn submissions(&self) -> &[SubmitRecord] {
        &self.submissions
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_form() -> (Page, NodeId) {
        let mut page = Page::new();
        let root = page.document();
        let form = page.tree_mut().create_element("form");
        page.tree_mut().append_child(root, form);
        (page, form)
    }

    #[test]
    fn test_dispatch_reaches_target_listener() {
        let (mut page, form) = page_with_form();
        let hits = Rc::new(RefCell::new(0));
        let hits2 = hits.clone();
        page.add_event_listener(
            form,
            EventKind::Submit,
            ListenerOptions::default(),
            callback(move |_, _| *hits2.borrow_mut() += 1),
        );

        let proceed = page.dispatch_event(&mut Event::submit(form));
        assert!(proceed);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_prevent_default_blocks_native_submit() {
        let (mut page, form) = page_with_form();
        page.add_event_listener(
            form,
            EventKind::Submit,
            ListenerOptions::default(),
            callback(|_, ev| ev.prevent_default()),
        );

        page.raise_submit(form).unwrap();
        assert!(page.submissions().is_empty());
    }

    #[test]
    fn test_raise_submit_without_listeners_submits_once() {
        let (mut page, form) = page_with_form();
        page.raise_submit(form).unwrap();
        assert_eq!(page.submissions().len(), 1);
    }

    #[test]
    fn test_submit_override_replaces_native_path() {
        let (mut page, form) = page_with_form();
        let called = Rc::new(RefCell::new(false));
        let called2 = called.clone();
        page.set_submit_override(Rc::new(RefCell::new(move |_: &mut Page, _| {
            *called2.borrow_mut() = true;
            Ok(())
        })));

        page.submit(form).unwrap();
        assert!(*called.borrow());
        assert!(page.submissions().is_empty());
    }

    #[test]
    fn test_once_listener_fires_once() {
        let (mut page, form) = page_with_form();
        let hits = Rc::new(RefCell::new(0));
        let hits2 = hits.clone();
        page.add_event_listener(
            form,
            EventKind::Submit,
            ListenerOptions {
                once: true,
                ..Default::default()
            },
            callback(move |_, _| *hits2.borrow_mut() += 1),
        );

        page.dispatch_event(&mut Event::submit(form));
        page.dispatch_event(&mut Event::submit(form));
        assert_eq!(*hits.borrow(), 1);
    }
}
