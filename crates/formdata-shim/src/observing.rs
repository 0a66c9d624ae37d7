//! Tree-Synchronized Form Data
//!
//! Decorates the in-memory mapping so every mutation is mirrored onto the
//! live form: additions become hidden controls, removals disable the
//! matching controls. `reset` undoes both once the submission attempt is
//! over.

use formdata_dom::{is_disabled, named_controls, DomTree, NodeId};
use formdata_host::FormDataMap;

use crate::FormData;

/// Form data whose mutations are materialized on the tracked form
#[derive(Debug)]
pub struct ObservingFormData {
    form: NodeId,
    data: FormData,
    // controls this mapping created for appended entries
    appended: Vec<NodeId>,
    // pre-existing controls this mapping disabled for deleted entries
    disabled: Vec<NodeId>,
}

impl ObservingFormData {
    /// Snapshot a form. The base mapping is loaded silently: no hidden
    /// control is created for values the form already carries.
    pub fn from_form(tree: &DomTree, form: NodeId) -> Self {
        Self {
            form,
            data: FormData::from_form(tree, form),
            appended: Vec::new(),
            disabled: Vec::new(),
        }
    }

    /// The form this mapping tracks
    pub fn form(&self) -> NodeId {
        self.form
    }

    /// The underlying mapping
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Append a value and materialize it as a hidden control at the end
    /// of the form.
    pub fn append(&mut self, tree: &mut DomTree, name: &str, value: &str) {
        self.data.append(name, value);

        let control = tree.create_element("input");
        tree.set_attr(control, "type", "hidden");
        tree.set_attr(control, "name", name);
        tree.set_attr(control, "value", value);
        tree.append_child(self.form, control);
        self.appended.push(control);
        tracing::debug!(name, "materialized hidden control");
    }

    /// Replace every value for the name, inheriting both the disabling of
    /// existing controls and the hidden-control materialization.
    pub fn set(&mut self, tree: &mut DomTree, name: &str, value: &str) {
        self.delete(tree, name);
        self.append(tree, name, value);
    }

    /// Remove the name and disable every control in the form carrying it,
    /// so the real submission will not include them. Controls stay in the
    /// tree; disabling is reverted by `reset`.
    pub fn delete(&mut self, tree: &mut DomTree, name: &str) {
        self.data.delete(name);

        for control in named_controls(tree, self.form, name) {
            // only record transitions, so reset restores the exact
            // pre-submission disabled state
            if !is_disabled(tree, control) {
                tree.set_attr(control, "disabled", "");
                self.disabled.push(control);
            }
        }
        tracing::debug!(name, "suppressed controls for deleted entry");
    }

    /// First value for the name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name)
    }

    /// All values for the name
    pub fn get_all(&self, name: &str) -> &[String] {
        self.data.get_all(name)
    }

    /// Membership test
    pub fn has(&self, name: &str) -> bool {
        self.data.has(name)
    }

    /// Undo every tree mutation this mapping made: re-enable disabled
    /// controls, detach appended ones. Idempotent; already-detached
    /// controls are skipped silently.
    pub fn reset(&mut self, tree: &mut DomTree) {
        for control in self.disabled.drain(..) {
            tree.remove_attr(control, "disabled");
        }
        for control in self.appended.drain(..) {
            tree.detach(control);
        }
    }
}

impl FormDataMap for ObservingFormData {
    fn append(&mut self, tree: &mut DomTree, name: &str, value: &str) {
        ObservingFormData::append(self, tree, name, value);
    }

    fn set(&mut self, tree: &mut DomTree, name: &str, value: &str) {
        ObservingFormData::set(self, tree, name, value);
    }

    fn delete(&mut self, tree: &mut DomTree, name: &str) {
        ObservingFormData::delete(self, tree, name);
    }

    fn get(&self, name: &str) -> Option<String> {
        self.data.get(name).map(str::to_string)
    }

    fn get_all(&self, name: &str) -> Vec<String> {
        self.data.get_all(name).to_vec()
    }

    fn has(&self, name: &str) -> bool {
        self.data.has(name)
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.data
            .entries()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }
}
