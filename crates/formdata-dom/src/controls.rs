//! Form Controls
//!
//! Classification of submittable controls and their document-order
//! collection within a form.

use crate::{DomTree, NodeId};

/// Check whether a node is a form element
pub fn is_form(tree: &DomTree, id: NodeId) -> bool {
    tree.tag_name(id) == Some("form")
}

/// Check whether a node is a submittable control kind
pub fn is_submittable(tree: &DomTree, id: NodeId) -> bool {
    matches!(
        tree.tag_name(id),
        Some("input" | "textarea" | "select" | "button")
    )
}

/// Check whether a control is submission-inert
pub fn is_disabled(tree: &DomTree, id: NodeId) -> bool {
    tree.has_attr(id, "disabled")
}

/// The control's declared name, if any
pub fn control_name<'a>(tree: &'a DomTree, id: NodeId) -> Option<&'a str> {
    tree.attr(id, "name")
}

/// The control's current value (empty when the attribute is absent)
pub fn control_value<'a>(tree: &'a DomTree, id: NodeId) -> &'a str {
    tree.attr(id, "value").unwrap_or("")
}

/// Collect a form's submittable controls in document order
pub fn form_controls(tree: &DomTree, form: NodeId) -> Vec<NodeId> {
    tree.descendants(form)
        .filter(|&id| is_submittable(tree, id))
        .collect()
}

/// Collect a form's controls whose name attribute equals `name`
pub fn named_controls(tree: &DomTree, form: NodeId, name: &str) -> Vec<NodeId> {
    form_controls(tree, form)
        .into_iter()
        .filter(|&id| control_name(tree, id) == Some(name))
        .collect()
}
