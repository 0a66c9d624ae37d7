//! formdata-dom - Element Tree
//!
//! Arena-based element tree carrying the form-control model the formdata
//! shim integrates against.

mod attributes;
mod controls;
mod node;
mod submit;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use controls::{
    control_name, control_value, form_controls, is_disabled, is_form, is_submittable,
    named_controls,
};
pub use node::{ElementData, Node, NodeData, TextData};
pub use submit::{build_submission, SubmitError, SubmitRecord};
pub use tree::{Ancestors, Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
