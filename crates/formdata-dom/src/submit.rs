//! Native Submission
//!
//! Builds the urlencoded payload a real submission carries: named,
//! enabled, submittable controls in document order.

use url::form_urlencoded;

use crate::{control_name, control_value, form_controls, is_disabled, is_form, DomTree, NodeId};

/// One completed native submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRecord {
    /// Submitted (name, value) pairs in document order
    pub entries: Vec<(String, String)>,
    /// application/x-www-form-urlencoded body
    pub body: String,
}

/// Submission failure
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submit target is not a form element")]
    NotAForm,

    #[error("form is detached from the document")]
    Detached,
}

/// Build the submission payload for `form`
pub fn build_submission(tree: &DomTree, form: NodeId) -> Result<SubmitRecord, SubmitError> {
    if !is_form(tree, form) {
        return Err(SubmitError::NotAForm);
    }
    if !tree.contains(tree.root(), form) {
        return Err(SubmitError::Detached);
    }

    let mut entries = Vec::new();
    for control in form_controls(tree, form) {
        if is_disabled(tree, control) {
            continue;
        }
        let Some(name) = control_name(tree, control) else {
            continue;
        };
        entries.push((name.to_string(), control_value(tree, control).to_string()));
    }

    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish();

    tracing::debug!("built submission payload with {} entries", entries.len());
    Ok(SubmitRecord { entries, body })
}
