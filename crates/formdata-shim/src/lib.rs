//! formdata-shim - Formdata Submission Notification
//!
//! Makes a host without the formdata notification behave like one with it:
//! every form submission is intercepted, the form's submittable values are
//! collected into a mutable multi-valued mapping, a bubbling notification
//! carrying that mapping is dispatched so listeners can inspect or edit
//! the outgoing data, the real submission is replayed, and every tree
//! mutation made for the attempt is reverted.

mod detect;
mod event;
mod form_data;
mod interceptor;
mod observing;

pub use detect::HostCapabilities;
pub use event::{formdata_event, FormDataEvent};
pub use form_data::{Entries, FormData, Keys, Values};
pub use interceptor::{fire_formdata_and_submit, Installation, Shim};
pub use observing::ObservingFormData;
