//! formdata-host - Host Runtime Surface
//!
//! The event dispatch mechanism and page integration the formdata shim
//! installs into: capture/bubble dispatch, per-target listener lists,
//! the programmatic-submit override slot, and native submission delivery.

mod event;
mod form_map;
mod listeners;
mod page;

pub use event::{Event, EventKind};
pub use form_map::FormDataMap;
pub use listeners::{HandlerId, ListenerCallback, ListenerOptions, ListenerRegistry};
pub use page::{callback, HostFeatures, Page, SubmitHook};
