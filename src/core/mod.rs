//! Engine core: the per-application registry.
//!
//! The only public API from this module is [`InteractivityRegistry`] and the
//! [`SubscriberTarget`] it reports from
//! [`subscriber_for`](InteractivityRegistry::subscriber_for).
//!
//! Internal modules:
//! - [`registry`]: subscription lifecycle and report routing.

mod registry;

pub use registry::{InteractivityRegistry, SubscriberTarget};
