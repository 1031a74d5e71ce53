//! # Reporters: entities that declare themselves interactive.
//!
//! A [`Reporter`] is anything mounted in the UI tree (component or route
//! instance) that reports interactive/non-interactive transitions to the
//! [`InteractivityRegistry`](crate::InteractivityRegistry).
//!
//! The engine never owns reporters. It only reads two projections of their
//! identity (see [`identity`]) and walks their ancestry through
//! [`Reporter::parent`] to find the nearest subscribing ancestor:
//!
//! ```text
//! application-wrapper   (root sentinel, walk stops here)
//!   └─ posts-page       (subscribed: is_interactive = all(["post-list"]))
//!        └─ layout
//!             └─ post-list   ── did_reporter_become_interactive ──► posts-page
//! ```

mod identity;
mod node;

pub use identity::{
    ROOT_REPORTING_NAME, component_identity, reporting_name, route_identity, subscription_id,
    timeline_component_id,
};
pub use node::ViewNode;

use std::borrow::Cow;

/// Entity capable of reporting interactive/non-interactive transitions.
///
/// Only [`identity`](Self::identity) and [`parent`](Self::parent) are required;
/// the name and id projections default to the pure functions in [`identity`].
pub trait Reporter {
    /// Structural identity, e.g. `<app@component:foo-bar::ember1234>`.
    fn identity(&self) -> &str;

    /// Structural parent, or `None` at the root of the UI tree.
    fn parent(&self) -> Option<&dyn Reporter>;

    /// Human-readable name used to aggregate counts. Not unique.
    fn reporting_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(reporting_name(self.identity()))
    }

    /// Unique id used to key component subscriptions.
    fn subscription_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(subscription_id(self.identity()))
    }
}

/// Iterates a reporter's strict ancestors, nearest first.
///
/// Stops after yielding the first ancestor named [`ROOT_REPORTING_NAME`], or
/// when the tree runs out of parents. The walk is bounded by tree depth.
pub fn ancestors<'a>(reporter: &'a dyn Reporter) -> impl Iterator<Item = &'a dyn Reporter> + 'a {
    let mut next = reporter.parent();
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let current = next?;
        if current.reporting_name() == ROOT_REPORTING_NAME {
            done = true;
        }
        next = current.parent();
        Some(current)
    })
}
