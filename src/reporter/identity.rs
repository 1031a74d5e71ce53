//! # Reporter identity projections.
//!
//! Every reporter carries a structural identity string of the form
//! `<app@kind:name::instance>`, for example `<app@component:foo-bar/baz-bat::ember1234>`.
//! Two pure projections are derived from it:
//!
//! ```text
//! <app@component:foo-bar/baz-bat::ember1234>
//!                └──────┬──────┘
//!                reporting_name   (NOT unique: shared by sibling instances)
//! └────────────────┬─────────────────────────┘
//!             subscription_id     (unique per instance)
//! ```
//!
//! Counts are aggregated by reporting name, so a predicate can require
//! "exactly 2 of `item`". Subscriptions are keyed by subscription id.

/// Reporting name of the root boundary; ancestry walks stop after checking it.
pub const ROOT_REPORTING_NAME: &str = "application-wrapper";

/// Returns the human-readable reporting name of an identity.
///
/// Takes the segment between the first and second `:`. Identities without a
/// `:` are their own reporting name.
///
/// # Example
/// ```
/// use interactivity::reporter::reporting_name;
///
/// assert_eq!(reporting_name("<app@component:foo-bar/baz-bat::ember1234>"), "foo-bar/baz-bat");
/// assert_eq!(reporting_name("plain"), "plain");
/// ```
pub fn reporting_name(identity: &str) -> &str {
    identity.split(':').nth(1).unwrap_or(identity)
}

/// Returns the unique subscription id of an identity (the identity itself).
#[inline]
pub fn subscription_id(identity: &str) -> &str {
    identity
}

/// Formats a component identity: `<{app}@component:{name}::{instance}>`.
pub fn component_identity(app: &str, name: &str, instance: &str) -> String {
    format!("<{app}@component:{name}::{instance}>")
}

/// Formats a route identity: `<{app}@route:{name}::{instance}>`.
pub fn route_identity(app: &str, name: &str, instance: &str) -> String {
    format!("<{app}@route:{name}::{instance}>")
}

/// Shortens a component subscription id for timeline labels.
///
/// Keeps whatever follows the first `component:` and drops the trailing `>`.
///
/// KNOWN BUG: a component whose own name contains `component` followed by
/// `:` (e.g. `user-component` in `user-component::ember1`) is cut at that
/// point, so its label loses the instance suffix and is no longer unique.
/// Existing timeline consumers key on these labels, so the behavior stays.
/// Ids without `component:` are returned unchanged.
///
/// # Example
/// ```
/// use interactivity::reporter::timeline_component_id;
///
/// assert_eq!(timeline_component_id("<app@component:foo::ember1>"), "foo::ember1");
/// assert_eq!(timeline_component_id("<app@component:user-component::ember1>"), "user");
/// ```
pub fn timeline_component_id(subscription_id: &str) -> &str {
    match subscription_id.split("component:").nth(1) {
        Some(rest) => {
            let mut chars = rest.chars();
            chars.next_back();
            chars.as_str()
        }
        None => subscription_id,
    }
}
