//! # Test support: recording doubles and interactivity assertions.
//!
//! Available in this crate's tests and, with the `test-support` feature, to
//! downstream crates.
//!
//! - [`RecordingSink`] keeps every tracking event it receives.
//! - [`RecordingTimeline`] keeps every mark and measure.
//! - [`RecordingRegistry`] wraps a registry and remembers which subscriptions
//!   were satisfied, by name.
//!
//! ## Example
//! ```rust,ignore
//! use interactivity::RouteSubscription;
//! use interactivity::testing::RecordingRegistry;
//! use interactivity::reporter::{ViewNode, component_identity};
//!
//! let rec = RecordingRegistry::new();
//! rec.subscribe_route(RouteSubscription::new("home").with_predicate(|q| q.is_interactive("hero")))
//!     .unwrap();
//!
//! let root = ViewNode::root("<app@view:application-wrapper::ember1>");
//! rec.registry().did_reporter_become_interactive(&*ViewNode::child(&root, component_identity("app", "hero", "e2")));
//! rec.assert_interactive("home", None);
//! rec.assert_non_interactive("profile");
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::InteractivityRegistry;
use crate::error::InteractivityError;
use crate::subscribers::{Completion, ComponentSubscription, RouteSubscription};
use crate::timeline::TimelineMarker;
use crate::tracking::{Track, TrackingEvent};

/// Tracking sink that stores events in arrival order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TrackingEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of received events.
    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events.lock().clone()
    }

    /// Wire names of received events.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(TrackingEvent::name).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl Track for RecordingSink {
    async fn on_event(&self, event: &TrackingEvent) {
        self.events.lock().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Timeline backend that stores marks and measures.
#[derive(Default)]
pub struct RecordingTimeline {
    marks: Mutex<Vec<String>>,
    measures: Mutex<Vec<(String, String, String)>>,
}

impl RecordingTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed marks, in order.
    pub fn marks(&self) -> Vec<String> {
        self.marks.lock().clone()
    }

    /// Recorded measures as `(label, start_mark, end_mark)`.
    pub fn measures(&self) -> Vec<(String, String, String)> {
        self.measures.lock().clone()
    }
}

impl TimelineMarker for RecordingTimeline {
    fn mark(&self, label: &str) {
        self.marks.lock().push(label.to_string());
    }

    fn measure(&self, label: &str, start_mark: &str, end_mark: &str) {
        self.measures
            .lock()
            .push((label.to_string(), start_mark.to_string(), end_mark.to_string()));
    }
}

/// Registry wrapper recording every subscription made through it.
pub struct RecordingRegistry {
    registry: Arc<InteractivityRegistry>,
    subscriptions: Mutex<Vec<(String, Completion)>>,
}

impl Default for RecordingRegistry {
    fn default() -> Self {
        Self {
            registry: InteractivityRegistry::new(),
            subscriptions: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing registry.
    pub fn wrap(registry: Arc<InteractivityRegistry>) -> Self {
        Self {
            registry,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped registry, for handing to drivers.
    pub fn registry(&self) -> &Arc<InteractivityRegistry> {
        &self.registry
    }

    /// Subscribes a component and records it under its name.
    pub fn subscribe_component(
        &self,
        spec: ComponentSubscription,
    ) -> Result<Completion, InteractivityError> {
        let name = spec.name().into_owned();
        let completion = self.registry.subscribe_component(spec)?;
        self.record(name, &completion);
        Ok(completion)
    }

    /// Subscribes a route and records it under its name.
    pub fn subscribe_route(&self, spec: RouteSubscription) -> Result<Completion, InteractivityError> {
        let name = spec.name().to_string();
        let completion = self.registry.subscribe_route(spec)?;
        self.record(name, &completion);
        Ok(completion)
    }

    /// Records a completion obtained elsewhere (e.g. from a driver).
    pub fn record(&self, name: impl Into<String>, completion: &Completion) {
        self.subscriptions.lock().push((name.into(), completion.clone()));
    }

    /// How many recorded subscriptions named `name` were satisfied.
    pub fn reported(&self, name: &str) -> usize {
        self.subscriptions
            .lock()
            .iter()
            .filter(|(n, c)| n == name && c.is_resolved())
            .count()
    }

    /// Forgets every recorded subscription.
    pub fn reset(&self) {
        self.subscriptions.lock().clear();
    }

    /// Panics unless `name` was satisfied (exactly `count` times, when given).
    #[track_caller]
    pub fn assert_interactive(&self, name: &str, count: Option<usize>) {
        let reported = self.reported(name);
        match count {
            Some(count) => assert_eq!(
                reported, count,
                "expected {name} to report interactive {count} times"
            ),
            None => assert!(reported > 0, "{name} did not report interactive"),
        }
    }

    /// Panics if `name` was satisfied.
    #[track_caller]
    pub fn assert_non_interactive(&self, name: &str) {
        assert_eq!(
            self.reported(name),
            0,
            "{name} reported interactive when it should not have"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{ViewNode, component_identity};

    #[test]
    fn counts_satisfied_subscriptions_by_name() {
        let rec = RecordingRegistry::new();
        let root = ViewNode::root("<app@view:application-wrapper::ember1>");

        rec.subscribe_route(RouteSubscription::new("home").with_predicate(|_| true))
            .expect("subscribe");
        rec.subscribe_route(RouteSubscription::new("home").with_predicate(|q| q.is_interactive("x")))
            .expect("subscribe");
        rec.assert_interactive("home", Some(1));

        rec.registry()
            .did_reporter_become_interactive(&*ViewNode::child(&root, component_identity("app", "x", "e2")));
        rec.assert_interactive("home", Some(2));
        rec.assert_non_interactive("about");

        rec.reset();
        rec.assert_non_interactive("home");
    }

    #[test]
    #[should_panic(expected = "did not report interactive")]
    fn unresolved_subscription_fails_assertion() {
        let rec = RecordingRegistry::new();
        rec.subscribe_route(RouteSubscription::new("home").with_predicate(|_| false))
            .expect("subscribe");
        rec.assert_interactive("home", None);
    }
}
