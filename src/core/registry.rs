//! # Interactivity registry - routes reports to the right subscriber.
//!
//! The registry is the per-application bookkeeping structure. It owns every
//! live component subscriber and the single route slot, and forwards each
//! interactive/non-interactive report to the nearest subscribing ancestor:
//!
//! ```text
//! did_reporter_become_interactive(reporter)
//!   └─► subscriber_for(reporter)
//!         ├─ walk ancestors (nearest first, stop at application-wrapper)
//!         │     └─ first ancestor whose subscription id is registered ─► ComponentSubscriber
//!         └─ none found ─────────────────────────────────────────────► RouteSubscriber
//!   └─► child_became_interactive(reporter)      (count += 1)
//!   └─► check_interactivity()                    (same critical section)
//!         └─ route resolved? ─► unsubscribe route
//! ```
//!
//! ## Rules
//! - Every count change is immediately followed by a satisfaction check.
//! - At most one route subscription is active; subscribing a route first
//!   cancels the previous one.
//! - A route never stays active past its own satisfaction.
//! - Unsubscribe operations are idempotent.
//! - No retries: callers re-subscribe after a failure.
//!
//! A predicate that panics is contained here: its subscriber is failed
//! ([`InteractivityError::PredicateFailed`]) and removed, and the report that
//! triggered it returns normally.
//!
//! Predicates run while the registry lock is held. They only see a read-only
//! [`Query`](crate::Query), so they cannot call back into the registry.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::InteractivityError;
use crate::reporter::{Reporter, ancestors};
use crate::subscribers::{
    Completion, ComponentSubscriber, ComponentSubscription, RouteSubscriber, RouteSubscription,
    Subscriber,
};

/// Which subscriber receives a reporter's notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberTarget {
    /// Nearest subscribing ancestor component, by subscription id.
    Component(String),
    /// The current route slot.
    Route,
}

/// Mutable registry state (guarded by the registry lock).
#[derive(Default)]
struct State {
    components: HashMap<String, ComponentSubscriber>,
    route: RouteSubscriber,
}

impl State {
    fn target_for(&self, reporter: &dyn Reporter) -> SubscriberTarget {
        for ancestor in ancestors(reporter) {
            let id = ancestor.subscription_id();
            if self.components.contains_key(id.as_ref()) {
                return SubscriberTarget::Component(id.into_owned());
            }
        }
        SubscriberTarget::Route
    }

    /// Applies `update` to the target subscriber, then checks it.
    ///
    /// A panicking predicate fails its subscriber and takes it out of the
    /// registry so later reports are not routed to it.
    fn notify(&mut self, reporter: &dyn Reporter, update: fn(&mut dyn Subscriber, &dyn Reporter)) {
        match self.target_for(reporter) {
            SubscriberTarget::Component(id) => {
                let Some(sub) = self.components.get_mut(&id) else {
                    return;
                };
                update(sub, reporter);
                if guarded_check(sub).is_none() {
                    tracing::warn!(%id, "component predicate panicked; subscription dropped");
                    self.components.remove(&id);
                }
            }
            SubscriberTarget::Route => {
                update(&mut self.route, reporter);
                self.check_route();
            }
        }
    }

    /// Checks the route slot, disarming it once satisfied or failed.
    ///
    /// Returns `false` if the predicate panicked.
    fn check_route(&mut self) -> bool {
        match guarded_check(&mut self.route) {
            Some(true) => {
                self.route.unsubscribe();
                true
            }
            Some(false) => true,
            None => {
                tracing::warn!(route = ?self.route.name(), "route predicate panicked; route unsubscribed");
                self.route.unsubscribe();
                false
            }
        }
    }
}

/// Runs `check_interactivity`, containing a predicate panic.
///
/// On panic the subscriber's completion is failed and `None` is returned.
fn guarded_check(sub: &mut dyn Subscriber) -> Option<bool> {
    match panic::catch_unwind(AssertUnwindSafe(|| sub.check_interactivity())) {
        Ok(resolved) => Some(resolved),
        Err(_) => {
            sub.fail();
            None
        }
    }
}

/// Per-application interactivity registry.
///
/// Cheap to share: construct once and hand out `Arc` clones to lifecycle drivers.
///
/// ## Example
/// ```rust
/// use interactivity::{InteractivityRegistry, RouteSubscription};
/// use interactivity::reporter::{ViewNode, component_identity};
///
/// let registry = InteractivityRegistry::new();
/// let done = registry
///     .subscribe_route(RouteSubscription::new("posts").with_predicate(|q| q.all(["a", "b"])))
///     .unwrap();
///
/// let root = ViewNode::root("<app@view:application-wrapper::ember1>");
/// registry.did_reporter_become_interactive(&*ViewNode::child(&root, component_identity("app", "a", "e2")));
/// assert!(!done.is_resolved());
/// registry.did_reporter_become_interactive(&*ViewNode::child(&root, component_identity("app", "b", "e3")));
/// assert!(done.is_resolved());
/// assert!(!registry.is_route_active());
/// ```
pub struct InteractivityRegistry {
    state: Mutex<State>,
}

impl InteractivityRegistry {
    /// Creates a new registry with an inactive route slot.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
        })
    }

    /// Subscribes a component to the reports of its descendants.
    ///
    /// The subscriber checks its predicate immediately, so the returned
    /// completion may already be resolved. Subscribing an id that is already
    /// registered replaces the previous subscriber (its pending completion is
    /// cancelled).
    pub fn subscribe_component(
        &self,
        spec: ComponentSubscription,
    ) -> Result<Completion, InteractivityError> {
        let id = spec.id().to_string();
        let subscriber = panic::catch_unwind(AssertUnwindSafe(|| ComponentSubscriber::new(spec)))
            .map_err(|_| {
                tracing::warn!(%id, "component predicate panicked on subscribe");
                InteractivityError::PredicateFailed {
                    subscriber: id.clone(),
                }
            })??;
        let completion = subscriber.completion().ok_or_else(|| InteractivityError::Cancelled {
            subscriber: id.clone(),
        })?;

        let mut state = self.state.lock();
        if state.components.insert(id.clone(), subscriber).is_some() {
            tracing::warn!(%id, "component subscription replaced");
        } else {
            tracing::debug!(%id, "component subscribed");
        }
        Ok(completion)
    }

    /// Removes a component subscription. Absent ids are ignored.
    ///
    /// Returns `true` if a subscriber was removed.
    pub fn unsubscribe_component(&self, id: &str) -> bool {
        let removed = self.state.lock().components.remove(id).is_some();
        if removed {
            tracing::debug!(%id, "component unsubscribed");
        }
        removed
    }

    /// Monitors a route, replacing any active route subscription.
    ///
    /// The predicate is checked immediately; once it holds the completion
    /// resolves and the route slot is disarmed automatically.
    pub fn subscribe_route(&self, spec: RouteSubscription) -> Result<Completion, InteractivityError> {
        let mut state = self.state.lock();
        state.route.unsubscribe();

        let name = spec.name().to_string();
        let completion = state.route.subscribe(spec)?;
        tracing::debug!(route = %name, "route subscribed");

        if !state.check_route() {
            return Err(InteractivityError::PredicateFailed { subscriber: name });
        }
        Ok(completion)
    }

    /// Disarms the route slot. Idempotent.
    pub fn unsubscribe_route(&self) {
        self.state.lock().route.unsubscribe();
    }

    /// Resolves which subscriber should receive `reporter`'s notifications.
    ///
    /// Walks the ancestry nearest-first and returns the first ancestor with a
    /// registered component subscription, or the route slot if there is none.
    pub fn subscriber_for(&self, reporter: &dyn Reporter) -> SubscriberTarget {
        self.state.lock().target_for(reporter)
    }

    /// Records that `reporter` became interactive and re-checks its subscriber.
    pub fn did_reporter_become_interactive(&self, reporter: &dyn Reporter) {
        self.state
            .lock()
            .notify(reporter, |sub, r| sub.child_became_interactive(r));
    }

    /// Records that `reporter` is no longer interactive and re-checks its subscriber.
    pub fn did_reporter_become_non_interactive(&self, reporter: &dyn Reporter) {
        self.state
            .lock()
            .notify(reporter, |sub, r| sub.child_became_non_interactive(r));
    }

    /// Returns `true` while a route is being monitored.
    pub fn is_route_active(&self) -> bool {
        self.state.lock().route.is_active()
    }

    /// Name of the monitored route, if any.
    pub fn active_route_name(&self) -> Option<String> {
        self.state.lock().route.name().map(str::to_string)
    }

    /// Count the route slot holds for `name`.
    pub fn route_count(&self, name: &str) -> u32 {
        self.state.lock().route.counts().count(name)
    }

    /// Count the component subscriber `id` holds for `name`.
    pub fn component_count(&self, id: &str, name: &str) -> Option<u32> {
        self.state
            .lock()
            .components
            .get(id)
            .map(|sub| sub.counts().count(name))
    }

    /// Returns `true` if `id` has a live component subscription.
    pub fn is_subscribed(&self, id: &str) -> bool {
        self.state.lock().components.contains_key(id)
    }

    /// Returns sorted list of subscribed component ids.
    pub fn component_ids(&self) -> Vec<String> {
        let state = self.state.lock();
        let mut ids: Vec<String> = state.components.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{ROOT_REPORTING_NAME, ViewNode, component_identity};
    use crate::subscribers::{all_of, exactly, predicate};
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn app_root() -> Arc<ViewNode> {
        ViewNode::named(None, "<app@view:wrapper::ember0>", ROOT_REPORTING_NAME)
    }

    fn node(parent: &Arc<ViewNode>, name: &str, instance: &str) -> Arc<ViewNode> {
        ViewNode::child(parent, component_identity("app", name, instance))
    }

    fn route(registry: &InteractivityRegistry, name: &str, predicate: crate::Predicate) -> Completion {
        registry
            .subscribe_route(RouteSubscription::new(name).with_shared_predicate(predicate))
            .expect("predicate given")
    }

    fn is_pending(completion: &Completion) -> bool {
        completion.clone().wait().now_or_never().is_none()
    }

    #[test]
    fn tracks_interactive_reporters_on_route() {
        let registry = InteractivityRegistry::new();
        let _pending = route(&registry, "test.route.foo", predicate(|_| false));
        let root = app_root();
        let reporter = node(&root, "foo-bar", "e1");

        registry.did_reporter_become_interactive(&*reporter);
        assert_eq!(registry.route_count("foo-bar"), 1);
        registry.did_reporter_become_non_interactive(&*reporter);
        assert_eq!(registry.route_count("foo-bar"), 0);
    }

    #[test]
    fn counts_multiple_instances_of_one_name() {
        let registry = InteractivityRegistry::new();
        let _pending = route(&registry, "test.route.foo", predicate(|_| false));
        let root = app_root();
        let first = node(&root, "foo-bar", "e1");
        let second = node(&root, "foo-bar", "e2");

        registry.did_reporter_become_interactive(&*first);
        registry.did_reporter_become_interactive(&*second);
        assert_eq!(registry.route_count("foo-bar"), 2);
        registry.did_reporter_become_non_interactive(&*first);
        assert_eq!(registry.route_count("foo-bar"), 1);
    }

    #[test]
    fn route_resolves_once_all_children_report() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let a = node(&root, "a", "e1");
        let b = node(&root, "b", "e2");

        let done = route(&registry, "r", all_of(["a", "b"]));
        registry.did_reporter_become_interactive(&*a);
        assert!(is_pending(&done));
        assert!(registry.is_route_active());

        registry.did_reporter_become_interactive(&*b);
        assert_eq!(done.clone().wait().now_or_never(), Some(Ok(())));
        assert!(!registry.is_route_active());

        // Further reports reach an inactive slot and change nothing.
        registry.did_reporter_become_non_interactive(&*a);
        registry.did_reporter_become_interactive(&*a);
        assert_eq!(done.wait().now_or_never(), Some(Ok(())));
    }

    #[test]
    fn earlier_reports_count_toward_later_route() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        registry.did_reporter_become_interactive(&*node(&root, "foo-bar-1", "e1"));

        let done = route(&registry, "r", all_of(["foo-bar-1", "foo-bar-2"]));
        assert!(is_pending(&done));
        registry.did_reporter_become_interactive(&*node(&root, "foo-bar-2", "e2"));
        assert!(done.is_resolved());
    }

    #[test]
    fn vacuous_route_resolves_and_disarms_immediately() {
        let registry = InteractivityRegistry::new();
        let done = route(&registry, "empty", all_of(Vec::<String>::new()));
        assert!(done.is_resolved());
        assert!(!registry.is_route_active());
    }

    #[test]
    fn second_route_subscription_cancels_first() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let first = route(&registry, "first", all_of(["x"]));
        let second = route(&registry, "second", all_of(["x"]));
        assert_eq!(registry.active_route_name().as_deref(), Some("second"));

        registry.did_reporter_become_interactive(&*node(&root, "x", "e1"));
        assert!(matches!(
            first.wait().now_or_never(),
            Some(Err(InteractivityError::Cancelled { .. }))
        ));
        assert_eq!(second.wait().now_or_never(), Some(Ok(())));
    }

    #[test]
    fn unsubscribed_route_never_resolves() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let done = route(&registry, "r", all_of(["x"]));
        registry.unsubscribe_route();
        registry.unsubscribe_route();

        registry.did_reporter_become_interactive(&*node(&root, "x", "e1"));
        assert!(!done.is_resolved());
        assert!(done.wait().now_or_never().expect("closed").is_err());
    }

    #[test]
    fn two_items_under_parent_predicate() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let parent = node(&root, "list", "e1");
        let done = registry
            .subscribe_component(
                ComponentSubscription::new(component_identity("app", "list", "e1"))
                    .with_shared_predicate(exactly("item", 2)),
            )
            .expect("predicate given");

        registry.did_reporter_become_interactive(&*node(&parent, "item", "e2"));
        assert!(is_pending(&done));
        assert_eq!(registry.component_count(&component_identity("app", "list", "e1"), "item"), Some(1));

        registry.did_reporter_become_interactive(&*node(&parent, "item", "e3"));
        assert!(done.is_resolved());
        assert_eq!(registry.route_count("item"), 0);
    }

    #[test]
    fn report_then_retract_before_check_nets_zero() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let a = node(&root, "a", "e1");
        registry.did_reporter_become_interactive(&*a);
        registry.did_reporter_become_non_interactive(&*a);
        assert_eq!(registry.route_count("a"), 0);

        let done = route(&registry, "r", all_of(["a"]));
        assert!(is_pending(&done));
        assert!(registry.is_route_active());
    }

    #[test]
    fn vacuous_component_resolves_without_children() {
        let registry = InteractivityRegistry::new();
        let done = registry
            .subscribe_component(ComponentSubscription::new("c").with_predicate(|_| true))
            .expect("predicate given");
        assert_eq!(done.wait().now_or_never(), Some(Ok(())));
    }

    #[test]
    fn missing_component_predicate_is_rejected() {
        let registry = InteractivityRegistry::new();
        let err = registry
            .subscribe_component(ComponentSubscription::new("c"))
            .unwrap_err();
        assert!(err.is_contract_violation());
        assert!(registry.component_ids().is_empty());
    }

    #[test]
    fn subscriber_for_picks_nearest_ancestor() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let outer = node(&root, "outer", "e1");
        let mut cursor = node(&outer, "inner", "e2");
        for depth in 0..32 {
            cursor = node(&cursor, "filler", &format!("f{depth}"));
        }
        let leaf = node(&cursor, "leaf", "e3");

        assert_eq!(registry.subscriber_for(&*leaf), SubscriberTarget::Route);

        for id in [component_identity("app", "outer", "e1"), component_identity("app", "inner", "e2")] {
            registry
                .subscribe_component(ComponentSubscription::new(id).with_predicate(|_| false))
                .expect("predicate given");
        }
        assert_eq!(
            registry.subscriber_for(&*leaf),
            SubscriberTarget::Component(component_identity("app", "inner", "e2"))
        );

        registry.unsubscribe_component(&component_identity("app", "inner", "e2"));
        assert_eq!(
            registry.subscriber_for(&*leaf),
            SubscriberTarget::Component(component_identity("app", "outer", "e1"))
        );
    }

    #[test]
    fn walk_stops_at_root_sentinel() {
        let registry = InteractivityRegistry::new();
        let above = ViewNode::root(component_identity("app", "above", "e0"));
        let wrapper = ViewNode::named(Some(&above), "<app@view:wrapper::e1>", ROOT_REPORTING_NAME);
        let leaf = node(&wrapper, "leaf", "e2");

        registry
            .subscribe_component(ComponentSubscription::new(above.subscription_id()).with_predicate(|_| false))
            .expect("predicate given");
        assert_eq!(registry.subscriber_for(&*leaf), SubscriberTarget::Route);
    }

    #[test]
    fn nearest_subscriber_stops_traversal() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let outer = node(&root, "outer", "e1");
        let parent = node(&outer, "parent", "e2");
        let reporter = node(&node(&parent, "wrapper", "e3"), "test-reporter-1", "e4");

        let outer_calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&outer_calls);
        registry
            .subscribe_component(ComponentSubscription::new(outer.subscription_id()).with_predicate(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                false
            }))
            .expect("predicate given");

        let parent_calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&parent_calls);
        let done = registry
            .subscribe_component(ComponentSubscription::new(parent.subscription_id()).with_predicate(move |q| {
                seen.fetch_add(1, Ordering::SeqCst);
                q.is_interactive("test-reporter-1")
            }))
            .expect("predicate given");

        registry.did_reporter_become_interactive(&*reporter);
        assert!(done.is_resolved());
        assert_eq!(parent_calls.load(Ordering::SeqCst), 2);
        assert_eq!(outer_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_component_is_idempotent() {
        let registry = InteractivityRegistry::new();
        registry
            .subscribe_component(ComponentSubscription::new("keep").with_predicate(|_| false))
            .expect("predicate given");
        registry
            .subscribe_component(ComponentSubscription::new("drop").with_predicate(|_| false))
            .expect("predicate given");

        assert!(registry.unsubscribe_component("drop"));
        assert!(!registry.unsubscribe_component("drop"));
        assert!(!registry.unsubscribe_component("never"));
        assert_eq!(registry.component_ids(), vec!["keep".to_string()]);
    }

    #[tokio::test]
    async fn awaiting_route_completion_across_tasks() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let done = route(&registry, "r", all_of(["a"]));
        let waiter = tokio::spawn(async move { done.await });

        tokio::task::yield_now().await;
        registry.did_reporter_become_interactive(&*node(&root, "a", "e1"));
        assert_eq!(waiter.await.expect("join"), Ok(()));
    }

    #[test]
    fn panicking_route_predicate_disarms_slot() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let done = route(
            &registry,
            "feed",
            predicate(|q| {
                assert!(q.count("x") == 0, "feed predicate blew up");
                false
            }),
        );

        registry.did_reporter_become_interactive(&*node(&root, "x", "e1"));
        assert!(!registry.is_route_active());
        registry.did_reporter_become_interactive(&*node(&root, "y", "e2"));
        assert_eq!(registry.route_count("y"), 1);

        assert_eq!(
            done.wait().now_or_never(),
            Some(Err(InteractivityError::PredicateFailed { subscriber: "feed".into() }))
        );
    }

    #[test]
    fn panicking_component_predicate_is_removed() {
        let registry = InteractivityRegistry::new();
        let root = app_root();
        let parent = node(&root, "list", "e1");
        let id = parent.subscription_id().into_owned();
        let done = registry
            .subscribe_component(
                ComponentSubscription::new(id.as_str())
                    .with_predicate(|q| {
                        assert!(q.count("item") == 0, "list predicate blew up");
                        false
                    }),
            )
            .expect("predicate given");
        let _route = route(&registry, "r", predicate(|_| false));

        registry.did_reporter_become_interactive(&*node(&parent, "item", "e2"));
        assert!(!registry.is_subscribed(&id));
        assert!(matches!(
            done.wait().now_or_never(),
            Some(Err(InteractivityError::PredicateFailed { .. }))
        ));

        registry.did_reporter_become_interactive(&*node(&parent, "item", "e3"));
        assert_eq!(registry.route_count("item"), 1);

        let err = registry
            .subscribe_component(ComponentSubscription::new("boom").with_predicate(|_| panic!("boom")))
            .expect_err("panics on first check");
        assert_eq!(err.as_label(), "predicate_failed");
        assert!(!registry.is_subscribed("boom"));
    }
}
