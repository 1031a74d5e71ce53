//! # Route instrumentation driver.
//!
//! Every route emits three transition events; only the target (leaf) route
//! of a transition monitors interactivity:
//!
//! ```text
//! before_model(transition) ─► routeInitializing   mark Initializing
//! activate()               ─► routeActivating
//! did_transition() (leaf)
//!   ├─ has predicate ─► subscribe_route ─► Completion ─► monitor()
//!   │                                                   ├─ Ok  ─► routeInteractive
//!   │                                                   └─ Err ─► error (unless destroyed)
//!   │                     (predicate panicked ─► error, monitoring cleared)
//!   └─ no predicate  ─► routeInteractive             mark Interactive (+ Latency)
//! will_transition() (leaf) ─► error if still monitoring, unsubscribe_route
//! ```
//!
//! The first `routeInteractive` of the application is the *app launch*: it
//! carries the time elapsed since navigation fetch start, in milliseconds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::error::InteractivityError;
use crate::subscribers::{Completion, Predicate, Query, RouteSubscription, predicate};
use crate::timeline::{TimelineLabel, mark_timeline};
use crate::tracking::{TrackingEvent, TrackingKind};

use super::context::Instruments;

/// Tracked reason when the user leaves a leaf route before it became interactive.
pub const REASON_TRANSITIONED_AWAY: &str = "transitioned_before_interactive";
/// Tracked reason when a route subscription was cancelled while monitoring.
pub const REASON_MONITORING_CANCELLED: &str = "monitoring_cancelled";
/// Tracked reason when the route's predicate panicked.
pub const REASON_PREDICATE_FAILED: &str = "predicate_failed";

/// Navigation in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    target_name: String,
}

impl Transition {
    /// Transition towards the route with the given full name.
    pub fn to(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
        }
    }

    /// Full name of the destination route.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }
}

/// Lifecycle driver for a single route.
pub struct RouteInstrumentation {
    full_route_name: String,
    predicate: Option<Predicate>,
    instruments: Instruments,
    latest_transition: Mutex<Option<Transition>>,
    monitoring: AtomicBool,
    destroyed: AtomicBool,
}

impl RouteInstrumentation {
    /// Creates a driver for `full_route_name` (e.g. `posts.index`).
    pub fn new(full_route_name: impl Into<String>, instruments: Instruments) -> Self {
        Self {
            full_route_name: full_route_name.into(),
            predicate: None,
            instruments,
            latest_transition: Mutex::new(None),
            monitoring: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Makes the route wait for `f` before reporting the transition complete.
    pub fn with_predicate<F>(self, f: F) -> Self
    where
        F: Fn(&Query<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_shared_predicate(predicate(f))
    }

    /// Same as [`with_predicate`](Self::with_predicate) with an already shared predicate.
    pub fn with_shared_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Full route name.
    pub fn full_route_name(&self) -> &str {
        &self.full_route_name
    }

    /// Whether this route is the target of the latest transition.
    pub fn is_leaf(&self) -> bool {
        self.latest_transition
            .lock()
            .as_ref()
            .is_some_and(|t| t.target_name == self.full_route_name)
    }

    /// Whether a subscription is pending.
    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::Acquire)
    }

    /// Transition started validating.
    pub fn before_model(&self, transition: Transition) {
        let destination = transition.target_name.clone();
        *self.latest_transition.lock() = Some(transition);
        self.send(TrackingKind::RouteInitializing, &destination, |e| e);
        self.mark(TimelineLabel::Initializing);
    }

    /// Route activated.
    pub fn activate(&self) {
        let destination = self
            .latest_transition
            .lock()
            .as_ref()
            .map(|t| t.target_name.clone());
        if let Some(destination) = destination {
            self.send(TrackingKind::RouteActivating, &destination, |e| e);
        }
    }

    /// Transition finished; starts interactivity monitoring on the leaf route.
    ///
    /// Returns the completion to pass to [`monitor`](Self::monitor) when the
    /// route declares a predicate. Without one, the transition is reported
    /// complete right away, so call this after render.
    pub fn did_transition(&self) -> Result<Option<Completion>, InteractivityError> {
        if !self.is_leaf() {
            return Ok(None);
        }
        let Some(predicate) = &self.predicate else {
            self.send_transition_complete();
            return Ok(None);
        };

        self.monitoring.store(true, Ordering::Release);
        let spec = RouteSubscription::new(self.full_route_name.as_str())
            .with_shared_predicate(Arc::clone(predicate));
        match self.instruments.registry.subscribe_route(spec) {
            Ok(completion) => Ok(Some(completion)),
            Err(e) => {
                self.monitoring.store(false, Ordering::Release);
                if matches!(e, InteractivityError::PredicateFailed { .. }) {
                    self.track_error(REASON_PREDICATE_FAILED);
                }
                Err(e)
            }
        }
    }

    /// Waits for the route subscription and reports the outcome.
    pub async fn monitor(&self, completion: Completion) {
        match completion.wait().await {
            Ok(()) => {
                if self.monitoring.swap(false, Ordering::AcqRel) {
                    self.send_transition_complete();
                }
            }
            Err(e) => {
                if self.destroyed.load(Ordering::Acquire) {
                    return;
                }
                if self.monitoring.swap(false, Ordering::AcqRel) {
                    tracing::debug!(route = %self.full_route_name, error = %e, "route monitoring ended");
                    let reason = match e {
                        InteractivityError::PredicateFailed { .. } => REASON_PREDICATE_FAILED,
                        _ => REASON_MONITORING_CANCELLED,
                    };
                    self.track_error(reason);
                }
            }
        }
    }

    /// A new transition is leaving this route.
    pub fn will_transition(&self) {
        if !self.is_leaf() {
            return;
        }
        if self.monitoring.swap(false, Ordering::AcqRel) {
            self.track_error(REASON_TRANSITIONED_AWAY);
        }
        self.instruments.registry.unsubscribe_route();
    }

    /// Route object is being destroyed; late cancellations are ignored.
    pub fn destroy(&self) {
        self.destroyed.store(true, Ordering::Release);
    }

    fn send_transition_complete(&self) {
        let app = &self.instruments.app;
        if app.is_server_render() {
            return;
        }

        let tracker = &self.instruments.tracker;
        let launched_before = app.complete_transition();
        self.mark(TimelineLabel::Interactive);
        self.send(TrackingKind::RouteInteractive, &self.full_route_name, |e| {
            if launched_before {
                e.with_app_launch(false)
            } else {
                let now = tracker.now();
                e.with_app_launch(true)
                    .with_time_elapsed(now * 1000.0 - app.fetch_start_ms())
                    .with_client_time(now)
            }
        });
    }

    fn send<F>(&self, kind: TrackingKind, destination: &str, customize: F)
    where
        F: FnOnce(TrackingEvent) -> TrackingEvent,
    {
        let Instruments { tracker, app, .. } = &self.instruments;
        if app.is_server_render() || !tracker.config().route_tracking_enabled(self.is_leaf()) {
            return;
        }
        let event = TrackingEvent::new(kind)
            .with_route(self.full_route_name.as_str())
            .with_destination(destination)
            .with_lost_visibility(app.lost_visibility())
            .with_client_time(tracker.now());
        tracker.track_route(customize(event));
    }

    fn track_error(&self, reason: &str) {
        self.instruments
            .tracker
            .track_error(TrackingEvent::error(reason).with_route(self.full_route_name.as_str()));
    }

    fn mark(&self, kind: TimelineLabel) {
        let Instruments { tracker, app, timeline, .. } = &self.instruments;
        if app.is_server_render() || !tracker.config().route_timeline_enabled(self.is_leaf()) {
            return;
        }
        mark_timeline(&**timeline, kind, |t| format!("Route {t}: {}", self.full_route_name));
    }
}
