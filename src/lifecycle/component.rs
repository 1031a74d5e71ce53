//! # Component instrumentation driver.
//!
//! Wraps one mounted component and turns its lifecycle into registry calls,
//! tracking events and timeline marks.
//!
//! ```text
//! will_insert ──► mark Initializing, track componentInitializing
//!   └─ has predicate? ─► subscribe_component ─► Completion ─► monitor()
//!                                                              └─► became_interactive
//! report_interactive (no predicate) ──────────────────────────────► became_interactive
//! became_interactive ─► unsubscribe own id, mark Interactive (+ Latency),
//!                       track componentInteractive, notify registry
//! will_destroy ─► unsubscribe own id, report_non_interactive
//! ```
//!
//! A component either declares a predicate (a *subscriber*, interactive once
//! its descendants are) or reports itself interactive by hand (a *leaf*).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::InteractivityError;
use crate::reporter::{Reporter, timeline_component_id};
use crate::subscribers::{Completion, ComponentSubscription, Predicate, Query, predicate};
use crate::timeline::{TimelineLabel, mark_timeline};
use crate::tracking::{TrackingEvent, TrackingKind};

use super::context::Instruments;

/// Lifecycle driver for a single component instance.
pub struct ComponentInstrumentation {
    reporter: Arc<dyn Reporter + Send + Sync>,
    predicate: Option<Predicate>,
    instruments: Instruments,
    initialized_at: Mutex<Option<f64>>,
}

impl ComponentInstrumentation {
    /// Creates a leaf driver: the component must call [`report_interactive`](Self::report_interactive).
    pub fn new(reporter: Arc<dyn Reporter + Send + Sync>, instruments: Instruments) -> Self {
        Self {
            reporter,
            predicate: None,
            instruments,
            initialized_at: Mutex::new(None),
        }
    }

    /// Turns the driver into a subscriber gated by `f`.
    pub fn with_predicate<F>(self, f: F) -> Self
    where
        F: Fn(&Query<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_shared_predicate(predicate(f))
    }

    /// Turns the driver into a subscriber gated by an already shared predicate.
    pub fn with_shared_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Whether the component declares a predicate.
    pub fn is_subscriber(&self) -> bool {
        self.predicate.is_some()
    }

    /// The wrapped reporter.
    pub fn reporter(&self) -> &dyn Reporter {
        &*self.reporter
    }

    /// Component is about to render.
    ///
    /// Subscribers get the completion to hand to [`monitor`](Self::monitor);
    /// leaves get `None`.
    pub fn will_insert(&self) -> Result<Option<Completion>, InteractivityError> {
        let now = self.instruments.tracker.now();
        *self.initialized_at.lock() = Some(now);

        self.mark(TimelineLabel::Initializing);
        self.send(TrackingEvent::new(TrackingKind::ComponentInitializing).with_client_time(now));

        let Some(predicate) = &self.predicate else {
            return Ok(None);
        };
        let spec = ComponentSubscription::new(self.reporter.subscription_id())
            .with_name(self.reporter.reporting_name())
            .with_shared_predicate(Arc::clone(predicate));
        self.instruments.registry.subscribe_component(spec).map(Some)
    }

    /// Waits for the subscription to resolve, then reports interactive.
    ///
    /// A cancelled subscription (the component was torn down first) is ignored.
    pub async fn monitor(&self, completion: Completion) {
        match completion.wait().await {
            Ok(()) => self.became_interactive(),
            Err(e) => {
                tracing::trace!(component = %self.reporter.reporting_name(), error = %e, "component monitoring ended");
            }
        }
    }

    /// Reports a leaf component interactive.
    ///
    /// Fails with [`InteractivityError::PredicateDeclared`] for subscribers,
    /// whose interactivity is derived from their descendants.
    pub fn report_interactive(&self) -> Result<(), InteractivityError> {
        if self.is_subscriber() {
            return Err(InteractivityError::PredicateDeclared {
                reporter: self.reporter.reporting_name().into_owned(),
            });
        }
        self.became_interactive();
        Ok(())
    }

    /// Reports that the component is no longer interactive (reloading, teardown).
    pub fn report_non_interactive(&self) {
        self.instruments
            .registry
            .did_reporter_become_non_interactive(&*self.reporter);
    }

    /// Component is being torn down.
    pub fn will_destroy(&self) {
        if self.is_subscriber() {
            self.instruments
                .registry
                .unsubscribe_component(&self.reporter.subscription_id());
        }
        self.report_non_interactive();
    }

    /// Records the interactive transition and notifies the nearest subscriber.
    pub fn became_interactive(&self) {
        let now = self.instruments.tracker.now();
        self.instruments
            .registry
            .unsubscribe_component(&self.reporter.subscription_id());
        self.mark(TimelineLabel::Interactive);

        let mut event = TrackingEvent::new(TrackingKind::ComponentInteractive).with_client_time(now);
        if let Some(started) = *self.initialized_at.lock() {
            event = event.with_time_elapsed(now - started);
        }
        self.send(event);

        self.instruments
            .registry
            .did_reporter_become_interactive(&*self.reporter);
    }

    fn mark(&self, kind: TimelineLabel) {
        if !self
            .instruments
            .tracker
            .config()
            .component_timeline_enabled(self.is_subscriber())
        {
            return;
        }
        let id = self.reporter.subscription_id();
        let label = timeline_component_id(&id);
        mark_timeline(&*self.instruments.timeline, kind, |t| {
            format!("Component {t}: {label}")
        });
    }

    fn send(&self, event: TrackingEvent) {
        let tracker = &self.instruments.tracker;
        if !tracker.config().component_tracking_enabled(self.is_subscriber()) {
            return;
        }
        tracker.track_component(event.with_component(
            self.reporter.reporting_name().into_owned(),
            self.reporter.subscription_id().into_owned(),
        ));
    }
}
