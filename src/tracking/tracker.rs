//! # Tracker: the drivers' handle to the tracking sinks.
//!
//! Bundles the [`InteractivityConfig`], the [`Clock`] and a [`SinkSet`].
//! Drivers build events and hand them to the tracker; the tracker applies the
//! `instrumentation` toggles and fans out to the sinks.
//!
//! ```text
//! ComponentInstrumentation ─┐
//! RouteInstrumentation ─────┼─► Tracker ── instrumentation toggles ──► SinkSet ──► sinks
//!                           │      └─ Clock (clientTime)
//! ```

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::InteractivityConfig;

use super::event::TrackingEvent;
use super::set::SinkSet;
use super::sink::Track;

/// Tracking front-end shared by all lifecycle drivers.
pub struct Tracker {
    config: Arc<InteractivityConfig>,
    clock: Arc<dyn Clock>,
    sinks: SinkSet,
}

impl Tracker {
    /// Creates a tracker and spawns one worker per sink.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        config: Arc<InteractivityConfig>,
        clock: Arc<dyn Clock>,
        sinks: Vec<Arc<dyn Track>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            clock,
            sinks: SinkSet::new(sinks),
        })
    }

    /// Creates a tracker with default config and the system clock.
    pub fn with_sinks(sinks: Vec<Arc<dyn Track>>) -> Arc<Self> {
        Self::new(
            Arc::new(InteractivityConfig::default()),
            Arc::new(SystemClock),
            sinks,
        )
    }

    /// Active configuration.
    pub fn config(&self) -> &InteractivityConfig {
        &self.config
    }

    /// Current client time in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now_secs()
    }

    /// Current client time in milliseconds.
    pub fn now_millis(&self) -> f64 {
        self.clock.now_millis()
    }

    /// Forwards a component event unless component instrumentation is disabled.
    ///
    /// Events of any other kind are dropped.
    pub fn track_component(&self, event: TrackingEvent) {
        if !event.kind.is_component() {
            tracing::warn!(event = event.name(), "non-component event passed to track_component");
            return;
        }
        if !self.config.component_instrumentation_enabled() {
            return;
        }
        self.sinks.emit(&event);
    }

    /// Forwards a route event unless route instrumentation is disabled.
    ///
    /// Events of any other kind are dropped.
    pub fn track_route(&self, event: TrackingEvent) {
        if !event.kind.is_route() {
            tracing::warn!(event = event.name(), "non-route event passed to track_route");
            return;
        }
        if !self.config.route_instrumentation_enabled() {
            return;
        }
        self.sinks.emit(&event);
    }

    /// Forwards an error event.
    pub fn track_error(&self, event: TrackingEvent) {
        tracing::debug!(reason = event.reason.as_deref().unwrap_or("unknown"), "tracking error");
        self.sinks.emit(&event);
    }

    /// Flushes queued events and stops the sink workers.
    pub async fn shutdown(&self) {
        self.sinks.shutdown().await;
    }
}
