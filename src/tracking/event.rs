//! # Tracking events emitted by the lifecycle drivers.
//!
//! The [`TrackingKind`] enum classifies events across two categories:
//! - **Component events**: a component started rendering / became interactive
//! - **Route events**: the three phases of a transition, plus errors
//!
//! The [`TrackingEvent`] struct carries the payload: timestamps, elapsed time,
//! component/route names and launch metadata.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the order when sinks receive events
//! from different workers.
//!
//! ## Example
//! ```rust
//! use interactivity::tracking::{TrackingEvent, TrackingKind};
//!
//! let ev = TrackingEvent::new(TrackingKind::ComponentInteractive)
//!     .with_component("feed", "<app@component:feed::ember3>")
//!     .with_client_time(12.5)
//!     .with_time_elapsed(0.25);
//!
//! assert_eq!(ev.kind.name(), "componentInteractive");
//! assert_eq!(ev.component.as_deref(), Some("feed"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of tracking events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingKind {
    // === Component events ===
    /// Component is about to render.
    ///
    /// Sets:
    /// - `component`, `component_id`
    /// - `client_time`
    ComponentInitializing,

    /// Component became interactive.
    ///
    /// Sets:
    /// - `component`, `component_id`
    /// - `client_time`
    /// - `time_elapsed`: seconds since `ComponentInitializing`
    ComponentInteractive,

    // === Route events ===
    /// Transition started validating (model hooks).
    ///
    /// Sets:
    /// - `route_name`, `destination`, `lost_visibility`, `client_time`
    RouteInitializing,

    /// Route activated; render tasks scheduled.
    ///
    /// Sets:
    /// - `route_name`, `destination`, `lost_visibility`, `client_time`
    RouteActivating,

    /// Transition completed; route is interactive.
    ///
    /// Sets:
    /// - `route_name`, `destination`, `lost_visibility`, `client_time`
    /// - `is_app_launch`
    /// - `time_elapsed`: milliseconds since navigation fetch start (app launch only)
    RouteInteractive,

    // === Errors ===
    /// Monitoring failed or was abandoned before completion.
    ///
    /// Sets:
    /// - `route_name` (when known)
    /// - `reason`
    Error,
}

impl TrackingKind {
    /// Event name as sent to analytics backends.
    pub fn name(&self) -> &'static str {
        match self {
            TrackingKind::ComponentInitializing => "componentInitializing",
            TrackingKind::ComponentInteractive => "componentInteractive",
            TrackingKind::RouteInitializing => "routeInitializing",
            TrackingKind::RouteActivating => "routeActivating",
            TrackingKind::RouteInteractive => "routeInteractive",
            TrackingKind::Error => "error",
        }
    }

    /// Returns `true` for component events.
    pub fn is_component(&self) -> bool {
        matches!(
            self,
            TrackingKind::ComponentInitializing | TrackingKind::ComponentInteractive
        )
    }

    /// Returns `true` for route phase events.
    pub fn is_route(&self) -> bool {
        matches!(
            self,
            TrackingKind::RouteInitializing
                | TrackingKind::RouteActivating
                | TrackingKind::RouteInteractive
        )
    }
}

/// Tracking event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp of creation
/// - other optional fields are set depending on the [`TrackingKind`]
#[derive(Clone, Debug)]
pub struct TrackingEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: TrackingKind,

    /// Client time in seconds (`clientTime`).
    pub client_time: Option<f64>,
    /// Elapsed time since the matching start event (`timeElapsed`).
    pub time_elapsed: Option<f64>,
    /// Component reporting name.
    pub component: Option<Arc<str>>,
    /// Component subscription id.
    pub component_id: Option<Arc<str>>,
    /// Full name of the emitting route.
    pub route_name: Option<Arc<str>>,
    /// Target route of the transition.
    pub destination: Option<Arc<str>>,
    /// Whether the document lost visibility during the transition.
    pub lost_visibility: Option<bool>,
    /// Whether this completion is the first in the application's lifetime.
    pub is_app_launch: Option<bool>,
    /// Human-readable reason (errors).
    pub reason: Option<Arc<str>>,
}

impl TrackingEvent {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: TrackingKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            client_time: None,
            time_elapsed: None,
            component: None,
            component_id: None,
            route_name: None,
            destination: None,
            lost_visibility: None,
            is_app_launch: None,
            reason: None,
        }
    }

    /// Attaches the component name and id.
    #[inline]
    pub fn with_component(mut self, name: impl Into<Arc<str>>, id: impl Into<Arc<str>>) -> Self {
        self.component = Some(name.into());
        self.component_id = Some(id.into());
        self
    }

    /// Attaches the emitting route.
    #[inline]
    pub fn with_route(mut self, route_name: impl Into<Arc<str>>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    /// Attaches the transition target.
    #[inline]
    pub fn with_destination(mut self, destination: impl Into<Arc<str>>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Attaches the client time.
    #[inline]
    pub fn with_client_time(mut self, secs: f64) -> Self {
        self.client_time = Some(secs);
        self
    }

    /// Attaches the elapsed time.
    #[inline]
    pub fn with_time_elapsed(mut self, elapsed: f64) -> Self {
        self.time_elapsed = Some(elapsed);
        self
    }

    /// Attaches the document visibility flag.
    #[inline]
    pub fn with_lost_visibility(mut self, lost: bool) -> Self {
        self.lost_visibility = Some(lost);
        self
    }

    /// Attaches the app-launch flag.
    #[inline]
    pub fn with_app_launch(mut self, is_app_launch: bool) -> Self {
        self.is_app_launch = Some(is_app_launch);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates an error event.
    #[inline]
    pub fn error(reason: impl Into<Arc<str>>) -> Self {
        TrackingEvent::new(TrackingKind::Error).with_reason(reason)
    }

    /// Event name as sent to analytics backends.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
