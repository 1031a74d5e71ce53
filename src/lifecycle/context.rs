//! Application-wide state shared by every driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::InteractivityRegistry;
use crate::timeline::{NoopTimeline, TimelineMarker};
use crate::tracking::Tracker;

/// Per-application facts the route driver reads when building events.
///
/// One instance per running application, shared through [`Instruments`].
#[derive(Debug, Default)]
pub struct AppContext {
    first_transition_completed: AtomicBool,
    lost_visibility: AtomicBool,
    fetch_start_ms: f64,
    is_server_render: bool,
}

impl AppContext {
    /// Creates a context for a client render whose navigation started at `fetch_start_ms`.
    pub fn new(fetch_start_ms: f64) -> Self {
        Self {
            fetch_start_ms,
            ..Self::default()
        }
    }

    /// Creates a context for a server-side render. Drivers emit nothing.
    pub fn server_render() -> Self {
        Self {
            is_server_render: true,
            ..Self::default()
        }
    }

    /// Navigation fetch start in milliseconds since the Unix epoch.
    pub fn fetch_start_ms(&self) -> f64 {
        self.fetch_start_ms
    }

    /// Whether the application renders on the server.
    pub fn is_server_render(&self) -> bool {
        self.is_server_render
    }

    /// Whether the document was hidden at some point.
    pub fn lost_visibility(&self) -> bool {
        self.lost_visibility.load(Ordering::Acquire)
    }

    /// Records that the document lost visibility. Sticky.
    pub fn mark_lost_visibility(&self) {
        self.lost_visibility.store(true, Ordering::Release);
    }

    /// Whether a route transition already completed in this application.
    pub fn first_transition_completed(&self) -> bool {
        self.first_transition_completed.load(Ordering::Acquire)
    }

    /// Flags the first transition as completed, returning the previous value.
    pub(crate) fn complete_transition(&self) -> bool {
        self.first_transition_completed.swap(true, Ordering::AcqRel)
    }

    /// Forgets that a transition completed.
    pub fn reset_first_transition(&self) {
        self.first_transition_completed.store(false, Ordering::Release);
    }
}

/// Services a lifecycle driver needs: registry, tracker, timeline and app context.
#[derive(Clone)]
pub struct Instruments {
    pub registry: Arc<InteractivityRegistry>,
    pub tracker: Arc<Tracker>,
    pub timeline: Arc<dyn TimelineMarker>,
    pub app: Arc<AppContext>,
}

impl Instruments {
    /// Bundles a registry and tracker with a no-op timeline and a fresh client context.
    pub fn new(registry: Arc<InteractivityRegistry>, tracker: Arc<Tracker>) -> Self {
        Self {
            registry,
            tracker,
            timeline: Arc::new(NoopTimeline),
            app: Arc::new(AppContext::default()),
        }
    }

    /// Replaces the timeline backend.
    pub fn with_timeline(mut self, timeline: Arc<dyn TimelineMarker>) -> Self {
        self.timeline = timeline;
        self
    }

    /// Replaces the application context.
    pub fn with_app(mut self, app: Arc<AppContext>) -> Self {
        self.app = app;
        self
    }
}
