//! # Route subscriber slot.
//!
//! Exactly one [`RouteSubscriber`] exists per registry. It is a persistent slot
//! that is re-armed on every navigation:
//!
//! ```text
//!            subscribe(name, predicate)
//!   Inactive ──────────────────────────► Active
//!      ▲                                   │
//!      └──── unsubscribe / satisfied ──────┘
//! ```
//!
//! ## Rules
//! - `subscribe` while active overwrites name, predicate and signal; the old
//!   completion is cancelled.
//! - `check_interactivity` is a no-op while inactive.
//! - Counts survive across navigations: reporters that became interactive
//!   before the route subscribed still count.

use std::sync::Arc;

use crate::error::InteractivityError;

use super::counts::{Predicate, Query, ReporterCounts};
use super::signal::{Completion, CompletionSignal};
use super::subscriber::Subscriber;

/// Request to monitor a route.
#[derive(Clone)]
pub struct RouteSubscription {
    name: String,
    predicate: Option<Predicate>,
}

impl RouteSubscription {
    /// Starts a subscription request for the route with the given full name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicate: None,
        }
    }

    /// Sets the interactivity predicate from a closure.
    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Query<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(f));
        self
    }

    /// Sets an already shared predicate.
    pub fn with_shared_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Full route name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// State of an armed slot.
struct ActiveRoute {
    name: String,
    predicate: Predicate,
    signal: CompletionSignal,
}

/// Singleton route slot.
#[derive(Default)]
pub struct RouteSubscriber {
    active: Option<ActiveRoute>,
    counts: ReporterCounts,
}

impl RouteSubscriber {
    /// Creates an inactive slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the slot, replacing any previous subscription.
    ///
    /// Fails with [`InteractivityError::MissingPredicate`] if the request has
    /// no predicate; the slot is left untouched in that case.
    pub fn subscribe(&mut self, spec: RouteSubscription) -> Result<Completion, InteractivityError> {
        let RouteSubscription { name, predicate } = spec;
        let Some(predicate) = predicate else {
            return Err(InteractivityError::MissingPredicate { id: name });
        };

        let signal = CompletionSignal::new(name.as_str());
        let completion = signal.completion();
        self.active = Some(ActiveRoute {
            name,
            predicate,
            signal,
        });
        Ok(completion)
    }

    /// Disarms the slot. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(route) = self.active.take() {
            tracing::trace!(route = %route.name, resolved = route.signal.is_resolved(), "route unsubscribed");
        }
    }

    /// Returns `true` while a route is being monitored.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the monitored route.
    pub fn name(&self) -> Option<&str> {
        self.active.as_ref().map(|r| r.name.as_str())
    }
}

impl Subscriber for RouteSubscriber {
    fn counts(&self) -> &ReporterCounts {
        &self.counts
    }

    fn counts_mut(&mut self) -> &mut ReporterCounts {
        &mut self.counts
    }

    fn check_interactivity(&mut self) -> bool {
        let Some(route) = &self.active else {
            return false;
        };
        if (route.predicate)(&self.counts.query()) && route.signal.resolve() {
            tracing::debug!(route = %route.name, "route became interactive");
        }
        route.signal.is_resolved()
    }

    fn fail(&mut self) {
        if let Some(route) = &self.active {
            route.signal.fail();
        }
    }

    fn completion(&self) -> Option<Completion> {
        self.active.as_ref().map(|r| r.signal.completion())
    }
}

impl std::fmt::Debug for RouteSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteSubscriber")
            .field("name", &self.name())
            .field("counts", &self.counts)
            .finish()
    }
}
