//! # Component subscriber.
//!
//! Created by [`InteractivityRegistry::subscribe_component`](crate::InteractivityRegistry::subscribe_component)
//! for a component that declares an `is_interactive` predicate. It checks
//! itself at construction, so a vacuously-true predicate resolves without
//! waiting for any child.

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::InteractivityError;

use super::counts::{Predicate, Query, ReporterCounts};
use super::signal::{Completion, CompletionSignal};
use super::subscriber::Subscriber;

/// Request to subscribe a component.
///
/// ## Example
/// ```rust
/// use interactivity::ComponentSubscription;
///
/// let spec = ComponentSubscription::new("<app@component:feed::ember3>")
///     .with_name("feed")
///     .with_predicate(|q| q.is_interactive_count("feed-item", 2));
/// assert_eq!(spec.id(), "<app@component:feed::ember3>");
/// ```
#[derive(Clone)]
pub struct ComponentSubscription {
    id: String,
    name: Option<String>,
    predicate: Option<Predicate>,
}

impl ComponentSubscription {
    /// Starts a subscription request for the component with the given unique id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            predicate: None,
        }
    }

    /// Sets the reporting name (used in logs).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
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

    /// Unique subscription id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Borrowed(&self.id),
        }
    }
}

/// Subscriber bound to one component instance and one predicate.
pub struct ComponentSubscriber {
    id: String,
    counts: ReporterCounts,
    predicate: Predicate,
    signal: CompletionSignal,
}

impl ComponentSubscriber {
    /// Builds the subscriber and runs the first interactivity check.
    ///
    /// Fails with [`InteractivityError::MissingPredicate`] if the request has
    /// no predicate.
    pub fn new(spec: ComponentSubscription) -> Result<Self, InteractivityError> {
        let ComponentSubscription { id, name, predicate } = spec;
        let Some(predicate) = predicate else {
            return Err(InteractivityError::MissingPredicate { id });
        };

        let signal = CompletionSignal::new(name.unwrap_or_else(|| id.clone()));
        let mut subscriber = Self {
            id,
            counts: ReporterCounts::new(),
            predicate,
            signal,
        };
        subscriber.check_interactivity();
        Ok(subscriber)
    }

    /// Unique subscription id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` once the predicate has held.
    pub fn is_resolved(&self) -> bool {
        self.signal.is_resolved()
    }
}

impl Subscriber for ComponentSubscriber {
    fn counts(&self) -> &ReporterCounts {
        &self.counts
    }

    fn counts_mut(&mut self) -> &mut ReporterCounts {
        &mut self.counts
    }

    fn check_interactivity(&mut self) -> bool {
        if self.signal.is_resolved() {
            return true;
        }
        if self.signal.is_failed() {
            return false;
        }
        if (self.predicate)(&self.counts.query()) {
            self.signal.resolve();
            tracing::debug!(id = %self.id, "component subscriber became interactive");
        }
        self.signal.is_resolved()
    }

    fn fail(&mut self) {
        self.signal.fail();
    }

    fn completion(&self) -> Option<Completion> {
        Some(self.signal.completion())
    }
}

impl std::fmt::Debug for ComponentSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSubscriber")
            .field("id", &self.id)
            .field("counts", &self.counts)
            .field("resolved", &self.signal.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{ViewNode, component_identity};
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn missing_predicate_fails_fast() {
        let err = ComponentSubscriber::new(ComponentSubscription::new("c1")).unwrap_err();
        assert_eq!(err, InteractivityError::MissingPredicate { id: "c1".into() });
    }

    #[test]
    fn vacuous_predicate_resolves_at_construction() {
        let sub = ComponentSubscriber::new(ComponentSubscription::new("c1").with_predicate(|_| true))
            .expect("predicate given");
        assert!(sub.is_resolved());
        let completion = sub.completion().expect("component always has one");
        assert_eq!(completion.wait().now_or_never(), Some(Ok(())));
    }

    #[test]
    fn checks_are_noops_after_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut sub = ComponentSubscriber::new(ComponentSubscription::new("c1").with_predicate(move |q| {
            seen.fetch_add(1, Ordering::SeqCst);
            q.is_interactive("child")
        }))
        .expect("predicate given");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let child = ViewNode::root(component_identity("app", "child", "e1"));
        sub.child_became_interactive(&*child);
        assert!(sub.check_interactivity());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        sub.child_became_non_interactive(&*child);
        assert!(sub.check_interactivity());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
