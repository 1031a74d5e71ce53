//! # Interactivity subscriber trait.
//!
//! A subscriber is an aggregation point: it tallies which named reporters
//! became interactive beneath it and resolves a [`Completion`] once its
//! predicate holds.
//!
//! ## Rules
//! - Counts change only through [`Subscriber::child_became_interactive`] and
//!   [`Subscriber::child_became_non_interactive`].
//! - Every count change is followed by [`Subscriber::check_interactivity`] in
//!   the same step (the registry guarantees this).

use crate::reporter::Reporter;

use super::counts::{Query, ReporterCounts};
use super::signal::Completion;

/// Shared behavior of component and route subscribers.
pub trait Subscriber {
    /// Current reporter tally.
    fn counts(&self) -> &ReporterCounts;

    /// Mutable reporter tally.
    fn counts_mut(&mut self) -> &mut ReporterCounts;

    /// Evaluates the predicate and resolves the completion when it holds.
    ///
    /// Returns `true` if the subscriber is resolved after the check.
    fn check_interactivity(&mut self) -> bool;

    /// Fails the pending completion after the predicate panicked.
    fn fail(&mut self);

    /// Read handle for the current subscription, if any.
    fn completion(&self) -> Option<Completion>;

    /// Records that `reporter` became interactive.
    fn child_became_interactive(&mut self, reporter: &dyn Reporter) {
        let name = reporter.reporting_name();
        let count = self.counts_mut().increment(&name);
        tracing::trace!(reporter = %name, count, "child became interactive");
    }

    /// Records that `reporter` is no longer interactive.
    fn child_became_non_interactive(&mut self, reporter: &dyn Reporter) {
        let name = reporter.reporting_name();
        let count = self.counts_mut().decrement(&name);
        tracing::trace!(reporter = %name, count, "child became non-interactive");
    }

    /// Query over the current tally.
    fn query(&self) -> Query<'_> {
        self.counts().query()
    }
}
