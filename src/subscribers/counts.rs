//! # Reporter counts and the query handed to predicates.
//!
//! [`ReporterCounts`] maps a reporting name to the number of instances that
//! are currently interactive. Predicates never see the map; they receive a
//! read-only [`Query`].
//!
//! ## Rules
//! - Counts are keyed by reporting name, never by subscription id.
//! - A decrement never creates an entry and never goes below zero.
//! - An absent name behaves as count 0.

use std::collections::HashMap;
use std::sync::Arc;

/// Per-subscriber tally of interactive reporters.
#[derive(Debug, Default, Clone)]
pub struct ReporterCounts {
    counts: HashMap<String, u32>,
}

impl ReporterCounts {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more interactive instance of `name`; returns the new count.
    pub fn increment(&mut self, name: &str) -> u32 {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Records one fewer interactive instance of `name`; returns the new count.
    ///
    /// Absent or zero entries are left untouched.
    pub fn decrement(&mut self, name: &str) -> u32 {
        match self.counts.get_mut(name) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *count
            }
            _ => 0,
        }
    }

    /// Current count for `name` (0 when absent).
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Returns `true` if any name was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Borrows the tally as a predicate query.
    pub fn query(&self) -> Query<'_> {
        Query { counts: self }
    }
}

/// Read-only view of a subscriber's counts, passed to its predicate.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    counts: &'a ReporterCounts,
}

impl Query<'_> {
    /// Returns `true` if at least one instance of `name` is interactive.
    pub fn is_interactive(&self, name: &str) -> bool {
        self.counts.count(name) > 0
    }

    /// Returns `true` if exactly `count` instances of `name` are interactive.
    pub fn is_interactive_count(&self, name: &str, count: u32) -> bool {
        self.counts.count(name) == count
    }

    /// Returns `true` if every name in `names` is interactive.
    pub fn all<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().all(|n| self.is_interactive(n.as_ref()))
    }

    /// Raw count for `name`.
    pub fn count(&self, name: &str) -> u32 {
        self.counts.count(name)
    }
}

/// Interactivity predicate: `true` once the subscriber's conditions are met.
pub type Predicate = Arc<dyn Fn(&Query<'_>) -> bool + Send + Sync>;

/// Wraps a closure as a [`Predicate`].
pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&Query<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Predicate satisfied once every listed reporter is interactive.
///
/// An empty list is vacuously satisfied.
pub fn all_of<I, S>(names: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    predicate(move |q| q.all(&names))
}

/// Predicate satisfied when exactly `count` instances of `name` are interactive.
pub fn exactly(name: impl Into<String>, count: u32) -> Predicate {
    let name = name.into();
    predicate(move |q| q.is_interactive_count(&name, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_count_tracks_any_sequence() {
        let mut counts = ReporterCounts::new();
        let ops = [true, true, false, true, false, false, false, true];
        let mut expected: u32 = 0;

        for up in ops {
            if up {
                expected += 1;
                assert_eq!(counts.increment("a"), expected);
            } else {
                expected = expected.saturating_sub(1);
                assert_eq!(counts.decrement("a"), expected);
            }
            let q = counts.query();
            assert_eq!(q.is_interactive("a"), expected > 0);
            for k in 0..4 {
                assert_eq!(q.is_interactive_count("a", k), expected == k);
            }
        }
    }

    #[test]
    fn decrement_never_creates_entries() {
        let mut counts = ReporterCounts::new();
        assert_eq!(counts.decrement("ghost"), 0);
        assert!(counts.is_empty());
        assert_eq!(counts.count("ghost"), 0);
    }

    #[test]
    fn absent_name_is_count_zero() {
        let counts = ReporterCounts::new();
        let q = counts.query();
        assert!(!q.is_interactive("x"));
        assert!(q.is_interactive_count("x", 0));
    }

    #[test]
    fn helpers_compose() {
        let mut counts = ReporterCounts::new();
        let both = all_of(["a", "b"]);
        let two_items = exactly("item", 2);
        let none: Predicate = all_of(Vec::<String>::new());

        assert!(none(&counts.query()));
        assert!(!both(&counts.query()));

        counts.increment("a");
        counts.increment("item");
        assert!(!both(&counts.query()));
        assert!(!two_items(&counts.query()));

        counts.increment("b");
        counts.increment("item");
        assert!(both(&counts.query()));
        assert!(two_items(&counts.query()));
    }
}
