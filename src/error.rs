//! Error types used by the interactivity engine and its lifecycle drivers.
//!
//! This module defines a single enum, [`InteractivityError`], covering:
//!
//! - **contract violations** raised while building a subscription
//!   ([`InteractivityError::MissingPredicate`], [`InteractivityError::PredicateDeclared`]);
//! - **subscription failures** observed by callers awaiting a
//!   [`Completion`](crate::Completion) ([`InteractivityError::Cancelled`]);
//! - **predicate failures**, when a subscriber's predicate panics
//!   ([`InteractivityError::PredicateFailed`]);
//! - **configuration** errors ([`InteractivityError::Config`]).
//!
//! None of these errors ever propagate into rendering: drivers convert them into
//! tracked error events or drop them silently.

use thiserror::Error;

/// # Errors produced by the interactivity engine.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractivityError {
    /// A component subscription was requested without an `is_interactive` predicate.
    #[error("subscriber {id:?} must provide an is_interactive predicate")]
    MissingPredicate {
        /// Subscription id of the offending component.
        id: String,
    },

    /// A component that declares a predicate tried to report itself interactive.
    #[error("do not report interactive when is_interactive is defined: {reporter}")]
    PredicateDeclared {
        /// Reporting name of the offending component.
        reporter: String,
    },

    /// The subscription was torn down before its predicate was satisfied.
    #[error("subscription {subscriber:?} cancelled before becoming interactive")]
    Cancelled {
        /// Subscriber name or id.
        subscriber: String,
    },

    /// The interactivity predicate panicked; the subscription was torn down.
    #[error("is_interactive predicate of {subscriber:?} panicked")]
    PredicateFailed {
        /// Subscriber name or id.
        subscriber: String,
    },

    /// The configuration document could not be parsed.
    #[error("invalid interactivity config: {reason}")]
    Config {
        /// Parser message.
        reason: String,
    },
}

impl InteractivityError {
    /// Returns a short stable label (snake_case) for use in logs/tracking.
    ///
    /// # Example
    /// ```
    /// use interactivity::InteractivityError;
    ///
    /// let err = InteractivityError::Cancelled { subscriber: "index".into() };
    /// assert_eq!(err.as_label(), "subscription_cancelled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            InteractivityError::MissingPredicate { .. } => "missing_predicate",
            InteractivityError::PredicateDeclared { .. } => "predicate_declared",
            InteractivityError::Cancelled { .. } => "subscription_cancelled",
            InteractivityError::PredicateFailed { .. } => "predicate_failed",
            InteractivityError::Config { .. } => "invalid_config",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            InteractivityError::MissingPredicate { id } => format!("missing predicate: {id}"),
            InteractivityError::PredicateDeclared { reporter } => {
                format!("predicate declared: {reporter}")
            }
            InteractivityError::Cancelled { subscriber } => format!("cancelled: {subscriber}"),
            InteractivityError::PredicateFailed { subscriber } => {
                format!("predicate failed: {subscriber}")
            }
            InteractivityError::Config { reason } => format!("config: {reason}"),
        }
    }

    /// Indicates whether the error is a programmer error (broken construction contract).
    ///
    /// Contract violations are never recoverable; everything else degrades to
    /// "instrumentation didn't fire".
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            InteractivityError::MissingPredicate { .. } | InteractivityError::PredicateDeclared { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let err = InteractivityError::MissingPredicate { id: "x".into() };
        assert_eq!(err.as_label(), "missing_predicate");
        assert!(err.is_contract_violation());

        let err = InteractivityError::Config { reason: "eof".into() };
        assert_eq!(err.as_message(), "config: eof");
        assert!(!err.is_contract_violation());
    }
}
