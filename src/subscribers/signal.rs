//! # Single-resolution completion signal.
//!
//! [`CompletionSignal`] is the write side owned by a subscriber; [`Completion`]
//! is the read side handed to callers. Internally a [`tokio::sync::watch`]
//! channel carrying the signal state:
//!
//! ```text
//! CompletionSignal ── resolve() ──► watch<State> ──► Completion (cloneable, many readers)
//!        ├── fail() ─────────────────────────────────► Err(PredicatePanicked)
//!        └── dropped while pending ──────────────────► Err(Cancelled)
//! ```
//!
//! ## Rules
//! - The signal leaves `Pending` at most once; later `resolve()`/`fail()` calls are no-ops.
//! - A settled value stays observable after the signal is dropped.
//! - Dropping a pending signal cancels every outstanding [`Completion`].
//! - Nothing here needs a running executor; awaiting does.

use std::future::IntoFuture;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::error::InteractivityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Resolved,
    Failed,
}

/// Write side: set-once, owned by exactly one subscriber.
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<State>,
    subscriber: Arc<str>,
}

impl CompletionSignal {
    /// Creates a pending signal for the named subscriber.
    pub fn new(subscriber: impl Into<Arc<str>>) -> Self {
        let (tx, _rx) = watch::channel(State::Pending);
        Self {
            tx,
            subscriber: subscriber.into(),
        }
    }

    fn settle(&self, to: State) -> bool {
        self.tx.send_if_modified(|state| {
            if *state == State::Pending {
                *state = to;
                true
            } else {
                false
            }
        })
    }

    /// Resolves the signal.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn resolve(&self) -> bool {
        self.settle(State::Resolved)
    }

    /// Fails the signal after the predicate panicked.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn fail(&self) -> bool {
        self.settle(State::Failed)
    }

    /// Returns `true` once [`resolve`](Self::resolve) has been called.
    pub fn is_resolved(&self) -> bool {
        *self.tx.borrow() == State::Resolved
    }

    /// Returns `true` once [`fail`](Self::fail) has been called.
    pub fn is_failed(&self) -> bool {
        *self.tx.borrow() == State::Failed
    }

    /// Creates a new read handle.
    pub fn completion(&self) -> Completion {
        Completion {
            rx: self.tx.subscribe(),
            subscriber: Arc::clone(&self.subscriber),
        }
    }

    /// Name or id of the owning subscriber.
    pub fn subscriber(&self) -> &str {
        &self.subscriber
    }
}

/// Read side: resolves with `Ok(())` once the predicate is satisfied.
///
/// Can be awaited directly (`completion.await`) or through [`Completion::wait`].
#[derive(Debug, Clone)]
pub struct Completion {
    rx: watch::Receiver<State>,
    subscriber: Arc<str>,
}

impl Completion {
    /// Returns `true` if the signal has already resolved.
    pub fn is_resolved(&self) -> bool {
        *self.rx.borrow() == State::Resolved
    }

    /// Name or id of the subscriber this completion belongs to.
    pub fn subscriber(&self) -> &str {
        &self.subscriber
    }

    /// Waits for resolution.
    ///
    /// Returns [`InteractivityError::PredicateFailed`] if the predicate
    /// panicked, and [`InteractivityError::Cancelled`] if the owning subscriber
    /// was dropped (unsubscribed or replaced) while pending.
    pub async fn wait(mut self) -> Result<(), InteractivityError> {
        let settled = self
            .rx
            .wait_for(|state| *state != State::Pending)
            .await
            .map(|state| *state);
        match settled {
            Ok(State::Resolved) => Ok(()),
            Ok(_) => Err(InteractivityError::PredicateFailed {
                subscriber: self.subscriber.to_string(),
            }),
            Err(_) => Err(InteractivityError::Cancelled {
                subscriber: self.subscriber.to_string(),
            }),
        }
    }
}

impl IntoFuture for Completion {
    type Output = Result<(), InteractivityError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}
